// clue-cards: Generate printable clue card PDFs and QR codes for a scavenger hunt

use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod card;
mod config;
mod error;
mod layout;
mod output;
mod qr;
mod render;
mod wrap;

use card::Card;
use config::{PageGeometry, PageSize};
use error::AppError;
use render::RenderOptions;

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable clue cards for a scavenger hunt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the card deck to a PDF
    Pdf(PdfArgs),
    /// Generate QR code images for the hint pages
    Qr(QrArgs),
}

#[derive(Args, Debug)]
struct PdfArgs {
    /// Card deck file (JSON array of cards); built-in deck when omitted
    #[arg(short, long)]
    cards: Option<String>,

    /// Output PDF path
    #[arg(short, long, default_value = "clue_cards.pdf")]
    output: PathBuf,

    /// Page size
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSize,

    /// Skip the mirrored back pages
    #[arg(long)]
    single_sided: bool,

    /// Folder containing the QR code images
    #[arg(long, default_value = "qr-codes")]
    qr_dir: PathBuf,

    /// Folder containing the puzzle images
    #[arg(long, default_value = "puzzles")]
    images_dir: PathBuf,

    /// TTF font used for titles containing non-ASCII glyphs
    #[arg(long)]
    title_font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QrArgs {
    /// Card deck file (JSON array of cards); built-in deck when omitted
    #[arg(short, long)]
    cards: Option<String>,

    /// Folder the QR images are written into
    #[arg(long, default_value = "qr-codes")]
    qr_dir: PathBuf,

    /// Base URL of the hint pages
    #[arg(long, default_value = qr::DEFAULT_BASE_URL)]
    base_url: String,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Pdf(args) => run_pdf(args),
        Command::Qr(args) => run_qr(args),
    }
}

fn load_cards(path: &Option<String>) -> Result<Vec<Card>, AppError> {
    match path {
        Some(p) => card::load_deck(p),
        None => Ok(card::sample_deck()),
    }
}

fn run_pdf(args: PdfArgs) -> Result<(), AppError> {
    let cards = load_cards(&args.cards)?;
    let geo = PageGeometry::for_page_size(args.page_size);
    let opts = RenderOptions {
        double_sided: !args.single_sided,
        qr_dir: args.qr_dir,
        images_dir: args.images_dir,
        title_font: args.title_font,
    };

    let doc = render::render_deck(&cards, &geo, &opts)?;

    let (file, used_path) = output::create_with_fallback(&args.output)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    let pages = render::page_count(cards.len(), &geo, opts.double_sided);
    println!("✓ Generated: {}", used_path.display());
    println!("  Cards: {}", cards.len());
    println!(
        "  Pages: {} ({})",
        pages,
        if opts.double_sided {
            "double-sided"
        } else {
            "single-sided"
        }
    );

    Ok(())
}

fn run_qr(args: QrArgs) -> Result<(), AppError> {
    let cards = load_cards(&args.cards)?;
    let written = qr::generate_qr_codes(&cards, &args.qr_dir, &args.base_url)?;
    println!("✓ Generated {} QR code(s) in {}", written, args.qr_dir.display());
    Ok(())
}
