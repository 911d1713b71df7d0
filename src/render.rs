use std::fs::File;
use std::path::{Path, PathBuf};

use ::image::DynamicImage;
use printpdf::*;

use crate::card::{Card, CardContent};
use crate::config::{
    PageGeometry, BACK_FONT_SIZE, BODY_FONT_SIZE, CARD_PADDING_MM, NOTE_FONT_SIZE,
    PLACEHOLDER_FONT_SIZE, QR_INSET_MM, TITLE_FONT_SIZE,
};
use crate::error::AppError;
use crate::layout::{GridTiler, Slot};
use crate::wrap::{string_width_mm, wrap_text, Obstacle, PT_TO_MM};

/// Empirical cap-height to font-size ratio used to center the back label
/// vertically without querying font ascent/descent metrics.
const BACK_LABEL_HEIGHT_RATIO: f32 = 0.7;

/// Rendering inputs beyond the page geometry.
pub struct RenderOptions {
    pub double_sided: bool,
    pub qr_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Optional TTF used for titles containing non-ASCII glyphs
    pub title_font: Option<PathBuf>,
}

struct Fonts {
    body: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    placeholder: IndirectFontRef,
    /// External font for titles with special glyphs, when registration succeeded
    title_special: Option<IndirectFontRef>,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference, opts: &RenderOptions) -> Result<Self, AppError> {
        let body = doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::CourierBold)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        let placeholder = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        // Font registration failure is never fatal: warn and fall back to the
        // builtin bold for every title.
        let mut title_special = None;
        if let Some(path) = &opts.title_font {
            match File::open(path) {
                Ok(file) => match doc.add_external_font(file) {
                    Ok(font) => title_special = Some(font),
                    Err(e) => eprintln!(
                        "Warning: could not register title font {}: {}",
                        path.display(),
                        e
                    ),
                },
                Err(e) => eprintln!(
                    "Warning: could not open title font {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        Ok(Fonts {
            body,
            bold,
            oblique,
            placeholder,
            title_special,
        })
    }

    fn for_title<'a>(&'a self, title: &str) -> &'a IndirectFontRef {
        match &self.title_special {
            Some(font) if title.chars().any(|c| !c.is_ascii()) => font,
            _ => &self.bold,
        }
    }
}

/// Render the full deck into a new PDF document. Pages come in
/// front/back pairs per batch when double-sided output is enabled.
pub fn render_deck(
    cards: &[Card],
    geo: &PageGeometry,
    opts: &RenderOptions,
) -> Result<PdfDocumentReference, AppError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Clue Cards",
        Mm(geo.page_width),
        Mm(geo.page_height),
        "Layer 1",
    );

    let fonts = Fonts::load(&doc, opts)?;
    let tiler = GridTiler::new(*geo);
    let per_page = tiler.cards_per_page();

    let mut first_page = true;
    for batch in cards.chunks(per_page) {
        let any_note = batch.iter().any(|c| c.has_note());
        let layout = tiler.layout_batch(batch.len(), any_note);

        let front_layer = if first_page {
            first_page = false;
            doc.get_page(page1).get_layer(layer1)
        } else {
            add_page(&doc, geo)
        };

        for (card, slot) in batch.iter().zip(&layout.slots) {
            if let Some(note) = card.note.as_deref().filter(|n| !n.is_empty()) {
                draw_note(&front_layer, &fonts, note, slot, geo);
            }
            draw_front(&front_layer, &fonts, card, slot, geo, opts)?;
        }

        if opts.double_sided {
            let back_layer = add_page(&doc, geo);
            for (card, slot) in batch.iter().zip(&layout.slots) {
                let back = layout.back_slot(slot);
                draw_back(&back_layer, &fonts, card, &back, geo);
            }
        }
    }

    Ok(doc)
}

/// Total page count a render of `deck_len` cards will produce.
pub fn page_count(deck_len: usize, geo: &PageGeometry, double_sided: bool) -> usize {
    let per_page = GridTiler::new(*geo).cards_per_page();
    let batches = deck_len.div_ceil(per_page);
    if batches == 0 {
        // An empty deck still leaves the document's initial page in place
        return 1;
    }
    batches * if double_sided { 2 } else { 1 }
}

fn add_page(doc: &PdfDocumentReference, geo: &PageGeometry) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(geo.page_width), Mm(geo.page_height), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

// ============================================================================
// Card Fronts
// ============================================================================

fn draw_front(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    card: &Card,
    slot: &Slot,
    geo: &PageGeometry,
    opts: &RenderOptions,
) -> Result<(), AppError> {
    draw_card_border(layer, slot, geo);

    // Title with divider line underneath
    let title_y = slot.y + geo.card_height - 7.5;
    layer.use_text(
        &card.title,
        TITLE_FONT_SIZE,
        Mm(slot.x + CARD_PADDING_MM),
        Mm(title_y),
        fonts.for_title(&card.title),
    );
    let divider_y = title_y - 3.0;
    draw_line(
        layer,
        slot.x + CARD_PADDING_MM,
        divider_y,
        slot.x + geo.card_width - CARD_PADDING_MM,
        divider_y,
    );

    let content_top = title_y - 5.0;
    let content_width = geo.card_width - 2.0 * CARD_PADDING_MM;

    // The QR footprint participates in text layout, so resolve it before
    // drawing the body even though the image itself is embedded last.
    let qr_path = card.qr.as_ref().map(|name| opts.qr_dir.join(name));
    let qr_box = match &qr_path {
        Some(path) if path.exists() => Some(Obstacle {
            left: slot.x + geo.card_width - geo.qr_size - QR_INSET_MM,
            bottom: slot.y + QR_INSET_MM,
            width: geo.qr_size,
            height: geo.qr_size,
        }),
        _ => None,
    };

    match &card.content {
        CardContent::Image(name) => {
            let bottom = slot.y + QR_INSET_MM;
            let box_height = content_top - bottom;
            let path = opts.images_dir.join(name);
            if path.exists() {
                draw_fitted_image(
                    layer,
                    &path,
                    slot.x + CARD_PADDING_MM,
                    bottom,
                    content_width,
                    box_height,
                )?;
            } else {
                layer.use_text(
                    &format!("Missing: {}", name),
                    PLACEHOLDER_FONT_SIZE,
                    Mm(slot.x + CARD_PADDING_MM),
                    Mm(slot.y + geo.card_height / 2.0),
                    &fonts.placeholder,
                );
            }
        }
        CardContent::Text(text) => {
            let lines = wrap_text(
                text,
                slot.x + CARD_PADDING_MM,
                content_top - 5.0,
                content_width,
                qr_box.as_ref(),
                BODY_FONT_SIZE,
            );
            for (baseline, line) in lines {
                layer.use_text(
                    &line,
                    BODY_FONT_SIZE,
                    Mm(slot.x + CARD_PADDING_MM),
                    Mm(baseline),
                    &fonts.body,
                );
            }
        }
    }

    // QR code goes on last so it sits above any content that reaches it
    if let (Some(path), Some(qr_box)) = (&qr_path, &qr_box) {
        draw_exact_image(layer, path, qr_box.left, qr_box.bottom, qr_box.width)?;
    }

    Ok(())
}

fn draw_note(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    note: &str,
    slot: &Slot,
    geo: &PageGeometry,
) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
    layer.use_text(
        &format!("Setup Note: {}", note),
        NOTE_FONT_SIZE,
        Mm(slot.x + CARD_PADDING_MM),
        Mm(slot.y + geo.card_height + 2.0),
        &fonts.oblique,
    );
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

// ============================================================================
// Card Backs
// ============================================================================

fn draw_back(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    card: &Card,
    slot: &Slot,
    geo: &PageGeometry,
) {
    draw_card_border(layer, slot, geo);

    let Some(label) = card.back_label.as_deref().filter(|l| !l.is_empty()) else {
        return;
    };

    let text_width = string_width_mm(label, BACK_FONT_SIZE);
    let text_height = BACK_FONT_SIZE * BACK_LABEL_HEIGHT_RATIO * PT_TO_MM;
    let x = slot.x + (geo.card_width - text_width) / 2.0;
    let y = slot.y + (geo.card_height - text_height) / 2.0;
    layer.use_text(label, BACK_FONT_SIZE, Mm(x), Mm(y), &fonts.bold);
}

// ============================================================================
// Drawing Utilities
// ============================================================================

fn draw_card_border(layer: &PdfLayerReference, slot: &Slot, geo: &PageGeometry) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(1.0);

    let points = vec![
        (Point::new(Mm(slot.x), Mm(slot.y)), false),
        (Point::new(Mm(slot.x + geo.card_width), Mm(slot.y)), false),
        (
            Point::new(Mm(slot.x + geo.card_width), Mm(slot.y + geo.card_height)),
            false,
        ),
        (Point::new(Mm(slot.x), Mm(slot.y + geo.card_height)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: true,
    });
}

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

/// Embed an image scaled to fit the box, preserving aspect ratio, centered.
fn draw_fitted_image(
    layer: &PdfLayerReference,
    path: &Path,
    box_x: f32,
    box_y: f32,
    box_width: f32,
    box_height: f32,
) -> Result<(), AppError> {
    let img = ::image::open(path)
        .map_err(|e| AppError::ImageError(format!("{}: {}", path.display(), e)))?;
    let (px_w, px_h) = (img.width() as f32, img.height() as f32);
    let aspect = px_w / px_h;

    let mut draw_w = box_width;
    let mut draw_h = draw_w / aspect;
    if draw_h > box_height {
        draw_h = box_height;
        draw_w = draw_h * aspect;
    }

    let x = box_x + (box_width - draw_w) / 2.0;
    let y = box_y + (box_height - draw_h) / 2.0;
    embed_image(layer, &img, x, y, draw_w, true);
    Ok(())
}

/// Embed a square image (the QR code) at an exact physical size.
fn draw_exact_image(
    layer: &PdfLayerReference,
    path: &Path,
    x: f32,
    y: f32,
    size_mm: f32,
) -> Result<(), AppError> {
    let img = ::image::open(path)
        .map_err(|e| AppError::ImageError(format!("{}: {}", path.display(), e)))?;
    embed_image(layer, &img, x, y, size_mm, false);
    Ok(())
}

fn embed_image(
    layer: &PdfLayerReference,
    img: &DynamicImage,
    x: f32,
    y: f32,
    width_mm: f32,
    interpolate: bool,
) {
    let rgb_image = img.to_rgb8();
    let (width_px, height_px) = rgb_image.dimensions();
    let raw_pixels = rgb_image.into_raw();

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate,
        image_data: raw_pixels,
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the pixel width maps onto the requested physical width
    let dpi = (width_px as f32) / (width_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}
