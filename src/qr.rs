use std::path::Path;

use ::image::{DynamicImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::card::Card;
use crate::error::AppError;

/// Hint-page base URL encoded into the QR codes.
pub const DEFAULT_BASE_URL: &str = "https://s-c-e-t.github.io/m-s-i-n/clues/";

/// Hint-page URL for a QR image filename: `clue_01_qr.png` points at
/// `<base>clue_01.html`.
pub fn hint_url(base_url: &str, qr_filename: &str) -> String {
    let stem = qr_filename.strip_suffix(".png").unwrap_or(qr_filename);
    let slug = stem.strip_suffix("_qr").unwrap_or(stem);
    format!("{}{}.html", base_url, slug)
}

/// Generate one QR PNG per card that references one, into `qr_dir`.
/// Returns the number of files written.
///
/// High error correction keeps the codes scannable when partially covered
/// or damaged in print.
pub fn generate_qr_codes(
    cards: &[Card],
    qr_dir: &Path,
    base_url: &str,
) -> Result<usize, AppError> {
    std::fs::create_dir_all(qr_dir)?;

    let mut written = 0;
    for card in cards {
        let Some(name) = card.qr.as_deref() else {
            continue;
        };

        let url = hint_url(base_url, name);
        let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
            .map_err(|e| AppError::QrError(e.to_string()))?;
        let image = code.render::<Luma<u8>>().quiet_zone(false).build();

        let path = qr_dir.join(name);
        DynamicImage::ImageLuma8(image)
            .save(&path)
            .map_err(|e| AppError::QrError(format!("{}: {}", path.display(), e)))?;

        println!("Saved {}", path.display());
        written += 1;
    }

    Ok(written)
}
