use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read card deck: {0}")]
    DeckError(String),
    #[error("Failed to generate QR code: {0}")]
    QrError(String),
    #[error("Failed to process image: {0}")]
    ImageError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
