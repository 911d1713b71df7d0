use clap::ValueEnum;

/// A4 dimensions in mm
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// US Letter dimensions in mm
pub const LETTER_WIDTH_MM: f32 = 215.9;
pub const LETTER_HEIGHT_MM: f32 = 279.4;

/// Card dimensions in mm
pub const CARD_WIDTH_MM: f32 = 100.0;
pub const CARD_HEIGHT_MM: f32 = 100.0;

/// QR code footprint on a card front
pub const QR_SIZE_MM: f32 = 25.0;

/// Minimum page margins
pub const MARGIN_X_MM: f32 = 10.0;
pub const MARGIN_Y_MM: f32 = 10.0;

/// Spacing between cards in the grid
pub const SPACING_MM: f32 = 10.0;

/// Extra vertical allowance per row when a batch carries setup notes
pub const NOTE_LINE_MM: f32 = 5.0;

/// Side padding inside a card
pub const CARD_PADDING_MM: f32 = 5.0;

/// Inset of the QR code from the card's bottom-right corner
pub const QR_INSET_MM: f32 = 2.5;

/// Font sizes in points
pub const TITLE_FONT_SIZE: f32 = 14.0;
pub const BODY_FONT_SIZE: f32 = 12.0;
pub const NOTE_FONT_SIZE: f32 = 9.0;
pub const PLACEHOLDER_FONT_SIZE: f32 = 10.0;
pub const BACK_FONT_SIZE: f32 = 72.0;

/// Page size variants
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (A4_WIDTH_MM, A4_HEIGHT_MM),
            PageSize::Letter => (LETTER_WIDTH_MM, LETTER_HEIGHT_MM),
        }
    }
}

/// Page and card measurements driving the grid tiler, all in mm.
#[derive(Copy, Clone, Debug)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub spacing: f32,
    pub qr_size: f32,
}

impl PageGeometry {
    pub fn for_page_size(size: PageSize) -> Self {
        let (page_width, page_height) = size.dimensions();
        Self {
            page_width,
            page_height,
            card_width: CARD_WIDTH_MM,
            card_height: CARD_HEIGHT_MM,
            margin_x: MARGIN_X_MM,
            margin_y: MARGIN_Y_MM,
            spacing: SPACING_MM,
            qr_size: QR_SIZE_MM,
        }
    }
}
