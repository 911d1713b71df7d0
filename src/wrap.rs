//! Obstacle-aware text wrapping for card fronts.
//!
//! Body text is set in Courier, so glyph advances are uniform (0.6 em) and
//! line width can be measured without consulting font tables. Lines whose
//! vertical band overlaps the QR code's footprint are narrowed so the text
//! deflects around it.

/// Points to millimetres
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Line height as a multiple of the font size
pub const LINE_SPACING: f32 = 1.2;

/// Courier glyph advance in em
const COURIER_ADVANCE: f32 = 0.6;

/// Gap kept between text and the obstacle's left edge
const OBSTACLE_BUFFER_MM: f32 = 2.0;

/// Narrowest a line is ever clamped to
const MIN_LINE_WIDTH_MM: f32 = 1.0;

/// Rendered width of `text` in mm at the given Courier size in points.
pub fn string_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * COURIER_ADVANCE * PT_TO_MM
}

/// Rectangle the text must flow around, in mm page coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    fn top(&self) -> f32 {
        self.bottom + self.height
    }
}

/// A positioned line of wrapped text: baseline y in mm, then the text.
pub type WrappedLine = (f32, String);

/// Greedily wrap `text` into lines of at most `content_width` mm, starting at
/// baseline `origin_y` and advancing downward one line height per line.
///
/// Paragraphs are split on '\n' and separated by one blank line. A line whose
/// band (one line height below its baseline) overlaps the obstacle's vertical
/// span is narrowed to stop short of the obstacle's left edge, provided the
/// text origin is left of the obstacle. A word that cannot fit even the
/// narrowed width is placed alone on its line and may visually overflow.
pub fn wrap_text(
    text: &str,
    origin_x: f32,
    origin_y: f32,
    content_width: f32,
    obstacle: Option<&Obstacle>,
    font_size: f32,
) -> Vec<WrappedLine> {
    let line_height = font_size * LINE_SPACING * PT_TO_MM;
    let space_width = string_width_mm(" ", font_size);

    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut baseline = origin_y;

    let paragraphs: Vec<&str> = text.split('\n').collect();
    let last_para = paragraphs.len() - 1;

    for (para_idx, para) in paragraphs.iter().enumerate() {
        let mut line = String::new();
        let mut started = false;

        for word in para.split_whitespace() {
            started = true;
            let max_width =
                effective_width(baseline, line_height, origin_x, content_width, obstacle);

            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };

            if string_width_mm(&candidate, font_size) + space_width < max_width || line.is_empty() {
                line = candidate;
            } else {
                lines.push((baseline, std::mem::take(&mut line)));
                baseline -= line_height;
                line = word.to_string();
            }
        }

        if started {
            lines.push((baseline, line));
        }
        // An empty paragraph still advances one line
        baseline -= line_height;

        // Blank separator line between paragraphs, never after the last
        if para_idx < last_para {
            baseline -= line_height;
        }
    }

    lines
}

/// Usable width for the line currently being built at `baseline`.
fn effective_width(
    baseline: f32,
    line_height: f32,
    origin_x: f32,
    content_width: f32,
    obstacle: Option<&Obstacle>,
) -> f32 {
    let Some(obs) = obstacle else {
        return content_width;
    };

    // The line occupies roughly one line height below its baseline
    let line_bottom = baseline - line_height;
    let line_top = baseline;

    let overlaps = line_bottom < obs.top() && line_top > obs.bottom;
    if overlaps && origin_x < obs.left {
        let available = obs.left - origin_x - OBSTACLE_BUFFER_MM;
        content_width.min(available).max(MIN_LINE_WIDTH_MM)
    } else {
        content_width
    }
}
