use crate::config::{PageGeometry, NOTE_LINE_MM};

/// Position assigned to one card on a page, coordinates in mm from the
/// bottom-left page corner to the card's bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
}

/// Placement of one batch of cards on a page, centered as a block.
#[derive(Debug)]
pub struct BatchLayout {
    pub slots: Vec<Slot>,
    /// Columns actually occupied by this batch (last batch may be partial)
    pub columns_used: usize,
    start_x: f32,
    step_x: f32,
}

impl BatchLayout {
    /// Mirrored position for the card's back: same row, column order flipped
    /// horizontally so duplex-printed backs line up with their fronts.
    pub fn back_slot(&self, front: &Slot) -> Slot {
        let back_col = (self.columns_used - 1) - front.col;
        Slot {
            row: front.row,
            col: back_col,
            x: self.start_x + back_col as f32 * self.step_x,
            y: front.y,
        }
    }
}

/// Partitions a card sequence into pages and assigns grid coordinates.
pub struct GridTiler {
    geo: PageGeometry,
}

impl GridTiler {
    pub fn new(geo: PageGeometry) -> Self {
        Self { geo }
    }

    /// How many cards fit horizontally, never less than 1.
    pub fn columns(&self) -> usize {
        let usable = self.geo.page_width - 2.0 * self.geo.margin_x;
        let cols = (usable / (self.geo.card_width + self.geo.spacing)).floor() as isize;
        cols.max(1) as usize
    }

    /// How many cards fit vertically, never less than 1.
    pub fn rows(&self) -> usize {
        let usable = self.geo.page_height - 2.0 * self.geo.margin_y;
        let rows = (usable / (self.geo.card_height + self.geo.spacing)).floor() as isize;
        rows.max(1) as usize
    }

    pub fn cards_per_page(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Lay out one batch (at most `cards_per_page` cards), centering the grid
    /// of occupied rows and columns on the page.
    ///
    /// When any card in the batch carries a setup note, one note line per row
    /// is reserved when sizing the grid. This is a deliberate approximation:
    /// the allowance applies batch-wide, not per row.
    pub fn layout_batch(&self, count: usize, any_note: bool) -> BatchLayout {
        let geo = &self.geo;
        let columns = self.columns();

        let actual_rows = count.div_ceil(columns);
        let columns_used = count.min(columns);

        let note_extra = if any_note { NOTE_LINE_MM } else { 0.0 };
        let grid_height = actual_rows as f32 * (geo.card_height + note_extra)
            + (actual_rows.saturating_sub(1)) as f32 * geo.spacing;
        let grid_width = columns_used as f32 * geo.card_width
            + (columns_used.saturating_sub(1)) as f32 * geo.spacing;

        let start_x = (geo.page_width - grid_width) / 2.0;
        let start_y = (geo.page_height + grid_height) / 2.0 - geo.card_height;

        let step_x = geo.card_width + geo.spacing;
        let step_y = geo.card_height + geo.spacing;

        let slots = (0..count)
            .map(|idx| {
                let row = idx / columns;
                let col = idx % columns;
                Slot {
                    row,
                    col,
                    x: start_x + col as f32 * step_x,
                    y: start_y - row as f32 * step_y,
                }
            })
            .collect();

        BatchLayout {
            slots,
            columns_used,
            start_x,
            step_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    /// 2 columns x 3 rows: floor(190 / 90) = 2, floor(277 / 90) = 3
    fn two_by_three() -> PageGeometry {
        PageGeometry {
            page_width: 210.0,
            page_height: 297.0,
            card_width: 80.0,
            card_height: 80.0,
            margin_x: 10.0,
            margin_y: 10.0,
            spacing: 10.0,
            qr_size: 25.0,
        }
    }

    #[test]
    fn grid_clamps_to_one_when_card_exceeds_page() {
        let geo = PageGeometry {
            page_width: 210.0,
            page_height: 297.0,
            card_width: 500.0,
            card_height: 500.0,
            margin_x: 10.0,
            margin_y: 10.0,
            spacing: 10.0,
            qr_size: 25.0,
        };
        let tiler = GridTiler::new(geo);
        assert_eq!(tiler.columns(), 1);
        assert_eq!(tiler.rows(), 1);
        assert_eq!(tiler.cards_per_page(), 1);
    }

    #[test]
    fn slots_follow_row_major_order() {
        let tiler = GridTiler::new(two_by_three());
        let layout = tiler.layout_batch(6, false);
        for (idx, slot) in layout.slots.iter().enumerate() {
            assert_eq!(slot.row, idx / 2);
            assert_eq!(slot.col, idx % 2);
        }
        // All (row, col) pairs distinct
        for i in 0..6 {
            for j in (i + 1)..6 {
                let a = &layout.slots[i];
                let b = &layout.slots[j];
                assert!(a.row != b.row || a.col != b.col);
            }
        }
    }

    #[test]
    fn full_batch_is_centered() {
        let tiler = GridTiler::new(two_by_three());
        let layout = tiler.layout_batch(6, false);
        // grid: 2*80 + 10 = 170 wide, 3*80 + 2*10 = 260 tall
        assert!(approx(layout.slots[0].x, 20.0));
        assert!(approx(layout.slots[0].y, (297.0 + 260.0) / 2.0 - 80.0));
        // row 1, col 1
        assert!(approx(layout.slots[3].x, 110.0));
        assert!(approx(layout.slots[3].y, layout.slots[0].y - 90.0));
    }

    #[test]
    fn note_allowance_raises_the_grid() {
        let tiler = GridTiler::new(two_by_three());
        let without = tiler.layout_batch(6, false);
        let with = tiler.layout_batch(6, true);
        // 3 rows gain NOTE_LINE_MM each: grid 15mm taller, start_y 7.5mm higher
        assert!(approx(with.slots[0].y, without.slots[0].y + 7.5));
    }

    #[test]
    fn partial_batch_uses_occupied_columns_for_width() {
        let tiler = GridTiler::new(two_by_three());
        let layout = tiler.layout_batch(1, false);
        assert_eq!(layout.columns_used, 1);
        // single 80mm card centered: (210 - 80) / 2
        assert!(approx(layout.slots[0].x, 65.0));
    }

    #[test]
    fn back_mirror_flips_columns_per_row() {
        let tiler = GridTiler::new(two_by_three());
        let layout = tiler.layout_batch(6, false);
        for slot in &layout.slots {
            let back = layout.back_slot(slot);
            assert_eq!(back.row, slot.row);
            assert_eq!(back.col, 1 - slot.col);
            assert!(approx(back.y, slot.y));
        }
    }

    #[test]
    fn back_mirror_is_an_involution() {
        let tiler = GridTiler::new(two_by_three());
        for count in [1, 2, 3, 5, 6] {
            let layout = tiler.layout_batch(count, false);
            for slot in &layout.slots {
                let twice = layout.back_slot(&layout.back_slot(slot));
                assert_eq!(twice.col, slot.col);
                assert!(approx(twice.x, slot.x));
            }
        }
    }

    #[test]
    fn ten_cards_split_into_batches_of_six_and_four() {
        let tiler = GridTiler::new(two_by_three());
        let per_page = tiler.cards_per_page();
        assert_eq!(per_page, 6);

        let deck_len = 10;
        let batch_sizes: Vec<usize> = (0..deck_len)
            .collect::<Vec<_>>()
            .chunks(per_page)
            .map(|b| b.len())
            .collect();
        assert_eq!(batch_sizes, vec![6, 4]);

        // Double-sided: each batch emits a front and a back page
        let pages: usize = batch_sizes.len() * 2;
        assert_eq!(pages, 4);

        // Second batch occupies 2 columns and 2 rows
        let layout = tiler.layout_batch(4, false);
        assert_eq!(layout.columns_used, 2);
        assert_eq!(layout.slots.last().unwrap().row, 1);
    }
}
