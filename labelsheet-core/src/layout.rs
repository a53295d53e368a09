// Rows are one label tall and one sheet wide. Labels are spread with equal
// gaps before the first, between each pair, and after the last.

use crate::config::SheetConfig;
use crate::units::mm_to_px;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub columns: usize,
    pub label_width_px: u32,
    pub label_height_px: u32,
    pub sheet_width_px: u32,
    pub vertical_gap_px: u32,
    pub horizontal_gap_px: u32,
}

impl SheetLayout {
    pub fn from_config(config: &SheetConfig) -> Self {
        let label_width_px = mm_to_px(config.label_width_mm, config.dpi);
        let sheet_width_px = mm_to_px(config.sheet_width_mm, config.dpi);
        Self {
            columns: config.columns,
            label_width_px,
            label_height_px: mm_to_px(config.label_height_mm, config.dpi),
            sheet_width_px,
            vertical_gap_px: mm_to_px(config.vertical_gap_mm, config.dpi),
            horizontal_gap_px: horizontal_gap(sheet_width_px, label_width_px, config.columns),
        }
    }

    pub fn row_count(&self, total_labels: usize) -> usize {
        row_count(total_labels, self.columns)
    }

    pub fn row_size(&self) -> (u32, u32) {
        (self.sheet_width_px, self.label_height_px)
    }

    // Left edge of the label in column `col`.
    pub fn slot_x(&self, col: usize) -> u32 {
        let pitch = self.label_width_px.saturating_add(self.horizontal_gap_px);
        pitch
            .saturating_mul(to_u32(col))
            .saturating_add(self.horizontal_gap_px)
    }

    // Record indices that belong to `row`, clipped to `total_labels`.
    pub fn row_slots(&self, row: usize, total_labels: usize) -> impl Iterator<Item = (usize, usize)> {
        let first = row.saturating_mul(self.columns);
        (0..self.columns)
            .map(move |col| (col, first.saturating_add(col)))
            .filter(move |(_, index)| *index < total_labels)
    }
}

pub fn row_count(total_labels: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    total_labels.div_ceil(columns)
}

// Labels wider than the sheet leave no slack; the gap saturates at zero.
pub fn horizontal_gap(sheet_width_px: u32, label_width_px: u32, columns: usize) -> u32 {
    let columns = to_u32(columns);
    let used = label_width_px.saturating_mul(columns);
    sheet_width_px.saturating_sub(used) / columns.saturating_add(1)
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
