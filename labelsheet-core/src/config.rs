// The defaults describe the 102 mm roll with three 34x23 mm labels per row
// that the CLI prints on. Library callers can deserialize or build their own.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{SheetError, SheetResult};
use crate::units::mm_to_px;

pub const SHEET_WIDTH_MM: f64 = 102.0;
pub const LABEL_WIDTH_MM: f64 = 34.0;
pub const LABEL_HEIGHT_MM: f64 = 23.0;
pub const VERTICAL_GAP_MM: f64 = 4.0;
pub const COLUMNS: usize = 3;
pub const DPI: f64 = 300.0;
pub const ROW_FILE_PREFIX: &str = "row_";
// Upper bound keeps column arithmetic inside u32.
pub const MAX_COLUMNS: usize = 1024;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub sheet_width_mm: f64,
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    // Converted and reported, but rows are exactly one label tall.
    pub vertical_gap_mm: f64,
    pub columns: usize,
    pub dpi: f64,
    pub file_prefix: String,
    // Extra font loaded ahead of the system lookup.
    pub font_file: Option<PathBuf>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_width_mm: SHEET_WIDTH_MM,
            label_width_mm: LABEL_WIDTH_MM,
            label_height_mm: LABEL_HEIGHT_MM,
            vertical_gap_mm: VERTICAL_GAP_MM,
            columns: COLUMNS,
            dpi: DPI,
            file_prefix: ROW_FILE_PREFIX.to_string(),
            font_file: None,
        }
    }
}

impl SheetConfig {
    // Reject constants that would produce an empty pixel buffer.
    pub fn validate(&self) -> SheetResult<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(SheetError::InvalidConfig(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(SheetError::InvalidConfig(format!(
                "columns must be in 1..={MAX_COLUMNS}, got {}",
                self.columns
            )));
        }
        let checks = [
            ("label width", self.label_width_mm),
            ("label height", self.label_height_mm),
            ("sheet width", self.sheet_width_mm),
        ];
        for (what, mm) in checks {
            if mm_to_px(mm, self.dpi) == 0 {
                return Err(SheetError::InvalidConfig(format!(
                    "{what} of {mm} mm is smaller than one pixel"
                )));
            }
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(SheetError::InvalidConfig(format!(
                "file prefix {:?} must not contain path separators",
                self.file_prefix
            )));
        }
        Ok(())
    }
}
