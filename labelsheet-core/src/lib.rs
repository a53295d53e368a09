// Barcode label rows for a label roll: CSV in, rotated 300 DPI row PNGs out.

pub mod barcode;
mod config;
mod error;
pub mod fonts;
pub mod layout;
mod output;
mod record;
pub mod render;
mod sheet;
pub mod units;

pub use config::SheetConfig;
pub use error::{SheetError, SheetResult};
pub use layout::SheetLayout;
pub use output::{encode_png, write_png};
pub use record::{LabelRecord, parse_records, read_records};
pub use render::LabelRenderer;
pub use sheet::{SheetComposer, SheetReport, generate_row_images, rotate_clockwise};
