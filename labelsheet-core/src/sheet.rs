use std::path::{Path, PathBuf};
use tiny_skia::{Pixmap, PixmapPaint, Transform};
use tracing::{debug, info};

use crate::barcode::SYMBOLOGY;
use crate::config::SheetConfig;
use crate::error::{SheetError, SheetResult};
use crate::layout::SheetLayout;
use crate::output::write_png;
use crate::record::{LabelRecord, read_records};
use crate::render::LabelRenderer;
use crate::units::{fmt_mm, px_to_mm};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetReport {
    pub total_labels: usize,
    pub rows: usize,
    pub files: Vec<PathBuf>,
}

pub struct SheetComposer {
    config: SheetConfig,
    layout: SheetLayout,
    renderer: LabelRenderer,
}

impl SheetComposer {
    pub fn new(config: SheetConfig) -> SheetResult<Self> {
        let renderer = LabelRenderer::new(&config)?;
        Ok(Self::with_renderer(config, renderer))
    }

    pub fn with_renderer(config: SheetConfig, renderer: LabelRenderer) -> Self {
        let layout = SheetLayout::from_config(&config);
        Self {
            config,
            layout,
            renderer,
        }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    // Unrotated row `row` of `records`. Slots past the end stay white.
    pub fn compose_row(&self, records: &[LabelRecord], row: usize) -> SheetResult<Pixmap> {
        let (width, height) = self.layout.row_size();
        let mut image = Pixmap::new(width, height).ok_or(SheetError::Pixmap { width, height })?;
        image.fill(tiny_skia::Color::WHITE);

        for (col, index) in self.layout.row_slots(row, records.len()) {
            let record = &records[index];
            debug!(index, text = %record.text, "processing barcode");
            let label = self.renderer.render(&record.number, &record.text);
            image.draw_pixmap(
                self.layout.slot_x(col) as i32,
                0,
                label.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        Ok(image)
    }

    pub fn compose(&self, records: &[LabelRecord], output_dir: &Path) -> SheetResult<SheetReport> {
        info!(
            symbology = SYMBOLOGY,
            font = ?self.renderer.fonts().source(),
            "barcode format"
        );
        std::fs::create_dir_all(output_dir).map_err(|source| SheetError::Output {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let total = records.len();
        let rows = self.layout.row_count(total);
        let dpi = self.config.dpi;
        let mut files = Vec::with_capacity(rows);

        for row in 0..rows {
            let image = self.compose_row(records, row)?;
            let rotated = rotate_clockwise(&image)?;
            let path = output_dir.join(format!("{}{}.png", self.config.file_prefix, row + 1));
            write_png(&path, &rotated, dpi)?;

            info!(
                file = %path.display(),
                original = %size_mm(&image, dpi),
                rotated = %size_mm(&rotated, dpi),
                labels = self.layout.row_slots(row, total).count(),
                "row written"
            );
            files.push(path);
        }

        info!(dir = %output_dir.display(), rows, "all row images generated");
        Ok(SheetReport {
            total_labels: total,
            rows,
            files,
        })
    }
}

// Quarter turn clockwise: pixel `(x, y)` lands on `(h - 1 - y, x)`.
pub fn rotate_clockwise(src: &Pixmap) -> SheetResult<Pixmap> {
    let (w, h) = (src.width(), src.height());
    let mut dst = Pixmap::new(h, w).ok_or(SheetError::Pixmap {
        width: h,
        height: w,
    })?;
    let from = src.pixels();
    let to = dst.pixels_mut();
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = (h - 1 - y, x);
            to[(dy * h + dx) as usize] = from[(y * w + x) as usize];
        }
    }
    Ok(dst)
}

fn size_mm(image: &Pixmap, dpi: f64) -> String {
    format!(
        "{}mm x {}mm",
        fmt_mm(px_to_mm(image.width(), dpi)),
        fmt_mm(px_to_mm(image.height(), dpi))
    )
}

pub fn generate_row_images(
    csv_path: &Path,
    output_dir: &Path,
    config: &SheetConfig,
) -> SheetResult<SheetReport> {
    let records = read_records(csv_path)?;
    SheetComposer::new(config.clone())?.compose(&records, output_dir)
}
