// Each label is described as a small SVG document (background, bars,
// captions) and rasterised with resvg onto a white pixmap of the label's
// physical size.

use std::fmt::Write as _;
use tiny_skia::{Pixmap, Transform};
use tracing::{debug, warn};

use crate::barcode::{self, BarcodeModules};
use crate::config::SheetConfig;
use crate::error::{SheetError, SheetResult};
use crate::fonts::FontBook;
use crate::units::mm_to_px;

const BARCODE_WIDTH_RATIO: f64 = 0.85;
const BARCODE_HEIGHT_RATIO: f64 = 0.50;
const BARCODE_TOP_RATIO: f64 = 0.25;
const NUMBER_FONT_RATIO: f64 = 0.12;
const NUMBER_TOP_RATIO: f64 = 0.08;
const TEXT_FONT_RATIO: f64 = 0.09;
const TEXT_TOP_RATIO: f64 = 0.78;
// Baseline sits roughly one ascent below the requested top edge.
const ASCENT_RATIO: f64 = 0.9;

pub const ERROR_TEXT: &str = "BARCODE ERROR";
pub const ERROR_COLOR: &str = "#ff0000";
const ERROR_STROKE_PX: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PxRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub struct LabelRenderer {
    width_px: u32,
    height_px: u32,
    fonts: FontBook,
    options: usvg::Options<'static>,
    blank: Pixmap,
}

impl LabelRenderer {
    pub fn new(config: &SheetConfig) -> SheetResult<Self> {
        config.validate()?;
        let fonts = FontBook::load(config.font_file.as_deref());
        Self::with_fonts(config, fonts)
    }

    pub fn with_fonts(config: &SheetConfig, fonts: FontBook) -> SheetResult<Self> {
        config.validate()?;
        let width_px = mm_to_px(config.label_width_mm, config.dpi);
        let height_px = mm_to_px(config.label_height_mm, config.dpi);
        let mut blank = Pixmap::new(width_px, height_px).ok_or(SheetError::Pixmap {
            width: width_px,
            height: height_px,
        })?;
        blank.fill(tiny_skia::Color::WHITE);

        let mut options = usvg::Options::default();
        if let Some(family) = fonts.family() {
            options.font_family = family.to_string();
        }
        options.fontdb = fonts.database();

        Ok(Self {
            width_px,
            height_px,
            fonts,
            options,
            blank,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    // Area the barcode is scaled into.
    pub fn barcode_box(&self) -> PxRect {
        let width = (self.width_px as f64 * BARCODE_WIDTH_RATIO) as u32;
        let height = (self.height_px as f64 * BARCODE_HEIGHT_RATIO) as u32;
        PxRect {
            x: (self.width_px - width) / 2,
            y: (self.height_px as f64 * BARCODE_TOP_RATIO) as u32,
            width,
            height,
        }
    }

    // Outline drawn in place of a barcode the encoder refused.
    pub fn placeholder_box(&self) -> PxRect {
        let (w, h) = (self.width_px, self.height_px);
        PxRect {
            x: w / 4,
            y: h / 3,
            width: 3 * w / 4 - w / 4,
            height: 2 * h / 3 - h / 3,
        }
    }

    // Encoding and font failures degrade the image, never an Err.
    pub fn render(&self, number: &str, text: &str) -> Pixmap {
        let svg = self.label_svg(number, text);
        let mut pixmap = self.blank.clone();
        match usvg::Tree::from_str(&svg, &self.options) {
            Ok(tree) => resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut()),
            Err(e) => warn!(number, error = %e, "label markup rejected, leaving label blank"),
        }
        pixmap
    }

    pub fn label_svg(&self, number: &str, text: &str) -> String {
        let (w, h) = (self.width_px, self.height_px);
        let mut s = String::new();
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

        match barcode::encode(text) {
            Ok(modules) => {
                debug!(text, modules = modules.len(), "barcode encoded");
                self.push_bars(&mut s, &modules);
            }
            Err(e) => {
                warn!(text, error = %e, "barcode encoding failed, drawing placeholder");
                self.push_placeholder(&mut s, text);
            }
        }

        let hf = h as f64;
        let number_size = (hf * NUMBER_FONT_RATIO) as u32;
        let text_size = (hf * TEXT_FONT_RATIO) as u32;
        self.push_text(&mut s, number, (hf * NUMBER_TOP_RATIO) as u32, number_size, "#000000");
        self.push_text(&mut s, text, (hf * TEXT_TOP_RATIO) as u32, text_size, "#000000");

        s.push_str("</svg>\n");
        s
    }

    fn push_bars(&self, s: &mut String, modules: &BarcodeModules) {
        let area = self.barcode_box();
        if modules.is_empty() {
            return;
        }
        let module_w = area.width as f64 / modules.len() as f64;
        let mut d = String::new();
        for (start, run) in modules.bar_runs() {
            let x = area.x as f64 + start as f64 * module_w;
            let _ = write!(
                d,
                "M {:.2} {} h {:.2} v {} h {:.2} Z ",
                x,
                area.y,
                run as f64 * module_w,
                area.height,
                -(run as f64 * module_w)
            );
        }
        let _ = writeln!(
            s,
            "<path d=\"{}\" fill=\"#000000\" shape-rendering=\"crispEdges\"/>",
            d.trim_end()
        );
    }

    fn push_placeholder(&self, s: &mut String, text: &str) {
        let b = self.placeholder_box();
        let _ = writeln!(
            s,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{ERROR_COLOR}\" stroke-width=\"{ERROR_STROKE_PX}\" shape-rendering=\"crispEdges\"/>",
            b.x, b.y, b.width, b.height
        );
        let size = (self.height_px as f64 * TEXT_FONT_RATIO) as u32;
        let mid = self.height_px / 2;
        self.push_text(s, ERROR_TEXT, mid.saturating_sub(size), size, ERROR_COLOR);
        self.push_text(s, text, mid + size / 4, size, ERROR_COLOR);
    }

    fn push_text(&self, s: &mut String, text: &str, top: u32, size: u32, fill: &str) {
        let Some(family) = self.fonts.family() else {
            return;
        };
        if text.is_empty() || size == 0 {
            return;
        }
        let baseline = top as f64 + size as f64 * ASCENT_RATIO;
        let _ = writeln!(
            s,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            self.width_px as f64 / 2.0,
            baseline,
            svg_escape(family),
            size,
            fill,
            svg_escape(text)
        );
    }
}

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
