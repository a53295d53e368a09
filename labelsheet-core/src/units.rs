pub const MM_PER_INCH: f64 = 25.4;

// Convert physical millimetres to device pixels at `dpi`.
// Anything that is not a positive finite length maps to 0.
pub fn mm_to_px(mm: f64, dpi: f64) -> u32 {
    if !mm.is_finite() || mm <= 0.0 || !dpi.is_finite() || dpi <= 0.0 {
        return 0;
    }
    (mm * dpi / MM_PER_INCH).round() as u32
}

pub fn px_to_mm(px: u32, dpi: f64) -> f64 {
    if dpi <= 0.0 {
        return 0.0;
    }
    px as f64 * MM_PER_INCH / dpi
}

// PNG `pHYs` stores density per metre, not per inch.
pub fn dpi_to_pixels_per_meter(dpi: f64) -> u32 {
    (dpi * 1000.0 / MM_PER_INCH).round() as u32
}

// Format millimetres for log output: one decimal, like "102.0".
pub fn fmt_mm(v: f64) -> String {
    format!("{v:.1}")
}
