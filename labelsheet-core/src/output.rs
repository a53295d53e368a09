use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tiny_skia::Pixmap;

use crate::error::{SheetError, SheetResult};
use crate::units::dpi_to_pixels_per_meter;

// Opaque RGB PNG with the print density in pHYs (deterministic for same input)
pub fn encode_png<W: Write>(out: W, pixmap: &Pixmap, dpi: f64) -> Result<(), png::EncodingError> {
    let ppm = dpi_to_pixels_per_meter(dpi);
    let mut enc = Encoder::new(out, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgb);
    enc.set_depth(BitDepth::Eight);
    enc.set_pixel_dims(Some(PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: Unit::Meter,
    }));
    let mut writer = enc.write_header()?;
    writer.write_image_data(&rgb_bytes(pixmap))?;
    writer.finish()?;
    Ok(())
}

pub fn write_png(path: &Path, pixmap: &Pixmap, dpi: f64) -> SheetResult<()> {
    let file = File::create(path).map_err(|source| SheetError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    encode_png(&mut out, pixmap, dpi)?;
    out.flush()?;
    Ok(())
}

// Labels are drawn on white, so dropping alpha loses nothing.
fn rgb_bytes(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for p in pixmap.pixels() {
        let c = p.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_carries_dpi_and_size() {
        let mut pm = Pixmap::new(7, 3).unwrap();
        pm.fill(tiny_skia::Color::WHITE);
        let mut buf = Vec::new();
        encode_png(&mut buf, &pm, 300.0).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(buf));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (7, 3));
        assert_eq!(info.color_type, ColorType::Rgb);
        let dims = info.pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        assert_eq!(dims.unit, Unit::Meter);
    }

    #[test]
    fn identical_images_encode_identically() {
        let mut pm = Pixmap::new(4, 4).unwrap();
        pm.fill(tiny_skia::Color::BLACK);
        let mut a = Vec::new();
        let mut b = Vec::new();
        encode_png(&mut a, &pm, 300.0).unwrap();
        encode_png(&mut b, &pm, 300.0).unwrap();
        assert_eq!(a, b);
    }
}
