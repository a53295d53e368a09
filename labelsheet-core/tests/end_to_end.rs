use labelsheet_core::{SheetConfig, SheetError, generate_row_images};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tempfile::TempDir;

struct Decoded {
    width: u32,
    height: u32,
    ppm: Option<(u32, u32)>,
    rgb: Vec<u8>,
}

fn decode(path: &Path) -> Decoded {
    let decoder = png::Decoder::new(BufReader::new(File::open(path).unwrap()));
    let mut reader = decoder.read_info().unwrap();
    let (width, height, ppm) = {
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        let ppm = info.pixel_dims.map(|d| (d.xppu, d.yppu));
        (info.width, info.height, ppm)
    };
    let mut rgb = vec![0; (width * height * 3) as usize];
    reader.next_frame(&mut rgb).unwrap();
    Decoded {
        width,
        height,
        ppm,
        rgb,
    }
}

fn band_is_white(img: &Decoded, y0: u32, y1: u32) -> bool {
    let start = (y0 * img.width * 3) as usize;
    let end = (y1 * img.width * 3) as usize;
    img.rgb[start..end].iter().all(|&v| v == 255)
}

fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("codes.csv");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn five_labels_make_two_rotated_rows() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "1,ABC-001\n2,ABC-002\n3,ABC-003\n4,ABC-004\n5,ABC-005\n",
    );
    let out = dir.path().join("nested").join("row_images");

    let report = generate_row_images(&csv, &out, &SheetConfig::default()).unwrap();
    assert_eq!(report.total_labels, 5);
    assert_eq!(report.rows, 2);

    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["row_1.png", "row_2.png"]);
    assert_eq!(report.files, vec![out.join("row_1.png"), out.join("row_2.png")]);

    for file in &report.files {
        let img = decode(file);
        // 1205 x 272 row turned a quarter
        assert_eq!((img.width, img.height), (272, 1205));
        assert_eq!(img.ppm, Some((11811, 11811)));
    }

    // After rotation the sheet's x axis runs down the image; the third
    // slot starts at x = 804.
    let first = decode(&report.files[0]);
    let second = decode(&report.files[1]);
    assert!(!band_is_white(&first, 804, 1205));
    assert!(!band_is_white(&second, 0, 804));
    assert!(band_is_white(&second, 804, 1205));
}

#[test]
fn rejected_payloads_still_produce_rows() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "1,OK-1\n2,ünïcode\n");
    let out = dir.path().join("rows");

    let report = generate_row_images(&csv, &out, &SheetConfig::default()).unwrap();
    assert_eq!(report.rows, 1);

    let img = decode(&report.files[0]);
    let red = img
        .rgb
        .chunks_exact(3)
        .filter(|p| p[0] > 200 && p[1] < 80 && p[2] < 80)
        .count();
    assert!(red > 0, "placeholder outline missing");
}

#[test]
fn existing_output_dir_is_reused() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "7,SEVEN\n");
    let out = dir.path().join("rows");
    fs::create_dir_all(&out).unwrap();

    let report = generate_row_images(&csv, &out, &SheetConfig::default()).unwrap();
    assert_eq!(report.files, vec![out.join("row_1.png")]);
}

#[test]
fn malformed_table_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "1,A\n2\n");
    let out = dir.path().join("rows");

    let err = generate_row_images(&csv, &out, &SheetConfig::default()).unwrap_err();
    assert!(matches!(err, SheetError::Csv { .. }));
    assert!(!out.exists());
}

#[test]
fn missing_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = generate_row_images(
        &dir.path().join("absent.csv"),
        &dir.path().join("rows"),
        &SheetConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SheetError::Csv { .. }));
}
