//! Cross-section CSV export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::Point3;

use crate::errors::Result;
use crate::float_types::Real;

/// Write boundary points to `<scan_name>_zslice_<slice_param>.CSV` in
/// `out_dir`, returning the path written.
///
/// The file holds one `x,y,z` header line and one row per point with each
/// coordinate fixed to 3 decimal places, in the order given. The height in
/// the file name renders with the default float formatting, so a slice at
/// `12.5` becomes `..._zslice_12.5.CSV` and one at `12.0` becomes
/// `..._zslice_12.CSV`. An existing file of the same name is silently
/// overwritten.
pub fn write_csv(
    points: &[Point3<Real>],
    scan_name: &str,
    slice_param: Real,
    out_dir: &Path,
) -> Result<PathBuf> {
    let out_path = out_dir.join(format!("{scan_name}_zslice_{slice_param}.CSV"));

    let file = File::create(&out_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "x,y,z")?;
    for point in points {
        writeln!(writer, "{:.3},{:.3},{:.3}", point.x, point.y, point.z)?;
    }
    writer.flush()?;

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plyslice_csv_{label}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn rows_are_fixed_to_three_decimals() {
        let dir = scratch_dir("rows");
        let points = vec![
            Point3::new(1.0, 2.0, 3.0001),
            Point3::new(4.0, 5.0, 6.0),
        ];

        let path = write_csv(&points, "head03", 12.5, &dir).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines, vec!["x,y,z", "1.000,2.000,3.000", "4.000,5.000,6.000"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_name_follows_the_height_display() {
        let dir = scratch_dir("names");

        let half = write_csv(&[], "head03", 12.5, &dir).unwrap();
        assert_eq!(half.file_name().unwrap(), "head03_zslice_12.5.CSV");

        let whole = write_csv(&[], "head03", 12.0, &dir).unwrap();
        assert_eq!(whole.file_name().unwrap(), "head03_zslice_12.CSV");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_files_are_overwritten() {
        let dir = scratch_dir("overwrite");
        let first = vec![Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0)];
        let second = vec![Point3::new(9.0, 9.0, 9.0)];

        write_csv(&first, "scan", 1.0, &dir).unwrap();
        let path = write_csv(&second, "scan", 1.0, &dir).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("9.000,9.000,9.000"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
