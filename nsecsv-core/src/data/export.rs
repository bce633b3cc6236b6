//! CSV export of normalized frames.
//!
//! Writes are atomic: the frame goes to `{name}.csv.tmp` next to the target
//! and is renamed into place, so a crash mid-write never leaves a truncated
//! file under the final name. An existing target is replaced.

use super::provider::DataError;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a frame as comma-delimited UTF-8 with a header row and no index column.
///
/// Parent directories are created as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
    }

    let tmp = tmp_path(path);
    let mut file = fs::File::create(&tmp).map_err(|e| DataError::io(&tmp, e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;

    file.sync_all().map_err(|e| DataError::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| DataError::io(path, e))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "symbol" => &["TCS", "TCS"],
            "open" => &[100.5, 101.0],
        )
        .unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TCS.csv");

        write_csv(&mut sample(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "symbol,open");
        assert_eq!(lines[1], "TCS,100.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/india_csv/TCS.csv");

        write_csv(&mut sample(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overwrites_existing_file_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TCS.csv");
        fs::write(&path, "stale contents that are longer than the new file\n".repeat(50)).unwrap();

        write_csv(&mut sample(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("symbol,open\n"));
        assert!(!text.contains("stale"));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn tmp_sits_next_to_target() {
        assert_eq!(
            tmp_path(Path::new("data/india_csv/TCS.csv")),
            PathBuf::from("data/india_csv/TCS.csv.tmp")
        );
    }
}
