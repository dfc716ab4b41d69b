//! JSON data files
//!
//! Data files are replaced whole: the new contents go to a sibling temp file,
//! are synced, then renamed over the old file. A failure at any step leaves
//! the previous file untouched. Every failure here means the record store is
//! unusable and is reported as `StoreUnavailable`.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PennywiseError;

/// Map an I/O or serde failure on `path` to `StoreUnavailable`
fn unavailable<'a, E: std::fmt::Display>(
    action: &'static str,
    path: &'a Path,
) -> impl FnOnce(E) -> PennywiseError + 'a {
    move |e| PennywiseError::StoreUnavailable(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Load a data file; a missing file is an empty store
pub fn read_json<T, P>(path: P) -> Result<T, PennywiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(unavailable("open", path)(e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(unavailable("parse", path))
}

/// Replace a data file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), PennywiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(unavailable("create directory", parent))?;
    }

    let staged = stage(path, data)?;
    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        unavailable("replace", path)(e)
    })
}

/// Write and sync `data` next to `path`, returning the temp file
fn stage<T: Serialize>(path: &Path, data: &T) -> Result<PathBuf, PennywiseError> {
    // Must share a directory with the target for the rename to be atomic
    let staged = path.with_extension("json.tmp");

    let file = File::create(&staged).map_err(unavailable("create", &staged))?;
    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer_pretty(&mut writer, data)
        .map_err(unavailable("serialize", &staged))
        .and_then(|()| writer.flush().map_err(unavailable("flush", &staged)))
        .and_then(|()| writer.get_ref().sync_all().map_err(unavailable("sync", &staged)));

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&staged);
        return Err(e);
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        entries: Vec<i64>,
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let data: Ledger = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(data, Ledger::default());
    }

    #[test]
    fn test_write_creates_directories_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("ledger.json");
        let data = Ledger {
            entries: vec![12, 30],
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(read_json::<Ledger, _>(&path).unwrap(), data);
    }

    #[test]
    fn test_corrupt_file_is_store_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Ledger, _>(&path).unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_failed_replace_is_cleaned_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::create_dir(&path).unwrap();

        let err = write_json_atomic(&path, &Ledger::default()).unwrap_err();
        assert!(err.is_store_unavailable());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
