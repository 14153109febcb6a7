//! File I/O utilities with atomic writes
//!
//! JSON reads and writes for the local data files. Writes go through a temp
//! file and a rename, so a failed write never leaves a half-written file.
//! Files we own can be opened with [`read_json_or_set_aside`], which moves an
//! unparseable file out of the way instead of failing.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::AdvisorError;

/// Where an unparseable data file is moved: `local_storage.json.corrupt`
pub fn set_aside_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Read JSON from a file we own, starting over when it cannot be parsed
///
/// A missing file gives the default. A file that exists but is not valid JSON
/// for `T` is renamed to [`set_aside_path`] and the default returned. Failing
/// to open the file is still an error.
pub fn read_json_or_set_aside<T, P>(path: P) -> Result<T, AdvisorError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| AdvisorError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    match serde_json::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(e) => {
            let aside = set_aside_path(path);
            warn!(path = %path.display(), error = %e, "unreadable data file; starting empty");
            if let Err(e) = fs::rename(path, &aside) {
                warn!(path = %aside.display(), error = %e, "could not set the unreadable file aside");
            }
            Ok(T::default())
        }
    }
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, AdvisorError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(AdvisorError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| AdvisorError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| AdvisorError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), AdvisorError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AdvisorError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| AdvisorError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| AdvisorError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| AdvisorError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| AdvisorError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AdvisorError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json_or_set_aside(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json_required(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unparseable_file_is_set_aside() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        fs::write(&path, "{ truncated").unwrap();

        let data: TestData = read_json_or_set_aside(&path).unwrap();
        assert_eq!(data, TestData::default());
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(set_aside_path(&path)).unwrap(),
            "{ truncated"
        );

        // A fresh write goes to the original name
        write_json_atomic(&path, &TestData { name: "x".into(), value: 1 }).unwrap();
        let loaded: TestData = read_json_or_set_aside(&path).unwrap();
        assert_eq!(loaded.value, 1);
    }

    #[test]
    fn test_set_aside_path() {
        assert_eq!(
            set_aside_path(Path::new("/data/local_storage.json")),
            PathBuf::from("/data/local_storage.json.corrupt")
        );
    }

    #[test]
    fn test_read_json_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        assert!(read_json_required::<TestData, _>(&path).is_err());

        fs::write(&path, "not json at all").unwrap();
        let err = read_json_required::<TestData, _>(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
