//! Snapshot file persistence.
//!
//! Generator state travels between runs as a small JSON document:
//! `{ "state": [words...] }`. Loading feeds the `state` option; saving
//! is driven by state notifications during production.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// On-disk snapshot document.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Generator state buffer words.
    pub state: Vec<u64>,
}

/// Loads a state buffer from a snapshot file.
pub fn load(path: &Path) -> Result<Vec<u64>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    let file: SnapshotFile = serde_json::from_str(&text)?;
    Ok(file.state)
}

/// Writes a state buffer to a snapshot file, replacing any previous
/// contents.
pub fn save(path: &Path, words: &[u64]) -> Result<()> {
    let file = SnapshotFile {
        state: words.to_vec(),
    };
    fs::write(path, serde_json::to_string(&file)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("randgen-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("roundtrip");
        save(&path, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(load(&path).unwrap(), vec![1, 2, 3, 4, 5]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_reported() {
        let err = load(Path::new("/nonexistent/randgen-state.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_malformed_file_reported() {
        let path = temp_path("malformed");
        fs::write(&path, "not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, CliError::Snapshot(_)));
        fs::remove_file(&path).unwrap();
    }
}
