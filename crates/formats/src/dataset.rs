use std::fs;
use std::path::Path;

use scene::Row;
use tracing::info;

use crate::columns::ColumnMap;
use crate::error::LoadError;
use crate::rows::read_rows;

/// Parsed input plus a content fingerprint of the bytes it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Row>,
    /// Hex blake3 digest of the raw file contents.
    pub fingerprint: String,
}

impl Dataset {
    pub fn from_bytes(bytes: &[u8], columns: &ColumnMap) -> Result<Self, LoadError> {
        let fingerprint = blake3::hash(bytes).to_hex().to_string();
        let rows = read_rows(bytes, columns)?;
        Ok(Self { rows, fingerprint })
    }
}

pub fn load_dataset(path: impl AsRef<Path>, columns: &ColumnMap) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_bytes(&bytes, columns)?;
    info!(
        path = %path.display(),
        rows = dataset.rows.len(),
        fingerprint = %dataset.fingerprint,
        "dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::{Dataset, load_dataset};
    use crate::columns::ColumnMap;
    use crate::error::LoadError;

    const CSV: &str = "department,emission_kg\nSales,1\n";

    #[test]
    fn fingerprint_tracks_content() {
        let columns = ColumnMap::default();
        let a = Dataset::from_bytes(CSV.as_bytes(), &columns).expect("a");
        let b = Dataset::from_bytes(CSV.as_bytes(), &columns).expect("b");
        let c = Dataset::from_bytes(b"department,emission_kg\nSales,2\n", &columns).expect("c");
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
        assert_eq!(a.fingerprint.len(), 64);
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("tripscape-{}.csv", std::process::id()));
        std::fs::write(&path, CSV).expect("write");
        let dataset = load_dataset(&path, &ColumnMap::default()).expect("load");
        std::fs::remove_file(&path).ok();
        assert_eq!(dataset.rows.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset("/nonexistent/trips.csv", &ColumnMap::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
