// ---------------------------------------------------------------------------
// SaveError: typed errors for map persistence
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while saving or loading a map.
///
/// The cell format is positional and versionless, so the reader's only
/// defense against a damaged or foreign file is strict structural
/// validation; every way that validation can fail gets its own variant
/// instead of silently corrupting grid state.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The buffer ended before the fixed byte layout was fully read.
    Truncated { needed: usize, found: usize },
    /// The payload length disagrees with the cell counts in the header.
    SizeMismatch {
        cells_x: u32,
        cells_z: u32,
        expected: usize,
        found: usize,
    },
    /// Bytes remain after the last cell record.
    TrailingData { extra: usize },
    /// A field holds a value outside its encoding (bad river byte, road mask
    /// with reserved bits set, non-boolean wall byte).
    InvalidField { field: &'static str, value: u8 },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Truncated { needed, found } => write!(
                f,
                "Save data is truncated: needed {needed} bytes, found {found}"
            ),
            SaveError::SizeMismatch {
                cells_x,
                cells_z,
                expected,
                found,
            } => write!(
                f,
                "Save data does not match its declared {cells_x}x{cells_z} grid: \
                 expected {expected} payload bytes, found {found}"
            ),
            SaveError::TrailingData { extra } => write!(
                f,
                "Save data has {extra} unexpected bytes after the last cell record"
            ),
            SaveError::InvalidField { field, value } => {
                write!(f, "Invalid value {value:#04X} for cell field '{field}'")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_io() {
        let err = SaveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_display_truncated() {
        let err = SaveError::Truncated {
            needed: 11,
            found: 4,
        };
        let msg = format!("{err}");
        assert!(msg.contains("truncated"), "got: {msg}");
        assert!(msg.contains("11"), "got: {msg}");
    }

    #[test]
    fn test_display_size_mismatch() {
        let err = SaveError::SizeMismatch {
            cells_x: 20,
            cells_z: 15,
            expected: 3300,
            found: 100,
        };
        let msg = format!("{err}");
        assert!(msg.contains("20x15"), "got: {msg}");
        assert!(msg.contains("3300"), "got: {msg}");
    }

    #[test]
    fn test_display_invalid_field() {
        let err = SaveError::InvalidField {
            field: "incoming_river",
            value: 0x7F,
        };
        let msg = format!("{err}");
        assert!(msg.contains("incoming_river"), "got: {msg}");
        assert!(msg.contains("0x7F"), "got: {msg}");
    }

    #[test]
    fn test_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let save_err: SaveError = io_err.into();
        assert!(matches!(save_err, SaveError::Io(_)));
    }

    #[test]
    fn test_is_error_trait() {
        let err = SaveError::Io(std::io::Error::other("test"));
        assert!(std::error::Error::source(&err).is_some());
        let err = SaveError::TrailingData { extra: 3 };
        assert!(std::error::Error::source(&err).is_none());
    }
}
