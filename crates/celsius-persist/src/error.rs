//! Error types for saving and loading thermal state.

use std::fmt;
use std::io;

/// Errors from encoding or decoding a save blob.
#[derive(Debug)]
pub enum PersistError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The blob does not start with `b"CELS"`.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the blob.
        found: u8,
    },
    /// The data is corrupt or the state is internally inconsistent.
    Malformed {
        /// What went wrong.
        detail: String,
    },
    /// A terrain could not be mapped between id and name.
    UnknownTerrain {
        /// The terrain name, or the id when encoding.
        name: String,
    },
    /// The saved grid does not match the map it is loaded onto.
    DimensionMismatch {
        /// Map size `(width, height)`.
        expected: (u32, u32),
        /// Saved size `(width, height)`.
        found: (u32, u32),
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"CELS\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed thermal state: {detail}"),
            Self::UnknownTerrain { name } => write!(f, "unknown terrain '{name}'"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "saved grid is {}x{} but map is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
