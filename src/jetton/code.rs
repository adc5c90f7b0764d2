use crate::jetton::error::CodeLoadError;
use crate::tvm::{ArcCell, base64_to_boc, deserialize_boc, hex_to_boc};
use std::path::{Path, PathBuf};

/// Supplies compiled contract code
pub trait CodeLoader {
    fn load_minter_code(&self) -> Result<ArcCell, CodeLoadError>;
}

/// Reads a BoC file in binary, hex or base64 form
#[derive(Debug, Clone)]
pub struct BocFileLoader {
    path: PathBuf,
}

impl BocFileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<ArcCell, CodeLoadError> {
        let bytes = std::fs::read(&self.path).map_err(|source| CodeLoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let parsed = match std::str::from_utf8(&bytes) {
            Ok(text) if !text.trim().is_empty() => {
                hex_to_boc(text).or_else(|_| base64_to_boc(text))
            }
            _ => deserialize_boc(&bytes),
        };
        parsed.map_err(|source| CodeLoadError::Boc {
            path: self.path.clone(),
            source,
        })
    }
}

impl CodeLoader for BocFileLoader {
    fn load_minter_code(&self) -> Result<ArcCell, CodeLoadError> {
        self.load()
    }
}
