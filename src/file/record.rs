//! File-blob record: raw structure files referenced by bytes or path.

use super::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Leading magic of a Foldcomp-compressed structure file.
pub const FOLDCOMP_MAGIC: &[u8; 4] = b"FCMP";

/// Structure file format handled by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Pdb,
    Cif,
    Fcz,
}

impl FormatTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Pdb => "pdb",
            FormatTag::Cif => "cif",
            FormatTag::Fcz => "fcz",
        }
    }

    /// Infers the tag from a path extension, looking through a trailing `.gz`.
    pub fn from_extension(path: &str) -> Option<FormatTag> {
        let stripped = path.strip_suffix(".gz").unwrap_or(path);
        let extension = Path::new(stripped).extension()?.to_str()?;
        extension.parse().ok()
    }

    /// Infers the tag from file content. Foldcomp files open with a fixed magic;
    /// anything else is treated as PDB text, the dominant legacy format.
    pub fn sniff(bytes: &[u8]) -> FormatTag {
        if bytes.len() >= FOLDCOMP_MAGIC.len() && &bytes[..FOLDCOMP_MAGIC.len()] == FOLDCOMP_MAGIC
        {
            FormatTag::Fcz
        } else {
            FormatTag::Pdb
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdb" | "ent" => Ok(FormatTag::Pdb),
            "cif" | "mmcif" => Ok(FormatTag::Cif),
            "fcz" => Ok(FormatTag::Fcz),
            _ => Err(Error::unknown_format(Some(PathBuf::from(s)))),
        }
    }
}

/// One structure file, carried inline or by reference.
///
/// Exactly one of `bytes` and `path` is populated; [`FileRecord::validate`]
/// enforces the invariant before any operation touches the record. The format
/// tag is optional and inferred on demand from the path extension or content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub bytes: Option<Vec<u8>>,
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub format: Option<FormatTag>,
}

impl FileRecord {
    /// Record carrying the file content inline.
    pub fn from_bytes(bytes: Vec<u8>, format: FormatTag) -> Self {
        Self {
            bytes: Some(bytes),
            path: None,
            format: Some(format),
        }
    }

    /// Record referencing a local or remote file; the format is taken from the
    /// extension when recognizable.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let format = FormatTag::from_extension(&path);
        Self {
            bytes: None,
            path: Some(path),
            format,
        }
    }

    pub fn with_format(mut self, format: FormatTag) -> Self {
        self.format = Some(format);
        self
    }

    /// True when the content is carried inline.
    pub fn is_embedded(&self) -> bool {
        self.bytes.is_some()
    }

    /// Checks the exactly-one-of-bytes-and-path invariant.
    pub fn validate(&self) -> Result<(), Error> {
        match (&self.bytes, &self.path) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(Error::malformed_record("both are populated")),
            (None, None) => Err(Error::malformed_record("both are empty")),
        }
    }

    /// Resolves the format tag: explicit tag first, then the path extension,
    /// then content sniffing over inline bytes.
    pub fn resolve_format(&self) -> Result<FormatTag, Error> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        if let Some(path) = &self.path {
            if let Some(format) = FormatTag::from_extension(path) {
                return Ok(format);
            }
        }
        if let Some(bytes) = &self.bytes {
            return Ok(FormatTag::sniff(bytes));
        }
        Err(Error::unknown_format(
            self.path.as_ref().map(PathBuf::from),
        ))
    }
}
