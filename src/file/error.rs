use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },

    #[error(
        "cannot determine structure format for {path_desc}",
        path_desc = PathDisplay(path)
    )]
    UnknownFormat { path: Option<PathBuf> },

    #[error("no parser registered for format '{format}'")]
    NoParser { format: &'static str },

    #[error("file record must populate exactly one of bytes and path: {details}")]
    MalformedRecord { details: String },

    #[error("failed to fetch '{url}': {details}")]
    Fetch { url: String, details: String },

    #[error(transparent)]
    Codec(#[from] crate::codec::Error),
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            details: details.into(),
        }
    }

    pub fn unknown_format(path: Option<PathBuf>) -> Self {
        Self::UnknownFormat { path }
    }

    pub fn no_parser(format: &'static str) -> Self {
        Self::NoParser { format }
    }

    pub fn malformed_record(details: impl Into<String>) -> Self {
        Self::MalformedRecord {
            details: details.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            details: details.into(),
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "byte stream"),
        }
    }
}
