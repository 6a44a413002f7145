//! Structure-file records: fetch, format inference, parsing, and embedding.

mod codec;
mod error;
mod fetch;
mod parser;
mod record;

pub use codec::StructureFileCodec;
pub use error::Error;
pub use fetch::{repo_id_from_path, BlobFetcher, LocalFetcher, TokenMap};
#[cfg(feature = "remote")]
pub use fetch::HttpFetcher;
pub use parser::{install, installed, ParseSource, ParserRegistry, StructureParser};
pub use record::{FileRecord, FormatTag, FOLDCOMP_MAGIC};
