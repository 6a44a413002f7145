//! File-blob codec: fetch, parse, embed, and bridge into the columnar codec.

use super::error::Error;
use super::fetch::{BlobFetcher, LocalFetcher, TokenMap};
use super::parser::{self, ParseSource, ParserRegistry, StructureParser};
use super::record::{FileRecord, FormatTag};
use crate::codec::{AtomArrayCodec, ColumnarRecord, ExtraField};
use crate::model::AtomArray;
use crate::utils::parallel::*;
use std::sync::Arc;

/// Wraps [`AtomArrayCodec`] for structure-file storage.
///
/// A record carries its content inline or by reference; decode resolves the format
/// tag, fetches the bytes, and delegates to the registered parser for that format.
/// All operations are per-record: a bulk run over many records may abort between
/// records without corrupting already-produced output.
pub struct StructureFileCodec {
    registry: Arc<ParserRegistry>,
    fetcher: Arc<dyn BlobFetcher>,
    tokens: TokenMap,
    extra_fields: Vec<ExtraField>,
}

impl StructureFileCodec {
    /// Codec over an explicit registry, fetching from the local filesystem.
    pub fn new(registry: Arc<ParserRegistry>) -> Self {
        Self {
            registry,
            fetcher: Arc::new(LocalFetcher),
            tokens: TokenMap::new(),
            extra_fields: Vec::new(),
        }
    }

    /// Codec over the process-wide registry installed at startup.
    ///
    /// # Errors
    ///
    /// Returns a `NoParser` error when no registry has been installed.
    pub fn with_global_registry() -> Result<Self, Error> {
        let registry = parser::installed().ok_or_else(|| {
            Error::malformed_record("no process-wide parser registry has been installed")
        })?;
        Ok(Self::new(registry))
    }

    /// Replaces the byte fetcher (e.g. with a remote one).
    pub fn fetcher(mut self, fetcher: Arc<dyn BlobFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Sets per-repository access tokens used when fetching references.
    pub fn tokens(mut self, tokens: TokenMap) -> Self {
        self.tokens = tokens;
        self
    }

    /// Per-atom annotations requested from parsers on decode.
    pub fn extra_fields(mut self, fields: Vec<ExtraField>) -> Self {
        self.extra_fields = fields;
        self
    }

    /// Record carrying already-loaded file content.
    pub fn encode_bytes(&self, bytes: Vec<u8>, format: FormatTag) -> FileRecord {
        FileRecord::from_bytes(bytes, format)
    }

    /// Record referencing a file by path; the format is inferred from the extension
    /// when recognizable and resolved lazily otherwise.
    pub fn encode_path(&self, path: impl Into<String>) -> FileRecord {
        FileRecord::from_path(path)
    }

    /// Decodes a record into an atom array via the registered parser.
    pub fn decode(&self, record: &FileRecord) -> Result<AtomArray, Error> {
        self.decode_with_fields(record, &self.extra_fields)
    }

    fn decode_with_fields(
        &self,
        record: &FileRecord,
        fields: &[ExtraField],
    ) -> Result<AtomArray, Error> {
        record.validate()?;
        let fetched;
        let bytes: &[u8] = match (&record.bytes, &record.path) {
            (Some(bytes), _) => bytes,
            (None, Some(path)) => {
                fetched = self.fetch(path)?;
                &fetched
            }
            // unreachable after validate, kept as a hard failure
            (None, None) => return Err(Error::malformed_record("both are empty")),
        };

        let format = match record.format {
            Some(format) => format,
            None => record
                .path
                .as_deref()
                .and_then(FormatTag::from_extension)
                .unwrap_or_else(|| FormatTag::sniff(bytes)),
        };
        let parser = self
            .registry
            .get(format)
            .ok_or_else(|| Error::no_parser(format.as_str()))?;
        log::debug!(
            "decoding {} structure from {}",
            format,
            record.path.as_deref().unwrap_or("inline bytes")
        );
        parser.parse(ParseSource::Bytes(bytes), fields)
    }

    /// Materializes a path reference into inline bytes.
    ///
    /// Idempotent: an already-embedded record is returned unchanged. The source path
    /// is dropped so the exactly-one-of-bytes-and-path invariant keeps holding; the
    /// format tag is resolved before the path is lost.
    pub fn embed(&self, record: FileRecord) -> Result<FileRecord, Error> {
        record.validate()?;
        if record.is_embedded() {
            return Ok(record);
        }
        let path = record
            .path
            .as_deref()
            .ok_or_else(|| Error::malformed_record("both are empty"))?;
        let bytes = self.fetch(path)?;
        let format = match record.format {
            Some(format) => format,
            None => FormatTag::from_extension(path).unwrap_or_else(|| FormatTag::sniff(&bytes)),
        };
        Ok(FileRecord::from_bytes(bytes, format))
    }

    /// Embeds a batch of records, isolating per-record failures.
    ///
    /// Runs on the Rayon pool when the `parallel` feature is enabled.
    pub fn embed_many(&self, records: Vec<FileRecord>) -> Vec<Result<FileRecord, Error>> {
        records
            .into_par_iter()
            .map(|record| self.embed(record))
            .collect()
    }

    /// Decodes the record and flattens the result through the columnar codec, asking
    /// the parser for exactly the annotations the configuration retains.
    pub fn to_columnar(
        &self,
        codec: &AtomArrayCodec,
        record: &FileRecord,
    ) -> Result<ColumnarRecord, Error> {
        let fields = codec.config().extra_fields();
        let array = self.decode_with_fields(record, &fields)?;
        Ok(codec.encode(&array)?)
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, Error> {
        let token = self.tokens.token_for(path);
        self.fetcher.fetch(path, token)
    }
}
