//! Blob fetching: local filesystem and optional remote access with per-repository tokens.

use super::error::Error;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Resolves a path or URL reference to raw bytes.
///
/// Fetching is the only blocking step of the file codec; bulk pipelines should
/// issue it off the critical path. Implementations must be shareable across
/// threads.
pub trait BlobFetcher: Send + Sync {
    fn fetch(&self, path: &str, token: Option<&str>) -> Result<Vec<u8>, Error>;
}

/// Filesystem fetcher; `.gz` files are transparently decompressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

impl BlobFetcher for LocalFetcher {
    fn fetch(&self, path: &str, _token: Option<&str>) -> Result<Vec<u8>, Error> {
        let raw = fs::read(path).map_err(|e| Error::from_io(e, Some(PathBuf::from(path))))?;
        if path.ends_with(".gz") {
            gunzip(&raw, path)
        } else {
            Ok(raw)
        }
    }
}

pub(crate) fn gunzip(raw: &[u8], path: &str) -> Result<Vec<u8>, Error> {
    let mut decoder = GzDecoder::new(raw);
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(|e| Error::from_io(e, Some(PathBuf::from(path))))?;
    Ok(bytes)
}

/// Per-repository access tokens, keyed by `owner/name`.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    tokens: HashMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, repo_id: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(repo_id.into(), token.into());
    }

    /// Token for the repository a reference belongs to, when the reference embeds a
    /// `datasets/{owner}/{name}` segment and a token is known for it.
    pub fn token_for(&self, path: &str) -> Option<&str> {
        let repo_id = repo_id_from_path(path)?;
        self.tokens.get(&repo_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Extracts `owner/name` from a reference shaped like `…/datasets/{owner}/{name}/…`.
pub fn repo_id_from_path(path: &str) -> Option<String> {
    let mut parts = path.split('/');
    while let Some(part) = parts.next() {
        if part == "datasets" {
            let owner = parts.next()?;
            let name = parts.next()?;
            if owner.is_empty() || name.is_empty() {
                return None;
            }
            return Some(format!("{}/{}", owner, name));
        }
    }
    None
}

/// HTTP fetcher for remote blob stores; sends the repository token as a bearer
/// header when one is resolved.
#[cfg(feature = "remote")]
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "remote")]
impl BlobFetcher for HttpFetcher {
    fn fetch(&self, url: &str, token: Option<&str>) -> Result<Vec<u8>, Error> {
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .map_err(|e| Error::fetch(url, e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::fetch(url, e.to_string()))?;
        let body = response
            .bytes()
            .map_err(|e| Error::fetch(url, e.to_string()))?
            .to_vec();
        if url.ends_with(".gz") {
            gunzip(&body, url)
        } else {
            Ok(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn local_fetcher_reads_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        fs::write(&path, b"ATOM").unwrap();

        let bytes = LocalFetcher.fetch(path.to_str().unwrap(), None).unwrap();
        assert_eq!(bytes, b"ATOM");
    }

    #[test]
    fn local_fetcher_decompresses_gzip_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pdb.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"ATOM      1").unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let bytes = LocalFetcher.fetch(path.to_str().unwrap(), None).unwrap();
        assert_eq!(bytes, b"ATOM      1");
    }

    #[test]
    fn local_fetcher_reports_missing_files_with_path() {
        let err = LocalFetcher.fetch("/no/such/file.pdb", None).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.pdb"));
    }

    #[test]
    fn repo_id_is_extracted_from_datasets_segment() {
        assert_eq!(
            repo_id_from_path("https://hub.example/datasets/acme/structures/resolve/main/x.pdb"),
            Some("acme/structures".to_string())
        );
        assert_eq!(repo_id_from_path("/local/model.pdb"), None);
        assert_eq!(repo_id_from_path("datasets/acme"), None);
    }

    #[test]
    fn token_map_resolves_by_repository() {
        let mut tokens = TokenMap::new();
        tokens.insert("acme/structures", "secret");

        assert_eq!(
            tokens.token_for("https://hub.example/datasets/acme/structures/x.pdb"),
            Some("secret")
        );
        assert_eq!(
            tokens.token_for("https://hub.example/datasets/other/repo/x.pdb"),
            None
        );
    }
}
