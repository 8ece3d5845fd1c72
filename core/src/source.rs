//! Dictionary sources.
//!
//! The engine only needs line-oriented `key=value` text for a given
//! identifier. Where that text comes from is behind [`DictionarySource`]:
//! - [`MemorySource`]: in-memory contents, for tests and embedding
//! - [`DirectorySource`]: files under a local directory
//! - [`HttpSource`]: files under a base URL, fetched with a blocking client
//!
//! [`CachedSource`] memoizes any source for the lifetime of the wrapper so a
//! second load of the same identifier never reaches the underlying source.

use crate::error::{Error, Result};
use ahash::AHashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Acquire the raw content of a dictionary source.
///
/// Implementations must be fallible and idempotent: fetching the same
/// identifier twice returns the same content.
pub trait DictionarySource: Send + Sync {
    fn fetch(&self, id: &str) -> Result<String>;
}

impl<S: DictionarySource + ?Sized> DictionarySource for &S {
    fn fetch(&self, id: &str) -> Result<String> {
        (**self).fetch(id)
    }
}

impl<S: DictionarySource + ?Sized> DictionarySource for Arc<S> {
    fn fetch(&self, id: &str) -> Result<String> {
        (**self).fetch(id)
    }
}

impl<S: DictionarySource + ?Sized> DictionarySource for Box<S> {
    fn fetch(&self, id: &str) -> Result<String> {
        (**self).fetch(id)
    }
}

/// In-memory source keyed by identifier.
///
/// Counts every fetch so callers can observe cache behaviour.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: AHashMap<String, String>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, id: K, content: V) -> Self {
        self.insert(id, content);
        self
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, id: K, content: V) {
        self.files.insert(id.into(), content.into());
    }

    /// Number of fetch calls made so far, hits and misses alike.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl DictionarySource for MemorySource {
    fn fetch(&self, id: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.files
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unavailable(id, "no such entry"))
    }
}

/// Reads `<root>/<id>` from disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DictionarySource for DirectorySource {
    fn fetch(&self, id: &str) -> Result<String> {
        let path = self.root.join(id);
        std::fs::read_to_string(&path)
            .map_err(|e| Error::unavailable(id, format!("{}: {}", path.display(), e)))
    }
}

/// Fetches `<base_url>/<id>` over HTTP.
///
/// Uses the `reqwest` blocking client; the timeout applies per request.
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url_for(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id.trim_start_matches('/'))
    }
}

impl DictionarySource for HttpSource {
    fn fetch(&self, id: &str) -> Result<String> {
        let url = self.url_for(id);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::unavailable(id, e))?;
        response.text().map_err(|e| Error::unavailable(id, e))
    }
}

/// Memoizing wrapper around a source.
///
/// Content is stored on the first successful fetch of an identifier and
/// returned from memory afterwards. Failures are not stored, so a later call
/// retries the underlying source. There is no eviction.
pub struct CachedSource<S> {
    inner: S,
    cache: Mutex<AHashMap<String, Arc<str>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<S: DictionarySource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(AHashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Fetch through the cache, sharing the stored content.
    pub fn fetch_shared(&self, id: &str) -> Result<Arc<str>> {
        if let Some(content) = self.lock().get(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(content));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let content: Arc<str> = Arc::from(self.inner.fetch(id)?);
        // another thread may have raced us to the same id; first stored wins
        let stored = self
            .lock()
            .entry(id.to_string())
            .or_insert(content)
            .clone();
        Ok(stored)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<String, Arc<str>>> {
        // the map stays consistent even if a holder panicked
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    /// Number of cached identifiers.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Drop all cached content and reset statistics.
    pub fn clear_cache(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DictionarySource> DictionarySource for CachedSource<S> {
    fn fetch(&self, id: &str) -> Result<String> {
        self.fetch_shared(id).map(|c| c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_fetch() {
        let src = MemorySource::new().with("Names.txt", "老五=Lão Ngũ");
        assert_eq!(src.fetch("Names.txt").unwrap(), "老五=Lão Ngũ");
        assert!(matches!(
            src.fetch("missing.txt"),
            Err(Error::SourceUnavailable { .. })
        ));
        assert_eq!(src.fetch_count(), 2);
    }

    #[test]
    fn test_cached_source_fetches_once() {
        let cached = CachedSource::new(MemorySource::new().with("a.txt", "x=y"));

        assert_eq!(&*cached.fetch_shared("a.txt").unwrap(), "x=y");
        assert_eq!(&*cached.fetch_shared("a.txt").unwrap(), "x=y");

        assert_eq!(cached.inner().fetch_count(), 1);
        assert_eq!(cached.cache_stats(), (1, 1));
        assert_eq!(cached.cache_size(), 1);
        assert!(cached.is_cached("a.txt"));
    }

    #[test]
    fn test_cached_source_does_not_cache_failures() {
        let cached = CachedSource::new(MemorySource::new());

        assert!(cached.fetch_shared("gone.txt").is_err());
        assert!(cached.fetch_shared("gone.txt").is_err());

        assert_eq!(cached.inner().fetch_count(), 2);
        assert_eq!(cached.cache_size(), 0);
        assert_eq!(cached.cache_stats(), (0, 2));
    }

    #[test]
    fn test_clear_cache_resets_stats() {
        let cached = CachedSource::new(MemorySource::new().with("a.txt", "x=y"));
        cached.fetch_shared("a.txt").unwrap();
        cached.fetch_shared("a.txt").unwrap();

        cached.clear_cache();
        assert_eq!(cached.cache_stats(), (0, 0));
        assert_eq!(cached.cache_size(), 0);

        cached.fetch_shared("a.txt").unwrap();
        assert_eq!(cached.inner().fetch_count(), 2);
    }

    #[test]
    fn test_directory_source_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("VietPhrase.txt"), "你好=xin chào\n").unwrap();

        let src = DirectorySource::new(dir.path());
        assert_eq!(src.fetch("VietPhrase.txt").unwrap(), "你好=xin chào\n");

        let err = src.fetch("Names.txt").unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { ref id, .. } if id == "Names.txt"));
    }

    #[test]
    fn test_http_source_url_joining() {
        let src = HttpSource::new("https://example.org/dicts/").unwrap();
        assert_eq!(src.url_for("Names.txt"), "https://example.org/dicts/Names.txt");
        assert_eq!(src.url_for("/Names.txt"), "https://example.org/dicts/Names.txt");
    }
}
