//! File-based cache for synthesized prompt audio
//!
//! Entries live at `<dir>/<language>/<key>.mp3`. Reads and writes are
//! best-effort: a missing or unreadable entry is a miss, and a failed
//! write never fails the synthesis that produced the audio.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::language::Language;

/// File-based TTS cache
pub struct TtsCache {
    dir: PathBuf,
}

impl TtsCache {
    /// Create a cache rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache location under the user cache directory
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("career-scout")
            .join("tts")
    }

    /// Root directory of this cache
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, language: Language, key: &str) -> PathBuf {
        self.dir
            .join(language.as_str())
            .join(format!("{}.mp3", key))
    }

    /// Fetch a cached payload, or None on a miss
    pub async fn get(&self, language: Language, key: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(language, key)).await.ok()
    }

    /// Store a payload under the given key
    pub async fn put(
        &self,
        language: Language,
        key: &str,
        bytes: &[u8],
    ) -> Result<(), std::io::Error> {
        let path = self.entry_path(language, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn miss_on_empty_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = TtsCache::new(tmp.path());
        assert!(cache.get(Language::En, "question-1").await.is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let tmp = TempDir::new().unwrap();
        let cache = TtsCache::new(tmp.path());

        cache
            .put(Language::Hi, "question-3-with-options", b"mp3-bytes")
            .await
            .unwrap();

        let hit = cache.get(Language::Hi, "question-3-with-options").await;
        assert_eq!(hit, Some(b"mp3-bytes".to_vec()));
    }

    #[tokio::test]
    async fn entries_are_partitioned_by_language() {
        let tmp = TempDir::new().unwrap();
        let cache = TtsCache::new(tmp.path());

        cache.put(Language::En, "question-1", b"english").await.unwrap();
        assert!(cache.get(Language::Ta, "question-1").await.is_none());
    }

    #[tokio::test]
    async fn entry_layout_matches_language_and_key() {
        let tmp = TempDir::new().unwrap();
        let cache = TtsCache::new(tmp.path());

        cache.put(Language::En, "result-cyber-security", b"x").await.unwrap();
        let expected = tmp.path().join("en").join("result-cyber-security.mp3");
        assert!(expected.exists());
    }
}
