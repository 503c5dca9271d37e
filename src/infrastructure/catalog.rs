//! # File Catalog
//!
//! Implements `SoundCatalog` on top of a JSON index (`sounds.json`) and a directory of audio files.
//! New audio is staged next to its final path and only renamed into place once the index is
//! locked, so lookups never wait on file writes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::domain::traits::SoundCatalog;
use crate::domain::types::{Sound, SoundSubmission};

pub struct FileCatalog {
    index_path: PathBuf,
    sounds_dir: PathBuf,
    sounds: RwLock<Vec<Sound>>,
}

impl FileCatalog {
    /// Opens the catalog and loads the index. A missing index is an empty catalog.
    pub fn open(index_path: impl Into<PathBuf>, sounds_dir: impl Into<PathBuf>) -> Result<Self> {
        let index_path = index_path.into();
        let sounds = read_index(&index_path)?;
        tracing::info!("Loaded {} sounds from {}", sounds.len(), index_path.display());
        Ok(Self {
            index_path,
            sounds_dir: sounds_dir.into(),
            sounds: RwLock::new(sounds),
        })
    }

    /// Location of the audio file for `sound`.
    pub fn path_of(&self, sound: &Sound) -> PathBuf {
        self.sounds_dir.join(&sound.filename)
    }

    fn staging_path(&self, sound: &Sound) -> PathBuf {
        self.sounds_dir.join(format!(".{}.part", sound.filename))
    }

    async fn stage(&self, target: &Path, audio: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.sounds_dir).await?;
        tokio::fs::write(target, audio)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(())
    }

    async fn persist(&self, sounds: &[Sound]) -> Result<()> {
        if let Some(parent) = self.index_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(sounds)?;
        tokio::fs::write(&self.index_path, content).await?;
        Ok(())
    }
}

fn read_index(path: &Path) -> Result<Vec<Sound>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn is_listed(sounds: &[Sound], filename: &str) -> bool {
    let filename = filename.to_lowercase();
    sounds.iter().any(|s| s.filename.to_lowercase() == filename)
}

fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

#[async_trait]
impl SoundCatalog for FileCatalog {
    async fn get_by_name(&self, name: &str) -> Option<Sound> {
        let word = name.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }
        let sounds = self.sounds.read().await;

        if let Some(exact) = sounds.iter().find(|s| {
            s.filename.to_lowercase() == word || stem(&s.filename).to_lowercase() == word
        }) {
            return Some(exact.clone());
        }

        let matches: Vec<&Sound> = sounds
            .iter()
            .filter(|s| {
                s.filename.to_lowercase().contains(&word)
                    || s.text.to_lowercase().contains(&word)
                    || s.tags.to_lowercase().contains(&word)
            })
            .collect();
        matches.choose(&mut rand::thread_rng()).map(|s| (*s).clone())
    }

    async fn get_random(&self) -> Option<Sound> {
        self.sounds
            .read()
            .await
            .choose(&mut rand::thread_rng())
            .cloned()
    }

    async fn list_all(&self) -> Vec<Sound> {
        self.sounds.read().await.clone()
    }

    async fn get_by_filename(&self, filename: &str) -> Option<Sound> {
        self.sounds
            .read()
            .await
            .iter()
            .find(|s| s.filename == filename)
            .cloned()
    }

    async fn commit_new(&self, submission: &SoundSubmission, audio: &[u8]) -> Result<Sound, String> {
        let sound = Sound {
            filename: submission.audio.file_name.clone(),
            text: submission.description.clone(),
            tags: submission.tags.clone(),
        };
        if audio.is_empty() {
            return Err(format!("{} has no audio content", sound.filename));
        }
        if is_listed(&self.sounds.read().await, &sound.filename) {
            return Err(format!("{} already exists", sound.filename));
        }

        let staged = self.staging_path(&sound);
        if let Err(e) = self.stage(&staged, audio).await {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(e.to_string());
        }

        let mut sounds = self.sounds.write().await;
        // Another commit may have finished while staging.
        if is_listed(&sounds, &sound.filename) {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(format!("{} already exists", sound.filename));
        }

        let target = self.path_of(&sound);
        if let Err(e) = tokio::fs::rename(&staged, &target).await {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(e.to_string());
        }

        sounds.push(sound.clone());
        if let Err(e) = self.persist(&sounds).await {
            sounds.pop();
            let _ = tokio::fs::remove_file(&target).await;
            return Err(e.to_string());
        }
        Ok(sound)
    }

    async fn reload(&self) -> Result<usize, String> {
        let loaded = read_index(&self.index_path).map_err(|e| e.to_string())?;
        let count = loaded.len();
        *self.sounds.write().await = loaded;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AudioRef, MediaRef};
    use matrix_sdk::ruma::events::room::MediaSource;
    use std::fs;
    use tempfile::TempDir;

    fn entry(filename: &str, text: &str, tags: &str) -> Sound {
        Sound {
            filename: filename.to_string(),
            text: text.to_string(),
            tags: tags.to_string(),
        }
    }

    fn catalog_with(dir: &TempDir, sounds: &[Sound]) -> FileCatalog {
        let index = dir.path().join("sounds.json");
        fs::write(&index, serde_json::to_string(sounds).unwrap()).unwrap();
        FileCatalog::open(index, dir.path().join("sounds")).unwrap()
    }

    #[tokio::test]
    async fn test_missing_index_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = FileCatalog::open(dir.path().join("none.json"), dir.path()).unwrap();
        assert!(catalog.list_all().await.is_empty());
        assert_eq!(catalog.get_random().await, None);
        assert_eq!(catalog.reload().await, Ok(0));
    }

    #[tokio::test]
    async fn test_corrupt_index_fails_to_open() {
        let dir = TempDir::new().unwrap();
        let index = dir.path().join("sounds.json");
        fs::write(&index, "{ not json").unwrap();
        assert!(FileCatalog::open(&index, dir.path()).is_err());
    }

    #[tokio::test]
    async fn test_lookups() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(
            &dir,
            &[
                entry("airhorn.ogg", "Loud horn", "party"),
                entry("boing.ogg", "It goes boing", "cartoon spring"),
                entry("airhorn-long.ogg", "Longer horn", "party"),
            ],
        );

        assert_eq!(catalog.list_all().await.len(), 3);
        assert_eq!(
            catalog.get_by_name("airhorn").await.unwrap().filename,
            "airhorn.ogg"
        );
        assert_eq!(
            catalog.get_by_name("SPRING").await.unwrap().filename,
            "boing.ogg"
        );
        assert!(catalog.get_by_name("horn").await.unwrap().filename.starts_with("airhorn"));
        assert_eq!(catalog.get_by_name("trumpet").await, None);
        assert_eq!(catalog.get_by_name("  ").await, None);
        assert_eq!(
            catalog.get_by_filename("boing.ogg").await.unwrap().text,
            "It goes boing"
        );
        assert_eq!(catalog.get_by_filename("boing").await, None);
        assert!(catalog.get_random().await.is_some());
        assert_eq!(
            catalog.path_of(&entry("boing.ogg", "", "")),
            dir.path().join("sounds").join("boing.ogg")
        );
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[entry("a.ogg", "a", "a")]);
        fs::write(
            dir.path().join("sounds.json"),
            serde_json::to_string(&[entry("a.ogg", "a", "a"), entry("b.ogg", "b", "b")]).unwrap(),
        )
        .unwrap();
        assert_eq!(catalog.reload().await, Ok(2));
        assert!(catalog.get_by_filename("b.ogg").await.is_some());
    }

    fn submission(file_name: &str) -> SoundSubmission {
        SoundSubmission {
            audio: AudioRef {
                media: MediaRef(MediaSource::Plain(
                    format!("mxc://example.org/{file_name}").into(),
                )),
                file_name: file_name.to_string(),
            },
            description: format!("all about {file_name}"),
            tags: "new".to_string(),
        }
    }

    #[tokio::test]
    async fn test_commit_stores_audio_and_index() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[entry("boing.ogg", "boing", "spring")]);

        let sound = catalog
            .commit_new(&submission("new-sound.ogg"), b"OggS audio")
            .await
            .unwrap();
        assert_eq!(sound.filename, "new-sound.ogg");
        assert_eq!(
            fs::read(dir.path().join("sounds").join("new-sound.ogg")).unwrap(),
            b"OggS audio"
        );
        assert!(!dir.path().join("sounds").join(".new-sound.ogg.part").exists());

        // The index on disk has both entries, in order.
        assert_eq!(catalog.reload().await, Ok(2));
        assert_eq!(catalog.list_all().await[1].text, "all about new-sound.ogg");
    }

    #[tokio::test]
    async fn test_commit_rejects_duplicate() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[entry("boing.ogg", "boing", "spring")]);
        assert!(catalog.commit_new(&submission("Boing.ogg"), b"OggS").await.is_err());
        assert_eq!(catalog.list_all().await.len(), 1);
        assert!(!dir.path().join("sounds").join("Boing.ogg").exists());
    }

    #[tokio::test]
    async fn test_commit_rejects_empty_audio() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[]);
        assert!(catalog.commit_new(&submission("silence.ogg"), b"").await.is_err());
        assert!(catalog.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_rolls_back_when_index_unwritable() {
        let dir = TempDir::new().unwrap();
        let index = dir.path().join("sounds.json");
        let catalog = FileCatalog::open(&index, dir.path().join("sounds")).unwrap();
        // A directory in place of the index file makes persisting fail.
        fs::create_dir(&index).unwrap();

        assert!(catalog.commit_new(&submission("new-sound.ogg"), b"OggS").await.is_err());
        assert!(catalog.list_all().await.is_empty());
        assert!(!dir.path().join("sounds").join("new-sound.ogg").exists());
        assert!(!dir.path().join("sounds").join(".new-sound.ogg.part").exists());
    }
}
