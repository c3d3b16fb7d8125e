//! The pool of base images roasts are drawn onto.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use tracing::warn;

use crate::constants::MEME_EXTENSIONS;
use crate::error::RoasterError;

/// A directory of meme images.
#[derive(Clone, Debug)]
pub struct MemePool {
    dir: PathBuf,
}

fn is_meme(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MEME_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

impl MemePool {
    /// Pool backed by `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sorted file names of every usable image in the pool.
    ///
    /// A missing directory is created so it can be filled, and reported as
    /// an error.
    pub async fn list(&self) -> Result<Vec<String>, RoasterError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("Meme folder {} is missing, creating it", self.dir.display());
                tokio::fs::create_dir_all(&self.dir).await?;
                return Err(RoasterError::MemePool("No memes folder".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let mut memes = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_meme(&path) {
                continue;
            }
            // follows symlinks; entries that vanish mid-listing are skipped
            let is_file = tokio::fs::metadata(&path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                memes.push(name.to_string());
            }
        }
        memes.sort();
        Ok(memes)
    }

    /// Picks one image uniformly at random and returns its path.
    pub async fn pick(&self) -> Result<PathBuf, RoasterError> {
        let memes = self.list().await?;
        let name = memes
            .choose(&mut rand::rng())
            .ok_or_else(|| RoasterError::MemePool("No memes".to_string()))?;
        Ok(self.dir.join(name))
    }
}
