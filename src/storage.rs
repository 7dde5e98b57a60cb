//! Saves raw drawings to disk under timestamped names.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::constants::{DRAWING_FILE_EXTENSION, DRAWING_FILE_PREFIX, MEDIA_ROUTE};

/// A drawing written by [`DrawingStore::save`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedDrawing {
    /// `airdraw_<YYYYMMDDHHMMSS>.png`
    pub filename: String,
    /// Where the file lives on disk.
    pub file_path: PathBuf,
    /// Where the file is served, under `/media`.
    pub public_path: String,
}

/// Writes drawings into one directory. Two saves in the same second share a
/// name and the later one wins.
#[derive(Clone, Debug)]
pub struct DrawingStore {
    dir: PathBuf,
}

impl DrawingStore {
    /// A store rooted at `dir`, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory drawings are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` verbatim under a name derived from the current local time.
    pub async fn save(&self, bytes: &[u8]) -> Result<SavedDrawing, std::io::Error> {
        self.save_at(bytes, &Local::now()).await
    }

    /// Writes `bytes` verbatim under a name derived from `timestamp`.
    pub async fn save_at<Tz: TimeZone>(
        &self,
        bytes: &[u8],
        timestamp: &DateTime<Tz>,
    ) -> Result<SavedDrawing, std::io::Error>
    where
        Tz::Offset: std::fmt::Display,
    {
        let filename = drawing_filename(timestamp);
        tokio::fs::create_dir_all(&self.dir).await?;
        let file_path = self.dir.join(&filename);
        tokio::fs::write(&file_path, bytes).await?;
        info!("Saved drawing {} ({} bytes)", file_path.display(), bytes.len());

        Ok(SavedDrawing {
            public_path: format!("{MEDIA_ROUTE}/{filename}"),
            filename,
            file_path,
        })
    }
}

/// `airdraw_<YYYYMMDDHHMMSS>.png` for the given time.
pub fn drawing_filename<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{DRAWING_FILE_PREFIX}{}.{DRAWING_FILE_EXTENSION}",
        timestamp.format("%Y%m%d%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_filename_format() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid time");
        assert_eq!(drawing_filename(&timestamp), "airdraw_20240309070501.png");
    }

    #[tokio::test]
    async fn test_save_round_trips_bytes() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = DrawingStore::new(tmp.path().join("nested").join("media"));
        let bytes = b"\x89PNG not really, but saved verbatim";

        let saved = store.save(bytes).await.expect("save");
        assert!(saved.filename.starts_with("airdraw_"));
        assert!(saved.filename.ends_with(".png"));
        assert_eq!(saved.filename.len(), "airdraw_".len() + 14 + ".png".len());
        assert_eq!(saved.public_path, format!("/media/{}", saved.filename));
        assert_eq!(saved.file_path, store.dir().join(&saved.filename));
        assert_eq!(tokio::fs::read(&saved.file_path).await.expect("read"), bytes);
    }

    #[tokio::test]
    async fn test_same_second_last_write_wins() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = DrawingStore::new(tmp.path());
        let timestamp = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid time");

        let first = store.save_at(b"first", &timestamp).await.expect("save");
        let second = store.save_at(b"second", &timestamp).await.expect("save");
        assert_eq!(first.file_path, second.file_path);
        assert_eq!(tokio::fs::read(&second.file_path).await.expect("read"), b"second");
    }
}
