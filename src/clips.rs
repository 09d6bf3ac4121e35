//! Storage for uploaded match clips. Files are written as-is, never decoded.

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, TactiCoreError};

/// Directory of stored clips
#[derive(Debug, Clone)]
pub struct ClipStore {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl ClipStore {
    pub fn new(dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the file name carries an accepted video extension
    pub fn accepts(&self, original_name: &str) -> bool {
        Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.allowed_extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Store `bytes` as `match_{id}_{YYYYmmdd_HHMMSS}_{name}` and return the path
    pub async fn save(&self, match_id: i64, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.save_at(match_id, original_name, bytes, Local::now().naive_local())
            .await
    }

    pub async fn save_at(
        &self,
        match_id: i64,
        original_name: &str,
        bytes: &[u8],
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf> {
        if !self.accepts(original_name) {
            return Err(TactiCoreError::InvalidClip(format!(
                "{} (accepted: {})",
                original_name,
                self.allowed_extensions.join(", ")
            )));
        }

        let base_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TactiCoreError::InvalidClip(original_name.to_string()))?;

        let filename = clip_file_name(match_id, base_name, timestamp);
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;

        info!("🎬 Stored clip for match {} at {}", match_id, path.display());
        Ok(path)
    }
}

pub fn clip_file_name(match_id: i64, original_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "match_{}_{}_{}",
        match_id,
        timestamp.format("%Y%m%d_%H%M%S"),
        original_name
    )
    .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(20, 45, 7)
            .unwrap()
    }

    fn store(dir: &Path) -> ClipStore {
        ClipStore::new(
            dir.join("videos"),
            vec!["mp4".to_string(), "MOV".to_string(), "m4v".to_string()],
        )
    }

    #[test]
    fn test_clip_file_name() {
        assert_eq!(
            clip_file_name(7, "late goal.mp4", kickoff()),
            "match_7_20240302_204507_late_goal.mp4"
        );
    }

    #[tokio::test]
    async fn test_save_writes_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let clips = store(temp_dir.path());

        let path = clips
            .save_at(7, "late goal.mov", b"clip bytes", kickoff())
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "match_7_20240302_204507_late_goal.mov"
        );
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"clip bytes");
    }

    #[tokio::test]
    async fn test_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let clips = store(temp_dir.path());

        assert!(clips.accepts("Goal.MP4"));
        assert!(!clips.accepts("notes.txt"));
        assert!(!clips.accepts("no_extension"));

        let err = clips.save(1, "notes.txt", b"x").await.unwrap_err();
        assert!(matches!(err, TactiCoreError::InvalidClip(_)));
    }
}
