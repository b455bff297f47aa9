// Outbox: local fallback storage for reports that failed to submit
//
// A saved draft is one JSON file per report so nothing is lost when the
// backend is unreachable. Operators can replay the directory later.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::flow::ReportPayload;

pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist a payload; returns the path it was written to.
    pub fn save(&self, payload: &ReportPayload) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create outbox directory {}", self.dir.display()))?;

        let filename = format!("{}-{}.json", Utc::now().format("%Y%m%dT%H%M%S"), Uuid::new_v4());
        let path = self.dir.join(filename);

        let json = serde_json::to_string_pretty(payload)
            .context("Failed to serialize report payload")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write outbox file {}", path.display()))?;

        tracing::info!("Saved unsent report to {}", path.display());
        Ok(path)
    }

    /// Paths of saved drafts, oldest first.
    pub fn pending(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read outbox directory {}", self.dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        paths.sort();
        Ok(paths)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
