//! Local file cache of raw sheet grids.
//!
//! Each fetched grid is stored untouched as `<cache_dir>/<kind>_<year>.json`, so that the
//! pipeline can be re-run without going back to the transport.

use crate::api::Sheet;
use crate::error::PipelineError;
use crate::sources::SourceKind;
use crate::{utils, Result};
use anyhow::Context;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

type Grid = Vec<Vec<String>>;

/// How the pipeline uses the cache.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Always fetch from the transport and never write the cache.
    Off,
    /// Use a cached grid when there is one, otherwise fetch it and cache it.
    #[default]
    ReadThrough,
    /// Only use cached grids. A missing entry is an error and the transport is never called.
    Required,
}

serde_plain::derive_display_from_serialize!(CacheMode);
serde_plain::derive_fromstr_from_deserialize!(CacheMode);

/// The raw-grid cache rooted at one directory.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    mode: CacheMode,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>, mode: CacheMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// The cache file for the `kind` sheet of `year`.
    pub fn path(&self, year: i32, kind: SourceKind) -> PathBuf {
        self.dir.join(format!("{kind}_{year}.json"))
    }

    pub fn exists(&self, year: i32, kind: SourceKind) -> bool {
        self.path(year, kind).is_file()
    }

    /// Writes `grid` to the cache, creating the cache directory if needed.
    pub async fn save(&self, year: i32, kind: SourceKind, grid: &[Vec<String>]) -> Result<()> {
        utils::make_dir(&self.dir)
            .await
            .context("Unable to create the cache directory")?;
        let path = self.path(year, kind);
        let data = serde_json::to_string_pretty(grid).context("Unable to serialize grid")?;
        utils::write(&path, data).await?;
        trace!("Cached {kind} {year} at {}", path.display());
        Ok(())
    }

    /// Reads a cached grid, or `None` when nothing is cached for `year` and `kind`.
    pub async fn load(&self, year: i32, kind: SourceKind) -> Result<Option<Grid>> {
        let path = self.path(year, kind);
        if !path.is_file() {
            return Ok(None);
        }
        utils::deserialize(&path).await.map(Some)
    }

    /// Returns the grid for the `kind` sheet of `year`, going to the cache and/or `sheet`
    /// according to the cache mode.
    ///
    /// # Errors
    /// - `PipelineError::CacheMiss` when the mode is `Required` and nothing is cached
    /// - Any transport or filesystem error
    pub async fn fetch(
        &self,
        sheet: &mut (dyn Sheet + Send),
        year: i32,
        kind: SourceKind,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Grid> {
        match self.mode {
            CacheMode::Off => sheet.get(spreadsheet_id, sheet_name).await,
            CacheMode::ReadThrough => {
                if let Some(grid) = self.load(year, kind).await? {
                    debug!("Using cached {kind} data for {year}");
                    return Ok(grid);
                }
                let grid = sheet.get(spreadsheet_id, sheet_name).await?;
                self.save(year, kind, &grid).await?;
                Ok(grid)
            }
            CacheMode::Required => self.load(year, kind).await?.ok_or_else(|| {
                PipelineError::CacheMiss {
                    year,
                    kind,
                    path: self.path(year, kind),
                }
                .into()
            }),
        }
    }

    /// Counts the cached files and finds the oldest modification time.
    pub async fn info(&self) -> Result<CacheInfo> {
        let mut info = CacheInfo::default();
        for path in self.cache_files().await? {
            let modified = tokio::fs::metadata(&path)
                .await
                .and_then(|m| m.modified())
                .with_context(|| format!("Unable to stat {}", path.display()))?;
            let modified = DateTime::<Local>::from(modified);
            info.files += 1;
            info.oldest = Some(match info.oldest {
                Some(oldest) if oldest <= modified => oldest,
                _ => modified,
            });
        }
        Ok(info)
    }

    /// Deletes every cached file and returns how many were removed.
    pub async fn clear(&self) -> Result<usize> {
        let files = self.cache_files().await?;
        for path in &files {
            tokio::fs::remove_file(path)
                .await
                .with_context(|| format!("Unable to delete {}", path.display()))?;
        }
        Ok(files.len())
    }

    /// The `.json` files in the cache directory. A missing directory is an empty cache.
    async fn cache_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Unable to read {}", self.dir.display()))?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// A summary of what is in the cache.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct CacheInfo {
    pub files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<DateTime<Local>>,
}

impl Display for CacheInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.oldest {
            Some(oldest) if self.files > 0 => write!(
                f,
                "Cached: {} files, oldest from {}",
                self.files,
                oldest.format("%Y-%m-%d %H:%M")
            ),
            _ => write!(f, "No cache"),
        }
    }
}
