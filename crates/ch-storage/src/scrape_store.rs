//! File system storage for scrapes

use ch_core::error::{HarvesterError, Result};
use ch_core::scrape::{Scrape, ScrapeFile, ScrapeInfo, ScrapeStorage};
use ch_core::types::ScrapeId;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// File system based scrape storage
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Scrapes subdirectory
    scrapes_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let scrapes_dir = base_dir.join("scrapes");

        let storage = Self {
            base_dir,
            scrapes_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage with the default directory (~/.comment-harvester)
    pub fn default_location() -> Result<Self> {
        Self::new(default_data_dir())
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.scrapes_dir.exists() {
            fs::create_dir_all(&self.scrapes_dir).map_err(|e| {
                HarvesterError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create scrapes directory: {}", e),
                ))
            })?;
            debug!("Created scrapes directory: {:?}", self.scrapes_dir);
        }
        Ok(())
    }

    /// Get the path for a scrape file
    fn scrape_path(&self, id: &ScrapeId) -> PathBuf {
        self.scrapes_dir.join(format!("{}.json", id))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, id: &ScrapeId) -> PathBuf {
        self.scrapes_dir.join(format!(".{}.json.tmp", id))
    }

    /// Write scrape atomically (write to temp, then rename)
    fn atomic_write(&self, id: &ScrapeId, scrape: &Scrape) -> Result<()> {
        let temp_path = self.temp_path(id);
        let final_path = self.scrape_path(id);

        let file = ScrapeFile::new(scrape.clone());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            HarvesterError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            HarvesterError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved scrape {} to {:?}", id, final_path);
        Ok(())
    }

    /// Read and parse a scrape file
    fn read_scrape(&self, path: &PathBuf) -> Result<Scrape> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                HarvesterError::ScrapeNotFound(id.to_string())
            } else {
                HarvesterError::Io(e)
            }
        })?;

        let reader = BufReader::new(file);
        let scrape_file: ScrapeFile = serde_json::from_reader(reader)?;
        scrape_file.into_scrape()
    }

    /// Read scrape info from a file
    fn read_scrape_info(&self, path: &PathBuf) -> Result<ScrapeInfo> {
        let scrape = self.read_scrape(path)?;
        Ok(scrape.info())
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get scrapes directory
    pub fn scrapes_dir(&self) -> &PathBuf {
        &self.scrapes_dir
    }
}

/// Default data directory for comment-harvester
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "comment-harvester", "comment-harvester")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".comment-harvester")
        })
}

impl ScrapeStorage for FileSystemStorage {
    fn save(&self, scrape: &Scrape) -> Result<()> {
        self.atomic_write(&scrape.id, scrape)
    }

    fn load(&self, id: &ScrapeId) -> Result<Scrape> {
        let path = self.scrape_path(id);
        self.read_scrape(&path)
    }

    fn list(&self) -> Result<Vec<ScrapeInfo>> {
        let mut scrapes = Vec::new();

        let entries = fs::read_dir(&self.scrapes_dir).map_err(|e| {
            HarvesterError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read scrapes directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_scrape_info(&path) {
                Ok(info) => scrapes.push(info),
                Err(e) => {
                    warn!("Failed to read scrape file {:?}: {}", path, e);
                }
            }
        }

        Ok(scrapes)
    }

    fn delete(&self, id: &ScrapeId) -> Result<()> {
        let path = self.scrape_path(id);

        if !path.exists() {
            return Err(HarvesterError::ScrapeNotFound(id.to_string()));
        }

        fs::remove_file(&path).map_err(|e| {
            HarvesterError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete scrape file: {}", e),
            ))
        })?;

        debug!("Deleted scrape {} from {:?}", id, path);
        Ok(())
    }

    fn exists(&self, id: &ScrapeId) -> bool {
        self.scrape_path(id).exists()
    }
}
