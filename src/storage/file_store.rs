//! In-memory link table snapshotted to a single JSON file
//!
//! Every mutation holds the write lock for its whole read-modify-persist
//! sequence, so the snapshot on disk always matches a table state that some
//! caller actually observed. Disk I/O therefore runs under the lock and a slow
//! disk serializes all store access.
//!
//! If the snapshot write fails after a mutation, the in-memory change is kept
//! and the caller receives [`ShortyError::Persistence`]. Memory and disk may
//! diverge until the next successful save.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, trace, warn};

use super::Mapping;
use crate::errors::{Result, ShortyError};
use crate::utils::{
    DEFAULT_CODE_LENGTH, MAX_CUSTOM_CODE_LENGTH, MIN_CUSTOM_CODE_LENGTH, OsRandom, RandomSource,
    generate_random_code_with, validate_custom_code,
};

pub struct FileStore {
    path: PathBuf,
    links: RwLock<HashMap<String, Mapping>>,
    random: Arc<dyn RandomSource>,
    code_length: usize,
}

impl FileStore {
    /// Create an empty store that persists to `path`.
    ///
    /// Nothing is read from disk here; call [`FileStore::load`] to pick up an
    /// existing snapshot.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ShortyError::config("empty store path"));
        }

        Ok(Self {
            path,
            links: RwLock::new(HashMap::new()),
            random: Arc::new(OsRandom),
            code_length: DEFAULT_CODE_LENGTH,
        })
    }

    /// Replace the random source used for generated codes
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Set the length of generated codes (0 means the default)
    ///
    /// Generated codes must stay reachable through the redirect route, so the
    /// length is bounded like a custom code.
    pub fn with_code_length(mut self, length: usize) -> Result<Self> {
        let length = if length == 0 {
            DEFAULT_CODE_LENGTH
        } else {
            length
        };
        if !(MIN_CUSTOM_CODE_LENGTH..=MAX_CUSTOM_CODE_LENGTH).contains(&length) {
            return Err(ShortyError::config(format!(
                "code length {} out of range ({}-{})",
                length, MIN_CUSTOM_CODE_LENGTH, MAX_CUSTOM_CODE_LENGTH
            )));
        }
        self.code_length = length;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    // ============ Link operations ============

    /// Create a mapping for `url` and return its code.
    ///
    /// With a non-empty `custom_code` the code is validated and must not be
    /// taken yet; otherwise random codes are drawn until a free one is found.
    pub fn create(&self, url: &str, custom_code: Option<&str>) -> Result<String> {
        if url.is_empty() {
            return Err(ShortyError::invalid_input("url required"));
        }

        let custom = custom_code.filter(|c| !c.is_empty());
        if let Some(code) = custom {
            validate_custom_code(code)?;
        }

        let mut links = self.links.write();

        let code = match custom {
            Some(code) => {
                if links.contains_key(code) {
                    warn!("Custom code already exists: {}", code);
                    return Err(ShortyError::conflict(format!(
                        "custom code '{}' already exists",
                        code
                    )));
                }
                code.to_string()
            }
            None => self.mint_code(&links)?,
        };

        links.insert(code.clone(), Mapping::new(code.as_str(), url));
        info!("Created link '{}' -> '{}'", code, url);

        self.persist(&links, "create")?;
        Ok(code)
    }

    pub fn get(&self, code: &str) -> Option<Mapping> {
        self.links.read().get(code).cloned()
    }

    /// All mappings in no particular order
    pub fn list(&self) -> Vec<Mapping> {
        self.links.read().values().cloned().collect()
    }

    pub fn delete(&self, code: &str) -> Result<()> {
        let mut links = self.links.write();
        if links.remove(code).is_none() {
            return Err(ShortyError::not_found(format!("link '{}' not found", code)));
        }
        info!("Deleted link '{}'", code);

        self.persist(&links, "delete")
    }

    pub fn increment_clicks(&self, code: &str) -> Result<()> {
        let mut links = self.links.write();
        let link = links
            .get_mut(code)
            .ok_or_else(|| ShortyError::not_found(format!("link '{}' not found", code)))?;
        link.clicks = link.clicks.saturating_add(1);
        trace!("Link '{}' now has {} clicks", code, link.clicks);

        self.persist(&links, "increment_clicks")
    }

    // ============ Snapshot ============

    /// Replace the whole table with the contents of the snapshot file.
    ///
    /// Duplicate codes in the file are tolerated; the last record wins.
    pub fn load(&self) -> Result<()> {
        let mut links = self.links.write();

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ShortyError::snapshot_not_found(format!(
                    "snapshot file does not exist: {}",
                    self.path.display()
                )));
            }
            Err(e) => {
                error!("Failed to read snapshot {}: {}", self.path.display(), e);
                return Err(ShortyError::io(format!(
                    "failed to read snapshot {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let records: Vec<Mapping> = serde_json::from_slice(&content).map_err(|e| {
            error!("Failed to parse snapshot {}: {}", self.path.display(), e);
            ShortyError::serialization(format!(
                "failed to parse snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let total = records.len();
        let mut table = HashMap::with_capacity(total);
        for record in records {
            table.insert(record.code.clone(), record);
        }

        if table.len() < total {
            warn!(
                "Snapshot {} contains {} duplicate code(s); kept the last occurrence of each",
                self.path.display(),
                total - table.len()
            );
        }

        *links = table;
        info!("Loaded {} links from {}", links.len(), self.path.display());
        Ok(())
    }

    /// Write the current table to the snapshot file atomically.
    pub fn save(&self) -> Result<()> {
        let links = self.links.read();
        write_snapshot(&self.path, &links)
    }

    fn persist(&self, links: &HashMap<String, Mapping>, operation: &str) -> Result<()> {
        write_snapshot(&self.path, links).map_err(|e| {
            error!(
                "{} applied in memory but snapshot write failed: {}",
                operation, e
            );
            ShortyError::persistence(format!(
                "{} applied but not saved: {}",
                operation,
                e.message()
            ))
        })
    }

    fn mint_code(&self, links: &HashMap<String, Mapping>) -> Result<String> {
        let mut attempts: u64 = 0;
        loop {
            let code = generate_random_code_with(self.random.as_ref(), self.code_length)?;
            attempts += 1;
            if !links.contains_key(&code) {
                if attempts > 1 {
                    debug!("Found a free code after {} attempts", attempts);
                }
                return Ok(code);
            }
        }
    }
}

/// Serialize `links` into a temp file next to `path`, then rename it over
/// `path`. Readers see either the old or the new snapshot, never a partial one.
fn write_snapshot(path: &Path, links: &HashMap<String, Mapping>) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| {
        ShortyError::io(format!(
            "failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let records: Vec<&Mapping> = links.values().collect();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".shorty-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| {
        ShortyError::io(format!(
            "failed to create temp file in {}: {}",
            dir.display(),
            e
        ))
    })?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &records)
            .map_err(|e| ShortyError::io(format!("failed to write snapshot: {}", e)))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| {
        ShortyError::io(format!(
            "failed to replace snapshot {}: {}",
            path.display(),
            e.error
        ))
    })?;

    trace!("Wrote {} links to {}", records.len(), path.display());
    Ok(())
}
