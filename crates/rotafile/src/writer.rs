//! Rotating file writer
//!
//! All writes and rotations happen under a single write lock, so the
//! writer can be shared across tasks behind an `Arc`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use rotafile_core::{Error, FileConfig, Result};

use crate::link;
use crate::naming::NamePattern;
use crate::rotation::{should_rotate, RotationState};
use crate::scan;

/// Append-only sink that switches files when the size limit is reached
#[derive(Debug)]
pub struct RotatingFileWriter {
    config: FileConfig,
    pattern: NamePattern,
    state: RwLock<RotationState>,
}

impl RotatingFileWriter {
    /// Create the writer, recovering index and size from any files a
    /// previous run left in the directory.
    pub fn new(config: FileConfig) -> Result<Self> {
        let config = config.normalized();
        ensure_dir(&config.dir)?;

        let pattern = NamePattern::new(config.base_name.clone(), config.time_format.clone());
        let period_key = pattern.period_key();
        let recovered = scan::recover(&config.dir, &pattern, &period_key, config.max_file_size)?;

        let name = pattern.file_name(&period_key, recovered.index);
        let file = open_append(&config.dir.join(&name), config.file_mode)?;
        expose(&config.dir, pattern.base(), &name);
        debug!(
            "Opened {} at index {} with {} bytes",
            name, recovered.index, recovered.size
        );

        Ok(Self {
            config,
            pattern,
            state: RwLock::new(RotationState {
                period_key,
                index: recovered.index,
                size: recovered.size,
                file: Some(file),
            }),
        })
    }

    /// Append one record, rotating first if it would reach the size
    /// limit. Records are never split across files.
    pub fn write(&self, record: &[u8]) -> Result<()> {
        let mut state = self.state.write();

        if should_rotate(state.size, record.len() as u64, self.config.max_file_size) {
            state.size = 0;
            // Close is best-effort; the handle is simply dropped.
            state.file.take();
            state.index += 1;
            state.period_key = self.pattern.period_key();

            let name = self.pattern.file_name(&state.period_key, state.index);
            let file = open_append(&self.config.dir.join(&name), self.config.file_mode)?;
            state.file = Some(file);
            expose(&self.config.dir, self.pattern.base(), &name);
            debug!("Rotated to {}", name);
        }

        let file = state.file.as_mut().ok_or(Error::FileNotOpen)?;
        file.write_all(record)?;
        state.size += record.len() as u64;
        Ok(())
    }

    /// The normalized configuration this writer runs with
    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    /// Index of the file currently receiving writes
    pub fn current_index(&self) -> u64 {
        self.state.read().index
    }

    /// Bytes written to the current file so far
    pub fn current_size(&self) -> u64 {
        self.state.read().size
    }

    /// Full path of the file currently receiving writes
    pub fn current_path(&self) -> PathBuf {
        let state = self.state.read();
        self.config
            .dir
            .join(self.pattern.file_name(&state.period_key, state.index))
    }
}

/// Create the log directory if needed; an existing non-directory at the
/// path aborts construction.
fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory(dir.to_path_buf())),
        Err(_) => Ok(fs::create_dir_all(dir)?),
    }
}

fn open_append(path: &Path, mode: u32) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    opts.open(path)
}

fn expose(dir: &Path, base: &str, target: &str) {
    if let Err(e) = link::expose_current(dir, base, target) {
        warn!("Failed to update stable link {}: {}", base, e);
    }
}
