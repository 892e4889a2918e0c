//! Writer configuration
//!
//! [`FileConfig`] is the single construction input for the rotating
//! writer and the retention sweeper. It is immutable after construction;
//! `normalized` applies the default fallbacks once, up front.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::*;

/// Configuration for a rotating log file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory holding the log files (created if absent)
    pub dir: PathBuf,
    /// Base file name, e.g. `file.log`
    pub base_name: String,
    /// Period-key pattern using `%Y %m %d %H %M %S` tokens.
    /// An empty string disables time-based bucketing entirely.
    pub time_format: String,
    /// Maximum size of a single file in bytes
    pub max_file_size: u64,
    /// Rotated files older than this are deleted by the sweeper
    pub max_age: Duration,
    /// Permission bits for newly created files (unix)
    pub file_mode: u32,
    /// Interval between retention sweeps
    pub sweep_interval: Duration,
    /// Severity level, carried for the caller; rotation ignores it
    pub level: u8,
    /// Whether the caller splits output per severity level; rotation
    /// ignores it
    pub split_by_level: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            base_name: DEFAULT_BASE_NAME.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_age: DEFAULT_MAX_AGE,
            file_mode: DEFAULT_FILE_MODE,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            level: 0,
            split_by_level: false,
        }
    }
}

impl FileConfig {
    /// Apply default fallbacks to unset or out-of-range fields.
    ///
    /// An empty `time_format` is kept as-is: it selects the legacy
    /// `<base><index>` naming with a single unbounded period.
    pub fn normalized(mut self) -> Self {
        if self.dir.as_os_str().is_empty() {
            self.dir = PathBuf::from(DEFAULT_DIR);
        }
        if self.base_name.is_empty() {
            self.base_name = DEFAULT_BASE_NAME.to_string();
        }
        if self.max_file_size == 0 {
            self.max_file_size = DEFAULT_MAX_FILE_SIZE;
        }
        if self.max_age.is_zero() {
            self.max_age = DEFAULT_MAX_AGE;
        }
        if self.sweep_interval.is_zero() {
            self.sweep_interval = DEFAULT_SWEEP_INTERVAL;
        }
        if self.file_mode == 0 {
            self.file_mode = DEFAULT_FILE_MODE;
        }
        self
    }
}
