//! Constants and default values for rotafile

use std::time::Duration;

/// Default log directory
pub const DEFAULT_DIR: &str = "./log";

/// Default base file name
pub const DEFAULT_BASE_NAME: &str = "file.log";

/// Default time-format pattern for the rotation period key
pub const DEFAULT_TIME_FORMAT: &str = "%Y%m%d";

/// Default max file size in bytes (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default max retention age for rotated files (7 days)
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default file creation permission bits
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Default interval between retention sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
