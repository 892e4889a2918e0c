//! Retention sweeper
//!
//! A background task that periodically deletes rotated files older than
//! the configured retention window. The sweep matches files under any
//! period key, so files from a rolled-over period still age out. It
//! shares no mutable state with the writer; coordination happens purely
//! through the file system.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use rotafile_core::FileConfig;

use crate::naming::{NamePattern, ParseOutcome};

/// Handle to the background retention task
pub struct RetentionSweeper {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl RetentionSweeper {
    /// Launch the periodic sweep task. Must be called from within a
    /// tokio runtime.
    pub fn spawn(config: &FileConfig) -> Self {
        let dir = config.dir.clone();
        let pattern = NamePattern::new(config.base_name.clone(), config.time_format.clone());
        let max_age = config.max_age;
        let tick = config.sweep_interval;

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    _ = tokio::time::sleep(tick) => {
                        let removed = sweep(&dir, &pattern, max_age);
                        if removed > 0 {
                            debug!("Retention sweep removed {} files", removed);
                        }
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

/// Delete rotated files whose modification time plus `max_age` has
/// already passed. Returns the number of files removed; every failure
/// is logged and swallowed.
pub fn sweep(dir: &Path, pattern: &NamePattern, max_age: Duration) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list log directory {}: {}", dir.display(), e);
            return 0;
        }
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };

        match pattern.parse_any(name) {
            ParseOutcome::NoMatch => continue,
            ParseOutcome::Unparseable => {
                warn!("Ignoring log file with unparseable index: {}", name);
                continue;
            }
            ParseOutcome::Index(_) => {}
        }

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };
        if file_type.is_dir() {
            debug!("Skipping directory: {}", name);
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        if is_expired(&entry.path(), now, max_age) {
            match fs::remove_file(entry.path()) {
                Ok(()) => {
                    info!("Deleted expired log file: {}", name);
                    removed += 1;
                }
                Err(e) => warn!("Failed to delete {}: {}", name, e),
            }
        }
    }

    removed
}

fn is_expired(path: &Path, now: SystemTime, max_age: Duration) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return false,
    };
    match modified.checked_add(max_age) {
        Some(deadline) => deadline <= now,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::thread;
    use tempfile::TempDir;

    const LONG: Duration = Duration::from_secs(60 * 60);
    const SHORT: Duration = Duration::from_millis(10);

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap().write_all(b"x").unwrap();
    }

    fn age(duration: Duration) {
        thread::sleep(duration + Duration::from_millis(30));
    }

    #[test]
    fn test_removes_expired_files() {
        let dir = TempDir::new().unwrap();
        let pattern = NamePattern::new("app.log", "%Y%m%d");
        touch(dir.path(), "app.log.20240615.1");
        touch(dir.path(), "app.log.20240615.2");
        age(SHORT);

        let removed = sweep(dir.path(), &pattern, SHORT);
        assert_eq!(removed, 2);
        assert!(!dir.path().join("app.log.20240615.1").exists());
    }

    #[test]
    fn test_retains_files_within_window() {
        let dir = TempDir::new().unwrap();
        let pattern = NamePattern::new("app.log", "%Y%m%d");
        touch(dir.path(), "app.log.20240615.1");

        let removed = sweep(dir.path(), &pattern, LONG);
        assert_eq!(removed, 0);
        assert!(dir.path().join("app.log.20240615.1").exists());
    }

    #[test]
    fn test_reaps_files_from_old_periods() {
        let dir = TempDir::new().unwrap();
        let pattern = NamePattern::new("app.log", "%Y%m%d");
        touch(dir.path(), "app.log.20200101.7");
        age(SHORT);

        let removed = sweep(dir.path(), &pattern, SHORT);
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_ignores_foreign_and_unparseable_names() {
        let dir = TempDir::new().unwrap();
        let pattern = NamePattern::new("app.log", "%Y%m%d");
        touch(dir.path(), "other.txt");
        touch(dir.path(), "app.log.20240615.bak");
        touch(dir.path(), "app.log");
        age(SHORT);

        let removed = sweep(dir.path(), &pattern, SHORT);
        assert_eq!(removed, 0);
        assert!(dir.path().join("other.txt").exists());
        assert!(dir.path().join("app.log.20240615.bak").exists());
        assert!(dir.path().join("app.log").exists());
    }

    #[test]
    fn test_legacy_naming() {
        let dir = TempDir::new().unwrap();
        let pattern = NamePattern::new("app.log", "");
        touch(dir.path(), "app.log1");
        touch(dir.path(), "app.log");
        age(SHORT);

        let removed = sweep(dir.path(), &pattern, SHORT);
        assert_eq!(removed, 1);
        assert!(dir.path().join("app.log").exists());
    }

    #[test]
    fn test_missing_directory_is_harmless() {
        let pattern = NamePattern::new("app.log", "%Y%m%d");
        let removed = sweep(Path::new("/nonexistent/for/testing"), &pattern, LONG);
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_spawned_task_sweeps_and_shuts_down() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.log.20240615.1");

        let config = FileConfig {
            dir: dir.path().to_path_buf(),
            base_name: "app.log".to_string(),
            max_age: Duration::from_millis(1),
            sweep_interval: Duration::from_millis(10),
            ..FileConfig::default()
        };

        let sweeper = RetentionSweeper::spawn(&config);
        tokio::time::sleep(Duration::from_millis(200)).await;
        sweeper.shutdown().await;

        assert!(!dir.path().join("app.log.20240615.1").exists());
    }
}
