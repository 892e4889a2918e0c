//! Stable-name reference to the current file
//!
//! External consumers (tailing tools) open the log by the constant path
//! `<dir>/<base>`; after every file open the writer repoints it at the
//! new file. Failures here never block the write path.

use std::io;
use std::path::Path;

/// Create or replace the `<base>` symlink pointing at `target`.
///
/// The target is the bare file name, so the link stays valid when the
/// directory is moved.
#[cfg(unix)]
pub(crate) fn expose_current(dir: &Path, base: &str, target: &str) -> io::Result<()> {
    let link = dir.join(base);
    match std::fs::remove_file(&link) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
pub(crate) fn expose_current(_dir: &Path, base: &str, target: &str) -> io::Result<()> {
    tracing::debug!("Stable link {} -> {} not supported on this platform", base, target);
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_creates_link() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.log.20240615.1"), b"x").unwrap();

        expose_current(dir.path(), "app.log", "app.log.20240615.1").unwrap();

        let resolved = fs::read_link(dir.path().join("app.log")).unwrap();
        assert_eq!(resolved, PathBuf::from("app.log.20240615.1"));
    }

    #[test]
    fn test_replaces_existing_link() {
        let dir = TempDir::new().unwrap();
        expose_current(dir.path(), "app.log", "app.log.20240615.1").unwrap();
        expose_current(dir.path(), "app.log", "app.log.20240615.2").unwrap();

        let resolved = fs::read_link(dir.path().join("app.log")).unwrap();
        assert_eq!(resolved, PathBuf::from("app.log.20240615.2"));
    }
}
