//! Startup recovery scan
//!
//! On construction the writer lists its directory and resumes the
//! highest-indexed file of the current period instead of overwriting it
//! or blindly restarting from index 1.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use rotafile_core::Result;

use crate::naming::{NamePattern, ParseOutcome};

/// Index and size to resume writing at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Recovered {
    pub index: u64,
    pub size: u64,
}

/// Determine the file index and size the writer should continue with.
///
/// No file for the current period exists: start at index 1, size 0.
/// The highest-indexed file is already full: advance to the next index.
/// Otherwise resume that file and keep appending to it.
pub(crate) fn recover(
    dir: &Path,
    pattern: &NamePattern,
    period_key: &str,
    max_file_size: u64,
) -> Result<Recovered> {
    let mut candidate: Option<(u64, u64)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };

        let index = match pattern.parse(period_key, name) {
            ParseOutcome::NoMatch => continue,
            ParseOutcome::Unparseable => {
                warn!("Ignoring log file with unparseable index: {}", name);
                continue;
            }
            ParseOutcome::Index(index) => index,
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            debug!("Skipping directory: {}", name);
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let size = entry.metadata()?.len();
        if candidate.map_or(true, |(best, _)| index > best) {
            candidate = Some((index, size));
        }
    }

    Ok(match candidate {
        None => Recovered { index: 1, size: 0 },
        Some((index, size)) if size >= max_file_size => Recovered {
            index: index + 1,
            size: 0,
        },
        Some((index, size)) => Recovered { index, size },
    })
}
