//! Rotafile - size-rotating, age-expiring log file sink
//!
//! A [`RotatingFileWriter`] appends pre-rendered byte records to the
//! current file and switches to a new one when the next record would
//! reach the size limit. File names carry a time-based period key and a
//! per-period index (`file.log.20240615.3`), so a restart can scan the
//! directory and resume the interrupted sequence instead of overwriting
//! it. A [`RetentionSweeper`] runs in the background and deletes rotated
//! files older than the configured retention window.

mod link;
pub mod naming;
mod rotation;
mod scan;
pub mod sweeper;
mod writer;

pub use rotafile_core::{config::FileConfig, constants, Error, Result};
pub use sweeper::RetentionSweeper;
pub use writer::RotatingFileWriter;

/// Open a rotating writer and launch its retention sweeper.
///
/// Must be called from within a tokio runtime; callers that only need
/// the writer can use [`RotatingFileWriter::new`] directly.
pub fn open(config: FileConfig) -> Result<(RotatingFileWriter, RetentionSweeper)> {
    let writer = RotatingFileWriter::new(config)?;
    let sweeper = RetentionSweeper::spawn(writer.config());
    Ok((writer, sweeper))
}
