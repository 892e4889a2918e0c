//! Rotafile Core - Shared configuration, constants, and error handling

pub mod config;
pub mod constants;
pub mod error;

pub use config::FileConfig;
pub use error::{Error, Result};
