//! File naming scheme
//!
//! Rotated files are named `<base>.<period key>.<index>`, where the
//! period key is the configured time pattern rendered against the wall
//! clock. With time bucketing disabled (empty pattern) the legacy form
//! `<base><index>` is used, with no separator before the number.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use std::fmt::Write;

/// Outcome of matching a directory entry against the naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Name does not belong to this writer's file family
    NoMatch,
    /// Name has the right prefix but its index suffix is not a decimal
    /// integer; excluded from index tracking and deletion
    Unparseable,
    /// A rotated file with this index
    Index(u64),
}

/// Naming scheme for one writer's file family
#[derive(Debug, Clone)]
pub struct NamePattern {
    base: String,
    time_format: String,
}

impl NamePattern {
    pub fn new(base: impl Into<String>, time_format: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            time_format: time_format.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the period key against the current wall clock.
    ///
    /// Recomputed at every file open, so a process straddling a period
    /// boundary picks up the new key at its next rotation.
    pub fn period_key(&self) -> String {
        render_period_key(&self.time_format, &Local::now().naive_local())
    }

    /// Build the file name for (period key, index)
    pub fn file_name(&self, period_key: &str, index: u64) -> String {
        if period_key.is_empty() {
            format!("{}{}", self.base, index)
        } else {
            format!("{}.{}.{}", self.base, period_key, index)
        }
    }

    /// Match a name against the given period key and extract its index.
    ///
    /// The name equal to the bare prefix is the stable link, not a
    /// rotated file, and reports [`ParseOutcome::NoMatch`].
    pub fn parse(&self, period_key: &str, name: &str) -> ParseOutcome {
        let rest = if period_key.is_empty() {
            match name.strip_prefix(self.base.as_str()) {
                Some(rest) => rest,
                None => return ParseOutcome::NoMatch,
            }
        } else {
            let prefix = format!("{}.{}.", self.base, period_key);
            match name.strip_prefix(prefix.as_str()) {
                Some(rest) => rest,
                None => return ParseOutcome::NoMatch,
            }
        };
        if rest.is_empty() {
            return ParseOutcome::NoMatch;
        }
        match parse_index(rest) {
            Some(index) => ParseOutcome::Index(index),
            None => ParseOutcome::Unparseable,
        }
    }

    /// Match a name under any period key.
    ///
    /// Used by the retention sweep, which must also reap files whose
    /// period key has already rolled over.
    pub fn parse_any(&self, name: &str) -> ParseOutcome {
        let rest = match name.strip_prefix(self.base.as_str()) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return ParseOutcome::NoMatch,
        };
        if self.time_format.is_empty() {
            return match parse_index(rest) {
                Some(index) => ParseOutcome::Index(index),
                None => ParseOutcome::Unparseable,
            };
        }
        let rest = match rest.strip_prefix('.') {
            Some(rest) => rest,
            None => return ParseOutcome::NoMatch,
        };
        match rest.rsplit_once('.') {
            Some((key, suffix)) if !key.is_empty() => match parse_index(suffix) {
                Some(index) => ParseOutcome::Index(index),
                None => ParseOutcome::Unparseable,
            },
            _ => ParseOutcome::Unparseable,
        }
    }
}

fn parse_index(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Substitute `%Y %m %d %H %M %S` tokens against the given time.
///
/// Any other character, including unrecognized `%x` pairs, passes
/// through literally.
pub fn render_period_key(pattern: &str, t: &NaiveDateTime) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('Y') => {
                let _ = write!(out, "{:04}", t.year());
            }
            Some('m') => {
                let _ = write!(out, "{:02}", t.month());
            }
            Some('d') => {
                let _ = write!(out, "{:02}", t.day());
            }
            Some('H') => {
                let _ = write!(out, "{:02}", t.hour());
            }
            Some('M') => {
                let _ = write!(out, "{:02}", t.minute());
            }
            Some('S') => {
                let _ = write!(out, "{:02}", t.second());
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}
