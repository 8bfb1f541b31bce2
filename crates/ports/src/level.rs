//! Log severity levels.

use ctxlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry.
///
/// Ordered by ascending verbosity: `Fatal < Error < Warn < Info < Debug < Trace`.
/// `Fatal` is the most severe; logging at `Fatal` terminates the process after
/// the entry is emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Level {
    /// Emit, then terminate the process with exit code 1.
    Fatal = 0,
    /// Errors.
    Error = 1,
    /// Warnings.
    #[serde(alias = "warning")]
    Warn = 2,
    /// Informational messages.
    Info = 3,
    /// Debug output.
    Debug = 4,
    /// Trace output.
    Trace = 5,
}

impl Level {
    /// Every level, least verbose first.
    pub const ALL: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Raw integer value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Level for a raw integer value, if it names one.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Fatal),
            1 => Some(Self::Error),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Canonical name for a raw value; never fails.
    ///
    /// ```
    /// use ctxlog_ports::Level;
    ///
    /// assert_eq!(Level::describe_raw(3), "Info");
    /// assert_eq!(Level::describe_raw(-1), "<invalid (-1)>");
    /// ```
    #[must_use]
    pub fn describe_raw(raw: i32) -> Cow<'static, str> {
        Self::from_raw(raw).map_or_else(
            || Cow::Owned(format!("<invalid ({raw})>")),
            |level| Cow::Borrowed(level.name()),
        )
    }

    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    /// Upper-case label used by line-oriented backends.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Returns true when an entry at `level` passes a filter set to `self`.
    #[must_use]
    pub fn enables(self, level: Self) -> bool {
        level <= self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level `{input}` (expected fatal, error, warn, info, debug or trace)")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl From<ParseLevelError> for ErrorEnvelope {
    fn from(error: ParseLevelError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("config", "invalid_level"), message)
            .with_metadata("value", error.input)
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("warning") {
            return Ok(Self::Warn);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError {
                input: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn names_cover_every_level() {
        let names: Vec<String> = Level::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Fatal", "Error", "Warn", "Info", "Debug", "Trace"]);
    }

    #[test]
    fn ordering_is_by_verbosity() {
        assert!(Level::Fatal < Level::Error);
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn filter_enables_less_verbose_levels() {
        assert!(Level::Info.enables(Level::Error));
        assert!(Level::Info.enables(Level::Info));
        assert!(!Level::Info.enables(Level::Debug));
        assert!(Level::Trace.enables(Level::Trace));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" debug ".parse::<Level>(), Ok(Level::Debug));

        let error = "loud".parse::<Level>().expect_err("unknown level");
        assert_eq!(error.input(), "loud");
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_level"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let encoded = serde_json::to_string(&Level::Warn).expect("serialize");
        assert_eq!(encoded, "\"warn\"");
        let decoded: Level = serde_json::from_str("\"warning\"").expect("deserialize");
        assert_eq!(decoded, Level::Warn);
    }

    proptest! {
        #[test]
        fn describe_raw_never_fails(raw in any::<i32>()) {
            let described = Level::describe_raw(raw);
            match Level::from_raw(raw) {
                Some(level) => prop_assert_eq!(described.as_ref(), level.name()),
                None => prop_assert_eq!(described.into_owned(), format!("<invalid ({raw})>")),
            }
        }
    }
}
