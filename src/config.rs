use crate::error::ConfigError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LIMIT: u8 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const MIN_STARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl Window {
    /// Case-insensitive; anything unrecognized means a week.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "day" => Window::Day,
            "week" => Window::Week,
            "month" => Window::Month,
            "year" => Window::Year,
            _ => Window::Week,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Window::Day => 1,
            Window::Week => 7,
            Window::Month => 30,
            Window::Year => 365,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Window::Day => "day",
            Window::Week => "week",
            Window::Month => "month",
            Window::Year => "year",
        };
        f.write_str(name)
    }
}

/// Resolved search filters for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub window: Window,
    pub language: Option<String>,
    pub spoken_language: Option<String>,
    limit: u8,
}

impl FilterConfig {
    pub fn new(
        window: Window,
        limit: i64,
        language: Option<String>,
        spoken_language: Option<String>,
    ) -> Self {
        FilterConfig {
            window,
            language: language.filter(|l| !l.trim().is_empty()),
            spoken_language: spoken_language.filter(|l| !l.trim().is_empty()),
            limit: resolve_limit(limit),
        }
    }

    pub fn limit(&self) -> u8 {
        self.limit
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::new(Window::Week, DEFAULT_LIMIT as i64, None, None)
    }
}

/// Out-of-range limits fall back to the default rather than being clamped.
pub fn resolve_limit(limit: i64) -> u8 {
    if (1..=MAX_LIMIT).contains(&limit) {
        limit as u8
    } else {
        DEFAULT_LIMIT
    }
}

/// Parses `30s`, `5m`, `1h30m`, `250ms`; a bare number is seconds.
pub fn parse_interval(input: &str) -> Result<Duration, ConfigError> {
    let s = input.trim();
    let invalid = || ConfigError::Interval(input.to_string());

    if s.is_empty() {
        return Err(invalid());
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits_end].parse().map_err(|_| invalid())?;
        rest = &rest[digits_end..];

        let unit_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let step = match unit {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60).ok_or_else(invalid)?),
            "h" => Duration::from_secs(value.checked_mul(3600).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        total = total.checked_add(step).ok_or_else(invalid)?;
    }
    Ok(total)
}

pub fn default_cache_path() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("gh-trending")
        .join("last.json"))
}
