//! Retention policy values and their parsers
//!
//! Policy values travel as canonical strings in the config file
//! (`"10 minutes"`, `"daily"`, `"00:00"`) and are parsed into typed values
//! here. Each parser carries its own unit allow-list: sweep moratoria accept
//! minutes through weeks (zero allowed, meaning no grace period), burn
//! moratoria accept only whole days and weeks and reject zero.

use std::sync::OnceLock;

use chrono::{Duration, NaiveTime};
use regex::Regex;

use crate::error::{Error, Result};

/// How often the scheduled sweep runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Every day
    Daily,
    /// Once a week
    Weekly,
}

impl Period {
    /// Parse `daily` or `weekly`; anything else is a validation error
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => Err(Error::validation(format!(
                "invalid value \"{other}\" for \"sweep.period\" (expected \"daily\" or \"weekly\")"
            ))),
        }
    }

    /// Canonical config-file spelling
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// A 24-hour wall-clock time with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// Hour in `0..=23`
    pub hour: u32,
    /// Minute in `0..=59`
    pub minute: u32,
}

impl TimeOfDay {
    /// Parse a strict two-digit `HH:MM`.
    ///
    /// `24:00`, seconds components, signs, and single-digit fields are all
    /// rejected.
    pub fn parse(value: &str) -> Result<Self> {
        static SHAPE: OnceLock<Regex> = OnceLock::new();
        let shape = SHAPE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));

        let value = value.trim();
        let invalid = || {
            Error::validation(format!(
                "invalid value \"{value}\" for \"sweep.time\" (expected \"HH:MM\")"
            ))
        };

        if !shape.is_match(value) {
            return Err(invalid());
        }
        let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;

        Ok(Self {
            hour: chrono::Timelike::hour(&time),
            minute: chrono::Timelike::minute(&time),
        })
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A parsed `<integer><unit>` moratorium, pre-canonicalization
#[derive(Debug, Clone, Copy)]
struct Moratorium {
    amount: u32,
    unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl Unit {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "minute" | "minutes" => Some(Self::Minutes),
            "hour" | "hours" => Some(Self::Hours),
            "day" | "days" => Some(Self::Days),
            "week" | "weeks" => Some(Self::Weeks),
            _ => None,
        }
    }

    fn canonical(self, amount: u32) -> String {
        let name = match self {
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Days => "day",
            Self::Weeks => "week",
        };
        if amount == 1 {
            format!("{amount} {name}")
        } else {
            format!("{amount} {name}s")
        }
    }
}

/// Accepts `<integer>` and `<unit>` separated by at most one space.
fn capture_moratorium(value: &str) -> Option<Moratorium> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN
        .get_or_init(|| Regex::new(r"^(?P<num>\d+) ?(?P<unit>[a-z]+)$").expect("valid regex"));

    let caps = token.captures(value.trim())?;
    let amount = caps["num"].parse::<u32>().ok()?;
    let unit = Unit::from_token(&caps["unit"])?;
    Some(Moratorium { amount, unit })
}

/// Parse a sweep moratorium; any of minutes/hours/days/weeks, zero allowed.
///
/// Returns the canonical string form alongside the duration so the config
/// store persists `"10 minutes"` even when handed `"10minutes"`.
pub fn parse_sweep_moratorium(value: &str) -> Result<(Duration, String)> {
    let m = capture_moratorium(value).ok_or_else(|| {
        Error::validation(format!(
            "invalid value \"{}\" for \"sweep.moratorium\" (expected e.g. \"10 minutes\", \"2 hours\", \"3 days\", \"1 week\")",
            value.trim()
        ))
    })?;

    let duration = match m.unit {
        Unit::Minutes => Duration::minutes(i64::from(m.amount)),
        Unit::Hours => Duration::hours(i64::from(m.amount)),
        Unit::Days => Duration::days(i64::from(m.amount)),
        Unit::Weeks => Duration::weeks(i64::from(m.amount)),
    };
    Ok((duration, m.unit.canonical(m.amount)))
}

/// Parse a burn moratorium; whole days or weeks, at least one day.
pub fn parse_burn_moratorium(value: &str) -> Result<(i64, String)> {
    let invalid = || {
        Error::validation(format!(
            "invalid value \"{}\" for \"burn.moratorium\" (expected e.g. \"3 days\" or \"2 weeks\", at least one day)",
            value.trim()
        ))
    };

    let m = capture_moratorium(value).ok_or_else(invalid)?;
    let days = match m.unit {
        Unit::Days => i64::from(m.amount),
        Unit::Weeks => i64::from(m.amount) * 7,
        Unit::Minutes | Unit::Hours => return Err(invalid()),
    };
    if days < 1 {
        return Err(invalid());
    }
    Ok((days, m.unit.canonical(m.amount)))
}

/// Fully validated retention settings, loaded once per invocation
#[derive(Debug, Clone)]
pub struct Policy {
    /// Minimum age before a file becomes sweepable
    pub sweep_moratorium: Duration,
    /// How often the scheduled sweep runs
    pub sweep_period: Period,
    /// When the scheduled sweep and burn run
    pub sweep_time: TimeOfDay,
    /// Box age, in whole days, before burn expires it
    pub burn_moratorium_days: i64,
}
