//! Retention policy storage
//!
//! The policy persists as TOML at `.duster/config.toml`:
//!
//! ```toml
//! [sweep]
//! moratorium = "10 minutes"
//! period = "daily"
//! time = "00:00"
//!
//! [burn]
//! moratorium = "2 weeks"
//! ```
//!
//! Values are stored as canonical strings and validated both on `set` and on
//! load, so a hand-edited file surfaces an `ERROR:` instead of surprising
//! behavior. Validation always happens before anything is written.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::paths;
use crate::policy::{self, Period, Policy, TimeOfDay};

const DEFAULT_SWEEP_MORATORIUM: &str = "10 minutes";
const DEFAULT_SWEEP_PERIOD: &str = "daily";
const DEFAULT_SWEEP_TIME: &str = "00:00";
const DEFAULT_BURN_MORATORIUM: &str = "2 weeks";

/// The settable policy keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `burn.moratorium`
    BurnMoratorium,
    /// `sweep.moratorium`
    SweepMoratorium,
    /// `sweep.period`
    SweepPeriod,
    /// `sweep.time`
    SweepTime,
}

impl ConfigKey {
    /// Dotted config-file spelling
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BurnMoratorium => "burn.moratorium",
            Self::SweepMoratorium => "sweep.moratorium",
            Self::SweepPeriod => "sweep.period",
            Self::SweepTime => "sweep.time",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "burn.moratorium" => Ok(Self::BurnMoratorium),
            "sweep.moratorium" => Ok(Self::SweepMoratorium),
            "sweep.period" => Ok(Self::SweepPeriod),
            "sweep.time" => Ok(Self::SweepTime),
            other => Err(Error::validation(format!(
                "unknown config key \"{other}\" (expected one of burn.moratorium, \
                 sweep.moratorium, sweep.period, sweep.time)"
            ))),
        }
    }
}

/// `[sweep]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SweepSection {
    moratorium: String,
    period: String,
    time: String,
}

/// `[burn]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BurnSection {
    moratorium: String,
}

/// The persisted config document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    sweep: SweepSection,
    burn: BurnSection,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep: SweepSection {
                moratorium: DEFAULT_SWEEP_MORATORIUM.to_string(),
                period: DEFAULT_SWEEP_PERIOD.to_string(),
                time: DEFAULT_SWEEP_TIME.to_string(),
            },
            burn: BurnSection {
                moratorium: DEFAULT_BURN_MORATORIUM.to_string(),
            },
            path: paths::config_file(),
        }
    }
}

impl Config {
    /// Default config persisted at `path`
    #[must_use]
    pub fn default_at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Load the config from `.duster/config.toml`
    pub fn load() -> Result<Self> {
        Self::load_from(paths::config_file())
    }

    /// Load the config from an explicit path
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = fs::read_to_string(&path)?;
        let mut config: Self = toml::from_str(&contents).map_err(|e| {
            Error::validation(format!("malformed config \"{}\": {e}", path.display()))
        })?;
        config.path = path;
        Ok(config)
    }

    /// Write the config back to its path
    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::validation(format!("cannot serialize config: {e}")))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Current raw value for `key`
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::BurnMoratorium => &self.burn.moratorium,
            ConfigKey::SweepMoratorium => &self.sweep.moratorium,
            ConfigKey::SweepPeriod => &self.sweep.period,
            ConfigKey::SweepTime => &self.sweep.time,
        }
    }

    /// Validate `value` for `key`, store its canonical form, and persist.
    ///
    /// Nothing is written when validation fails.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let canonical = Self::validate(key, value)?;
        log::info!("config: {} = \"{}\"", key.as_str(), canonical);

        match key {
            ConfigKey::BurnMoratorium => self.burn.moratorium = canonical,
            ConfigKey::SweepMoratorium => self.sweep.moratorium = canonical,
            ConfigKey::SweepPeriod => self.sweep.period = canonical,
            ConfigKey::SweepTime => self.sweep.time = canonical,
        }
        self.save()
    }

    fn validate(key: ConfigKey, value: &str) -> Result<String> {
        match key {
            ConfigKey::BurnMoratorium => {
                policy::parse_burn_moratorium(value).map(|(_, canonical)| canonical)
            },
            ConfigKey::SweepMoratorium => {
                policy::parse_sweep_moratorium(value).map(|(_, canonical)| canonical)
            },
            ConfigKey::SweepPeriod => Period::parse(value).map(|p| p.as_str().to_string()),
            ConfigKey::SweepTime => TimeOfDay::parse(value).map(|t| t.to_string()),
        }
    }

    /// Parse every stored value into a typed [`Policy`]
    pub fn policy(&self) -> Result<Policy> {
        let (sweep_moratorium, _) = policy::parse_sweep_moratorium(&self.sweep.moratorium)?;
        let (burn_moratorium_days, _) = policy::parse_burn_moratorium(&self.burn.moratorium)?;
        Ok(Policy {
            sweep_moratorium,
            sweep_period: Period::parse(&self.sweep.period)?,
            sweep_time: TimeOfDay::parse(&self.sweep.time)?,
            burn_moratorium_days,
        })
    }

    /// Iterate `(key, value)` pairs for display
    #[must_use]
    pub fn entries(&self) -> Vec<(ConfigKey, &str)> {
        [
            ConfigKey::BurnMoratorium,
            ConfigKey::SweepMoratorium,
            ConfigKey::SweepPeriod,
            ConfigKey::SweepTime,
        ]
        .into_iter()
        .map(|key| (key, self.get(key)))
        .collect()
    }
}

/// Create `path` with the default config unless it already exists.
///
/// Returns whether the file was created.
pub fn create_default(path: &Path) -> Result<bool> {
    if path.is_file() {
        return Ok(false);
    }
    Config::default_at(path).save()?;
    Ok(true)
}
