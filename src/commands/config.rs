//! Show or change the retention policy

use duster::config::{Config, ConfigKey};
use duster::error::{Error, Result, UsageKind};
use duster::paths;

/// `config` prints the current policy; `config set <key> <value>` validates
/// and persists a new value.
///
/// A missing key or value is a usage error; a well-formed but out-of-policy
/// value is a validation error. Nothing is written until validation passes.
pub fn config_cmd(args: &[String]) -> Result<()> {
    paths::check_initialized()?;

    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] => {
            let config = Config::load()?;
            for (key, value) in config.entries() {
                println!("{} = \"{}\"", key.as_str(), value);
            }
            Ok(())
        },
        ["set", key, value] => {
            let key: ConfigKey = key.parse()?;
            let mut config = Config::load()?;
            config.set(key, value)?;
            println!("{} = \"{}\"", key.as_str(), config.get(key));
            Ok(())
        },
        _ => Err(Error::Usage(UsageKind::Config)),
    }
}
