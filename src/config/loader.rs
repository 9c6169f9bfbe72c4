// Configuration file loading and creation

use super::types::Config;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("fuzzypong");
    path.push("config.toml");
    path
}

/// Load configuration from `path`, or create a default file there if it doesn't exist
///
/// A file that fails to parse or holds an unusable fuzzy table is reported and
/// replaced by the defaults for this run; it is never overwritten.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        create_default_config(path)?;
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let config: Config = match toml::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            warn_default(path, &format!("failed to parse config file: {}", e));
            return Ok(Config::default());
        }
    };

    if let Err(e) = config.fuzzy.validate() {
        warn_default(path, &format!("invalid [fuzzy] section: {:#}", e));
        return Ok(Config::default());
    }

    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn warn_default(path: &Path, reason: &str) {
    tracing::warn!(path = %path.display(), "{}; using default configuration", reason);
    eprintln!("Warning: {}", reason);
    eprintln!("Using default configuration");
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating config directory {}", dir.display()))?;
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("serializing default configuration")?;

    let commented_toml = format!(
        "# FuzzyPong Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Left\", \"Right\", \"Up\", \"Down\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"A\", \"D\", \"Q\", etc.\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # [fuzzy] membership functions: {{ triangle = [a, b, c] }} or\n\
         # {{ trapezoid = [a, b, c, d] }} with non-decreasing breakpoints.\n\
         # Velocity terms live on [-1, 1] and are scaled by the ball's horizontal speed.\n\
         # Rule terms: x_diff = left|center|right, y_diff = close|medium|far,\n\
         # velocity = left_fast|left_slow|stop|right_slow|right_fast\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)
        .with_context(|| format!("writing default config to {}", path.display()))?;
    tracing::info!(path = %path.display(), "created default config file");
    println!("Created default config file at: {}", path.display());
    Ok(())
}
