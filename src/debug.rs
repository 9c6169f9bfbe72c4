// Debug logging for FuzzyPong
// Routes `tracing` events to a file when enabled via --debug; the TUI owns the terminal

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use anyhow::Context;
use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/fuzzypong-debug.log";

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: no subscriber is installed, every `tracing` macro is a no-op
/// - If enabled=true: creates/truncates the log file, writes a header and
///   installs a global fmt subscriber at DEBUG level
pub fn init(enabled: bool) -> anyhow::Result<()> {
    init_with(enabled, Path::new(LOG_FILE_PATH))
}

fn init_with(enabled: bool, path: &Path) -> anyhow::Result<()> {
    if !enabled {
        return Ok(());
    }
    init_at(path)
}

fn init_at(path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    writeln!(file, "=== FuzzyPong Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", path.display())?;
    writeln!(file, "========================================\n")?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "debug logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        init_with(false, &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_log_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        init_with(true, &path).unwrap();
        tracing::debug!(x_diff = 12.5, "probe event");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("=== FuzzyPong Debug Log ==="));
        assert!(contents.contains("probe event"));
    }
}
