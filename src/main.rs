mod ai;
mod config;
mod debug;
mod fuzzy;
mod game;
mod game_modes;
mod ui;

use anyhow::Context;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;

use config::Config;
use fuzzy::{FuzzyController, VelocityTerm, XDiffTerm, YDiffTerm};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    debug: bool,
    eval: Option<EvalRequest>,
}

/// `--eval <x_diff> <y_diff> [--ball-speed <u/s>]`
#[derive(Debug, PartialEq)]
struct EvalRequest {
    x_diff: f32,
    y_diff: f32,
    ball_speed: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("fuzzypong");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage(program);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };

    debug::init(options.debug)?;

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(config::get_config_path);
    let config = config::load_config(&config_path)?;

    if let Some(request) = &options.eval {
        print!("{}", format_evaluation(&config, request));
        return Ok(());
    }

    install_panic_hook();
    enable_raw_mode().context("enabling raw mode")?;

    let result = with_terminal_restored(
        || {
            execute!(io::stdout(), EnterAlternateScreen).context("entering alternate screen")?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            game_modes::run_game_vs_fuzzy(&mut terminal, &config)
        },
        restore_terminal,
    );

    if let Err(e) = &result {
        tracing::error!("game loop failed: {:#}", e);
    }
    result
}

/// Run `body`, then `restore` no matter how `body` ended
///
/// An error from `body` wins over an error from `restore`.
fn with_terminal_restored<T>(
    body: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> anyhow::Result<T> {
    let result = body();
    let restored = restore();

    match (result, restored) {
        (Err(e), Err(cleanup)) => {
            tracing::warn!("restoring terminal failed: {}", cleanup);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(value), restored) => {
            restored.context("restoring terminal")?;
            Ok(value)
        }
    }
}

/// Undo raw mode and the alternate screen; every step runs even if an earlier one fails
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

// A panic message printed inside the alternate screen is lost, so restore first
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

/// Parse command line arguments (program name excluded); `None` means help was requested
fn parse_args(args: &[String]) -> anyhow::Result<Option<CliOptions>> {
    let mut options = CliOptions::default();
    let mut ball_speed = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--debug" | "-d" => options.debug = true,
            "--config" | "-c" => {
                let path = iter.next().context("--config requires a path")?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--eval" | "-e" => {
                let x_diff = parse_number(iter.next(), "--eval <x_diff> <y_diff>")?;
                let y_diff = parse_number(iter.next(), "--eval <x_diff> <y_diff>")?;
                options.eval = Some(EvalRequest {
                    x_diff,
                    y_diff,
                    ball_speed: None,
                });
            }
            "--ball-speed" => {
                ball_speed = Some(parse_number(iter.next(), "--ball-speed <units per second>")?);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    match (&mut options.eval, ball_speed) {
        (Some(request), speed) => request.ball_speed = speed,
        (None, Some(_)) => anyhow::bail!("--ball-speed only applies to --eval"),
        (None, None) => {}
    }

    Ok(Some(options))
}

fn parse_number(arg: Option<&String>, usage: &str) -> anyhow::Result<f32> {
    let arg = arg.with_context(|| format!("expected {}", usage))?;
    let value: f32 = arg
        .parse()
        .with_context(|| format!("{:?} is not a number (usage: {})", arg, usage))?;
    anyhow::ensure!(value.is_finite(), "{:?} is not a finite number", arg);
    Ok(value)
}

fn print_usage(program: &str) {
    println!("FuzzyPong - Terminal Pong against a fuzzy-logic paddle");
    println!();
    println!("Usage:");
    println!("  {}                              # Play", program);
    println!("  {} --config <path>              # Use another config file", program);
    println!("  {} --debug                      # Log to /tmp/fuzzypong-debug.log", program);
    println!("  {} --eval <x_diff> <y_diff>     # Print one controller evaluation", program);
    println!("  {} --eval 120 30 --ball-speed 300", program);
    println!();
    println!("Config file: {}", config::get_config_path().display());
}

/// Human-readable trace of one controller evaluation
fn format_evaluation(config: &Config, request: &EvalRequest) -> String {
    let ball_speed = request
        .ball_speed
        .unwrap_or(config.physics.ball_initial_speed);
    let controller = FuzzyController::for_ball_speed(&config.fuzzy, ball_speed);
    let trace = controller.infer(request.x_diff, request.y_diff);

    let mut out = String::new();
    let _ = writeln!(out, "ball speed {} -> max paddle speed {}", ball_speed, controller.max_speed());

    let _ = writeln!(out, "x_diff = {} (clamped {})", request.x_diff, trace.x_diff);
    for term in XDiffTerm::ALL {
        let _ = writeln!(out, "  {:<10} {:.3}", term.name(), trace.x_degrees[term.index()]);
    }

    let _ = writeln!(out, "y_diff = {} (clamped {})", request.y_diff, trace.y_diff);
    for term in YDiffTerm::ALL {
        let _ = writeln!(out, "  {:<10} {:.3}", term.name(), trace.y_degrees[term.index()]);
    }

    let _ = writeln!(out, "rules");
    for (rule, strength) in config.fuzzy.rules.iter().zip(&trace.firing) {
        let mut antecedent = Vec::new();
        if let Some(x) = rule.x_diff {
            antecedent.push(format!("x_diff is {}", x.name()));
        }
        if let Some(y) = rule.y_diff {
            antecedent.push(format!("y_diff is {}", y.name()));
        }
        let _ = writeln!(
            out,
            "  if {} then {}: {:.3}",
            antecedent.join(" and "),
            rule.velocity.name(),
            strength
        );
    }

    let _ = writeln!(out, "paddle_velocity");
    for term in VelocityTerm::ALL {
        let _ = writeln!(out, "  {:<10} {:.3}", term.name(), trace.output[term.index()]);
    }

    let _ = writeln!(out, "velocity = {:.3}", trace.velocity);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_plays() {
        assert_eq!(parse_args(&[]).unwrap(), Some(CliOptions::default()));
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_args(&args(&["--debug", "--config", "/tmp/x.toml"]))
            .unwrap()
            .unwrap();
        assert!(options.debug);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/x.toml")));

        assert_eq!(parse_args(&args(&["--debug", "-h"])).unwrap(), None);
    }

    #[test]
    fn test_parse_eval() {
        let options = parse_args(&args(&["--ball-speed", "400", "--eval", "-120", "15"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            options.eval,
            Some(EvalRequest {
                x_diff: -120.0,
                y_diff: 15.0,
                ball_speed: Some(400.0),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--eval", "1"])).is_err());
        assert!(parse_args(&args(&["--eval", "one", "2"])).is_err());
        assert!(parse_args(&args(&["--eval", "inf", "2"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["--ball-speed", "3"])).is_err());
        assert!(parse_args(&args(&["--listen"])).is_err());
    }

    #[test]
    fn test_terminal_restored_when_setup_fails() {
        let mut restored = false;
        let result: anyhow::Result<()> = with_terminal_restored(
            || Err(anyhow::anyhow!("entering alternate screen")),
            || {
                restored = true;
                Ok(())
            },
        );

        assert!(restored);
        assert_eq!(result.unwrap_err().to_string(), "entering alternate screen");
    }

    #[test]
    fn test_game_error_wins_over_restore_error() {
        let result: anyhow::Result<()> = with_terminal_restored(
            || Err(anyhow::anyhow!("game loop")),
            || Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
        );
        assert_eq!(result.unwrap_err().to_string(), "game loop");
    }

    #[test]
    fn test_restore_error_reported_after_clean_game() {
        let result = with_terminal_restored(
            || Ok(7),
            || Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
        );
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "restoring terminal");

        let ok = with_terminal_restored(|| Ok(7), || Ok(()));
        assert_eq!(ok.unwrap(), 7);
    }

    #[test]
    fn test_format_evaluation() {
        let request = EvalRequest {
            x_diff: 1000.0,
            y_diff: 400.0,
            ball_speed: Some(150.0),
        };
        let out = format_evaluation(&Config::default(), &request);

        assert!(out.contains("x_diff = 1000 (clamped 400)"), "{}", out);
        assert!(out.contains("if x_diff is right and y_diff is far then right_fast: 1.000"), "{}", out);
        assert!(out.contains("if x_diff is center then stop: 0.000"), "{}", out);
        assert!(out.ends_with("velocity = 150.000\n"), "{}", out);
    }
}
