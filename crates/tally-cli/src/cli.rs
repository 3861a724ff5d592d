//! Command-line arguments and the actions behind them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::{Calculator, HistoryLog, Result, Session};
use tracing::debug;

use crate::config::{ConfigSource, TallyConfig};

/// Two-operand calculator with a replayable history
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Two-operand calculator with a replayable history")]
#[command(version)]
pub struct TallyCli {
    /// Configuration file (defaults to $TALLY_CONFIG_PATH, then ./tally.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<TallyCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TallyCommand {
    /// Calculate once and exit
    Eval {
        /// First operand
        #[arg(allow_hyphen_values = true)]
        left: String,
        /// Operator name or symbol, e.g. `add` or `+`
        #[arg(allow_hyphen_values = true)]
        operator: String,
        /// Second operand
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    /// List supported operators
    Ops,
    /// Start the interactive prompt (default)
    Repl,
}

/// Configuration from `--config` or the default location, with environment
/// overrides and command-line flags applied on top.
///
/// Runs before logging is installed, so the source is returned for the
/// caller to log afterwards.
pub fn load_config(cli: &TallyCli) -> Result<(TallyConfig, ConfigSource)> {
    let (config, source) = match &cli.config {
        Some(path) => TallyConfig::load_from(path)?,
        None => TallyConfig::load()?,
    };
    let mut config = config.apply_profile()?;
    if cli.json_logs {
        config.logging.json = true;
    }
    Ok((config, source))
}

pub fn build_session(config: &TallyConfig) -> Result<Session> {
    let history = HistoryLog::with_capacity(config.history.capacity)?;
    debug!(capacity = history.capacity(), "session created");
    Ok(Session::with_parts(Calculator::new(), history))
}

/// Run a single calculation and return the line to print.
pub fn eval_once(session: &mut Session, left: &str, operator: &str, right: &str) -> Result<String> {
    session.set_input(left, operator, right);
    session.submit()?;
    Ok(session.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_operands_and_minus_operator_parse() {
        let cli = TallyCli::try_parse_from(["tally", "eval", "-5", "-", "-3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(TallyCommand::Eval {
                left: "-5".to_string(),
                operator: "-".to_string(),
                right: "-3".to_string(),
            })
        );
    }

    #[test]
    fn no_subcommand_means_repl() {
        let cli = TallyCli::try_parse_from(["tally", "--json-logs"]).unwrap();
        assert!(cli.json_logs);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn missing_config_file_is_returned_for_logging() {
        let cli =
            TallyCli::try_parse_from(["tally", "--config", "/nonexistent/tally.toml", "--json-logs"])
                .unwrap();
        let (config, source) = load_config(&cli).unwrap();
        assert!(config.logging.json);
        assert_eq!(
            source,
            ConfigSource::Defaults { missing: PathBuf::from("/nonexistent/tally.toml") }
        );
    }

    #[test]
    fn eval_once_formats_result() {
        let mut session = build_session(&TallyConfig::default()).unwrap();
        assert_eq!(eval_once(&mut session, "-5", "-", "-3").unwrap(), "-5 subtract -3 = -2");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn eval_once_propagates_errors() {
        let mut session = build_session(&TallyConfig::default()).unwrap();
        let err = eval_once(&mut session, "1", "mod", "2").unwrap_err();
        assert_eq!(err.to_string(), "Invalid operation.");
    }

    #[test]
    fn session_uses_configured_capacity() {
        let mut config = TallyConfig::default();
        config.history.capacity = 3;
        let session = build_session(&config).unwrap();
        assert_eq!(session.history().capacity(), 3);
    }
}
