//! Line-oriented interactive front end
//!
//! Each input line is one user action. A line with three tokens is a
//! calculation (`5 add 3`); anything else is a command.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tally_core::{
    CalculationRecord, HistoryEvent, HistoryLog, HistoryObserver, Operator, RecordId, Result,
    Session, format_operand,
};
use tracing::{debug, info};

const HELP: &str = "\
Enter a calculation as <left> <operator> <right>, e.g. `5 add 3` or `2 ** 10`.

Commands:
  history [--json]  Show recent calculations, newest first
                    (JSON results are strings: \"8\", \"NaN\", \"Infinity\")
  replay <n>        Re-run history entry <n> (1 = newest)
  clear             Clear the history
  reset             Clear the pending input and the display
  ops               List supported operators
  help              Show this help
  quit              Exit";

/// Result of handling one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    Continue(String),
    Quit,
}

/// JSON shape of one history entry. Results are text so NaN and the
/// infinities survive, since JSON numbers cannot carry them.
#[derive(Debug, Serialize)]
struct HistoryEntryView {
    id: RecordId,
    left: f64,
    operator: Operator,
    right: f64,
    result: String,
    timestamp: String,
}

impl From<&CalculationRecord> for HistoryEntryView {
    fn from(record: &CalculationRecord) -> Self {
        Self {
            id: record.id(),
            left: record.left(),
            operator: record.operator(),
            right: record.right(),
            result: format_operand(record.result()),
            timestamp: record.timestamp().to_rfc3339(),
        }
    }
}

/// Emits a log event whenever the history changes.
#[derive(Debug, Default)]
pub struct HistoryAudit;

impl HistoryObserver for HistoryAudit {
    fn on_history_changed(&self, event: HistoryEvent, history: &HistoryLog) {
        info!(?event, len = history.len(), "history changed");
    }
}

pub struct Repl {
    session: Session,
    show_timestamps: bool,
}

impl Repl {
    pub fn new(mut session: Session, show_timestamps: bool) -> Self {
        session.subscribe_history(Box::new(HistoryAudit));
        Self { session, show_timestamps }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read lines from `input` until EOF or `quit`, writing responses to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "tally: type `help` for commands")?;
        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                ReplOutcome::Continue(text) if text.is_empty() => {}
                ReplOutcome::Continue(text) => writeln!(output, "{text}")?,
                ReplOutcome::Quit => break,
            }
            output.flush()?;
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> ReplOutcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        debug!(?tokens, "handling input line");
        let text = match tokens.as_slice() {
            [] => String::new(),
            ["quit"] | ["exit"] => return ReplOutcome::Quit,
            ["help"] => HELP.to_string(),
            ["ops"] => operator_listing(&self.session),
            ["history"] => self.history_listing(),
            ["history", "--json"] => match self.history_json() {
                Ok(json) => json,
                Err(err) => format!("Error: failed to serialize history: {err}"),
            },
            ["clear"] => {
                self.session.clear_history();
                "History cleared.".to_string()
            }
            ["reset"] => {
                self.session.reset();
                "Input cleared.".to_string()
            }
            ["replay", n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => outcome_text(self.session.replay(n - 1)),
                _ => "Usage: replay <n>, where 1 is the newest entry".to_string(),
            },
            [left, operator, right] => {
                self.session.set_input(*left, *operator, *right);
                outcome_text(self.session.submit())
            }
            _ => format!("Unrecognized input: {}. Type `help` for usage.", line.trim()),
        };
        ReplOutcome::Continue(text)
    }

    fn history_listing(&self) -> String {
        let history = self.session.history();
        if history.is_empty() {
            return "History is empty.".to_string();
        }
        history
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:>2}. {}", i + 1, self.format_record(record)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn history_json(&self) -> serde_json::Result<String> {
        let entries: Vec<HistoryEntryView> =
            self.session.history().iter().map(HistoryEntryView::from).collect();
        serde_json::to_string_pretty(&entries)
    }

    fn format_record(&self, record: &CalculationRecord) -> String {
        if self.show_timestamps {
            format!("{record}  ({})", record.timestamp().format("%H:%M:%S"))
        } else {
            record.to_string()
        }
    }
}

fn outcome_text(outcome: Result<CalculationRecord>) -> String {
    match outcome {
        Ok(record) => record.to_string(),
        Err(err) => format!("Error: {err}"),
    }
}

/// Supported operators with their symbolic aliases.
pub fn operator_listing(session: &Session) -> String {
    session
        .operators()
        .into_iter()
        .map(|op| format!("{:<9} {}", op.name(), op.symbol()))
        .collect::<Vec<_>>()
        .join("\n")
}
