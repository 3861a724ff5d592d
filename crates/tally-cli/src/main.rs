use clap::Parser;
use std::io;
use std::process::ExitCode;
use tally_cli::repl::{Repl, operator_listing};
use tally_cli::tracing_setup::init_tracing;
use tally_cli::{TallyCli, TallyCommand, build_session, eval_once, load_config};
use tracing::{info, warn};

fn main() -> anyhow::Result<ExitCode> {
    let cli = TallyCli::parse();
    let (config, source) = load_config(&cli)?;
    init_tracing(&config.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Tally");
    source.log();
    info!(
        capacity = config.history.capacity,
        json_logs = config.logging.json,
        "configuration applied"
    );

    let mut session = build_session(&config)?;
    match cli.command.unwrap_or(TallyCommand::Repl) {
        TallyCommand::Eval { left, operator, right } => {
            match eval_once(&mut session, &left, &operator, &right) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    warn!(category = err.category(), "evaluation failed");
                    eprintln!("Error: {err}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        TallyCommand::Ops => println!("{}", operator_listing(&session)),
        TallyCommand::Repl => {
            let mut repl = Repl::new(session, config.display.show_timestamps);
            repl.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
