//! End-to-end tests driving the REPL the way the binary does

use tally_cli::{Repl, TallyConfig, build_session};

fn run_script(config: &TallyConfig, script: &str) -> String {
    let session = build_session(config).unwrap();
    let mut repl = Repl::new(session, config.display.show_timestamps);
    let mut output = Vec::new();
    repl.run(script.as_bytes(), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_submit_error_recovery_and_replay() {
    let output = run_script(
        &TallyConfig::default(),
        "5 add 3\n5 divide 0\nabc add 1\n2 ** 10\nreplay 2\nhistory\n",
    );
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[1], "5 add 3 = 8");
    assert_eq!(lines[2], "Error: Division by zero is impossible.");
    assert_eq!(lines[3], "Error: Enter a valid first number.");
    assert_eq!(lines[4], "2 power 10 = 1024");
    assert_eq!(lines[5], "5 add 3 = 8");
    assert_eq!(&lines[6..], [" 1. 5 add 3 = 8", " 2. 2 power 10 = 1024", " 3. 5 add 3 = 8"]);
}

#[test]
fn test_configured_capacity_bounds_history() {
    let config = TallyConfig::from_toml_str("[history]\ncapacity = 2\n").unwrap();
    let output = run_script(&config, "1 + 1\n2 + 2\n3 + 3\nhistory\n");
    assert!(output.contains(" 1. 3 add 3 = 6\n 2. 2 add 2 = 4"));
    assert!(!output.contains(" 3. "));
}

#[test]
fn test_timestamps_are_shown_when_enabled() {
    let config = TallyConfig::from_toml_str("[display]\nshow_timestamps = true\n").unwrap();
    let output = run_script(&config, "7 % 3\nhistory\n");
    let entry = output.lines().find(|line| line.starts_with(" 1. ")).unwrap();
    assert!(entry.starts_with(" 1. 7 modulo 3 = 1  ("));
    assert!(entry.ends_with(')'));
}

#[test]
fn test_clear_history_keeps_repl_running() {
    let output = run_script(&TallyConfig::default(), "1 - 4\nclear\nhistory\n9 * 9\n");
    assert!(output.contains("History cleared."));
    assert!(output.contains("History is empty."));
    assert!(output.contains("9 multiply 9 = 81"));
}
