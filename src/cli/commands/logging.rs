//! Log verbosity for the navigation service.
//!
//! Repeat `-v` on the command line, or set `SALONNAV_LOG_LEVEL` to a level
//! name or its index, to see resolution decisions and store fallbacks.

use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim();
    let index = level
        .parse::<usize>()
        .ok()
        .filter(|index| *index < LEVELS.len())
        .or_else(|| {
            LEVELS
                .iter()
                .position(|name| name.eq_ignore_ascii_case(level))
        });

    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level '{level}', expected one of {}", LEVELS.join(", ")))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log level: -v warn, -vv info (requests), -vvv debug (navigation decisions), -vvvv trace")
            .env("SALONNAV_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
