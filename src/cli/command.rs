use chrono::NaiveDate;
use error_stack::{report, ResultExt};
use thiserror::Error;

use crate::domain::gnosis::date_label::parse_date_input;

pub const USAGE: &str = "\
Usage: gnosis <command>

Commands:
  stats                        List the stat names
  get <stat> <date>            Print the value of a stat on a date
  set <stat> <date> <value>    Set the value of a stat on a date
  add <stat>                   Start a new stat series as of today
  series <stat>                Print every day of a stat series
  start <stat>                 Print the first day of a stat series
  help                         Print this message

Dates are YYYY-MM-DD or in the sheet format, e.g. \"Tue, 03/01/16\".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListStats,
    GetStat { stat: String, date: NaiveDate },
    SetStat { stat: String, date: NaiveDate, value: String },
    AddStat { stat: String },
    Series { stat: String },
    Start { stat: String },
    Help,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed")]
    ExecutionFailed,
}

fn invalid(details: impl Into<String>) -> error_stack::Report<CommandError> {
    report!(CommandError::InvalidCommand {
        details: details.into()
    })
}

fn required<'a>(args: &'a [String], position: usize, what: &str) -> error_stack::Result<&'a str, CommandError> {
    args.get(position)
        .map(String::as_str)
        .ok_or_else(|| invalid(format!("{what} required")))
}

fn date_arg(args: &[String], position: usize) -> error_stack::Result<NaiveDate, CommandError> {
    let input = required(args, position, "Date")?;
    parse_date_input(input).change_context_lazy(|| CommandError::InvalidCommand {
        details: format!("Bad date {input:?}"),
    })
}

impl Command {
    /// Parses `args` as received by `main`, the program name first.
    pub fn parse(args: &[String]) -> error_stack::Result<Self, CommandError> {
        let command = match args.get(1).map(String::as_str) {
            None | Some("help" | "-h" | "--help") => Command::Help,
            Some("stats") => Command::ListStats,
            Some("get") => Command::GetStat {
                stat: required(args, 2, "Stat name")?.to_owned(),
                date: date_arg(args, 3)?,
            },
            Some("set") => Command::SetStat {
                stat: required(args, 2, "Stat name")?.to_owned(),
                date: date_arg(args, 3)?,
                value: required(args, 4, "Value")?.to_owned(),
            },
            Some("add") => Command::AddStat {
                stat: required(args, 2, "Stat name")?.to_owned(),
            },
            Some("series") => Command::Series {
                stat: required(args, 2, "Stat name")?.to_owned(),
            },
            Some("start") => Command::Start {
                stat: required(args, 2, "Stat name")?.to_owned(),
            },
            Some(other) => return Err(invalid(format!("Unknown command {other:?}"))),
        };
        Ok(command)
    }
}
