//! Classification of one line of interactive input.
//!
//! [`classify`] is pure: it looks at the line and at the tail of the history
//! and decides what the line means. Applying the outcome to a [`Ledger`] is
//! the caller's job.
//!
//! [`Ledger`]: crate::ledger::Ledger

use crate::ledger::{ActionCode, Mode};
use crate::number::{leading_float, leading_int};

/// What a line of input asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Quit,
    ClearRegister,
    ShowLog,
    Help,
    Undo,

    /// Repeat the previous operation once.
    RepeatLast { pending: f64 },

    /// Repeat the previous operation `times` times.
    RepeatTimes { times: i64, pending: f64 },

    /// Apply the opposite of the previous operation as a new entry.
    ExplicitSubtractLast { pending: f64 },

    SaveAs(String),
    QuickSave,

    /// A plain number, with the mode its sign markers selected.
    NumericEntry { value: f64, mode: Mode },
}

impl Command {
    /// The value this command wants committed to the ledger, if any.
    pub fn pending(&self) -> Option<(f64, Mode)> {
        match *self {
            Command::RepeatLast { pending }
            | Command::RepeatTimes { pending, .. }
            | Command::ExplicitSubtractLast { pending } => Some((pending, Mode::Add)),
            Command::NumericEntry { value, mode } => Some((value, mode)),
            _ => None,
        }
    }
}

/// Classify `line` given the number and code of the current history tail.
///
/// A trailing line terminator is ignored. Commands are matched in a fixed
/// order before falling through to numeric entry, so `s` is a quicksave and
/// `-` repeats the previous operation negated rather than parsing as a
/// number.
pub fn classify(line: &str, last_number: f64, last_code: ActionCode) -> Command {
    let line = line.trim_end_matches(&['\n', '\r'][..]);

    match line.chars().next() {
        Some('q') | Some('Q') => return Command::Quit,
        Some('c') | Some('C') => return Command::ClearRegister,
        Some('l') | Some('*') => return Command::ShowLog,
        Some('h') => return Command::Help,
        Some('u') => return Command::Undo,
        _ => {}
    }

    if line.is_empty() || line == "+" || line == ".." {
        // Clearing the register breaks the repeat chain.
        let pending = if last_code == ActionCode::RegisterCleared {
            0.0
        } else {
            last_number
        };
        return Command::RepeatLast { pending };
    }

    if let Some(rest) = line.strip_prefix("..") {
        let times = leading_int(rest.trim_start_matches('.')).unwrap_or(0);
        return repeat_times(times, last_number);
    }

    if line.ends_with("..") {
        let times = leading_int(line).unwrap_or(0);
        return repeat_times(times, last_number);
    }

    if line == "-" {
        return Command::ExplicitSubtractLast {
            pending: -last_number,
        };
    }

    if line == "s" || line == "/" {
        return Command::QuickSave;
    }

    if let Some(path) = line.strip_prefix("s ") {
        let path = path.trim();
        if path.is_empty() {
            return Command::QuickSave;
        }
        return Command::SaveAs(path.to_string());
    }

    numeric_entry(line)
}

fn repeat_times(times: i64, last_number: f64) -> Command {
    Command::RepeatTimes {
        times,
        pending: last_number * times as f64,
    }
}

fn numeric_entry(line: &str) -> Command {
    let value = leading_float(line).unwrap_or(0.0);

    let front = line.trim_start().chars().next();
    let back = line.chars().last();

    let mode = if front == Some('+') || back == Some('+') {
        Mode::Add
    } else if front == Some('-') || back == Some('-') {
        Mode::Subtract
    } else {
        Mode::default()
    };

    Command::NumericEntry { value, mode }
}
