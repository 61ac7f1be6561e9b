use crate::codec;
use crate::datestamp::DateStamp;
use crate::errors::{SaveError, SessionError};
use crate::interpreter::{classify, Command};
use crate::ledger::Ledger;
use crate::number::{format_entry, format_signed};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const COMMANDS: &str = "
COMMANDS
\th\t\tPrint this help text
\ts FILENAME\tSave log to FILENAME
\ts or /\t\tQuicksave to previously specified filename (or to
\t\t\tttab_yyyy-mm-dd_hh-mm-ss.log if no filename was
\t\t\tpreviously specified)
\tl or *\t\tShow running log
\tc\t\tClear register
\tu\t\tUndo previous operation
\t-\t\tPerform arithmetic opposite to previous operation once
\t+ or ENTER\tRepeat previous operation once
\tN..\t\tRepeat previous operation N times
";

/// Whether the interactive loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session: one ledger plus the last path it was saved to.
#[derive(Debug, Default)]
pub struct Session {
    ledger: Ledger,
    save_location: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn save_location(&self) -> Option<&str> {
        self.save_location.as_deref()
    }

    /// Prompt, read and apply lines until the user quits or input ends.
    pub fn run<R, W, E>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), SessionError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut line = String::new();

        loop {
            write_prompt(out, self.ledger.total())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            if self.handle_line(&line, out, err)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Apply a single line of input.
    pub fn handle_line<W, E>(
        &mut self,
        line: &str,
        out: &mut W,
        err: &mut E,
    ) -> Result<Flow, SessionError>
    where
        W: Write,
        E: Write,
    {
        let command = classify(line, self.ledger.last_number(), self.ledger.last_code());
        log::debug!("classified {:?} as {:?}", line.trim_end(), command);

        match &command {
            Command::Quit => return Ok(Flow::Quit),
            Command::ClearRegister => {
                self.ledger.clear_register()?;
            }
            Command::ShowLog => {
                writeln!(out)?;
                self.ledger.render(out)?;
            }
            Command::Help => {
                write!(out, "\nGENERAL USAGE\n\tEnter a number and hit enter.\n")?;
                writeln!(out, "{}", COMMANDS)?;
            }
            Command::Undo => {
                if let Some(undone) = self.ledger.undo() {
                    write!(out, "\nUNDO\t( {} )\n\n", format_signed(-undone.number()))?;
                }
            }
            Command::ExplicitSubtractLast { pending } => {
                let shown = if *pending == 0.0 {
                    format_entry(*pending)
                } else {
                    format_signed(*pending)
                };
                write!(out, "\n{}\n\n", shown)?;
            }
            Command::SaveAs(path) => {
                self.save_location = Some(path.clone());
                self.save(path, out, err)?;
            }
            Command::QuickSave => {
                let path = self.quicksave_path();
                self.save(&path, out, err)?;
            }
            Command::RepeatLast { .. }
            | Command::RepeatTimes { .. }
            | Command::NumericEntry { .. } => {}
        }

        if let Some((value, mode)) = command.pending() {
            self.ledger.commit(value, mode)?;
        }

        Ok(Flow::Continue)
    }

    /// The previous save path, or a fresh timestamped one that is remembered
    /// for later quicksaves.
    pub fn quicksave_path(&mut self) -> String {
        self.save_location
            .get_or_insert_with(|| format!("ttab_{}.log", DateStamp::now().filename()))
            .clone()
    }

    fn save<W: Write, E: Write>(&self, path: &str, out: &mut W, err: &mut E) -> io::Result<()> {
        match save_log(&self.ledger, path) {
            Ok(written) => {
                log::info!("wrote {} entries to {}", self.ledger.len(), written.display());
                write!(out, "\nLog written to {}\n\n", path)
            }
            Err(e) => {
                log::warn!("save failed: {}", e);
                write!(err, "\nERROR:  {}\n\n", e)
            }
        }
    }
}

/// Write the serialized ledger to `path` and return where it landed.
///
/// If the path cannot be opened as given and starts with `~`, it is retried
/// relative to `$HOME`. The log is rendered in full before the file is
/// touched.
pub fn save_log(ledger: &Ledger, path: &str) -> Result<PathBuf, SaveError> {
    let mut text = Vec::new();
    codec::serialize(ledger, DateStamp::now(), &mut text).map_err(|source| {
        SaveError::Write {
            path: PathBuf::from(path),
            source,
        }
    })?;

    let (target, mut file) = open_for_writing(path)?;
    file.write_all(&text)
        .and_then(|_| file.flush())
        .map_err(|source| SaveError::Write {
            path: target.clone(),
            source,
        })?;

    Ok(target)
}

fn open_for_writing(path: &str) -> Result<(PathBuf, File), SaveError> {
    let literal = PathBuf::from(path);
    let err = match File::create(&literal) {
        Ok(file) => return Ok((literal, file)),
        Err(err) => err,
    };

    let expanded = match (path.strip_prefix('~'), env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest.trim_start_matches('/')),
        _ => {
            return Err(SaveError::Open {
                path: literal,
                source: err,
            })
        }
    };

    match File::create(&expanded) {
        Ok(file) => Ok((expanded, file)),
        Err(source) => Err(SaveError::Open {
            path: expanded,
            source,
        }),
    }
}

fn write_prompt<W: Write>(out: &mut W, total: f64) -> io::Result<()> {
    // Short totals get an extra tab so the cursor lines up.
    if total < 10000.0 && total > -1000.0 {
        write!(out, "[{}]:\t\t", format_entry(total))
    } else {
        write!(out, "[{}]:\t", format_entry(total))
    }
}
