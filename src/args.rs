use clap::{App, Arg};
use std::path::PathBuf;

/// What the program was asked to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    /// No input named; run the interactive loop.
    Interactive,

    /// Sum standard input.
    Stdin,

    /// Sum the named file.
    File(PathBuf),
}

pub struct Args {
    pub input: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(app().get_matches())
    }

    pub fn parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(app().get_matches_from_safe(itr)?))
    }

    pub fn invocation(&self) -> Invocation {
        match self.input.as_deref() {
            None => Invocation::Interactive,
            Some("-") => Invocation::Stdin,
            Some(path) => Invocation::File(PathBuf::from(path)),
        }
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            input: matches.value_of("input").map(str::to_string),
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("ttab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Add or subtract one number after another, keeping a running log")
        .after_help(
            "This program can also sum files with 1 number per line or ttab logs \
             (including negative and floating point numbers). This can be given \
             as an argument or piped in using the '-' option.",
        )
        .arg(
            Arg::with_name("input")
                .takes_value(true)
                .help("file to sum, or '-' to read from stdin"),
        )
}
