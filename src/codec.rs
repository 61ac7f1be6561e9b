//! The text log format: writing a ledger out and summing logs back in.
//!
//! A log looks like this:
//!
//! ```text
//! ----------------------------------------
//! TTAB LOG
//! Created 2021-04-03  12:30:00
//! ----------------------------------------
//!
//! 2021-04-03  12:30:00	+5
//! 2021-04-03  12:30:00	Total:  5
//!
//! ```
//!
//! Parsing never fails on content. Lines that carry no number contribute
//! nothing, and anything after a `#` is a comment.

use crate::datestamp::DateStamp;
use crate::ledger::Ledger;
use crate::number::leading_float;
use std::io::{self, BufRead, Write};

/// Forty dashes framing the log header.
pub const SEPARATOR: &str = "----------------------------------------";

/// The header line that switches the parser into log mode.
pub const LOG_TITLE: &str = "TTAB LOG";

/// Where a stream being summed comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// A file named on the command line. Each plain line holds one number.
    File,

    /// Standard input. Each plain line may hold several whitespace-separated
    /// numbers, and a leading separator line marks a piped log.
    Piped,
}

/// Write the header followed by the rendered history of `ledger`.
pub fn serialize<W: Write>(ledger: &Ledger, created: DateStamp, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "{}", SEPARATOR)?;
    writeln!(sink, "{}", LOG_TITLE)?;
    writeln!(sink, "Created {}", created.human())?;
    writeln!(sink, "{}", SEPARATOR)?;
    writeln!(sink)?;

    ledger.render(sink)
}

/// Serialize `ledger` into an owned string.
pub fn serialize_to_string(ledger: &Ledger, created: DateStamp) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = serialize(ledger, created, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// An accumulator fed one line at a time.
#[derive(Debug)]
pub struct LogParser {
    source: Source,
    log_mode: bool,
    started: bool,
    total: f64,
}

impl LogParser {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            log_mode: false,
            started: false,
            total: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn in_log_mode(&self) -> bool {
        self.log_mode
    }

    /// Account for one line of input.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        let content = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };

        if content == LOG_TITLE {
            if !self.log_mode {
                log::debug!("found log title, switching to log mode");
            }
            self.log_mode = true;
            return;
        }

        if self.source == Source::Piped && !self.log_mode && !self.started && content == SEPARATOR
        {
            log::debug!("piped input starts with a log header, switching to log mode");
            self.log_mode = true;
            return;
        }

        if self.log_mode {
            if let Some(number) = marked_number(content) {
                self.add(number);
            }
            return;
        }

        match self.source {
            Source::File => {
                if let Some(number) = leading_float(content) {
                    self.add(number);
                }
            }
            Source::Piped => {
                for token in content.split_whitespace() {
                    if let Some(number) = leading_float(token) {
                        self.add(number);
                    }
                }
            }
        }
    }

    fn add(&mut self, number: f64) {
        self.started = true;
        self.total += number;
    }
}

/// Sum every line of `reader`.
///
/// Invalid UTF-8 is replaced rather than rejected; only I/O failures are
/// reported as errors.
pub fn parse_stream<R: BufRead>(mut reader: R, source: Source) -> io::Result<f64> {
    let mut parser = LogParser::new(source);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.feed(&String::from_utf8_lossy(&buf));
    }

    Ok(parser.total())
}

/// Sum an in-memory text.
pub fn parse_str(text: &str, source: Source) -> f64 {
    let mut parser = LogParser::new(source);
    for line in text.lines() {
        parser.feed(line);
    }
    parser.total()
}

/// Find the number introduced by the first tab that is followed by a sign.
fn marked_number(content: &str) -> Option<f64> {
    let start = content
        .as_bytes()
        .windows(2)
        .position(|pair| pair[0] == b'\t' && (pair[1] == b'+' || pair[1] == b'-'))?;

    Some(leading_float(&content[start + 1..]).unwrap_or(0.0))
}
