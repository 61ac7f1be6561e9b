use crate::codec::{self, Source};
use crate::errors::BatchError;
use crate::number::truncate_zeroes;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Sum a stream and return the formatted total.
pub fn sum_reader<R: BufRead>(reader: R, source: Source) -> Result<String, BatchError> {
    let total = codec::parse_stream(reader, source)?;
    log::info!("summed {:?} input to {}", source, total);

    Ok(truncate_zeroes(total))
}

/// Sum the file at `path`, one number or log entry per line.
pub fn sum_path(path: &Path) -> Result<String, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    sum_reader(BufReader::new(file), Source::File)
}

/// Sum whatever is piped to standard input.
pub fn sum_stdin() -> Result<String, BatchError> {
    let stdin = io::stdin();
    let total = sum_reader(stdin.lock(), Source::Piped)?;
    Ok(total)
}
