pub mod args;
pub mod batch;
pub mod codec;
pub mod datestamp;
pub mod errors;
pub mod interpreter;
pub mod ledger;
pub mod number;
pub mod session;
