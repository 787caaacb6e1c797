//! Error types for accesslint operations.

use thiserror::Error;

/// Errors that can occur while analyzing a document.
///
/// Malformed markup and style fragments are never errors: the parsers
/// recover leniently and analysis continues. Only structural failures
/// abort a run, and an aborted run produces no partial report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input document is empty")]
    EmptyInput,

    #[error("no document tree could be built from the input")]
    NoDocument,

    #[error("internal analysis error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, Error>;
