use thiserror::Error;

use super::log::MessageLog;

/// Errors that end a read with no usable result.
///
/// Everything else the reader encounters is funneled into the message log
/// and recovered from; callers never see per-record failures.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The file held no top-level content at all. Carries the messages
    /// logged before the read came up empty.
    #[error("nothing in file")]
    NothingInFile { log: MessageLog },
}

/// How a per-record failure affects the rest of the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warn, drop this record's effect, continue at the next line.
    Recoverable,
    /// An internal invariant broke; stop the per-line loop, keeping
    /// everything parsed so far.
    Fatal,
}

/// A failure while applying one record line.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The line matched none of the record kind's known layouts.
    #[error("bad format in {recordname} record, ignored: {line}")]
    Malformed { recordname: String, line: String },

    /// A bond or jig referenced an atom id never defined by an atom record.
    #[error("reference to undefined atom id {id}{context}")]
    UnknownAtom { id: u32, context: String },

    /// An egroup record arrived with only the synthetic root left open.
    #[error("egroup {name:?} when no groups remain unclosed")]
    ExtraGroupEnd { name: String },

    /// An egroup record's name did not match the group being closed.
    #[error("mismatched group records: egroup {found:?} tried to match group {expected:?}")]
    MismatchedGroupEnd { expected: String, found: String },

    /// A shaft record arrived before any motor record.
    #[error("shaft record with no preceding motor record")]
    ShaftWithoutMotor,

    /// A record keyword was reserved at startup but its parser was never
    /// registered.
    #[error(
        "init code has not registered an mmp record parser for recordname \
         {recordname:?} to parse this mmp line: {line}"
    )]
    UnregisteredRecord { recordname: String, line: String },

    /// An invariant the reader relies on broke; treated as fatal.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RecordError {
    pub fn malformed(recordname: &str, line: &str) -> Self {
        Self::Malformed {
            recordname: recordname.to_string(),
            line: line.to_string(),
        }
    }

    pub fn unknown_atom(id: u32, context: impl Into<String>) -> Self {
        Self::UnknownAtom {
            id,
            context: context.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RecordError::Internal(_) => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }
}
