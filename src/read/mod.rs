//! Reading the mmp molecular scene-graph format.
//!
//! An mmp file is a line-oriented sequence of records: nested `group` /
//! `egroup` pairs form a scene tree whose leaves are chunks of atoms,
//! jigs and saved views; `atom` and `bond*` records carry the chemistry;
//! `info` records annotate the most recently read object of a kind. The
//! reader is a single forward pass with no lookahead, tolerant by policy:
//! unknown record kinds are skipped, malformed records are logged and
//! dropped, and files missing the expected three-group top level are
//! coerced into it rather than rejected.
//!
//! Entry points are [`read_mmp_file`] for a path and [`MmpReader`] for any
//! buffered source. Out-of-crate record kinds plug in through
//! [`register_record_parser`].

mod assemble;
mod dispatch;
mod error;
mod handlers;
mod info;
mod log;
mod name;
mod pattern;
mod registry;
mod session;
mod token;

pub use assemble::{read_mmp_file, MmpReader, ReadOutcome};
pub use dispatch::Record;
pub use error::{ReadError, RecordError, Severity};
pub use log::MessageLog;
pub use name::{decode_name, encode_name};
pub use registry::{
    register_record_parser, Lookup, MmpGrammar, ParserFactory, RecordParser, RESERVED_RECORDNAMES,
};
pub use session::{InfoTarget, ReadSession, KNOWN_INFO_KINDS};
pub use token::Token;
