//! The process-wide mmp grammar: recordname → record-parser factory.
//!
//! The grammar is expected to be fully populated at startup, before the
//! first read, and is append-only afterwards; reads only ever look it up.
//! Record kinds whose parsers live outside this crate but are part of the
//! documented format are seeded as *reserved*: reading one before its real
//! parser is registered produces a loud "Bug:" message instead of the
//! silent skip unrecognized records get.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::dispatch::Record;
use super::error::RecordError;
use super::session::ReadSession;

/// Parser for one registered record kind.
///
/// One instance serves one reading session (instantiated lazily and cached
/// there), so implementations may keep per-file state such as
/// already-warned flags.
pub trait RecordParser {
    fn read_record(
        &self,
        session: &mut ReadSession,
        record: &Record<'_>,
    ) -> Result<(), RecordError>;
}

/// Builds a parser instance for a session; the argument is the recordname
/// the factory was registered under, so one factory can serve several.
pub type ParserFactory = Arc<dyn Fn(&str) -> Box<dyn RecordParser> + Send + Sync>;

/// Record names documented as part of the format whose parsers are
/// registered by other components. Reading one before registration is a
/// visible failure, not silent data loss.
pub const RESERVED_RECORDNAMES: &[&str] = &[
    "comment",
    "gamess",
    "povrayscene",
    "DnaSegmentMarker",
    "DnaStrandMarker",
];

enum Registration {
    Parser(ParserFactory),
    /// Must eventually be registered; fails loudly if dispatched first.
    Reserved,
}

/// An mmp reading grammar, not including the hardcoded built-in records.
pub struct MmpGrammar {
    entries: HashMap<String, Registration>,
}

/// Result of a grammar lookup for one recordname.
pub enum Lookup {
    Parser(Box<dyn RecordParser>),
    Reserved,
    Absent,
}

impl MmpGrammar {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A grammar with every reserved recordname seeded as must-register.
    pub fn with_reserved_names() -> Self {
        let mut grammar = Self::new();
        for name in RESERVED_RECORDNAMES {
            grammar
                .entries
                .insert((*name).to_string(), Registration::Reserved);
        }
        grammar
    }

    pub fn register(&mut self, recordname: &str, factory: ParserFactory) {
        if !RESERVED_RECORDNAMES.contains(&recordname) {
            tracing::warn!(
                recordname,
                "registering a record parser for a name missing from \
                 RESERVED_RECORDNAMES"
            );
        }
        self.entries
            .insert(recordname.to_string(), Registration::Parser(factory));
    }

    pub fn lookup(&self, recordname: &str) -> Lookup {
        match self.entries.get(recordname) {
            Some(Registration::Parser(factory)) => Lookup::Parser(factory(recordname)),
            Some(Registration::Reserved) => Lookup::Reserved,
            None => Lookup::Absent,
        }
    }
}

impl Default for MmpGrammar {
    fn default() -> Self {
        Self::with_reserved_names()
    }
}

static GRAMMAR: Lazy<RwLock<MmpGrammar>> =
    Lazy::new(|| RwLock::new(MmpGrammar::with_reserved_names()));

/// Registers a record parser with the default grammar.
///
/// Append-only by convention: call during startup, before any read.
pub fn register_record_parser<F>(recordname: &str, factory: F)
where
    F: Fn(&str) -> Box<dyn RecordParser> + Send + Sync + 'static,
{
    let mut grammar = GRAMMAR.write().expect("mmp grammar lock poisoned");
    grammar.register(recordname, Arc::new(factory));
}

/// Looks up `recordname` in the default grammar, instantiating a parser
/// for the current session if one is registered.
pub(crate) fn lookup_default(recordname: &str) -> Lookup {
    let grammar = GRAMMAR.read().expect("mmp grammar lock poisoned");
    grammar.lookup(recordname)
}
