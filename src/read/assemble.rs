//! The reader's public entry points: the per-line loop and the top-level
//! normalization that turns whatever structure the file had into the fixed
//! three-role shape (view data, tree, clipboard shelf).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::model::part::Part;
use crate::model::tree::{Group, NodeData, NodeId};

use super::dispatch;
use super::error::{ReadError, RecordError, Severity};
use super::log::MessageLog;
use super::session::{Badness, ReadSession};

/// A successfully read part together with the messages the read produced.
///
/// The log is returned rather than printed; where it goes (history panel,
/// stderr, nowhere) is the caller's call.
#[derive(Debug)]
pub struct ReadOutcome {
    pub part: Part,
    pub log: MessageLog,
}

/// Builder-style reader over any buffered line source.
///
/// ```no_run
/// use std::io::Cursor;
/// use mmpio::read::MmpReader;
///
/// let data = "mmpformat 050502 required\nmol (water) def\nend\n";
/// let outcome = MmpReader::new(Cursor::new(data)).read()?;
/// println!("{} atoms", outcome.part.atom_count());
/// # Ok::<(), mmpio::read::ReadError>(())
/// ```
pub struct MmpReader<R> {
    reader: R,
    insert: bool,
    progress: Option<Box<dyn FnMut(usize, usize)>>,
}

impl<R: BufRead> MmpReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            insert: false,
            progress: None,
        }
    }

    /// Read into an existing model: file-level settings (`kelvin`,
    /// `mmpformat`) are skipped so they can't clobber the host model's.
    pub fn insert(mut self, insert: bool) -> Self {
        self.insert = insert;
        self
    }

    /// Progress callback, called once per line with (lines done, total).
    /// Purely informational; it must not depend on parsing state.
    pub fn progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Runs the read to completion.
    ///
    /// Record-level problems never surface here; they are logged in the
    /// outcome and recovered from. The error cases are I/O failure and a
    /// file with no top-level content at all.
    pub fn read(self) -> Result<ReadOutcome, ReadError> {
        let Self {
            reader,
            insert,
            mut progress,
        } = self;
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let total = lines.len();

        let mut session = ReadSession::new(insert);
        for (done, line) in lines.iter().enumerate() {
            if let Err(err) = dispatch::apply_line(&mut session, line) {
                match err.severity() {
                    Severity::Recoverable => match err {
                        RecordError::UnregisteredRecord { .. } => session.bug_error(err),
                        other => session.format_error(other),
                    },
                    Severity::Fatal => {
                        session.bug_error(format!(
                            "{err}, while reading this mmp line: {line:?}; \
                             the rest of the file was not read"
                        ));
                        break;
                    }
                }
            }
            if let Some(callback) = progress.as_mut() {
                callback(done + 1, total);
            }
        }

        let toplevel = session.extract_toplevel_items();
        normalize(session, toplevel)
    }
}

/// Coerces the file's top-level items into the three fixed roles,
/// synthesizing the groups legacy and simulator-written files left out.
fn normalize(mut session: ReadSession, mut items: Vec<NodeId>) -> Result<ReadOutcome, ReadError> {
    if items.iter().any(|&n| !session.nodes.is_group(n)) {
        // bare chunks/jigs at top level: a simulator input file
        session.note_badness(Badness::MissingGroupOrChunk);
        let tree = wrap_in_group(&mut session, "tree", items);
        items = vec![
            synth_group(&mut session, "Fake View Data"),
            tree,
            synth_group(&mut session, "Clipboard"),
        ];
    }
    match items.len() {
        0 => {
            session.format_error("nothing in file");
            return Err(ReadError::NothingInFile { log: session.log });
        }
        1 => {
            session.note_badness(Badness::OnePart);
            let tree = items[0];
            items = vec![
                synth_group(&mut session, "Fake View Data"),
                tree,
                synth_group(&mut session, "Clipboard"),
            ];
        }
        2 => {
            session.note_badness(Badness::NoShelf);
            let shelf = synth_group(&mut session, "Clipboard");
            items.push(shelf);
        }
        3 => {}
        _ => {
            session.format_error(
                "more than 3 toplevel groups -- treating them all as in the main part",
            );
            let tree = wrap_in_group(&mut session, "tree", items);
            items = vec![
                synth_group(&mut session, "Fake View Data"),
                tree,
                synth_group(&mut session, "Clipboard"),
            ];
        }
    }
    let (view_data, tree, shelf) = (items[0], items[1], items[2]);
    let (part, log) = session.into_outcome(view_data, tree, shelf);
    Ok(ReadOutcome { part, log })
}

fn synth_group(session: &mut ReadSession, name: &str) -> NodeId {
    session.nodes.alloc(NodeData::Group(Group::new(name)))
}

fn wrap_in_group(session: &mut ReadSession, name: &str, items: Vec<NodeId>) -> NodeId {
    let group = synth_group(session, name);
    for item in items {
        session.nodes.attach(group, item);
    }
    group
}

/// Reads an mmp file from disk.
pub fn read_mmp_file(path: impl AsRef<Path>) -> Result<ReadOutcome, ReadError> {
    let file = File::open(path)?;
    MmpReader::new(BufReader::new(file)).read()
}
