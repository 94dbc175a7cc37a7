use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::model::atom::{Atom, AtomId, Bond};
use crate::model::part::Part;
use crate::model::tree::{Chunk, Group, ModelTree, NodeData, NodeId};

use super::error::RecordError;
use super::log::MessageLog;
use super::registry::{self, Lookup, RecordParser};

/// The legal "kinds" of info records. A kind names how the target object
/// is found, not the data type of the value.
pub const KNOWN_INFO_KINDS: &[&str] = &[
    "chunk",
    "opengroup",
    "leaf",
    "atom",
    "gamess",
    "espimage",
    "povrayscene",
];

/// What an info record can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTarget {
    Node(NodeId),
    Atom(AtomId),
}

/// The closed set of structural-recovery causes. Each is warned about at
/// most once per read; two distinct kinds in one read is itself suspicious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Badness {
    NoShelf,
    OnePart,
    MissingGroupOrChunk,
}

/// Cached per-session result of a grammar lookup.
enum CachedParser {
    Parser(Rc<dyn RecordParser>),
    Reserved,
    Absent,
}

/// All state shared between record handlers during one read.
///
/// A session serves exactly one read and is consumed when the top-level
/// items are extracted; there is no concurrency and no re-entrancy, so
/// every mutation goes through plain `&mut self`.
pub struct ReadSession {
    insert: bool,
    pub nodes: ModelTree,
    root: NodeId,
    /// Open groups, synthetic root at the base; the top accepts children.
    group_stack: Vec<NodeId>,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// File-scoped atom ids → atom handles. Collisions overwrite.
    atom_ids: HashMap<u32, AtomId>,
    /// Pending forward-reference markers by opaque id.
    markers: HashMap<String, NodeId>,
    pub(crate) last_atom: Option<AtomId>,
    /// Line text of the last atom record, kept for bond diagnostics.
    pub(crate) last_atom_line: Option<String>,
    pub(crate) last_chunk: Option<NodeId>,
    pub(crate) last_motor: Option<NodeId>,
    info_targets: HashMap<String, InfoTarget>,
    badnesses: BTreeSet<Badness>,
    parser_cache: HashMap<String, CachedParser>,
    gensym_counters: HashMap<String, u32>,
    pub(crate) temperature: Option<u32>,
    pub(crate) format_version: Option<String>,
    pub log: MessageLog,
}

impl ReadSession {
    pub fn new(insert: bool) -> Self {
        let mut nodes = ModelTree::new();
        let root = nodes.alloc(NodeData::Group(Group::new("__opengroup__")));
        Self {
            insert,
            nodes,
            root,
            group_stack: vec![root],
            atoms: Vec::new(),
            bonds: Vec::new(),
            atom_ids: HashMap::new(),
            markers: HashMap::new(),
            last_atom: None,
            last_atom_line: None,
            last_chunk: None,
            last_motor: None,
            info_targets: HashMap::new(),
            badnesses: BTreeSet::new(),
            parser_cache: HashMap::new(),
            gensym_counters: HashMap::new(),
            temperature: None,
            format_version: None,
            log: MessageLog::new(),
        }
    }

    /// True when reading into an existing model; file-level settings
    /// (`kelvin`, `mmpformat`) are skipped in that mode.
    pub fn is_insert(&self) -> bool {
        self.insert
    }

    // == message log shortcuts

    pub fn warning(&mut self, msg: impl std::fmt::Display) {
        self.log.warning(msg);
    }

    pub fn format_error(&mut self, msg: impl std::fmt::Display) {
        self.log.format_error(msg);
    }

    pub fn bug_error(&mut self, msg: impl std::fmt::Display) {
        self.log.bug_error(msg);
    }

    // == group stack

    /// The group currently accepting children. The stack is never empty
    /// while a read is in progress.
    pub fn current_group(&self) -> NodeId {
        *self
            .group_stack
            .last()
            .expect("group stack holds at least the synthetic root")
    }

    pub fn push_group(&mut self, group: NodeId) {
        self.group_stack.push(group);
    }

    /// Pops the top group, refusing to pop the synthetic root.
    pub fn pop_group(&mut self) -> Option<NodeId> {
        if self.group_stack.len() > 1 {
            self.group_stack.pop()
        } else {
            None
        }
    }

    /// Open groups beyond the synthetic root.
    pub fn open_group_count(&self) -> usize {
        self.group_stack.len() - 1
    }

    /// Adds a node as a child of the currently open group.
    pub fn add_member(&mut self, data: NodeData) -> NodeId {
        let top = self.current_group();
        self.nodes.add_child(top, data)
    }

    // == atoms and bonds

    /// Defines an atom under its file-scoped id; a colliding id silently
    /// overwrites the earlier entry, matching the format's semantics.
    pub fn define_atom(&mut self, file_id: u32, atom: Atom, line: &str) -> AtomId {
        let id = AtomId(self.atoms.len());
        self.atoms.push(atom);
        self.atom_ids.insert(file_id, id);
        self.last_atom = Some(id);
        self.last_atom_line = Some(line.to_string());
        if let Some(chunk) = self.last_chunk {
            if let NodeData::Chunk(c) = self.nodes.data_mut(chunk) {
                c.atoms.push(id);
            }
        }
        id
    }

    pub fn resolve_atom(&self, file_id: u32) -> Option<AtomId> {
        self.atom_ids.get(&file_id).copied()
    }

    /// Resolves a whole id list, failing on the first unknown id.
    pub fn resolve_atoms(&self, file_ids: &[u32]) -> Result<Vec<AtomId>, RecordError> {
        file_ids
            .iter()
            .map(|&n| {
                self.resolve_atom(n)
                    .ok_or_else(|| RecordError::unknown_atom(n, ""))
            })
            .collect()
    }

    pub fn add_bond(&mut self, bond: Bond) {
        self.bonds.push(bond);
    }

    pub fn find_bond_mut(&mut self, x: AtomId, y: AtomId) -> Option<&mut Bond> {
        self.bonds.iter_mut().find(|b| b.joins(x, y))
    }

    /// Ensures some chunk is open for a bare atom record, synthesizing one
    /// when a legacy file omitted its chunk/group structure.
    pub fn chunk_for_bare_atom(&mut self) -> NodeId {
        if let Some(chunk) = self.last_chunk {
            return chunk;
        }
        self.note_badness(Badness::MissingGroupOrChunk);
        let chunk = self.add_member(NodeData::Chunk(Chunk::new("sim chunk")));
        self.last_chunk = Some(chunk);
        chunk
    }

    // == forward references

    pub fn add_marker(&mut self, ref_id: String, marker: NodeId) {
        self.markers.insert(ref_id, marker);
    }

    /// Moves `node` into the position declared by the forward_ref record
    /// for `ref_id` and destroys the marker. A missing marker means the
    /// file forwarded a node it never declared, which the reader treats as
    /// an internal fault.
    pub fn splice_forwarded(&mut self, ref_id: &str, node: NodeId) -> Result<(), RecordError> {
        let marker = self.markers.remove(ref_id).ok_or_else(|| {
            RecordError::Internal(format!(
                "no forward_ref was written for forwarded node (ref id {ref_id:?})"
            ))
        })?;
        if !self.nodes.move_after(marker, node) {
            return Err(RecordError::Internal(format!(
                "forward_ref marker {ref_id:?} is not in the tree"
            )));
        }
        self.nodes.detach(marker);
        Ok(())
    }

    // == info targets

    /// Registers the current object for an info kind. Unknown kinds warn
    /// (the central kind list documents the format) but still register.
    pub fn set_info_target(&mut self, kind: &str, target: InfoTarget) {
        if !KNOWN_INFO_KINDS.contains(&kind) {
            self.warning(format!("unrecognized info kind, {kind:?}"));
        }
        self.info_targets.insert(kind.to_string(), target);
    }

    /// The current object an `info <kind> ...` record refers to.
    pub fn current_of(&self, kind: &str) -> Option<InfoTarget> {
        if let Some(&target) = self.info_targets.get(kind) {
            return Some(target);
        }
        match kind {
            "chunk" => self.last_chunk.map(InfoTarget::Node),
            "opengroup" => Some(InfoTarget::Node(self.current_group())),
            "leaf" => self
                .nodes
                .children(self.current_group())
                .last()
                .copied()
                .map(InfoTarget::Node),
            "atom" => self.last_atom.map(InfoTarget::Atom),
            _ => None,
        }
    }

    // == recovery bookkeeping

    /// Records that a structural-recovery heuristic fired; each cause
    /// warns once per read, and a second distinct cause is flagged.
    pub fn note_badness(&mut self, badness: Badness) {
        if !self.badnesses.insert(badness) {
            return;
        }
        let msg = match badness {
            Badness::MissingGroupOrChunk | Badness::OnePart => {
                "mmp file probably written by a simulation tool -- lacks \
                 original file's chunk/group structure and display modes; \
                 unreadable by older releases unless resaved."
            }
            Badness::NoShelf => {
                "this mmp file was written as input for the simulator, \
                 and contains no clipboard items"
            }
        };
        self.warning(msg);
        if self.badnesses.len() > 1 {
            self.format_error("the prior warnings should not appear together for the same file");
        }
    }

    // == registered parsers

    /// Session-cached lookup into the global grammar. The grammar is
    /// read-only during a read, so caching Absent/Reserved is safe too.
    pub(crate) fn registered_parser(
        &mut self,
        recordname: &str,
    ) -> Result<Option<Rc<dyn RecordParser>>, ()> {
        let cached = self
            .parser_cache
            .entry(recordname.to_string())
            .or_insert_with(|| match registry::lookup_default(recordname) {
                Lookup::Parser(parser) => CachedParser::Parser(Rc::from(parser)),
                Lookup::Reserved => CachedParser::Reserved,
                Lookup::Absent => CachedParser::Absent,
            });
        match cached {
            CachedParser::Parser(parser) => Ok(Some(Rc::clone(parser))),
            CachedParser::Absent => Ok(None),
            CachedParser::Reserved => Err(()),
        }
    }

    // == names

    /// A unique placeholder name for a record whose name field is missing
    /// or malformed.
    pub fn gensym(&mut self, prefix: &str) -> String {
        let counter = self.gensym_counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}-{counter}")
    }

    // == end of read

    /// Destroys leftover markers and unclosed groups bookkeeping, then
    /// detaches and returns the top-level items. The session must not be
    /// used for further lines afterwards.
    pub fn extract_toplevel_items(&mut self) -> Vec<NodeId> {
        if !self.markers.is_empty() {
            self.warning(format!(
                "mmp file had {} forward_ref marker(s) that were never resolved",
                self.markers.len()
            ));
        }
        let leftover: Vec<NodeId> = self.markers.drain().map(|(_, node)| node).collect();
        for marker in leftover {
            self.nodes.detach(marker);
        }
        if self.open_group_count() > 0 {
            self.warning(format!(
                "mmp file had {} unclosed group(s)",
                self.open_group_count()
            ));
        }
        self.group_stack.truncate(1);
        self.nodes.take_children(self.root)
    }

    /// Consumes the session into the final normalized part plus its log.
    pub(crate) fn into_outcome(self, view_data: NodeId, tree: NodeId, shelf: NodeId) -> (Part, MessageLog) {
        let part = Part {
            nodes: self.nodes,
            view_data,
            tree,
            shelf,
            atoms: self.atoms,
            bonds: self.bonds,
            temperature: self.temperature,
            format_version: self.format_version,
        };
        (part, self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;

    #[test]
    fn atom_id_collision_overwrites() {
        let mut s = ReadSession::new(false);
        let first = s.define_atom(5, Atom::new(Element::C, [0.0; 3]), "atom 5 ...");
        let second = s.define_atom(5, Atom::new(Element::N, [1.0; 3]), "atom 5 ...");
        assert_ne!(first, second);
        assert_eq!(s.resolve_atom(5), Some(second));
    }

    #[test]
    fn bare_atom_synthesizes_one_chunk_and_warns_once() {
        let mut s = ReadSession::new(false);
        let c1 = s.chunk_for_bare_atom();
        let c2 = s.chunk_for_bare_atom();
        assert_eq!(c1, c2);
        assert_eq!(s.log.len(), 1);
        assert!(s.log.messages()[0].contains("chunk/group structure"));
    }

    #[test]
    fn two_distinct_badness_kinds_are_flagged() {
        let mut s = ReadSession::new(false);
        s.note_badness(Badness::OnePart);
        s.note_badness(Badness::OnePart);
        assert_eq!(s.log.len(), 1);
        s.note_badness(Badness::NoShelf);
        assert_eq!(s.log.len(), 3);
        assert!(s.log.messages()[2].contains("should not appear together"));
    }

    #[test]
    fn pop_group_never_removes_the_root() {
        let mut s = ReadSession::new(false);
        assert!(s.pop_group().is_none());
        let g = s.add_member(NodeData::Group(Group::new("G")));
        s.push_group(g);
        assert_eq!(s.pop_group(), Some(g));
        assert!(s.pop_group().is_none());
    }

    #[test]
    fn splice_without_marker_is_an_internal_fault() {
        let mut s = ReadSession::new(false);
        let node = s.add_member(NodeData::Group(Group::new("n")));
        let err = s.splice_forwarded("42", node).unwrap_err();
        assert!(matches!(err, RecordError::Internal(_)));
    }

    #[test]
    fn leftover_markers_warn_and_are_destroyed() {
        let mut s = ReadSession::new(false);
        let marker = s.add_member(NodeData::Marker("3".into()));
        s.add_marker("3".into(), marker);
        let items = s.extract_toplevel_items();
        assert!(items.is_empty());
        assert!(s.log.messages()[0].contains("never resolved"));
    }

    #[test]
    fn gensym_is_unique_per_prefix() {
        let mut s = ReadSession::new(false);
        assert_eq!(s.gensym("Grp"), "Grp-1");
        assert_eq!(s.gensym("Grp"), "Grp-2");
        assert_eq!(s.gensym("Mole"), "Mole-1");
    }
}
