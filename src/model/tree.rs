use super::atom::AtomId;
use super::jig::{Color, Jig, NamedView};
use super::types::DisplayMode;

/// Index of a node in a [`ModelTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// The scene graph under construction and in the final [`Part`].
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]; a
/// detached node stays allocated for the lifetime of the tree (one read),
/// so ids handed out earlier never dangle.
///
/// [`Part`]: super::part::Part
#[derive(Debug, Default)]
pub struct ModelTree {
    nodes: Vec<Node>,
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

#[derive(Debug)]
pub enum NodeData {
    Group(Group),
    Chunk(Chunk),
    Jig(Jig),
    View(NamedView),
    /// Forward-reference placeholder, keyed by the opaque id from its
    /// `forward_ref` record. Spliced away or discarded before the read ends.
    Marker(String),
}

impl NodeData {
    pub fn name(&self) -> &str {
        match self {
            NodeData::Group(g) => &g.name,
            NodeData::Chunk(c) => &c.name,
            NodeData::Jig(j) => &j.name,
            NodeData::View(v) => &v.name,
            NodeData::Marker(id) => id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NodeData::Group(_))
    }
}

/// A container node. `kind` comes from the first recognized classification
/// token of its `group` record; unrecognized tokens are kept verbatim so a
/// writer can re-emit them.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub kind: GroupKind,
    pub extra_classifications: Vec<String>,
    pub open: bool,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: GroupKind::Plain,
            extra_classifications: Vec::new(),
            open: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKind {
    #[default]
    Plain,
    DnaGroup,
    DnaSegment,
    DnaStrand,
    Block,
}

impl GroupKind {
    /// Maps a group-record classification token to a specialized kind.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DnaGroup" => Some(GroupKind::DnaGroup),
            "DnaSegment" => Some(GroupKind::DnaSegment),
            "DnaStrand" => Some(GroupKind::DnaStrand),
            "Block" => Some(GroupKind::Block),
            _ => None,
        }
    }
}

/// A leaf-owning container for atoms ("mol" records).
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub name: String,
    pub display: DisplayMode,
    pub color: Option<Color>,
    pub hotspot: Option<AtomId>,
    pub atoms: Vec<AtomId>,
    pub hidden: bool,
}

impl Chunk {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: DisplayMode::Default,
            color: None,
            hotspot: None,
            atoms: Vec::new(),
            hidden: false,
        }
    }
}

impl ModelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a detached node.
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Allocates a node and appends it to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.alloc(data);
        self.attach(parent, id);
        id
    }

    /// Appends a detached node to `parent`'s children.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Removes a node from its parent's child list. The node itself stays
    /// in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Moves `node` to the position immediately after `anchor`, under
    /// `anchor`'s parent. Returns false if `anchor` has no parent.
    pub fn move_after(&mut self, anchor: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.nodes[anchor.0].parent else {
            return false;
        };
        self.detach(node);
        self.nodes[node.0].parent = Some(parent);
        let siblings = &mut self.nodes[parent.0].children;
        match siblings.iter().position(|&c| c == anchor) {
            Some(i) => siblings.insert(i + 1, node),
            None => siblings.push(node),
        }
        true
    }

    /// Detaches and returns all children of `id`, preserving order.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for &c in &children {
            self.nodes[c.0].parent = None;
        }
        children
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0].data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_group(&self, id: NodeId) -> bool {
        self.nodes[id.0].data.is_group()
    }

    /// Depth-first iteration over the subtree rooted at `id`, inclusive.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> NodeData {
        NodeData::Group(Group::new(name))
    }

    #[test]
    fn attach_and_detach_keep_order() {
        let mut tree = ModelTree::new();
        let root = tree.alloc(group("root"));
        let a = tree.add_child(root, group("a"));
        let b = tree.add_child(root, group("b"));
        let c = tree.add_child(root, group("c"));
        assert_eq!(tree.children(root), &[a, b, c]);
        tree.detach(b);
        assert_eq!(tree.children(root), &[a, c]);
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn move_after_splices_into_anchor_position() {
        let mut tree = ModelTree::new();
        let root = tree.alloc(group("root"));
        let marker = tree.add_child(root, NodeData::Marker("7".into()));
        let other = tree.add_child(root, group("other"));
        let late = tree.add_child(root, group("late"));
        assert!(tree.move_after(marker, late));
        assert_eq!(tree.children(root), &[marker, late, other]);
        tree.detach(marker);
        assert_eq!(tree.children(root), &[late, other]);
    }

    #[test]
    fn move_after_detached_anchor_fails() {
        let mut tree = ModelTree::new();
        let root = tree.alloc(group("root"));
        let marker = tree.alloc(NodeData::Marker("9".into()));
        let node = tree.add_child(root, group("n"));
        assert!(!tree.move_after(marker, node));
    }

    #[test]
    fn take_children_empties_root() {
        let mut tree = ModelTree::new();
        let root = tree.alloc(group("root"));
        let a = tree.add_child(root, group("a"));
        let b = tree.add_child(root, group("b"));
        assert_eq!(tree.take_children(root), vec![a, b]);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(a), None);
    }
}
