use super::atom::{Atom, Bond};
use super::tree::{ModelTree, NodeId};

/// The normalized result of reading one mmp file.
///
/// Every successful read yields exactly three top-level groups, in fixed
/// roles: `view_data` (saved viewpoints), `tree` (the main part) and
/// `shelf` (clipboard items). Files that never had that structure are
/// coerced into it by the reader's recovery heuristics.
#[derive(Debug)]
pub struct Part {
    pub nodes: ModelTree,
    pub view_data: NodeId,
    pub tree: NodeId,
    pub shelf: NodeId,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// Simulation temperature from a `kelvin` record, if any.
    pub temperature: Option<u32>,
    /// Verbatim payload of the `mmpformat` record, if any.
    pub format_version: Option<String>,
}

impl Part {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// The top-level groups in role order.
    pub fn roots(&self) -> [NodeId; 3] {
        [self.view_data, self.tree, self.shelf]
    }
}
