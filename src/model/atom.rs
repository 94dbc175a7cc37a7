use super::types::{BondOrder, DisplayMode, Element};

/// Index into [`Part::atoms`](super::part::Part::atoms).
///
/// Not to be confused with the small integer ids used inside an mmp file;
/// those are per-read and resolved away by the reader's id table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Cartesian position in angstroms (records store milli-angstrom ints).
    pub position: [f64; 3],
    pub display: DisplayMode,
    /// Bonding pattern name (e.g. "sp2"). Left unresolved on read; a later
    /// `info atom atomtype` record, or the caller, fills it in.
    pub atom_type: Option<String>,
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self {
            element,
            position,
            display: DisplayMode::Default,
            atom_type: None,
        }
    }
}

/// A bond between two atoms.
///
/// Endpoints keep record order: `a` is the atom whose record preceded the
/// bond record. `direction` is +1 when the bond is directed a→b, -1 for
/// b→a, 0 when undirected.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub a: AtomId,
    pub b: AtomId,
    pub order: BondOrder,
    pub direction: i8,
}

impl Bond {
    pub fn new(a: AtomId, b: AtomId, order: BondOrder) -> Self {
        Self {
            a,
            b,
            order,
            direction: 0,
        }
    }

    /// True if this bond joins the two given atoms, in either order.
    pub fn joins(&self, x: AtomId, y: AtomId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// Marks the bond as directed away from `from`, which must be one of
    /// its endpoints.
    pub fn set_direction_from(&mut self, from: AtomId) {
        self.direction = if from == self.a { 1 } else { -1 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_joins_either_order() {
        let b = Bond::new(AtomId(1), AtomId(2), BondOrder::Single);
        assert!(b.joins(AtomId(1), AtomId(2)));
        assert!(b.joins(AtomId(2), AtomId(1)));
        assert!(!b.joins(AtomId(1), AtomId(3)));
    }

    #[test]
    fn bond_direction_from_either_end() {
        let mut b = Bond::new(AtomId(1), AtomId(2), BondOrder::Single);
        b.set_direction_from(AtomId(1));
        assert_eq!(b.direction, 1);
        b.set_direction_from(AtomId(2));
        assert_eq!(b.direction, -1);
    }
}
