//! `atom`, the `bond*` family and `bond_direction`.

use crate::model::atom::{Atom, Bond};
use crate::model::types::{BondOrder, DisplayMode, Element};

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::pattern::{Field, LinePattern, Value};
use super::super::session::ReadSession;
use super::super::token::Token;

const ATOM_PATTERN: LinePattern = LinePattern::new(&[Field::Int, Field::ParenInt, Field::MilliPos]);

/// `atom <id> (<element number>) (<x, y, z>) [disp]`; coordinates are
/// milli-angstrom integers on disk.
pub fn read_atom(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = ATOM_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Int(file_id), Value::ParenInt(number), Value::Pos(position)] = values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let file_id: u32 = (*file_id)
        .try_into()
        .map_err(|_| RecordError::malformed(record.recordname, record.line))?;

    let element = match u32::try_from(*number).ok().and_then(|n| Element::from_number(n).ok()) {
        Some(element) => element,
        None => {
            session.format_error(format!(
                "unsupported element number {number} in this mmp line; using carbon instead: {:?}",
                record.line
            ));
            Element::C
        }
    };

    session.chunk_for_bare_atom();
    let mut atom = Atom::new(element, *position);
    if let Some(Token::Word(word)) = record.payload.get(3) {
        if let Some(disp) = DisplayMode::from_token(word) {
            atom.display = disp;
        }
    }
    session.define_atom(file_id, atom, record.line);
    Ok(())
}

pub fn read_bond1(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_bond(session, record, BondOrder::Single)
}

pub fn read_bond2(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_bond(session, record, BondOrder::Double)
}

pub fn read_bond3(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_bond(session, record, BondOrder::Triple)
}

pub fn read_bonda(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_bond(session, record, BondOrder::Aromatic)
}

pub fn read_bondg(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_bond(session, record, BondOrder::Graphitic)
}

/// `bond<order> <id> ...`: bonds from the most recent atom record to each
/// listed, previously defined atom. Ids resolve one at a time, so bonds
/// before a bad id survive even when the record errors out.
fn read_bond(
    session: &mut ReadSession,
    record: &Record<'_>,
    order: BondOrder,
) -> Result<(), RecordError> {
    let prev = session
        .last_atom
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let ids = id_run(record)?;
    for id in ids {
        let other = session.resolve_atom(id).ok_or_else(|| {
            RecordError::unknown_atom(
                id,
                format!(
                    " in {} record after atom record {:?}",
                    record.recordname, session.last_atom_line
                ),
            )
        })?;
        session.add_bond(Bond::new(prev, other, order));
    }
    Ok(())
}

/// `bond_direction <id> <id> ...`: walks the listed atoms pairwise and
/// orients each already-defined bond away from the pair's first atom.
pub fn read_bond_direction(
    session: &mut ReadSession,
    record: &Record<'_>,
) -> Result<(), RecordError> {
    let ids = id_run(record)?;
    if ids.len() < 2 {
        return Err(RecordError::malformed(record.recordname, record.line));
    }
    let atoms = session.resolve_atoms(&ids)?;
    for pair in atoms.windows(2) {
        let from = pair[0];
        let bond = session
            .find_bond_mut(pair[0], pair[1])
            .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
        bond.set_direction_from(from);
    }
    Ok(())
}

fn id_run(record: &Record<'_>) -> Result<Vec<u32>, RecordError> {
    record
        .payload
        .iter()
        .map(|tok| match tok {
            Token::Word(w) => w
                .parse::<u32>()
                .map_err(|_| RecordError::malformed(record.recordname, record.line)),
            Token::Group(_) => Err(RecordError::malformed(record.recordname, record.line)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::AtomId;
    use crate::read::dispatch::apply_line;

    fn feed(s: &mut ReadSession, lines: &[&str]) {
        for line in lines {
            apply_line(s, line).unwrap();
        }
    }

    #[test]
    fn atom_positions_scale_from_milli_units() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &["mol (m) def", "atom 1 (6) (1000, -2500, 0) cpk"],
        );
        assert_eq!(s.atoms.len(), 1);
        assert_eq!(s.atoms[0].element, Element::C);
        assert_eq!(s.atoms[0].position, [1.0, -2.5, 0.0]);
        assert_eq!(s.atoms[0].display, DisplayMode::BallAndStick);
    }

    #[test]
    fn unsupported_element_becomes_carbon_with_a_warning() {
        let mut s = ReadSession::new(false);
        feed(&mut s, &["mol (m)", "atom 1 (999) (0, 0, 0)"]);
        assert_eq!(s.atoms[0].element, Element::C);
        assert!(s.log.messages()[0].contains("unsupported element"));
    }

    #[test]
    fn bonds_go_from_last_atom_to_each_listed_id() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &[
                "mol (m)",
                "atom 1 (8) (0, 0, 0)",
                "atom 2 (1) (1000, 0, 0)",
                "atom 3 (1) (0, 1000, 0)",
                "bond1 1 2",
            ],
        );
        assert_eq!(s.bonds.len(), 2);
        assert_eq!(s.bonds[0].order, BondOrder::Single);
        assert!(s.bonds[0].joins(AtomId(2), AtomId(0)));
        assert!(s.bonds[1].joins(AtomId(2), AtomId(1)));
    }

    #[test]
    fn unknown_bond_id_keeps_earlier_bonds_in_the_record() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &["mol (m)", "atom 1 (6) (0, 0, 0)", "atom 2 (6) (1000, 0, 0)"],
        );
        let err = apply_line(&mut s, "bond1 1 99").unwrap_err();
        assert!(matches!(err, RecordError::UnknownAtom { id: 99, .. }));
        assert_eq!(s.bonds.len(), 1);
    }

    #[test]
    fn bond_before_any_atom_is_malformed() {
        let mut s = ReadSession::new(false);
        let err = apply_line(&mut s, "bond1 1").unwrap_err();
        assert!(matches!(err, RecordError::Malformed { .. }));
    }

    #[test]
    fn bond_direction_orients_each_pair() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &[
                "mol (m)",
                "atom 1 (6) (0, 0, 0)",
                "atom 2 (6) (1000, 0, 0)",
                "bond1 1",
                "atom 3 (6) (2000, 0, 0)",
                "bond1 2",
                "bond_direction 3 2 1",
            ],
        );
        // both bonds point away from atom 3's side of each pair
        let b32 = s.find_bond_mut(AtomId(2), AtomId(1)).unwrap();
        assert_eq!(b32.direction, if b32.a == AtomId(2) { 1 } else { -1 });
        let b21 = s.find_bond_mut(AtomId(1), AtomId(0)).unwrap();
        assert_eq!(b21.direction, if b21.a == AtomId(1) { 1 } else { -1 });
    }

    #[test]
    fn bond_direction_needs_two_ids() {
        let mut s = ReadSession::new(false);
        feed(&mut s, &["mol (m)", "atom 1 (6) (0, 0, 0)"]);
        let err = apply_line(&mut s, "bond_direction 1").unwrap_err();
        assert!(matches!(err, RecordError::Malformed { .. }));
    }
}
