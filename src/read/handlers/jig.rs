//! Jigs with the common `(name) (color) <atom ids>` layout: atom sets,
//! anchors, temperature jigs and measurement tools.

use crate::model::atom::AtomId;
use crate::model::jig::{Color, Jig, JigKind, MeasureKind};
use crate::model::tree::NodeData;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::pattern::{Field, LinePattern, Value};
use super::super::session::ReadSession;

const HEADER_PATTERN: LinePattern = LinePattern::new(&[Field::Name, Field::Color, Field::IdList]);

fn parse_header(
    session: &ReadSession,
    record: &Record<'_>,
) -> Result<(String, Color, Vec<AtomId>), RecordError> {
    let values = HEADER_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::Ids(ids)] = values.as_slice() else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let atoms = session.resolve_atoms(ids)?;
    Ok((name.clone(), *color, atoms))
}

/// `atomset (name) (color) <id> ...`
pub fn read_atomset(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, color, atoms) = parse_header(session, record)?;
    session.add_member(NodeData::Jig(Jig::new(name, color, atoms, JigKind::AtomSet)));
    Ok(())
}

/// `anchor (name) (color) <id> ...` (written as `ground` by older files).
pub fn read_anchor(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, color, atoms) = parse_header(session, record)?;
    session.add_member(NodeData::Jig(Jig::new(name, color, atoms, JigKind::Anchor)));
    Ok(())
}

/// Very old files boxed their temperature jigs with two extra atoms before
/// the one that matters; drop those, and warn if more than one remains.
fn trim_boxed_atoms(atoms: &mut Vec<AtomId>) -> bool {
    if atoms.len() > 2 {
        atoms.drain(0..2);
    }
    if atoms.len() > 1 {
        atoms.truncate(1);
        return true;
    }
    false
}

/// `thermo (name) (color) <id> ...`
pub fn read_thermo(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, color, mut atoms) = parse_header(session, record)?;
    if trim_boxed_atoms(&mut atoms) {
        session.warning(
            "a thermometer record with extra atoms was found; \
             the extra atoms will be ignored",
        );
    }
    session.add_member(NodeData::Jig(Jig::new(
        name,
        color,
        atoms,
        JigKind::Thermometer,
    )));
    Ok(())
}

const STAT_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::ParenInt,
    Field::IdList,
]);

/// `stat (name) (color) (temperature) <id> ...`
pub fn read_stat(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = STAT_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::ParenInt(temperature), Value::Ids(ids)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let mut atoms = session.resolve_atoms(ids)?;
    if trim_boxed_atoms(&mut atoms) {
        session.warning(format!(
            "a thermostat record ({name}) with extra atoms was found; \
             the extra atoms will be ignored"
        ));
    }
    session.add_member(NodeData::Jig(Jig::new(
        name.clone(),
        *color,
        atoms,
        JigKind::Thermostat {
            temperature: *temperature,
        },
    )));
    Ok(())
}

pub fn read_mdistance(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_measurement(session, record, MeasureKind::Distance)
}

pub fn read_mangle(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_measurement(session, record, MeasureKind::Angle)
}

pub fn read_mdihedral(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    read_measurement(session, record, MeasureKind::Dihedral)
}

const MEASUREMENT_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Name,
    Field::Int,
    Field::IdList,
]);

/// `m<kind> (name) (color) (font name) font_size <id> ...` with exactly as
/// many atoms as the measurement takes; extras past the arity are ignored.
fn read_measurement(
    session: &mut ReadSession,
    record: &Record<'_>,
    kind: MeasureKind,
) -> Result<(), RecordError> {
    let values = MEASUREMENT_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::Name(font_name), Value::Int(font_size), Value::Ids(ids)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    if ids.len() < kind.arity() {
        return Err(RecordError::malformed(record.recordname, record.line));
    }
    let atoms = session.resolve_atoms(&ids[..kind.arity()])?;
    session.add_member(NodeData::Jig(Jig::new(
        name.clone(),
        *color,
        atoms,
        JigKind::Measurement {
            kind,
            font_name: font_name.clone(),
            font_size: *font_size,
        },
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::dispatch::apply_line;

    fn with_atoms(n: u32) -> ReadSession {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "mol (m)").unwrap();
        for i in 1..=n {
            apply_line(&mut s, &format!("atom {i} (6) (0, 0, {i}000)")).unwrap();
        }
        s
    }

    fn first_jig(s: &mut ReadSession) -> Jig {
        let items = s.extract_toplevel_items();
        for &item in &items {
            if let NodeData::Jig(j) = s.nodes.data(item) {
                return j.clone();
            }
        }
        panic!("no jig found");
    }

    #[test]
    fn ground_is_an_anchor_alias() {
        let mut s = with_atoms(2);
        apply_line(&mut s, "ground (G) (0, 0, 0) 1 2").unwrap();
        let jig = first_jig(&mut s);
        assert_eq!(jig.kind, JigKind::Anchor);
        assert_eq!(jig.atoms, vec![AtomId(0), AtomId(1)]);
    }

    #[test]
    fn stat_keeps_the_boxed_atom_and_temperature() {
        let mut s = with_atoms(3);
        apply_line(&mut s, "stat (T) (255, 0, 0) (300) 1 2 3").unwrap();
        let jig = first_jig(&mut s);
        assert_eq!(jig.kind, JigKind::Thermostat { temperature: 300 });
        // atoms 1 and 2 are the old-format box; atom 3 is the real target
        assert_eq!(jig.atoms, vec![AtomId(2)]);
        assert!(s.log.is_empty());
    }

    #[test]
    fn stat_with_four_atoms_warns() {
        let mut s = with_atoms(4);
        apply_line(&mut s, "stat (T) (255, 0, 0) (300) 1 2 3 4").unwrap();
        let jig = first_jig(&mut s);
        assert_eq!(jig.atoms, vec![AtomId(2)]);
        assert!(s.log.messages()[0].contains("extra atoms"));
    }

    #[test]
    fn measurement_arity_is_enforced() {
        let mut s = with_atoms(3);
        let err = apply_line(&mut s, "mangle (A) (0, 0, 0) (Helvetica) 12 1 2").unwrap_err();
        assert!(matches!(err, RecordError::Malformed { .. }));
        apply_line(&mut s, "mangle (A) (0, 0, 0) (Helvetica) 12 1 2 3").unwrap();
        let jig = first_jig(&mut s);
        assert_eq!(
            jig.kind,
            JigKind::Measurement {
                kind: MeasureKind::Angle,
                font_name: "Helvetica".to_string(),
                font_size: 12,
            }
        );
        assert_eq!(jig.atoms.len(), 3);
    }

    #[test]
    fn jig_with_unknown_atom_id_is_rejected() {
        let mut s = with_atoms(1);
        let err = apply_line(&mut s, "atomset (S) (0, 0, 0) 1 7").unwrap_err();
        assert!(matches!(err, RecordError::UnknownAtom { id: 7, .. }));
    }
}
