//! `rmotor`, `lmotor` and the `shaft` record that binds atoms to the most
//! recent motor.

use crate::model::jig::{Jig, JigKind};
use crate::model::tree::NodeData;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::pattern::{first_match, Field, LinePattern, Value};
use super::super::session::ReadSession;
use super::super::token::Token;

// Newer files carry length/radius/spoke-radius explicitly; older ones stop
// after the axis, and the reader supplies the values old releases hardcoded.
const MOTOR_NEW: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Float,
    Field::Float,
    Field::MilliPos,
    Field::MilliPos,
    Field::Float,
    Field::Float,
    Field::Float,
]);
const MOTOR_OLD: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Float,
    Field::Float,
    Field::MilliPos,
    Field::MilliPos,
]);

const DEFAULT_LENGTH: f64 = 10.0;
const DEFAULT_RADIUS: f64 = 2.0;
const DEFAULT_SPOKE_RADIUS: f64 = 0.5;

struct MotorFields {
    name: String,
    color: [f64; 3],
    a: f64,
    b: f64,
    center: [f64; 3],
    axis: [f64; 3],
    length: f64,
    radius: f64,
    spoke_radius: f64,
}

fn parse_motor(record: &Record<'_>) -> Result<MotorFields, RecordError> {
    let values = first_match(&[MOTOR_NEW, MOTOR_OLD], &record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    match values.as_slice() {
        [Value::Name(name), Value::Color(color), Value::Float(a), Value::Float(b), Value::Pos(center), Value::Pos(axis), Value::Float(length), Value::Float(radius), Value::Float(spoke)] => {
            Ok(MotorFields {
                name: name.clone(),
                color: *color,
                a: *a,
                b: *b,
                center: *center,
                axis: *axis,
                length: *length,
                radius: *radius,
                spoke_radius: *spoke,
            })
        }
        [Value::Name(name), Value::Color(color), Value::Float(a), Value::Float(b), Value::Pos(center), Value::Pos(axis)] => {
            Ok(MotorFields {
                name: name.clone(),
                color: *color,
                a: *a,
                b: *b,
                center: *center,
                axis: *axis,
                length: DEFAULT_LENGTH,
                radius: DEFAULT_RADIUS,
                spoke_radius: DEFAULT_SPOKE_RADIUS,
            })
        }
        _ => Err(RecordError::malformed(record.recordname, record.line)),
    }
}

fn add_motor(session: &mut ReadSession, jig: Jig) {
    let id = session.add_member(NodeData::Jig(jig));
    session.last_motor = Some(id);
}

/// `rmotor (name) (color) torque speed (center) (axis) [len radius spoke_r]`.
pub fn read_rmotor(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let f = parse_motor(record)?;
    let kind = JigKind::RotaryMotor {
        torque: f.a,
        speed: f.b,
        center: f.center,
        axis: f.axis,
        length: f.length,
        radius: f.radius,
        spoke_radius: f.spoke_radius,
    };
    add_motor(session, Jig::new(f.name, f.color, Vec::new(), kind));
    Ok(())
}

/// `lmotor (name) (color) force stiffness (center) (axis) [len width spoke_r]`.
pub fn read_lmotor(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let f = parse_motor(record)?;
    let kind = JigKind::LinearMotor {
        force: f.a,
        stiffness: f.b,
        center: f.center,
        axis: f.axis,
        length: f.length,
        width: f.radius,
        spoke_radius: f.spoke_radius,
    };
    add_motor(session, Jig::new(f.name, f.color, Vec::new(), kind));
    Ok(())
}

/// `shaft <id> ...`: attaches the listed atoms to the most recent motor.
pub fn read_shaft(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let motor = session.last_motor.ok_or(RecordError::ShaftWithoutMotor)?;
    let mut ids = Vec::with_capacity(record.payload.len());
    for tok in &record.payload {
        let Token::Word(w) = tok else {
            return Err(RecordError::malformed(record.recordname, record.line));
        };
        ids.push(
            w.parse::<u32>()
                .map_err(|_| RecordError::malformed(record.recordname, record.line))?,
        );
    }
    let atoms = session.resolve_atoms(&ids)?;
    if let NodeData::Jig(jig) = session.nodes.data_mut(motor) {
        jig.atoms = atoms;
    }
    Ok(())
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
    fn full_rmotor_record_keeps_its_geometry() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &["rmotor (M1) (127, 0, 0) 0.5 2.0 (1000, 0, 0) (0, 1000, 0) 12.0 3.0 0.7"],
        );
        let items = s.extract_toplevel_items();
        let NodeData::Jig(jig) = s.nodes.data(items[0]) else {
            panic!("expected a jig");
        };
        assert_eq!(jig.name, "M1");
        let JigKind::RotaryMotor {
            torque,
            speed,
            center,
            axis,
            length,
            radius,
            spoke_radius,
        } = jig.kind
        else {
            panic!("expected a rotary motor");
        };
        assert_eq!(torque, 0.5);
        assert_eq!(speed, 2.0);
        assert_eq!(center, [1.0, 0.0, 0.0]);
        assert_eq!(axis, [0.0, 1.0, 0.0]);
        assert_eq!((length, radius, spoke_radius), (12.0, 3.0, 0.7));
    }

    #[test]
    fn short_motor_record_gets_legacy_geometry() {
        let mut s = ReadSession::new(false);
        feed(&mut s, &["lmotor (L) (0, 0, 0) 1.0 4.0 (0, 0, 0) (0, 0, 1000)"]);
        let items = s.extract_toplevel_items();
        let NodeData::Jig(jig) = s.nodes.data(items[0]) else {
            panic!("expected a jig");
        };
        let JigKind::LinearMotor {
            length,
            width,
            spoke_radius,
            ..
        } = jig.kind
        else {
            panic!("expected a linear motor");
        };
        assert_eq!((length, width, spoke_radius), (10.0, 2.0, 0.5));
    }

    #[test]
    fn shaft_binds_atoms_to_the_last_motor() {
        let mut s = ReadSession::new(false);
        feed(
            &mut s,
            &[
                "mol (m)",
                "atom 1 (6) (0, 0, 0)",
                "atom 2 (6) (1000, 0, 0)",
                "rmotor (M) (0, 0, 0) 0.1 0.1 (0, 0, 0) (0, 0, 1000)",
                "shaft 1 2",
            ],
        );
        let items = s.extract_toplevel_items();
        let NodeData::Jig(jig) = s.nodes.data(items[1]) else {
            panic!("expected a jig");
        };
        assert_eq!(jig.atoms, vec![AtomId(0), AtomId(1)]);
    }

    #[test]
    fn shaft_without_motor_is_an_error() {
        let mut s = ReadSession::new(false);
        let err = apply_line(&mut s, "shaft 1").unwrap_err();
        assert!(matches!(err, RecordError::ShaftWithoutMotor));
    }
}
