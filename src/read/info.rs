//! `info` records: the format's side channel for annotating the most
//! recently read object of some kind without widening that object's own
//! record line.
//!
//! Shape: `info <kind> <key words> = <value>`. The kind picks the target
//! ("current chunk", "current atom", ...); a kind with no current object
//! makes the whole record a silent no-op, because files routinely carry
//! info records for object kinds a given build never created.

use crate::model::jig::JigKind;
use crate::model::tree::NodeData;

use super::dispatch::Record;
use super::error::RecordError;
use super::session::{InfoTarget, ReadSession};

pub fn read_info(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let Some((what, value)) = record.rest.split_once('=') else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let value = value.trim();
    let mut words = what.split_whitespace();
    let Some(kind) = words.next() else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let key: Vec<&str> = words.collect();
    if key.is_empty() {
        return Err(RecordError::malformed(record.recordname, record.line));
    }

    let Some(target) = session.current_of(kind) else {
        tracing::debug!(kind, "info record with no current object, ignored");
        return Ok(());
    };
    apply_info(session, target, kind, &key, value, record)
}

/// Routes one decoded info record to its target's setter. Bad values are
/// logged and dropped rather than failing the record, with one exception:
/// a forwarded-leaf splice against an undeclared id means the reader's own
/// marker bookkeeping broke, and that propagates as an internal fault.
fn apply_info(
    session: &mut ReadSession,
    target: InfoTarget,
    kind: &str,
    key: &[&str],
    value: &str,
    record: &Record<'_>,
) -> Result<(), RecordError> {
    match (kind, key, target) {
        ("opengroup", ["open"], InfoTarget::Node(id)) => {
            if let Some(open) = decode_bool(value) {
                if let NodeData::Group(group) = session.nodes.data_mut(id) {
                    group.open = open;
                }
            } else {
                debug_bad_value(record, value);
            }
        }
        ("leaf", ["hidden"], InfoTarget::Node(id)) => {
            if let Some(hidden) = decode_bool(value) {
                match session.nodes.data_mut(id) {
                    NodeData::Chunk(chunk) => chunk.hidden = hidden,
                    NodeData::Jig(jig) => jig.hidden = hidden,
                    _ => {}
                }
            } else {
                debug_bad_value(record, value);
            }
        }
        ("leaf", ["forwarded"], InfoTarget::Node(id)) => {
            session.splice_forwarded(value, id)?;
        }
        ("chunk", ["color"], InfoTarget::Node(id)) => match decode_color(value) {
            Some(color) => {
                if let NodeData::Chunk(chunk) = session.nodes.data_mut(id) {
                    chunk.color = Some(color);
                }
            }
            None => debug_bad_value(record, value),
        },
        ("chunk", ["hotspot"], InfoTarget::Node(id)) => {
            match decode_int(value).and_then(|n| u32::try_from(n).ok()) {
                Some(file_id) => match session.resolve_atom(file_id) {
                    Some(atom) => {
                        if let NodeData::Chunk(chunk) = session.nodes.data_mut(id) {
                            chunk.hotspot = Some(atom);
                        }
                    }
                    None => session.bug_error(format!(
                        "hotspot names an undefined atom id, ignored: {:?}",
                        record.line
                    )),
                },
                None => debug_bad_value(record, value),
            }
        }
        ("atom", ["atomtype"], InfoTarget::Atom(id)) => {
            session.atoms[id.0].atom_type = Some(value.to_string());
        }
        ("espimage", ["espimage_file"], InfoTarget::Node(id)) => {
            if let NodeData::Jig(jig) = session.nodes.data_mut(id) {
                if let JigKind::EspImage { image_file, .. } = &mut jig.kind {
                    *image_file = Some(value.to_string());
                }
            }
        }
        _ => {
            tracing::debug!(kind, ?key, "info key not understood by its target, ignored");
        }
    }
    Ok(())
}

/// Undecodable values are dropped quietly; files from newer releases may
/// carry spellings this build does not know, and that is not the user's
/// problem.
fn debug_bad_value(record: &Record<'_>, value: &str) {
    tracing::debug!(?value, line = record.line, "undecodable info value, ignored");
}

fn decode_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn decode_int(value: &str) -> Option<i64> {
    value.parse().ok()
}

fn decode_color(value: &str) -> Option<[f64; 3]> {
    let mut parts = value.split(',');
    let mut color = [0.0; 3];
    for slot in &mut color {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(color)
}
