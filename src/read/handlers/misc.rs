//! File-level and structural odds and ends: `kelvin`, `mmpformat`,
//! `forward_ref`, the `end` markers and two obsolete record kinds the
//! reader accepts and drops.

use crate::model::tree::NodeData;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::session::ReadSession;
use super::super::token::Token;

/// `datum`: obsolete annotation geometry; accepted and discarded.
pub fn read_datum(_session: &mut ReadSession, _record: &Record<'_>) -> Result<(), RecordError> {
    Ok(())
}

/// `waals`: obsolete van der Waals overrides; accepted and discarded.
pub fn read_waals(_session: &mut ReadSession, _record: &Record<'_>) -> Result<(), RecordError> {
    Ok(())
}

/// `kelvin <temperature>`: the whole-part simulation temperature. Skipped
/// when inserting into an existing model, whose temperature wins.
pub fn read_kelvin(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    if session.is_insert() {
        return Ok(());
    }
    match record.payload.first() {
        Some(Token::Word(word)) => {
            let temperature = word
                .parse::<u32>()
                .map_err(|_| RecordError::malformed(record.recordname, record.line))?;
            session.temperature = Some(temperature);
            Ok(())
        }
        _ => Err(RecordError::malformed(record.recordname, record.line)),
    }
}

/// `mmpformat <free-form version text>`; skipped when inserting.
pub fn read_mmpformat(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    if session.is_insert() {
        return Ok(());
    }
    session.format_version = Some(record.rest.to_string());
    Ok(())
}

/// `end1`: marks the end of the main part; nothing to do, the group
/// structure already says so.
pub fn read_end1(_session: &mut ReadSession, _record: &Record<'_>) -> Result<(), RecordError> {
    Ok(())
}

/// `end`: marks the end of the file; trailing lines are still read.
pub fn read_end(_session: &mut ReadSession, _record: &Record<'_>) -> Result<(), RecordError> {
    Ok(())
}

/// `forward_ref (<opaque id>)`: drops a placeholder at the current position
/// for a node written later in the file (its `info leaf forwarded` record
/// splices it back here).
pub fn read_forward_ref(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let Some(Token::Group(ref_id)) = record.payload.first() else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let ref_id = ref_id.trim().to_string();
    let marker = session.add_member(NodeData::Marker(ref_id.clone()));
    session.add_marker(ref_id, marker);
    Ok(())
}
