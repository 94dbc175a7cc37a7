//! Per-line handler resolution.
//!
//! Resolution order for a record keyword: a session-cached parser from the
//! global grammar, then a built-in handler, and otherwise the line is an
//! intentionally ignored unrecognized record (forward compatibility with
//! newer files).

use super::error::RecordError;
use super::handlers;
use super::info;
use super::session::ReadSession;
use super::token::{self, Token};

/// One record line, split for handlers: the raw line, its keyword, the
/// tokenized payload and the raw payload text.
pub struct Record<'a> {
    pub line: &'a str,
    pub recordname: &'a str,
    pub payload: Vec<Token<'a>>,
    /// Everything after the keyword, untokenized (info and mmpformat
    /// records keep free-form payloads).
    pub rest: &'a str,
}

impl<'a> Record<'a> {
    fn split(line: &'a str) -> Option<Self> {
        let trimmed = line.trim_start();
        let recordname = token::keyword(trimmed)?;
        let rest = trimmed[recordname.len()..].trim();
        Some(Self {
            line: line.trim_end(),
            recordname,
            payload: token::tokenize(rest),
            rest,
        })
    }
}

type Handler = fn(&mut ReadSession, &Record<'_>) -> Result<(), RecordError>;

/// The hardcoded part of the grammar: record keyword → built-in handler.
fn builtin(recordname: &str) -> Option<Handler> {
    Some(match recordname {
        "group" => handlers::group::read_group,
        "egroup" => handlers::group::read_egroup,
        "mol" => handlers::chunk::read_mol,
        "atom" => handlers::atom::read_atom,
        "bond1" => handlers::atom::read_bond1,
        "bond2" => handlers::atom::read_bond2,
        "bond3" => handlers::atom::read_bond3,
        "bonda" => handlers::atom::read_bonda,
        "bondg" => handlers::atom::read_bondg,
        "bond_direction" => handlers::atom::read_bond_direction,
        "rmotor" => handlers::motor::read_rmotor,
        "lmotor" => handlers::motor::read_lmotor,
        "shaft" => handlers::motor::read_shaft,
        "gridplane" => handlers::plane::read_gridplane,
        "plane" => handlers::plane::read_plane,
        "espimage" | "espwindow" => handlers::plane::read_espimage,
        "atomset" => handlers::jig::read_atomset,
        "anchor" | "ground" => handlers::jig::read_anchor,
        "stat" => handlers::jig::read_stat,
        "thermo" => handlers::jig::read_thermo,
        "mdistance" => handlers::jig::read_mdistance,
        "mangle" => handlers::jig::read_mangle,
        "mdihedral" => handlers::jig::read_mdihedral,
        "namedview" => handlers::view::read_namedview,
        "csys" => handlers::view::read_csys,
        "datum" => handlers::misc::read_datum,
        "waals" => handlers::misc::read_waals,
        "kelvin" => handlers::misc::read_kelvin,
        "mmpformat" => handlers::misc::read_mmpformat,
        "forward_ref" => handlers::misc::read_forward_ref,
        "end1" => handlers::misc::read_end1,
        "end" => handlers::misc::read_end,
        "info" => info::read_info,
        _ => return None,
    })
}

/// Applies one line to the session. Blank lines are silently skipped;
/// unrecognized keywords are silently ignored apart from an optional
/// debug diagnostic (`#` comment lines are always silent).
pub fn apply_line(session: &mut ReadSession, line: &str) -> Result<(), RecordError> {
    let Some(record) = Record::split(line) else {
        return Ok(());
    };

    match session.registered_parser(record.recordname) {
        Ok(Some(parser)) => return parser.read_record(session, &record),
        Ok(None) => {}
        Err(()) => {
            return Err(RecordError::UnregisteredRecord {
                recordname: record.recordname.to_string(),
                line: record.line.to_string(),
            });
        }
    }

    match builtin(record.recordname) {
        Some(handler) => handler(session, &record),
        None => {
            if record.recordname != "#" {
                tracing::debug!(
                    recordname = record.recordname,
                    "unrecognized mmp record type ignored (not an error)"
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_unknown_lines_are_skipped() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "").expect("blank line");
        apply_line(&mut s, "   \t").expect("whitespace line");
        apply_line(&mut s, "hologram 1 2 3").expect("unknown keyword");
        apply_line(&mut s, "# a comment line").expect("comment");
        assert!(s.log.is_empty());
    }

    #[test]
    fn unknown_record_with_multibyte_text_is_skipped() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "hologram х\u{a0}data").expect("skipped, not a panic");
        apply_line(&mut s, "заметка (вода)").expect("skipped, not a panic");
        assert!(s.log.is_empty());
    }

    #[test]
    fn reserved_keyword_before_registration_errors() {
        let mut s = ReadSession::new(false);
        let err = apply_line(&mut s, "povrayscene (scene.pov)").unwrap_err();
        assert!(matches!(err, RecordError::UnregisteredRecord { .. }));
    }

    #[test]
    fn builtin_table_covers_the_bond_family() {
        for kw in ["bond1", "bond2", "bond3", "bonda", "bondg"] {
            assert!(builtin(kw).is_some(), "missing builtin for {kw}");
        }
        assert!(builtin("bondc").is_none());
    }
}
