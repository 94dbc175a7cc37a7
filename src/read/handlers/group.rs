//! `group` / `egroup`: the nesting structure of the model tree.

use crate::model::tree::{Group, GroupKind, NodeData};

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::session::ReadSession;
use super::super::token::Token;
use super::take_name;

/// `group (name) [classification ...]` opens a group; every later node goes
/// inside it until the matching `egroup (name)`.
///
/// Words after the name are classifications. Known ones select the group's
/// kind (last known one wins and discards earlier unknowns); unknown ones
/// accumulate so a rewrite of the file can preserve them.
pub fn read_group(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, rest) = take_name(session, record, "Grp");
    let mut kind = GroupKind::Plain;
    let mut extra = Vec::new();
    for tok in rest {
        if let Token::Word(word) = tok {
            match GroupKind::from_token(word) {
                Some(known) => {
                    kind = known;
                    extra.clear();
                }
                None => extra.push((*word).to_string()),
            }
        }
    }
    let mut group = Group::new(name);
    group.kind = kind;
    group.extra_classifications = extra;
    let id = session.add_member(NodeData::Group(group));
    session.push_group(id);
    Ok(())
}

/// `egroup (name)` closes the innermost open group.
///
/// The pop happens before the name check, so a mismatched egroup still
/// closes exactly one group; the reader then reports the mismatch and moves
/// on with the outer group current.
pub fn read_egroup(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, _) = take_name(session, record, "Grp");
    match session.pop_group() {
        None => Err(RecordError::ExtraGroupEnd { name }),
        Some(group) => {
            let expected = session.nodes.data(group).name().to_string();
            if expected != name {
                return Err(RecordError::MismatchedGroupEnd {
                    expected,
                    found: name,
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::dispatch::apply_line;

    #[test]
    fn group_and_egroup_nest() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "group (Outer)").unwrap();
        apply_line(&mut s, "group (Inner)").unwrap();
        assert_eq!(s.open_group_count(), 2);
        apply_line(&mut s, "egroup (Inner)").unwrap();
        apply_line(&mut s, "egroup (Outer)").unwrap();
        assert_eq!(s.open_group_count(), 0);
    }

    #[test]
    fn classification_words_select_kind() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "group (Strand A) DnaStrand").unwrap();
        let items = s.extract_toplevel_items();
        let NodeData::Group(g) = s.nodes.data(items[0]) else {
            panic!("expected a group");
        };
        assert_eq!(g.kind, GroupKind::DnaStrand);
        assert!(g.extra_classifications.is_empty());
    }

    #[test]
    fn unknown_classifications_are_preserved() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "group (G) FutureKind AnotherOne").unwrap();
        let items = s.extract_toplevel_items();
        let NodeData::Group(g) = s.nodes.data(items[0]) else {
            panic!("expected a group");
        };
        assert_eq!(g.kind, GroupKind::Plain);
        assert_eq!(g.extra_classifications, vec!["FutureKind", "AnotherOne"]);
    }

    #[test]
    fn mismatched_egroup_still_pops_one_group() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "group (A)").unwrap();
        apply_line(&mut s, "group (B)").unwrap();
        let err = apply_line(&mut s, "egroup (A)").unwrap_err();
        assert!(matches!(err, RecordError::MismatchedGroupEnd { .. }));
        // B was closed anyway; one more egroup closes A cleanly
        assert_eq!(s.open_group_count(), 1);
        apply_line(&mut s, "egroup (A)").unwrap();
    }

    #[test]
    fn extra_egroup_is_reported() {
        let mut s = ReadSession::new(false);
        let err = apply_line(&mut s, "egroup (Nope)").unwrap_err();
        assert!(matches!(err, RecordError::ExtraGroupEnd { .. }));
    }

    #[test]
    fn group_name_with_escapes_is_decoded() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "group (Copy %281%29 of part)").unwrap();
        let items = s.extract_toplevel_items();
        assert_eq!(s.nodes.data(items[0]).name(), "Copy (1) of part");
        // the unclosed-group warning still fires
        assert!(!s.log.is_empty());
    }
}
