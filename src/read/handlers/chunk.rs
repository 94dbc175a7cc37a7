//! `mol`: opens a chunk that collects the atom records that follow.

use crate::model::tree::{Chunk, NodeData};
use crate::model::types::DisplayMode;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::session::ReadSession;
use super::super::token::Token;
use super::take_name;

/// `mol (name) [disp]`. The optional display token sets the chunk-level
/// display mode; an unknown token is ignored so files from newer releases
/// still load.
pub fn read_mol(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let (name, rest) = take_name(session, record, "Mole");
    let mut chunk = Chunk::new(name);
    if let Some(Token::Word(word)) = rest.first() {
        if let Some(disp) = DisplayMode::from_token(word) {
            chunk.display = disp;
        }
    }
    let id = session.add_member(NodeData::Chunk(chunk));
    session.last_chunk = Some(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::dispatch::apply_line;

    #[test]
    fn mol_sets_name_and_display() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "mol (water) tub").unwrap();
        let items = s.extract_toplevel_items();
        let NodeData::Chunk(c) = s.nodes.data(items[0]) else {
            panic!("expected a chunk");
        };
        assert_eq!(c.name, "water");
        assert_eq!(c.display, DisplayMode::Tubes);
    }

    #[test]
    fn unknown_display_token_is_ignored() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "mol (m) zzz").unwrap();
        let items = s.extract_toplevel_items();
        let NodeData::Chunk(c) = s.nodes.data(items[0]) else {
            panic!("expected a chunk");
        };
        assert_eq!(c.display, DisplayMode::Default);
        assert!(s.log.is_empty());
    }

    #[test]
    fn nameless_mol_gets_a_generated_name() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "mol").unwrap();
        let items = s.extract_toplevel_items();
        assert_eq!(s.nodes.data(items[0]).name(), "Mole-1");
        assert!(s.log.messages()[0].contains("without a valid name"));
    }
}
