//! Saved viewpoints: `namedview`, and the `csys` record it replaced.

use crate::model::jig::NamedView;
use crate::model::tree::NodeData;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::pattern::{first_match, Field, LinePattern, Value};
use super::super::session::ReadSession;

const VIEW_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Quat,
    Field::ParenFloat,
    Field::Triple,
    Field::ParenFloat,
]);

// The oldest csys records stop after the scale; they predate the pov and
// zoom fields.
const CSYS_OLD_PATTERN: LinePattern =
    LinePattern::new(&[Field::Name, Field::Quat, Field::ParenFloat]);

/// `namedview (name) (quat) (scale) (pov) (zoom)`.
pub fn read_namedview(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = VIEW_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Quat(quat), Value::ParenFloat(scale), Value::Triple(pov), Value::ParenFloat(zoom)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let view = NamedView::new(name.clone(), *quat, *scale, *pov, *zoom);
    session.add_member(NodeData::View(view));
    Ok(())
}

/// `csys`: the pre-namedview spelling of a saved viewpoint.
///
/// The full shape reads exactly like a namedview. The truncated ancient
/// shape carried one home view; reading it recreates what saving such a
/// file produced next: an "OldVersion" home plus a default "LastView".
pub fn read_csys(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = first_match(&[VIEW_PATTERN, CSYS_OLD_PATTERN], &record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    match values.as_slice() {
        [Value::Name(name), Value::Quat(quat), Value::ParenFloat(scale), Value::Triple(pov), Value::ParenFloat(zoom)] =>
        {
            let view = NamedView::new(name.clone(), *quat, *scale, *pov, *zoom);
            session.add_member(NodeData::View(view));
        }
        [Value::Name(_), Value::Quat(quat), Value::ParenFloat(scale)] => {
            let home = NamedView::new("OldVersion".to_string(), *quat, *scale, [0.0; 3], 1.0);
            session.add_member(NodeData::View(home));
            let last = NamedView::new(
                "LastView".to_string(),
                [0.0, 1.0, 0.0, 0.0],
                *scale,
                [0.0; 3],
                1.0,
            );
            session.add_member(NodeData::View(last));
        }
        _ => return Err(RecordError::malformed(record.recordname, record.line)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::dispatch::apply_line;

    #[test]
    fn namedview_parses_all_fields() {
        let mut s = ReadSession::new(false);
        apply_line(
            &mut s,
            "namedview (Home View) (1.0, 0.0, 0.0, 0.0) (10.0) (1.5, 0.0, -3.0) (1.0)",
        )
        .unwrap();
        let items = s.extract_toplevel_items();
        let NodeData::View(v) = s.nodes.data(items[0]) else {
            panic!("expected a view");
        };
        assert_eq!(v.name, "Home View");
        assert_eq!(v.pov, [1.5, 0.0, -3.0]);
        assert_eq!(v.scale, 10.0);
    }

    #[test]
    fn full_csys_reads_like_a_namedview() {
        let mut s = ReadSession::new(false);
        apply_line(
            &mut s,
            "csys (HomeView) (1.0, 0.0, 0.0, 0.0) (10.0) (0.0, 0.0, 0.0) (1.0)",
        )
        .unwrap();
        let items = s.extract_toplevel_items();
        assert_eq!(items.len(), 1);
        assert!(matches!(s.nodes.data(items[0]), NodeData::View(_)));
    }

    #[test]
    fn ancient_csys_synthesizes_two_views() {
        let mut s = ReadSession::new(false);
        apply_line(&mut s, "csys (Whatever) (0.5, 0.5, 0.5, 0.5) (7.0)").unwrap();
        let items = s.extract_toplevel_items();
        assert_eq!(items.len(), 2);
        let NodeData::View(home) = s.nodes.data(items[0]) else {
            panic!("expected a view");
        };
        let NodeData::View(last) = s.nodes.data(items[1]) else {
            panic!("expected a view");
        };
        assert_eq!(home.name, "OldVersion");
        assert_eq!(home.quat, [0.5, 0.5, 0.5, 0.5]);
        assert_eq!(last.name, "LastView");
        assert_eq!(last.scale, 7.0);
    }
}
