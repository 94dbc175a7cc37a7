//! Planar jigs: `gridplane`, `plane` and `espimage` (with its older
//! `espwindow` spelling).
//!
//! Unlike atoms and motors, these records write their centers as float
//! triples, not milli-unit integers.

use crate::model::jig::{Jig, JigKind};
use crate::model::tree::NodeData;

use super::super::dispatch::Record;
use super::super::error::RecordError;
use super::super::pattern::{Field, LinePattern, Value};
use super::super::session::{InfoTarget, ReadSession};

const GRIDPLANE_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Float,
    Field::Float,
    Field::Triple,
    Field::Quat,
    Field::Int,
    Field::Int,
    Field::Float,
    Field::Float,
    Field::Color,
]);

/// `gridplane (name) (color) w h (center) (quat) grid_type line_type
/// x_space y_space (grid_color)`.
pub fn read_gridplane(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = GRIDPLANE_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::Float(width), Value::Float(height), Value::Triple(center), Value::Quat(quat), Value::Int(grid_type), Value::Int(line_type), Value::Float(x_space), Value::Float(y_space), Value::Color(grid_color)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let kind = JigKind::GridPlane {
        width: *width,
        height: *height,
        center: *center,
        quat: *quat,
        grid_type: *grid_type,
        line_type: *line_type,
        x_space: *x_space,
        y_space: *y_space,
        grid_color: *grid_color,
    };
    session.add_member(NodeData::Jig(Jig::new(name.clone(), *color, Vec::new(), kind)));
    Ok(())
}

const PLANE_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Float,
    Field::Float,
    Field::Triple,
    Field::Quat,
]);

/// `plane (name) (color) w h (center) (quat)`.
pub fn read_plane(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = PLANE_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::Float(width), Value::Float(height), Value::Triple(center), Value::Quat(quat)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let kind = JigKind::Plane {
        width: *width,
        height: *height,
        center: *center,
        quat: *quat,
    };
    session.add_member(NodeData::Jig(Jig::new(name.clone(), *color, Vec::new(), kind)));
    Ok(())
}

const ESPIMAGE_PATTERN: LinePattern = LinePattern::new(&[
    Field::Name,
    Field::Color,
    Field::Float,
    Field::Float,
    Field::Int,
    Field::Triple,
    Field::Quat,
    Field::Float,
    Field::Color,
    Field::Int,
    Field::Float,
    Field::Float,
]);

/// `espimage (name) (color) w h resolution (center) (quat) trans
/// (fill_color) show_bbox win_offset edge_offset`.
///
/// The new jig becomes the target of later `info espimage ...` records
/// (notably the image file path, which is too free-form for this line).
pub fn read_espimage(session: &mut ReadSession, record: &Record<'_>) -> Result<(), RecordError> {
    let values = ESPIMAGE_PATTERN
        .apply(&record.payload)
        .ok_or_else(|| RecordError::malformed(record.recordname, record.line))?;
    let [Value::Name(name), Value::Color(color), Value::Float(width), Value::Float(height), Value::Int(resolution), Value::Triple(center), Value::Quat(quat), Value::Float(trans), Value::Color(fill_color), Value::Int(show_bbox), Value::Float(window_offset), Value::Float(edge_offset)] =
        values.as_slice()
    else {
        return Err(RecordError::malformed(record.recordname, record.line));
    };
    let kind = JigKind::EspImage {
        width: *width,
        height: *height,
        resolution: *resolution,
        center: *center,
        quat: *quat,
        trans: *trans,
        fill_color: *fill_color,
        show_bbox: *show_bbox != 0,
        window_offset: *window_offset,
        edge_offset: *edge_offset,
        image_file: None,
    };
    let id = session.add_member(NodeData::Jig(Jig::new(name.clone(), *color, Vec::new(), kind)));
    session.set_info_target("espimage", InfoTarget::Node(id));
    Ok(())
}
