use super::atom::AtomId;

/// RGB color with components in 0.0..=1.0 (records store 0..=255 ints).
pub type Color = [f64; 3];

/// An auxiliary model object referencing atoms without being chemistry
/// itself: motors, planes, measurement tools, anchors.
///
/// All jigs share a name, a color and an atom list; everything else lives
/// in the kind-specific variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Jig {
    pub name: String,
    pub color: Color,
    pub atoms: Vec<AtomId>,
    pub kind: JigKind,
    pub hidden: bool,
}

impl Jig {
    pub fn new(name: String, color: Color, atoms: Vec<AtomId>, kind: JigKind) -> Self {
        Self {
            name,
            color,
            atoms,
            kind,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JigKind {
    RotaryMotor {
        torque: f64,
        speed: f64,
        center: [f64; 3],
        axis: [f64; 3],
        length: f64,
        radius: f64,
        spoke_radius: f64,
    },
    LinearMotor {
        force: f64,
        stiffness: f64,
        center: [f64; 3],
        axis: [f64; 3],
        length: f64,
        width: f64,
        spoke_radius: f64,
    },
    GridPlane {
        width: f64,
        height: f64,
        center: [f64; 3],
        quat: [f64; 4],
        grid_type: i64,
        line_type: i64,
        x_space: f64,
        y_space: f64,
        grid_color: Color,
    },
    /// Reference plane.
    Plane {
        width: f64,
        height: f64,
        center: [f64; 3],
        quat: [f64; 4],
    },
    EspImage {
        width: f64,
        height: f64,
        resolution: i64,
        center: [f64; 3],
        quat: [f64; 4],
        trans: f64,
        fill_color: Color,
        show_bbox: bool,
        window_offset: f64,
        edge_offset: f64,
        /// Set by a later `info espimage espimage_file` record, if any.
        image_file: Option<String>,
    },
    AtomSet,
    Anchor,
    Thermostat {
        temperature: i64,
    },
    Thermometer,
    Measurement {
        kind: MeasureKind,
        font_name: String,
        font_size: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Distance,
    Angle,
    Dihedral,
}

impl MeasureKind {
    /// How many atoms this measurement takes.
    pub fn arity(&self) -> usize {
        match self {
            MeasureKind::Distance => 2,
            MeasureKind::Angle => 3,
            MeasureKind::Dihedral => 4,
        }
    }
}

/// A saved viewpoint: orientation quaternion, scale, point of view, zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedView {
    pub name: String,
    pub quat: [f64; 4],
    pub scale: f64,
    pub pov: [f64; 3],
    pub zoom: f64,
}

impl NamedView {
    pub fn new(name: String, quat: [f64; 4], scale: f64, pov: [f64; 3], zoom: f64) -> Self {
        Self {
            name,
            quat,
            scale,
            pov,
            zoom,
        }
    }
}
