use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element number: {0}")]
pub struct ParseElementError(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order suffix: '{0}'")]
pub struct ParseBondOrderError(String);

/// Chemical elements addressable by an mmp atom record.
///
/// The numbering matches the element numbers written in atom records;
/// `X` (0) is the bondpoint pseudo-element used for open bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    X = 0,
    H,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe = 54,
}

impl Element {
    /// Looks up an element by its mmp element number.
    pub fn from_number(n: u32) -> Result<Self, ParseElementError> {
        const TABLE: [Element; 55] = [
            Element::X,
            Element::H,
            Element::He,
            Element::Li,
            Element::Be,
            Element::B,
            Element::C,
            Element::N,
            Element::O,
            Element::F,
            Element::Ne,
            Element::Na,
            Element::Mg,
            Element::Al,
            Element::Si,
            Element::P,
            Element::S,
            Element::Cl,
            Element::Ar,
            Element::K,
            Element::Ca,
            Element::Sc,
            Element::Ti,
            Element::V,
            Element::Cr,
            Element::Mn,
            Element::Fe,
            Element::Co,
            Element::Ni,
            Element::Cu,
            Element::Zn,
            Element::Ga,
            Element::Ge,
            Element::As,
            Element::Se,
            Element::Br,
            Element::Kr,
            Element::Rb,
            Element::Sr,
            Element::Y,
            Element::Zr,
            Element::Nb,
            Element::Mo,
            Element::Tc,
            Element::Ru,
            Element::Rh,
            Element::Pd,
            Element::Ag,
            Element::Cd,
            Element::In,
            Element::Sn,
            Element::Sb,
            Element::Te,
            Element::I,
            Element::Xe,
        ];
        TABLE.get(n as usize).copied().ok_or(ParseElementError(n))
    }

    #[inline]
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::X => "X",
            Element::H => "H",
            Element::He => "He",
            Element::Li => "Li",
            Element::Be => "Be",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Ne => "Ne",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Ar => "Ar",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Sc => "Sc",
            Element::Ti => "Ti",
            Element::V => "V",
            Element::Cr => "Cr",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Ga => "Ga",
            Element::Ge => "Ge",
            Element::As => "As",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::Kr => "Kr",
            Element::Rb => "Rb",
            Element::Sr => "Sr",
            Element::Y => "Y",
            Element::Zr => "Zr",
            Element::Nb => "Nb",
            Element::Mo => "Mo",
            Element::Tc => "Tc",
            Element::Ru => "Ru",
            Element::Rh => "Rh",
            Element::Pd => "Pd",
            Element::Ag => "Ag",
            Element::Cd => "Cd",
            Element::In => "In",
            Element::Sn => "Sn",
            Element::Sb => "Sb",
            Element::Te => "Te",
            Element::I => "I",
            Element::Xe => "Xe",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Bond orders expressible in mmp bond records.
///
/// Each order has its own record keyword (`bond1`, `bond2`, `bond3`,
/// `bonda`, `bondg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    Graphitic,
}

impl BondOrder {
    /// The single-character record-keyword suffix for this order.
    pub fn suffix(&self) -> char {
        match self {
            BondOrder::Single => '1',
            BondOrder::Double => '2',
            BondOrder::Triple => '3',
            BondOrder::Aromatic => 'a',
            BondOrder::Graphitic => 'g',
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(BondOrder::Single),
            "2" => Ok(BondOrder::Double),
            "3" => Ok(BondOrder::Triple),
            "a" => Ok(BondOrder::Aromatic),
            "g" => Ok(BondOrder::Graphitic),
            other => Err(ParseBondOrderError(other.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bond{}", self.suffix())
    }
}

/// Display modes for atoms and chunks, written as fixed 3-character tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Default,
    Invisible,
    VdwSpheres,
    Lines,
    BallAndStick,
    Tubes,
}

impl DisplayMode {
    /// Decodes a display token; returns None for tokens this version
    /// does not know (the record is still accepted).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "def" => Some(DisplayMode::Default),
            "inv" => Some(DisplayMode::Invisible),
            "vdw" => Some(DisplayMode::VdwSpheres),
            "lin" => Some(DisplayMode::Lines),
            "cpk" => Some(DisplayMode::BallAndStick),
            "tub" => Some(DisplayMode::Tubes),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            DisplayMode::Default => "def",
            DisplayMode::Invisible => "inv",
            DisplayMode::VdwSpheres => "vdw",
            DisplayMode::Lines => "lin",
            DisplayMode::BallAndStick => "cpk",
            DisplayMode::Tubes => "tub",
        }
    }
}
