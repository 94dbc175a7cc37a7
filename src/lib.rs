//! A pure Rust reader for the MMP (Molecular Machine Part) file format:
//! the line-oriented scene-graph format used by nanoscale CAD tools to
//! store an assembly of atoms, bonds, jigs and saved views.
//!
//! # Features
//!
//! - **Scene graph** — Nested groups of chunks, jigs and named views,
//!   read into an arena-backed tree with stable node ids
//! - **Chemistry** — Atoms with element, position and display mode; five
//!   bond orders plus bond directionality
//! - **Tolerant by policy** — Unknown record kinds are skipped, malformed
//!   records are logged and dropped, and legacy or simulator-written
//!   files missing the standard top-level structure are coerced into it
//! - **Extensible grammar** — Out-of-crate record kinds plug into the
//!   process-wide registry without touching the reader
//!
//! # Quick Start
//!
//! The main entry point is [`read_mmp_file`], which yields a [`Part`]
//! (the normalized scene) and the message log of the read:
//!
//! ```
//! use std::io::Cursor;
//! use mmpio::{MmpReader, Element};
//!
//! let data = "\
//! group (View Data)
//! csys (HomeView) (1.0, 0.0, 0.0, 0.0) (10.0) (0.0, 0.0, 0.0) (1.0)
//! egroup (View Data)
//! group (Part)
//! mol (water) def
//! atom 1 (8) (0, 0, 0)
//! atom 2 (1) (958, 0, 0)
//! bond1 1
//! atom 3 (1) (-240, 928, 0)
//! bond1 1
//! egroup (Part)
//! end1
//! group (Clipboard)
//! egroup (Clipboard)
//! end
//! ";
//! let outcome = MmpReader::new(Cursor::new(data)).read()?;
//! assert!(outcome.log.is_empty());
//!
//! let part = outcome.part;
//! assert_eq!(part.atom_count(), 3);
//! assert_eq!(part.bond_count(), 2);
//! assert_eq!(part.atoms[0].element, Element::O);
//! assert_eq!(part.nodes.data(part.tree).name(), "Part");
//! # Ok::<(), mmpio::ReadError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — the scene-graph data structures a read produces
//! - [`read`] — the reader: dispatcher, record handlers, grammar registry

pub mod model;
pub mod read;

pub use model::atom::{Atom, AtomId, Bond};
pub use model::jig::{Color, Jig, JigKind, MeasureKind, NamedView};
pub use model::part::Part;
pub use model::tree::{Chunk, Group, GroupKind, ModelTree, NodeData, NodeId};
pub use model::types::{BondOrder, DisplayMode, Element};
pub use read::{
    read_mmp_file, MessageLog, MmpReader, ReadError, ReadOutcome, RecordParser,
    register_record_parser,
};
