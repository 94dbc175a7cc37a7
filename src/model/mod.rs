//! Core data structures for mmp scene graphs.
//!
//! - [`types`] – Elements, bond orders and display modes as the format
//!   numbers them.
//! - [`atom`] – Atoms and bonds, stored flat and referenced by index.
//! - [`tree`] – The node arena: groups, chunks, jigs, views, markers.
//! - [`jig`] – Auxiliary annotated objects (motors, planes, measurements).
//! - [`part`] – The fixed 3-role result every successful read yields.
//!
//! The model intentionally stays dumb: the reader in [`crate::read`] is
//! the only place format knowledge lives, and it only ever drives these
//! types through constructors, child insertion and property setters.

pub mod atom;
pub mod jig;
pub mod part;
pub mod tree;
pub mod types;
