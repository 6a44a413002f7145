//! In-memory structure model: atoms, ordered atom arrays, and bond overlays.

pub mod array;
pub mod atom;
pub mod types;

pub use array::{AtomArray, Bond};
pub use atom::Atom;
pub use types::{BondKind, Point};
