//! Protein-specific policy over the generic codec: standardization, backbone
//! projection, and chain/complex output views.

mod codec;
mod view;

pub use codec::{LoadAs, ProteinCodec};
pub use view::{ProteinChain, ProteinComplex, ProteinView};
