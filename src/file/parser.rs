//! External structure parsers and the process-wide format registry.
//!
//! Parsing is a boundary operation: the codec hands a byte stream or path plus the
//! list of requested per-atom annotations to a registered parser and receives an
//! [`AtomArray`] back. Registration is explicit and ordered, done once at startup;
//! lookup walks the entries in registration order and takes the first match.

use super::error::Error;
use super::record::FormatTag;
use crate::codec::ExtraField;
use crate::model::AtomArray;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Input handed to a parser: bytes already in memory, or a path it may stream from.
#[derive(Debug, Clone, Copy)]
pub enum ParseSource<'a> {
    Bytes(&'a [u8]),
    Path(&'a Path),
}

/// A decoder for one structure file format.
pub trait StructureParser: Send + Sync {
    /// Format this parser handles.
    fn format(&self) -> FormatTag;

    /// Decodes a structure, populating the requested optional annotations where the
    /// format carries them.
    fn parse(&self, source: ParseSource<'_>, fields: &[ExtraField]) -> Result<AtomArray, Error>;
}

/// Explicit, ordered parser registry.
#[derive(Default)]
pub struct ParserRegistry {
    entries: Vec<Box<dyn StructureParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parser; earlier registrations win on format collisions.
    pub fn register(&mut self, parser: Box<dyn StructureParser>) {
        log::debug!("registered structure parser for '{}'", parser.format());
        self.entries.push(parser);
    }

    /// First registered parser for the format, in registration order.
    pub fn get(&self, format: FormatTag) -> Option<&dyn StructureParser> {
        self.entries
            .iter()
            .find(|parser| parser.format() == format)
            .map(|parser| parser.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: OnceLock<Arc<ParserRegistry>> = OnceLock::new();

/// Installs the process-wide registry. Returns false when a registry was already
/// installed, in which case the existing one stays in place.
pub fn install(registry: ParserRegistry) -> bool {
    GLOBAL.set(Arc::new(registry)).is_ok()
}

/// The process-wide registry, when one has been installed.
pub fn installed() -> Option<Arc<ParserRegistry>> {
    GLOBAL.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, Point};

    struct FixedParser(FormatTag);

    impl StructureParser for FixedParser {
        fn format(&self) -> FormatTag {
            self.0
        }

        fn parse(
            &self,
            _source: ParseSource<'_>,
            _fields: &[ExtraField],
        ) -> Result<AtomArray, Error> {
            let mut array = AtomArray::new();
            array.push(Atom::new("CA", "C", "GLY", 1, "A", Point::new(0.0, 0.0, 0.0)));
            Ok(array)
        }
    }

    #[test]
    fn registry_lookup_follows_registration_order() {
        let mut registry = ParserRegistry::new();
        registry.register(Box::new(FixedParser(FormatTag::Pdb)));
        registry.register(Box::new(FixedParser(FormatTag::Fcz)));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(FormatTag::Pdb).map(|p| p.format()),
            Some(FormatTag::Pdb)
        );
        assert!(registry.get(FormatTag::Cif).is_none());
    }

    #[test]
    fn global_registry_installs_exactly_once() {
        let first = install(ParserRegistry::new());
        let second = install(ParserRegistry::new());

        // Whichever call won, a second attempt must be rejected and the
        // installed registry must stay reachable.
        assert!(!(first && second));
        assert!(installed().is_some());
    }
}
