//! Fundamental atom representation carrying coordinates and chemical annotations.
//!
//! This module defines the smallest structural unit handled by the codec. Atoms are
//! produced by external structure parsers or built programmatically, grouped into
//! residues by contiguous equal-key runs, and flattened into columnar records by the
//! encoders. Optional annotations mirror the optional columns of the storage schema
//! so that a configured codec can check field presence before committing a record.

use super::types::Point;
use smol_str::SmolStr;
use std::fmt;

/// Single atom with identity, residue membership, and Cartesian position.
///
/// The mandatory fields match the run-length keys used for residue partitioning
/// (`chain_id`, `res_id`, `res_name`, `ins_code`); the optional fields correspond to
/// configuration-gated columns and stay `None` unless a parser or caller supplies them.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as it appears in crystallographic or modeling files (e.g., `CA`).
    pub name: SmolStr,
    /// Element symbol (e.g., `C`, `N`, `Fe`). Kept as a label so heteroatoms with
    /// exotic chemistry survive a round trip unaltered.
    pub element: SmolStr,
    /// Residue name the atom belongs to (e.g., `ALA`, `HOH`).
    pub res_name: SmolStr,
    /// Residue sequence number from the source numbering.
    pub res_id: u32,
    /// Chain identifier (e.g., `A`).
    pub chain_id: SmolStr,
    /// Insertion code; empty for the common case.
    pub ins_code: SmolStr,
    /// Whether the atom was recorded as a heteroatom.
    pub hetero: bool,
    /// Cartesian coordinates measured in ångströms.
    pub pos: Point,
    /// Temperature/confidence factor, when parsed.
    pub b_factor: Option<f64>,
    /// Crystallographic occupancy, when parsed.
    pub occupancy: Option<f64>,
    /// Formal charge, when parsed.
    pub charge: Option<i8>,
    /// Serial number from the source file, when parsed.
    pub atom_id: Option<u32>,
}

impl Atom {
    /// Creates a new atom with the mandatory annotations; optional ones default to `None`.
    ///
    /// # Arguments
    ///
    /// * `name` - Atom label such as `"CA"` or `"OXT"`.
    /// * `element` - Element symbol such as `"C"`.
    /// * `res_name` - Residue name such as `"ALA"`.
    /// * `res_id` - Residue sequence number.
    /// * `chain_id` - Chain identifier.
    /// * `pos` - Cartesian coordinates in ångströms.
    pub fn new(
        name: &str,
        element: &str,
        res_name: &str,
        res_id: u32,
        chain_id: &str,
        pos: Point,
    ) -> Self {
        Self {
            name: SmolStr::new(name),
            element: SmolStr::new(element),
            res_name: SmolStr::new(res_name),
            res_id,
            chain_id: SmolStr::new(chain_id),
            ins_code: SmolStr::default(),
            hetero: false,
            pos,
            b_factor: None,
            occupancy: None,
            charge: None,
            atom_id: None,
        }
    }

    /// Marks the atom as a heteroatom.
    pub fn hetero(mut self, hetero: bool) -> Self {
        self.hetero = hetero;
        self
    }

    /// Sets the insertion code.
    pub fn ins_code(mut self, ins_code: &str) -> Self {
        self.ins_code = SmolStr::new(ins_code);
        self
    }

    /// Sets the temperature/confidence factor.
    pub fn b_factor(mut self, b_factor: f64) -> Self {
        self.b_factor = Some(b_factor);
        self
    }

    /// Sets the occupancy.
    pub fn occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// Sets the formal charge.
    pub fn charge(mut self, charge: i8) -> Self {
        self.charge = Some(charge);
        self
    }

    /// Sets the source serial number.
    pub fn atom_id(mut self, atom_id: u32) -> Self {
        self.atom_id = Some(atom_id);
        self
    }

    /// True when the element is hydrogen or deuterium.
    pub fn is_hydrogen(&self) -> bool {
        self.element == "H" || self.element == "D"
    }

    /// The equal-key tuple that delimits residues in an ordered atom sequence.
    pub fn residue_key(&self) -> (&SmolStr, u32, &SmolStr, &SmolStr) {
        (&self.chain_id, self.res_id, &self.res_name, &self.ins_code)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", element: {}, residue: {} {} ({}), pos: [{:.3}, {:.3}, {:.3}] }}",
            self.name,
            self.element,
            self.res_name,
            self.res_id,
            self.chain_id,
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_new_creates_correct_atom() {
        let atom = Atom::new("CA", "C", "ALA", 1, "A", Point::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, "C");
        assert_eq!(atom.res_name, "ALA");
        assert_eq!(atom.res_id, 1);
        assert_eq!(atom.chain_id, "A");
        assert_eq!(atom.ins_code, "");
        assert!(!atom.hetero);
        assert!(atom.b_factor.is_none());
        assert!(atom.occupancy.is_none());
        assert!(atom.charge.is_none());
        assert!(atom.atom_id.is_none());
    }

    #[test]
    fn atom_builders_set_optional_annotations() {
        let atom = Atom::new("FE", "Fe", "HEM", 200, "A", Point::new(0.0, 0.0, 0.0))
            .hetero(true)
            .ins_code("B")
            .b_factor(35.5)
            .occupancy(0.8)
            .charge(2)
            .atom_id(1234);

        assert!(atom.hetero);
        assert_eq!(atom.ins_code, "B");
        assert_eq!(atom.b_factor, Some(35.5));
        assert_eq!(atom.occupancy, Some(0.8));
        assert_eq!(atom.charge, Some(2));
        assert_eq!(atom.atom_id, Some(1234));
    }

    #[test]
    fn atom_is_hydrogen_detects_hydrogen_and_deuterium() {
        let h = Atom::new("H", "H", "ALA", 1, "A", Point::new(0.0, 0.0, 0.0));
        let d = Atom::new("D1", "D", "ALA", 1, "A", Point::new(0.0, 0.0, 0.0));
        let c = Atom::new("CA", "C", "ALA", 1, "A", Point::new(0.0, 0.0, 0.0));

        assert!(h.is_hydrogen());
        assert!(d.is_hydrogen());
        assert!(!c.is_hydrogen());
    }

    #[test]
    fn atom_residue_key_distinguishes_insertion_codes() {
        let a = Atom::new("CA", "C", "ALA", 1, "A", Point::new(0.0, 0.0, 0.0));
        let b = Atom::new("CA", "C", "ALA", 1, "A", Point::new(0.0, 0.0, 0.0)).ins_code("A");

        assert_ne!(a.residue_key(), b.residue_key());
    }

    #[test]
    fn atom_display_formats_correctly() {
        let atom = Atom::new("CA", "C", "GLY", 7, "B", Point::new(1.234, -5.678, 9.012));
        let display = format!("{}", atom);

        assert_eq!(
            display,
            "Atom { name: \"CA\", element: C, residue: GLY 7 (B), pos: [1.234, -5.678, 9.012] }"
        );
    }
}
