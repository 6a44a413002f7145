//! Immutable residue catalog backing canonical-mode encoding.
//!
//! A [`ResidueDictionary`] fixes the ordered list of residue types and, per type, the
//! ordered heavy-atom template that gives canonical-mode records their positional
//! meaning. It is loaded once from an embedded TOML catalog and shared read-only, so
//! name/index translation stays O(1) and encode calls can run in parallel without
//! locking.

use super::schema::DictionaryFile;
use crate::codec::Error;
use smol_str::SmolStr;
use std::collections::HashMap;
use std::fmt;

/// Rewrite rule mapping a non-standard residue name onto a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub from: SmolStr,
    pub to: SmolStr,
    /// Atom renames applied together with the residue rename (e.g. SE -> SD).
    pub atom_swaps: Vec<(SmolStr, SmolStr)>,
}

/// Ordered, immutable catalog of residue types and their canonical atom templates.
///
/// Template order is the single source of truth for canonical-mode atom identity:
/// a record that stores no atom names is decoded by walking each residue's template
/// in order. The catalog is bounded to 256 entries because records refer to it
/// through a `u8` residue-type index.
#[derive(Debug, Clone)]
pub struct ResidueDictionary {
    names: Vec<SmolStr>,
    codes: Vec<char>,
    templates: Vec<Vec<SmolStr>>,
    elements: Vec<Vec<SmolStr>>,
    index_by_name: HashMap<SmolStr, u8>,
    unknown_index: u8,
    backbone: Option<Vec<SmolStr>>,
    conversions: Vec<Conversion>,
}

impl ResidueDictionary {
    /// Builds a dictionary from a parsed catalog file, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the catalog holds more than 256 residue
    /// types, a duplicate name, mismatched atom/element lists, a one-letter code that
    /// is not exactly one character, or an unknown-residue sentinel that is missing
    /// from the residue list.
    pub fn from_file(file: &DictionaryFile) -> Result<Self, Error> {
        if file.residues.len() > u8::MAX as usize + 1 {
            return Err(Error::validation(format!(
                "residue catalog holds {} types, more than the 256 addressable by a u8 index",
                file.residues.len()
            )));
        }

        let mut names = Vec::with_capacity(file.residues.len());
        let mut codes = Vec::with_capacity(file.residues.len());
        let mut templates = Vec::with_capacity(file.residues.len());
        let mut elements = Vec::with_capacity(file.residues.len());
        let mut index_by_name = HashMap::new();

        for (index, entry) in file.residues.iter().enumerate() {
            if entry.atoms.len() != entry.elements.len() {
                return Err(Error::validation(format!(
                    "residue '{}' declares {} atoms but {} elements",
                    entry.name,
                    entry.atoms.len(),
                    entry.elements.len()
                )));
            }
            let mut code_chars = entry.code.chars();
            let code = match (code_chars.next(), code_chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::validation(format!(
                        "residue '{}' has a one-letter code '{}' that is not a single character",
                        entry.name, entry.code
                    )))
                }
            };
            let name = SmolStr::new(&entry.name);
            if index_by_name.insert(name.clone(), index as u8).is_some() {
                return Err(Error::validation(format!(
                    "duplicate residue name '{}' in catalog",
                    entry.name
                )));
            }
            names.push(name);
            codes.push(code);
            templates.push(entry.atoms.iter().map(SmolStr::new).collect());
            elements.push(entry.elements.iter().map(SmolStr::new).collect());
        }

        let unknown_index = *index_by_name.get(file.unknown.as_str()).ok_or_else(|| {
            Error::validation(format!(
                "unknown-residue sentinel '{}' is not part of the catalog",
                file.unknown
            ))
        })?;

        let backbone = file
            .backbone
            .as_ref()
            .map(|atoms| atoms.iter().map(SmolStr::new).collect());

        let conversions = file
            .conversions
            .iter()
            .map(|c| Conversion {
                from: SmolStr::new(&c.from),
                to: SmolStr::new(&c.to),
                atom_swaps: c
                    .atom_swaps
                    .iter()
                    .map(|[from, to]| (SmolStr::new(from), SmolStr::new(to)))
                    .collect(),
            })
            .collect();

        Ok(Self {
            names,
            codes,
            templates,
            elements,
            index_by_name,
            unknown_index,
            backbone,
            conversions,
        })
    }

    pub fn residue_count(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[SmolStr] {
        &self.names
    }

    /// Translates a residue name into its catalog index.
    ///
    /// # Errors
    ///
    /// Returns a `Lookup` error for names outside the catalog; encoding must fail
    /// rather than guess an identity.
    pub fn index_of(&self, name: &str) -> Result<u8, Error> {
        self.index_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::lookup(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_by_name.contains_key(name)
    }

    pub fn name_of(&self, index: u8) -> Option<&SmolStr> {
        self.names.get(index as usize)
    }

    /// Number of atoms in the canonical template of the given residue type.
    pub fn residue_size(&self, index: u8) -> Option<usize> {
        self.templates.get(index as usize).map(|t| t.len())
    }

    /// Canonical atom-name template in positional order.
    pub fn template(&self, index: u8) -> Option<&[SmolStr]> {
        self.templates.get(index as usize).map(|t| t.as_slice())
    }

    /// Element symbols aligned with [`ResidueDictionary::template`].
    pub fn template_elements(&self, index: u8) -> Option<&[SmolStr]> {
        self.elements.get(index as usize).map(|e| e.as_slice())
    }

    pub fn one_letter_code(&self, index: u8) -> Option<char> {
        self.codes.get(index as usize).copied()
    }

    /// Largest template size over all residue types.
    pub fn max_residue_size(&self) -> usize {
        self.templates.iter().map(|t| t.len()).max().unwrap_or(0)
    }

    /// Fixed-size atom-name template, right-padded with empty names.
    pub fn padded_template(&self, index: u8) -> Option<Vec<SmolStr>> {
        let template = self.templates.get(index as usize)?;
        let mut padded = template.clone();
        padded.resize(self.max_residue_size(), SmolStr::default());
        Some(padded)
    }

    /// Slot of `atom_name` within the residue's canonical template, or `None` when
    /// that atom type does not belong to the residue.
    pub fn expected_relative_atom_index(&self, index: u8, atom_name: &str) -> Option<usize> {
        self.templates
            .get(index as usize)?
            .iter()
            .position(|name| name == atom_name)
    }

    pub fn unknown_index(&self) -> u8 {
        self.unknown_index
    }

    pub fn unknown_name(&self) -> &SmolStr {
        &self.names[self.unknown_index as usize]
    }

    pub fn backbone_atoms(&self) -> Option<&[SmolStr]> {
        self.backbone.as_deref()
    }

    /// Conversion rule whose source name matches `res_name`, if any.
    pub fn resolve_conversion(&self, res_name: &str) -> Option<&Conversion> {
        self.conversions.iter().find(|c| c.from == res_name)
    }

    /// Derived dictionary whose per-residue template is restricted to the backbone
    /// atoms, preserving backbone order. Canonical round trips against the derived
    /// dictionary give backbone-only storage.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the catalog declares no backbone subset.
    pub fn backbone_subset(&self) -> Result<ResidueDictionary, Error> {
        let backbone = self.backbone.as_ref().ok_or_else(|| {
            Error::configuration("backbone projection requested but the catalog declares no backbone atoms")
        })?;

        let mut templates = Vec::with_capacity(self.templates.len());
        let mut elements = Vec::with_capacity(self.templates.len());
        for (template, template_elements) in self.templates.iter().zip(&self.elements) {
            let mut kept_atoms = Vec::with_capacity(backbone.len());
            let mut kept_elements = Vec::with_capacity(backbone.len());
            for atom in backbone {
                if let Some(slot) = template.iter().position(|name| name == atom) {
                    kept_atoms.push(template[slot].clone());
                    kept_elements.push(template_elements[slot].clone());
                }
            }
            templates.push(kept_atoms);
            elements.push(kept_elements);
        }

        Ok(ResidueDictionary {
            names: self.names.clone(),
            codes: self.codes.clone(),
            templates,
            elements,
            index_by_name: self.index_by_name.clone(),
            unknown_index: self.unknown_index,
            backbone: self.backbone.clone(),
            conversions: self.conversions.clone(),
        })
    }

    /// Joins the one-letter codes of a residue-type index sequence into a string.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when an index lies outside the catalog.
    pub fn decode_restype_indices(&self, indices: &[u8]) -> Result<String, Error> {
        indices
            .iter()
            .map(|&index| {
                self.one_letter_code(index).ok_or_else(|| {
                    Error::validation(format!(
                        "residue-type index {} outside catalog of {} types",
                        index,
                        self.residue_count()
                    ))
                })
            })
            .collect()
    }
}

impl fmt::Display for ResidueDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResidueDictionary ({} residue types, max template size {})",
            self.residue_count(),
            self.max_residue_size()
        )
    }
}
