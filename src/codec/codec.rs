//! Stateless encode/decode between atom arrays and columnar records.
//!
//! A codec is a pure function of (configuration, input): it owns no mutable state
//! beyond the immutable dictionary, so arbitrarily many calls may run in parallel
//! across independent records. Within one record encode/decode is atomic: the
//! operation yields either a complete record/array or a failure, never a partially
//! populated result.

use super::config::{CodecConfig, CodecMode};
use super::error::Error;
use super::join;
use super::precision::{CoordColumn, ScalarColumn};
use super::record::ColumnarRecord;
use crate::dict::ResidueDictionary;
use crate::model::{Atom, AtomArray, BondKind, Point};
use half::f16;
use smol_str::SmolStr;
use std::sync::Arc;

/// Largest residue count addressable by the 16-bit boundary width.
pub const MAX_RESIDUES: usize = u16::MAX as usize;

/// Largest atom count addressable by 16-bit bond edge indices.
const MAX_BOND_ATOMS: usize = MAX_RESIDUES + 1;

/// Encoder/decoder for one fixed configuration and optional dictionary binding.
///
/// Canonical mode requires a bound dictionary; every residue's observed atoms must
/// exactly match its template, which lets the record omit the per-atom atom-name
/// column entirely. Explicit mode retains atom names and residue boundaries and
/// accepts arbitrary atom completeness.
#[derive(Debug, Clone)]
pub struct AtomArrayCodec {
    config: CodecConfig,
    dictionary: Option<Arc<ResidueDictionary>>,
}

impl AtomArrayCodec {
    /// Creates a codec without a dictionary binding.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error when the configuration requests canonical
    /// mode, which cannot operate without a dictionary.
    pub fn new(config: CodecConfig) -> Result<Self, Error> {
        if config.mode == CodecMode::Canonical {
            return Err(Error::configuration(
                "canonical mode requires a bound residue dictionary",
            ));
        }
        Ok(Self {
            config,
            dictionary: None,
        })
    }

    /// Creates a codec bound to a dictionary; residue identity is stored as a
    /// residue-type index instead of name strings.
    pub fn with_dictionary(config: CodecConfig, dictionary: Arc<ResidueDictionary>) -> Self {
        Self {
            config,
            dictionary: Some(dictionary),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn dictionary(&self) -> Option<&ResidueDictionary> {
        self.dictionary.as_deref()
    }

    /// Encodes an atom array into one immutable columnar record.
    ///
    /// Coordinates are cast to the configured precision; this is an intentional,
    /// lossy step. Optional columns are populated per configuration, and a flag set
    /// for an annotation the array does not carry is a `Configuration` error.
    pub fn encode(&self, array: &AtomArray) -> Result<ColumnarRecord, Error> {
        let starts = array.residue_starts();
        if starts.len() > MAX_RESIDUES {
            return Err(Error::validation(format!(
                "structure holds {} residues, more than the {} addressable by 16-bit residue boundaries",
                starts.len(),
                MAX_RESIDUES
            )));
        }
        let atoms = array.atoms();
        let dictionary = self.dictionary.as_deref();

        let restype_index = match dictionary {
            Some(dict) => Some(
                starts
                    .iter()
                    .map(|&start| dict.index_of(&atoms[start].res_name))
                    .collect::<Result<Vec<u8>, Error>>()?,
            ),
            None => None,
        };
        let res_name = match dictionary {
            Some(_) => None,
            None => Some(
                starts
                    .iter()
                    .map(|&start| atoms[start].res_name.clone())
                    .collect(),
            ),
        };

        if self.config.mode == CodecMode::Canonical {
            match (dictionary, restype_index.as_deref()) {
                (Some(dict), Some(indices)) => verify_canonical(atoms, &starts, indices, dict)?,
                _ => {
                    return Err(Error::configuration(
                        "canonical mode requires a bound residue dictionary",
                    ))
                }
            }
        }

        let points: Vec<Point> = atoms.iter().map(|atom| atom.pos).collect();
        let coords = CoordColumn::from_points(&points, self.config.coords_precision);
        let chain_id = starts
            .iter()
            .map(|&start| atoms[start].chain_id.clone())
            .collect();

        let explicit = self.config.mode == CodecMode::Explicit;
        let atom_name =
            explicit.then(|| atoms.iter().map(|atom| atom.name.clone()).collect());
        let residue_starts =
            explicit.then(|| starts.iter().map(|&start| start as u32).collect());

        let res_id = self
            .config
            .with_res_id
            .then(|| starts.iter().map(|&start| atoms[start].res_id).collect());
        let hetero = self
            .config
            .with_hetero
            .then(|| atoms.iter().map(|atom| atom.hetero).collect());
        let ins_code = self
            .config
            .with_ins_code
            .then(|| atoms.iter().map(|atom| atom.ins_code.clone()).collect());
        let element = self
            .config
            .with_element
            .then(|| atoms.iter().map(|atom| atom.element.clone()).collect());

        let box_vectors = if self.config.with_box {
            let vectors = array.box_vectors().ok_or_else(|| {
                Error::configuration("box column requested but the atom array carries no box vectors")
            })?;
            Some(vectors.map(|row| row.map(|v| v as f32)))
        } else {
            None
        };

        let (bond_edges, bond_types) = if self.config.with_bonds {
            if atoms.len() > MAX_BOND_ATOMS {
                return Err(Error::validation(format!(
                    "bond edges use 16-bit atom indices but the structure holds {} atoms",
                    atoms.len()
                )));
            }
            let mut edges = Vec::with_capacity(array.bonds().len());
            let mut kinds = Vec::with_capacity(array.bonds().len());
            for bond in array.bonds() {
                // a2 is the larger endpoint by canonical ordering
                if bond.a2 >= atoms.len() {
                    return Err(Error::validation(format!(
                        "bond edge {}-{} out of range for {} atoms",
                        bond.a1,
                        bond.a2,
                        atoms.len()
                    )));
                }
                edges.push([bond.a1 as u16, bond.a2 as u16]);
                kinds.push(bond.kind.code());
            }
            (Some(edges), Some(kinds))
        } else {
            (None, None)
        };

        let occupancy = if self.config.with_occupancy {
            let values = require_per_atom(atoms, "occupancy", |atom| atom.occupancy)?;
            Some(values.into_iter().map(f16::from_f64).collect())
        } else {
            None
        };

        let b_factor = if self.config.with_b_factor {
            let values = require_per_atom(atoms, "b_factor", |atom| atom.b_factor)?;
            let values = if self.config.b_factor_per_residue {
                starts.iter().map(|&start| values[start]).collect()
            } else {
                values
            };
            Some(ScalarColumn::from_values(
                &values,
                self.config.b_factor_precision,
            ))
        } else {
            None
        };

        let charge = if self.config.with_charge {
            Some(require_per_atom(atoms, "charge", |atom| atom.charge)?)
        } else {
            None
        };

        let atom_id = if self.config.with_atom_id {
            Some(require_per_atom(atoms, "atom_id", |atom| atom.atom_id)?)
        } else {
            None
        };

        log::debug!(
            "encoded {} atoms across {} residues ({:?} mode)",
            atoms.len(),
            starts.len(),
            self.config.mode
        );

        Ok(ColumnarRecord {
            coords,
            res_name,
            restype_index,
            chain_id,
            atom_name,
            residue_starts,
            res_id,
            hetero,
            ins_code,
            box_vectors,
            bond_edges,
            bond_types,
            occupancy,
            b_factor,
            charge,
            element,
            atom_id,
        })
    }

    /// Decodes a columnar record back into an atom array.
    ///
    /// Must be called with the same configuration (and dictionary) the record was
    /// encoded with; decoding under a different configuration is not guaranteed to
    /// be meaningful.
    pub fn decode(&self, record: &ColumnarRecord) -> Result<AtomArray, Error> {
        let array = match self.config.mode {
            CodecMode::Canonical => self.decode_canonical(record)?,
            CodecMode::Explicit => self.decode_explicit(record)?,
        };
        log::debug!(
            "decoded {} atoms across {} residues ({:?} mode)",
            array.len(),
            record.num_residues(),
            self.config.mode
        );
        Ok(array)
    }

    /// Canonical expansion: one atom per template slot, identity derived purely from
    /// the dictionary, stored per-atom columns overlaid in template order.
    fn decode_canonical(&self, record: &ColumnarRecord) -> Result<AtomArray, Error> {
        let dict = self.dictionary.as_deref().ok_or_else(|| {
            Error::configuration("canonical mode requires a bound residue dictionary")
        })?;
        let indices = record.restype_index.as_deref().ok_or_else(|| {
            Error::configuration("canonical record lacks the restype_index column")
        })?;
        check_per_residue_len("chain_id", record.chain_id.len(), indices.len())?;

        let sizes = indices
            .iter()
            .map(|&index| {
                dict.residue_size(index).ok_or_else(|| {
                    Error::validation(format!(
                        "residue-type index {} outside catalog of {} types",
                        index,
                        dict.residue_count()
                    ))
                })
            })
            .collect::<Result<Vec<usize>, Error>>()?;
        let num_atoms: usize = sizes.iter().sum();
        if num_atoms != record.coords.len() {
            return Err(Error::validation(format!(
                "record stores {} coordinate rows but the canonical templates expand to {} atoms",
                record.coords.len(),
                num_atoms
            )));
        }
        let residue_index = join::residue_index_from_sizes(&sizes);

        let res_ids = self.per_residue_ids(record, indices.len())?;
        let overlay = PerAtomOverlay::from_record(
            record,
            num_atoms,
            indices.len(),
            &residue_index,
            &self.config,
        )?;

        let mut array = AtomArray::with_capacity(num_atoms);
        let mut cursor = 0usize;
        for (residue, &index) in indices.iter().enumerate() {
            // residue_size succeeded above, so template access cannot fail
            let template = dict.template(index).ok_or_else(|| {
                Error::validation(format!("residue-type index {} outside catalog", index))
            })?;
            let elements = dict.template_elements(index).ok_or_else(|| {
                Error::validation(format!("residue-type index {} outside catalog", index))
            })?;
            let name = dict.name_of(index).ok_or_else(|| {
                Error::validation(format!("residue-type index {} outside catalog", index))
            })?;
            for slot in 0..template.len() {
                let pos = record.coords.point(cursor).ok_or_else(|| {
                    Error::validation(format!("coordinate row {} missing", cursor))
                })?;
                let atom = Atom::new(
                    &template[slot],
                    &elements[slot],
                    name,
                    res_ids[residue],
                    &record.chain_id[residue],
                    pos,
                );
                array.push(overlay.apply(atom, cursor));
                cursor += 1;
            }
        }

        decode_bonds(record, num_atoms, &mut array)?;
        decode_box(record, &mut array);
        Ok(array)
    }

    /// Explicit reconstruction: one atom per coordinate row, boundaries resolved
    /// from the boundary column, per-residue columns broadcast through the join.
    fn decode_explicit(&self, record: &ColumnarRecord) -> Result<AtomArray, Error> {
        let num_atoms = record.coords.len();
        let atom_names = record.atom_name.as_deref().ok_or_else(|| {
            Error::configuration("explicit record lacks the atom_name column")
        })?;
        let starts = record.residue_starts.as_deref().ok_or_else(|| {
            Error::configuration("explicit record lacks the residue_starts column")
        })?;
        let elements = record.element.as_deref().ok_or_else(|| {
            Error::configuration(
                "element column was not retained at encode time; atom identity cannot be recovered",
            )
        })?;
        check_per_atom_len("atom_name", atom_names.len(), num_atoms)?;
        check_per_atom_len("element", elements.len(), num_atoms)?;
        check_per_residue_len("chain_id", record.chain_id.len(), starts.len())?;

        let residue_index = join::residue_index_from_starts(num_atoms, starts)?;

        let names_per_residue: Vec<SmolStr> = match self.dictionary.as_deref() {
            Some(dict) => {
                let indices = record.restype_index.as_deref().ok_or_else(|| {
                    Error::configuration(
                        "codec binds a dictionary but the record lacks the restype_index column",
                    )
                })?;
                check_per_residue_len("restype_index", indices.len(), starts.len())?;
                indices
                    .iter()
                    .map(|&index| {
                        dict.name_of(index).cloned().ok_or_else(|| {
                            Error::validation(format!(
                                "residue-type index {} outside catalog of {} types",
                                index,
                                dict.residue_count()
                            ))
                        })
                    })
                    .collect::<Result<Vec<SmolStr>, Error>>()?
            }
            None => {
                let names = record.res_name.as_deref().ok_or_else(|| {
                    Error::configuration("record lacks the res_name column")
                })?;
                check_per_residue_len("res_name", names.len(), starts.len())?;
                names.to_vec()
            }
        };

        let res_ids = self.per_residue_ids(record, starts.len())?;
        let res_name_per_atom = join::spread(&names_per_residue, &residue_index)?;
        let chain_per_atom = join::spread(&record.chain_id, &residue_index)?;
        let res_id_per_atom = join::spread(&res_ids, &residue_index)?;
        let overlay = PerAtomOverlay::from_record(
            record,
            num_atoms,
            starts.len(),
            &residue_index,
            &self.config,
        )?;

        let mut array = AtomArray::with_capacity(num_atoms);
        for index in 0..num_atoms {
            let pos = record.coords.point(index).ok_or_else(|| {
                Error::validation(format!("coordinate row {} missing", index))
            })?;
            let atom = Atom::new(
                &atom_names[index],
                &elements[index],
                &res_name_per_atom[index],
                res_id_per_atom[index],
                &chain_per_atom[index],
                pos,
            );
            array.push(overlay.apply(atom, index));
        }

        decode_bonds(record, num_atoms, &mut array)?;
        decode_box(record, &mut array);
        Ok(array)
    }

    /// Stored per-residue ids, or the 1-based residue ordinal when none were kept.
    fn per_residue_ids(
        &self,
        record: &ColumnarRecord,
        num_residues: usize,
    ) -> Result<Vec<u32>, Error> {
        match record.res_id.as_deref() {
            Some(ids) => {
                check_per_residue_len("res_id", ids.len(), num_residues)?;
                Ok(ids.to_vec())
            }
            None => Ok((1..=num_residues as u32).collect()),
        }
    }
}

/// Pre-resolved per-atom annotation columns applied while atoms are instantiated.
struct PerAtomOverlay {
    hetero: Option<Vec<bool>>,
    ins_code: Option<Vec<SmolStr>>,
    occupancy: Option<Vec<f64>>,
    b_factor: Option<Vec<f64>>,
    charge: Option<Vec<i8>>,
    atom_id: Option<Vec<u32>>,
}

impl PerAtomOverlay {
    fn from_record(
        record: &ColumnarRecord,
        num_atoms: usize,
        num_residues: usize,
        residue_index: &[usize],
        config: &CodecConfig,
    ) -> Result<Self, Error> {
        let hetero = match record.hetero.as_deref() {
            Some(column) => {
                check_per_atom_len("hetero", column.len(), num_atoms)?;
                Some(column.to_vec())
            }
            None => None,
        };
        let ins_code = match record.ins_code.as_deref() {
            Some(column) => {
                check_per_atom_len("ins_code", column.len(), num_atoms)?;
                Some(column.to_vec())
            }
            None => None,
        };
        let occupancy = match record.occupancy.as_deref() {
            Some(column) => {
                check_per_atom_len("occupancy", column.len(), num_atoms)?;
                Some(column.iter().map(|&v| f64::from(v)).collect())
            }
            None => None,
        };
        let b_factor = match record.b_factor.as_ref() {
            Some(column) => {
                let values = column.to_f64_vec();
                if config.b_factor_per_residue {
                    // stored once per residue, broadcast through the join
                    check_per_residue_len("b_factor", values.len(), num_residues)?;
                    Some(join::spread(&values, residue_index)?)
                } else {
                    check_per_atom_len("b_factor", values.len(), num_atoms)?;
                    Some(values)
                }
            }
            None => None,
        };
        let charge = match record.charge.as_deref() {
            Some(column) => {
                check_per_atom_len("charge", column.len(), num_atoms)?;
                Some(column.to_vec())
            }
            None => None,
        };
        let atom_id = match record.atom_id.as_deref() {
            Some(column) => {
                check_per_atom_len("atom_id", column.len(), num_atoms)?;
                Some(column.to_vec())
            }
            None => None,
        };
        Ok(Self {
            hetero,
            ins_code,
            occupancy,
            b_factor,
            charge,
            atom_id,
        })
    }

    fn apply(&self, mut atom: Atom, index: usize) -> Atom {
        if let Some(hetero) = &self.hetero {
            atom.hetero = hetero[index];
        }
        if let Some(ins_code) = &self.ins_code {
            atom.ins_code = ins_code[index].clone();
        }
        if let Some(occupancy) = &self.occupancy {
            atom.occupancy = Some(occupancy[index]);
        }
        if let Some(b_factor) = &self.b_factor {
            atom.b_factor = Some(b_factor[index]);
        }
        if let Some(charge) = &self.charge {
            atom.charge = Some(charge[index]);
        }
        if let Some(atom_id) = &self.atom_id {
            atom.atom_id = Some(atom_id[index]);
        }
        atom
    }
}

fn verify_canonical(
    atoms: &[Atom],
    starts: &[usize],
    indices: &[u8],
    dict: &ResidueDictionary,
) -> Result<(), Error> {
    for (residue, (&start, &index)) in starts.iter().zip(indices).enumerate() {
        let end = starts.get(residue + 1).copied().unwrap_or(atoms.len());
        let template = dict.template(index).ok_or_else(|| {
            Error::validation(format!("residue-type index {} outside catalog", index))
        })?;
        let first = &atoms[start];
        if end - start != template.len() {
            return Err(Error::validation(format!(
                "residue '{}' {} (chain {}) has {} atoms but its canonical template expects {}",
                first.res_name,
                first.res_id,
                first.chain_id,
                end - start,
                template.len()
            )));
        }
        for (slot, atom) in atoms[start..end].iter().enumerate() {
            if atom.name != template[slot] {
                return Err(match dict.expected_relative_atom_index(index, &atom.name) {
                    Some(expected) => Error::validation(format!(
                        "atom '{}' of residue '{}' {} (chain {}) sits at slot {} but its canonical slot is {}",
                        atom.name, first.res_name, first.res_id, first.chain_id, slot, expected
                    )),
                    None => Error::validation(format!(
                        "atom '{}' does not belong to the canonical template of residue '{}' {} (chain {})",
                        atom.name, first.res_name, first.res_id, first.chain_id
                    )),
                });
            }
        }
    }
    Ok(())
}

fn require_per_atom<T>(
    atoms: &[Atom],
    field: &'static str,
    get: impl Fn(&Atom) -> Option<T>,
) -> Result<Vec<T>, Error> {
    atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| {
            get(atom).ok_or_else(|| {
                Error::configuration(format!(
                    "column '{}' requested but atom {} ('{}' of residue '{}' {}) carries no value",
                    field, index, atom.name, atom.res_name, atom.res_id
                ))
            })
        })
        .collect()
}

fn check_per_atom_len(name: &str, len: usize, num_atoms: usize) -> Result<(), Error> {
    if len != num_atoms {
        return Err(Error::validation(format!(
            "per-atom column '{}' holds {} entries for {} atoms",
            name, len, num_atoms
        )));
    }
    Ok(())
}

fn check_per_residue_len(name: &str, len: usize, num_residues: usize) -> Result<(), Error> {
    if len != num_residues {
        return Err(Error::validation(format!(
            "per-residue column '{}' holds {} entries for {} residues",
            name, len, num_residues
        )));
    }
    Ok(())
}

fn decode_bonds(
    record: &ColumnarRecord,
    num_atoms: usize,
    array: &mut AtomArray,
) -> Result<(), Error> {
    match (record.bond_edges.as_deref(), record.bond_types.as_deref()) {
        (None, None) => Ok(()),
        (Some(edges), Some(kinds)) => {
            if edges.len() != kinds.len() {
                return Err(Error::validation(format!(
                    "bond_edges holds {} entries but bond_types holds {}",
                    edges.len(),
                    kinds.len()
                )));
            }
            for (edge, &code) in edges.iter().zip(kinds) {
                let (a1, a2) = (edge[0] as usize, edge[1] as usize);
                if a1 >= num_atoms || a2 >= num_atoms {
                    return Err(Error::validation(format!(
                        "bond edge {}-{} out of range for {} atoms",
                        a1, a2, num_atoms
                    )));
                }
                let kind = BondKind::from_code(code).ok_or_else(|| {
                    Error::validation(format!("unknown bond type code {}", code))
                })?;
                array.add_bond(a1, a2, kind);
            }
            Ok(())
        }
        _ => Err(Error::validation(
            "bond_edges and bond_types columns must be present together",
        )),
    }
}

fn decode_box(record: &ColumnarRecord, array: &mut AtomArray) {
    if let Some(vectors) = record.box_vectors {
        array.set_box_vectors(vectors.map(|row| row.map(f64::from)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::precision::FloatPrecision;
    use crate::dict::protein_dictionary;

    fn push_residue(
        array: &mut AtomArray,
        res_name: &str,
        res_id: u32,
        chain: &str,
        names: &[&str],
    ) {
        for (offset, name) in names.iter().enumerate() {
            let element = &name[..1];
            array.push(Atom::new(
                name,
                element,
                res_name,
                res_id,
                chain,
                Point::new(res_id as f64, offset as f64, 0.5),
            ));
        }
    }

    fn ala_gly_array() -> AtomArray {
        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 1, "A", &["N", "CA", "C", "O", "CB"]);
        push_residue(&mut array, "GLY", 2, "A", &["N", "CA", "C", "O"]);
        array
    }

    fn canonical_codec() -> AtomArrayCodec {
        AtomArrayCodec::with_dictionary(
            CodecConfig::canonical(),
            Arc::new(protein_dictionary().clone()),
        )
    }

    #[test]
    fn canonical_mode_without_dictionary_is_a_configuration_error() {
        assert!(matches!(
            AtomArrayCodec::new(CodecConfig::canonical()).unwrap_err(),
            Error::Configuration { .. }
        ));
    }

    #[test]
    fn canonical_encode_omits_atom_names_and_stores_restype_indices() {
        let codec = canonical_codec();
        let record = codec.encode(&ala_gly_array()).unwrap();
        let dict = protein_dictionary();

        assert!(record.is_canonical());
        assert!(record.atom_name.is_none());
        assert!(record.residue_starts.is_none());
        assert!(record.res_name.is_none());
        assert_eq!(
            record.restype_index.as_deref().unwrap(),
            &[dict.index_of("ALA").unwrap(), dict.index_of("GLY").unwrap()]
        );
        assert_eq!(record.num_atoms(), 9);
        assert_eq!(record.num_residues(), 2);
    }

    #[test]
    fn canonical_decode_reconstructs_template_atom_order() {
        let codec = canonical_codec();
        let record = codec.encode(&ala_gly_array()).unwrap();
        let decoded = codec.decode(&record).unwrap();

        assert_eq!(decoded.len(), 9);
        let names: Vec<&str> = decoded.iter().map(|atom| atom.name.as_str()).collect();
        assert_eq!(names, ["N", "CA", "C", "O", "CB", "N", "CA", "C", "O"]);
        assert_eq!(decoded.residue_starts(), vec![0, 5]);

        // identity comes from the dictionary, not from storage
        assert_eq!(decoded.atoms()[4].element, "C");
        assert_eq!(decoded.atoms()[5].res_name, "GLY");
        assert_eq!(decoded.atoms()[0].chain_id, "A");
    }

    #[test]
    fn canonical_round_trip_is_idempotent() {
        let codec = canonical_codec();
        let first = codec.encode(&ala_gly_array()).unwrap();
        let decoded = codec.decode(&first).unwrap();
        let second = codec.encode(&decoded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn canonical_encode_rejects_missing_template_atom() {
        let codec = canonical_codec();
        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 1, "A", &["N", "CA", "C", "O"]);

        let err = codec.encode(&array).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("ALA"));
    }

    #[test]
    fn canonical_encode_rejects_out_of_order_atoms() {
        let codec = canonical_codec();
        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 1, "A", &["N", "CA", "C", "CB", "O"]);

        let err = codec.encode(&array).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("slot"));
    }

    #[test]
    fn canonical_encode_rejects_foreign_atom() {
        let codec = canonical_codec();
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "OXT"]);

        let err = codec.encode(&array).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn unknown_residue_name_fails_encode_with_lookup_error() {
        let codec = canonical_codec();
        let mut array = ala_gly_array();
        push_residue(&mut array, "HOH", 3, "A", &["O"]);

        let err = codec.encode(&array).unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
        assert!(err.to_string().contains("HOH"));
    }

    #[test]
    fn explicit_round_trip_with_every_optional_column() {
        let mut array = AtomArray::new();
        for (offset, (name, res)) in [
            ("N", 1u32),
            ("CA", 1),
            ("C", 1),
            ("O", 2),
            ("FE", 3),
        ]
        .iter()
        .enumerate()
        {
            let atom = Atom::new(
                name,
                if *name == "FE" { "Fe" } else { &name[..1] },
                if *res == 3 { "HEM" } else { "ALA" },
                *res,
                "B",
                Point::new(offset as f64 + 0.25, -1.5, 2.0),
            )
            .hetero(*res == 3)
            .ins_code(if *res == 2 { "A" } else { "" })
            .b_factor(10.0 + offset as f64)
            .occupancy(1.0)
            .charge(if *res == 3 { 2 } else { 0 })
            .atom_id(offset as u32 + 1);
            array.push(atom);
        }
        array.add_bond(0, 1, BondKind::Single);
        array.add_bond(1, 2, BondKind::Single);
        array.set_box_vectors([[40.0, 0.0, 0.0], [0.0, 40.0, 0.0], [0.0, 0.0, 40.0]]);

        let config = CodecConfig::explicit()
            .coords_precision(FloatPrecision::Double)
            .b_factor(FloatPrecision::Double, false)
            .with_box(true)
            .with_bonds(true)
            .with_occupancy(true)
            .with_res_id(true)
            .with_atom_id(true)
            .with_charge(true)
            .with_ins_code(true);
        let codec = AtomArrayCodec::new(config).unwrap();

        let record = codec.encode(&array).unwrap();
        assert_eq!(record.residue_starts.as_deref().unwrap(), &[0, 3, 4]);
        assert_eq!(record.res_id.as_deref().unwrap(), &[1, 2, 3]);

        let decoded = codec.decode(&record).unwrap();
        assert_eq!(decoded, array);
    }

    #[test]
    fn explicit_encode_without_element_succeeds_but_decode_fails() {
        let codec =
            AtomArrayCodec::new(CodecConfig::explicit().with_element(false)).unwrap();
        let record = codec.encode(&ala_gly_array()).unwrap();
        assert!(record.element.is_none());

        let err = codec.decode(&record).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("element"));
    }

    #[test]
    fn explicit_decode_defaults_res_id_to_residue_ordinal() {
        let codec = AtomArrayCodec::new(CodecConfig::explicit()).unwrap();
        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 10, "A", &["N", "CA", "C", "O", "CB"]);
        push_residue(&mut array, "GLY", 20, "A", &["N", "CA", "C", "O"]);

        let record = codec.encode(&array).unwrap();
        assert!(record.res_id.is_none());
        let decoded = codec.decode(&record).unwrap();

        assert_eq!(decoded.atoms()[0].res_id, 1);
        assert_eq!(decoded.atoms()[5].res_id, 2);
    }

    #[test]
    fn per_residue_b_factor_is_broadcast_back_onto_atoms() {
        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 1, "A", &["N", "CA", "C", "O", "CB"]);
        push_residue(&mut array, "GLY", 2, "A", &["N", "CA", "C", "O"]);
        let mut with_plddt = AtomArray::new();
        for atom in array.iter() {
            let score = if atom.res_id == 1 { 91.5 } else { 77.25 };
            with_plddt.push(atom.clone().b_factor(score));
        }

        let codec = AtomArrayCodec::with_dictionary(
            CodecConfig::canonical().b_factor(FloatPrecision::Double, true),
            Arc::new(protein_dictionary().clone()),
        );
        let record = codec.encode(&with_plddt).unwrap();
        assert_eq!(record.b_factor.as_ref().unwrap().len(), 2);

        let decoded = codec.decode(&record).unwrap();
        assert!(decoded.iter().take(5).all(|atom| atom.b_factor == Some(91.5)));
        assert!(decoded.iter().skip(5).all(|atom| atom.b_factor == Some(77.25)));
    }

    #[test]
    fn per_residue_b_factor_with_wrong_arity_fails_decode() {
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        let mut with_scores = AtomArray::new();
        for atom in array.iter() {
            with_scores.push(atom.clone().b_factor(55.0));
        }

        let codec = AtomArrayCodec::with_dictionary(
            CodecConfig::canonical().b_factor(FloatPrecision::Double, true),
            Arc::new(protein_dictionary().clone()),
        );
        let mut record = codec.encode(&with_scores).unwrap();
        assert_eq!(record.b_factor.as_ref().unwrap().len(), 1);

        // one residue, but a column sized like a per-atom one
        record.b_factor = Some(ScalarColumn::from_values(
            &[55.0; 4],
            FloatPrecision::Double,
        ));
        let err = codec.decode(&record).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("b_factor"));
    }

    #[test]
    fn bond_edge_out_of_range_fails_encode_with_validation_error() {
        let codec = AtomArrayCodec::new(CodecConfig::explicit().with_bonds(true)).unwrap();
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        array.push_bond_unchecked(crate::model::Bond::new(0, 70_000, BondKind::Single));

        let err = codec.encode(&array).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn missing_annotation_for_requested_column_is_a_configuration_error() {
        let codec =
            AtomArrayCodec::new(CodecConfig::explicit().with_occupancy(true)).unwrap();
        let err = codec.encode(&ala_gly_array()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("occupancy"));
    }

    #[test]
    fn precision_reduced_round_trip_is_a_fixed_point() {
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        let codec = AtomArrayCodec::new(
            CodecConfig::explicit().coords_precision(FloatPrecision::Half),
        )
        .unwrap();

        let first = codec.encode(&array).unwrap();
        let decoded = codec.decode(&first).unwrap();
        let second = codec.encode(&decoded).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn residue_count_at_boundary_encodes_and_one_past_fails() {
        let build = |residues: usize| {
            let mut array = AtomArray::with_capacity(residues);
            for residue in 0..residues {
                array.push(Atom::new(
                    "CA",
                    "C",
                    "GLY",
                    residue as u32 + 1,
                    "A",
                    Point::new(residue as f64, 0.0, 0.0),
                ));
            }
            array
        };
        let codec = AtomArrayCodec::new(CodecConfig::explicit()).unwrap();

        let at_limit = codec.encode(&build(MAX_RESIDUES)).unwrap();
        assert_eq!(at_limit.num_residues(), MAX_RESIDUES);

        let err = codec.encode(&build(MAX_RESIDUES + 1)).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn bond_edge_out_of_range_fails_decode_with_validation_error() {
        let codec = AtomArrayCodec::new(CodecConfig::explicit().with_bonds(true)).unwrap();
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        array.add_bond(0, 1, BondKind::Single);

        let mut record = codec.encode(&array).unwrap();
        record.bond_edges = Some(vec![[0, 99]]);

        let err = codec.decode(&record).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn unknown_bond_type_code_fails_decode() {
        let codec = AtomArrayCodec::new(CodecConfig::explicit().with_bonds(true)).unwrap();
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        array.add_bond(0, 1, BondKind::Single);

        let mut record = codec.encode(&array).unwrap();
        record.bond_types = Some(vec![99]);

        assert!(matches!(
            codec.decode(&record).unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn bonds_survive_an_explicit_round_trip() {
        let codec = AtomArrayCodec::new(CodecConfig::explicit().with_bonds(true)).unwrap();
        let mut array = AtomArray::new();
        push_residue(&mut array, "GLY", 1, "A", &["N", "CA", "C", "O"]);
        array.add_bond(0, 1, BondKind::Single);
        array.add_bond(2, 3, BondKind::Double);

        let record = codec.encode(&array).unwrap();
        let decoded = codec.decode(&record).unwrap();
        assert_eq!(decoded.bonds(), array.bonds());
    }

    #[test]
    fn backbone_subset_dictionary_round_trips_backbone_only_records() {
        let backbone_dict = Arc::new(protein_dictionary().backbone_subset().unwrap());
        let codec = AtomArrayCodec::with_dictionary(CodecConfig::canonical(), backbone_dict);

        let mut array = AtomArray::new();
        push_residue(&mut array, "ALA", 1, "A", &["N", "CA", "C", "O"]);
        push_residue(&mut array, "TRP", 2, "A", &["N", "CA", "C", "O"]);

        let record = codec.encode(&array).unwrap();
        assert_eq!(record.num_atoms(), 8);
        let decoded = codec.decode(&record).unwrap();
        let names: Vec<&str> = decoded.iter().map(|atom| atom.name.as_str()).collect();
        assert_eq!(names, ["N", "CA", "C", "O", "N", "CA", "C", "O"]);
        assert_eq!(decoded.atoms()[4].res_name, "TRP");
    }
}
