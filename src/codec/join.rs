//! Residue-index join: per-residue to per-atom broadcasting with explicit index arrays.
//!
//! Both decode paths broadcast per-residue columns onto atoms through the same
//! residue-index array, keeping the transform pure and independently testable.

use super::error::Error;

/// Builds the per-atom residue index from boundary offsets.
///
/// Entry `i` holds the ordinal of the residue atom `i` belongs to, i.e. the
/// cumulative count of boundary markers up to and including position `i`, minus one.
///
/// # Errors
///
/// Returns a `Validation` error when the boundary column does not start at zero, is
/// not strictly increasing, or references an offset at or beyond the atom count.
pub fn residue_index_from_starts(num_atoms: usize, starts: &[u32]) -> Result<Vec<usize>, Error> {
    if num_atoms == 0 && starts.is_empty() {
        return Ok(Vec::new());
    }
    if starts.first() != Some(&0) {
        return Err(Error::validation(
            "residue boundary column must start at offset 0",
        ));
    }
    for window in starts.windows(2) {
        if window[1] <= window[0] {
            return Err(Error::validation(format!(
                "residue boundary offsets must be strictly increasing, found {} after {}",
                window[1], window[0]
            )));
        }
    }
    if let Some(&last) = starts.last() {
        if last as usize >= num_atoms {
            return Err(Error::validation(format!(
                "residue boundary offset {} is out of range for {} atoms",
                last, num_atoms
            )));
        }
    }

    let mut residue_index = vec![0usize; num_atoms];
    for (residue, window) in starts.windows(2).enumerate() {
        for entry in &mut residue_index[window[0] as usize..window[1] as usize] {
            *entry = residue;
        }
    }
    let last_start = starts[starts.len() - 1] as usize;
    for entry in &mut residue_index[last_start..] {
        *entry = starts.len() - 1;
    }
    Ok(residue_index)
}

/// Per-atom residue index for residues of known sizes laid out contiguously.
pub fn residue_index_from_sizes(sizes: &[usize]) -> Vec<usize> {
    let total = sizes.iter().sum();
    let mut residue_index = Vec::with_capacity(total);
    for (residue, &size) in sizes.iter().enumerate() {
        residue_index.extend(std::iter::repeat(residue).take(size));
    }
    residue_index
}

/// Boundary offsets for residues of known sizes laid out contiguously.
pub fn starts_from_sizes(sizes: &[usize]) -> Vec<u32> {
    let mut starts = Vec::with_capacity(sizes.len());
    let mut offset = 0u32;
    for &size in sizes {
        starts.push(offset);
        offset += size as u32;
    }
    starts
}

/// Broadcasts a per-residue column onto atoms through a residue-index array.
///
/// # Errors
///
/// Returns a `Validation` error when an index references a residue outside the
/// column, which indicates a corrupted record.
pub fn spread<T: Clone>(per_residue: &[T], residue_index: &[usize]) -> Result<Vec<T>, Error> {
    residue_index
        .iter()
        .map(|&residue| {
            per_residue.get(residue).cloned().ok_or_else(|| {
                Error::validation(format!(
                    "residue index {} out of range for a per-residue column of length {}",
                    residue,
                    per_residue.len()
                ))
            })
        })
        .collect()
}
