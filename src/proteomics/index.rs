// std imports
use std::collections::HashSet;
use std::time::Instant;

// 3rd party imports
use log::{debug, info};
use rayon::prelude::*;

// internal imports
use crate::chemistry::amino_acid::canonicalize_residue;
use crate::proteomics::digest::Digester;
use crate::proteomics::peptide::Peptide;
use crate::proteomics::protein::ProteinStore;

/// Mass sorted, deduplicated array of peptides plus the canonical
/// sequence arena their sequence slices point into. Built once, read-only
/// afterwards, safe to share between threads.
///
#[derive(Debug)]
pub struct PeptideIndex {
    /// Every protein sequence with I folded to L, null separated
    canonical_data: Vec<u8>,
    /// Sorted by mass ascending, ties by sequence bytes
    peptides: Vec<Peptide>,
}

impl PeptideIndex {
    /// Digests every protein of the store and materializes the index.
    /// Proteins are digested in parallel; the resulting index does not
    /// depend on the number of worker threads.
    ///
    /// # Arguments
    /// * `store` - Proteins to digest
    /// * `digester` - Digestion parameters
    ///
    pub fn build(store: &ProteinStore, digester: &Digester) -> Self {
        let start_time = Instant::now();

        // canonical arena, one null after each sequence so the slices of
        // neighboring proteins can never run into each other
        let residue_count: usize = store
            .iter()
            .map(|protein| protein.get_sequence_length())
            .sum();
        let mut canonical_data = Vec::with_capacity(residue_count + store.len());
        let mut arena_spans = Vec::with_capacity(store.len());
        for protein in store.iter() {
            let offset = canonical_data.len();
            canonical_data.extend(
                protein
                    .get_sequence()
                    .iter()
                    .map(|&residue| canonicalize_residue(residue)),
            );
            arena_spans.push(offset..canonical_data.len());
            canonical_data.push(0);
        }

        // collecting keeps the proteins in store order, which makes the
        // dedup below independent of scheduling
        let candidates: Vec<Peptide> = arena_spans
            .par_iter()
            .enumerate()
            .flat_map_iter(|(protein_index, span)| {
                digester.digest(protein_index, &canonical_data[span.clone()], span.start)
            })
            .collect();
        debug!("digestion produced {} candidates", candidates.len());

        // dedup on sequence bytes, the first occurrence keeps its protein
        let mut seen: HashSet<&[u8]> = HashSet::with_capacity(candidates.len());
        let mut peptides = Vec::with_capacity(candidates.len());
        for peptide in candidates {
            let sequence = &canonical_data
                [peptide.sequence_start..peptide.sequence_start + peptide.sequence_length];
            if seen.insert(sequence) {
                peptides.push(peptide);
            }
        }
        drop(seen);

        // total order so equal masses keep a reproducible order
        peptides.sort_unstable_by(|one, another| {
            one.mass.total_cmp(&another.mass).then_with(|| {
                let one_sequence =
                    &canonical_data[one.sequence_start..one.sequence_start + one.sequence_length];
                let another_sequence = &canonical_data
                    [another.sequence_start..another.sequence_start + another.sequence_length];
                one_sequence.cmp(another_sequence)
            })
        });

        info!(
            "indexed {} peptides from {} proteins in {:?}",
            peptides.len(),
            store.len(),
            start_time.elapsed()
        );
        Self {
            canonical_data,
            peptides,
        }
    }

    /// Returns the number of indexed peptides
    ///
    pub fn len(&self) -> usize {
        self.peptides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peptides.is_empty()
    }

    /// Returns the peptide at the given position
    ///
    pub fn get(&self, index: usize) -> Option<&Peptide> {
        self.peptides.get(index)
    }

    /// Iterates all peptides in ascending mass order
    ///
    pub fn iter(&self) -> std::slice::Iter<'_, Peptide> {
        self.peptides.iter()
    }

    /// Returns the position of the first peptide with `mass >= mass`
    ///
    pub fn lower_bound(&self, mass: f64) -> usize {
        self.peptides.partition_point(|peptide| peptide.mass < mass)
    }

    /// Returns the position of the first peptide with `mass > mass`
    ///
    pub fn upper_bound(&self, mass: f64) -> usize {
        self.peptides.partition_point(|peptide| peptide.mass <= mass)
    }

    /// Returns all peptides with `lower_mass <= mass <= upper_mass` in
    /// ascending mass order. Empty for an inverted range.
    ///
    /// # Arguments
    /// * `lower_mass` - Lower bound (inclusive)
    /// * `upper_mass` - Upper bound (inclusive)
    ///
    pub fn mass_range(&self, lower_mass: f64, upper_mass: f64) -> &[Peptide] {
        if lower_mass > upper_mass {
            return &[];
        }
        &self.peptides[self.lower_bound(lower_mass)..self.upper_bound(upper_mass)]
    }

    /// Returns the canonicalized sequence bytes of the given peptide
    ///
    pub fn get_sequence(&self, peptide: &Peptide) -> &[u8] {
        &self.canonical_data
            [peptide.sequence_start..peptide.sequence_start + peptide.sequence_length]
    }
}
