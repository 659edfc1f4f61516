// std imports
use std::cmp;

// internal imports
use crate::chemistry::amino_acid::{get_residue_mono_mass, WATER_MONO_MASS};
use crate::proteomics::peptide::{Peptide, TERMINUS_MARKER};
use crate::proteomics::proteases::protease::Protease;

/// Digests proteins into peptide candidates whose monoisotopic mass lies
/// within the configured range. Operates on canonicalized residues, so
/// sequences, hash keys and termini all come from the same bytes.
///
pub struct Digester {
    protease: Box<dyn Protease>,
    max_missed_cleavages: usize,
    min_mass: f64,
    max_mass: f64,
}

impl Digester {
    /// Creates a new digester
    ///
    /// # Arguments
    /// * `protease` - Protease providing the cleavage rule
    /// * `max_missed_cleavages` - Maximum number of uncleaved sites within a peptide
    /// * `min_mass` - Lower mass bound (Dalton, inclusive)
    /// * `max_mass` - Upper mass bound (Dalton, inclusive)
    ///
    pub fn new(
        protease: Box<dyn Protease>,
        max_missed_cleavages: usize,
        min_mass: f64,
        max_mass: f64,
    ) -> Self {
        Self {
            protease,
            max_missed_cleavages,
            min_mass,
            max_mass,
        }
    }

    pub fn get_protease(&self) -> &dyn Protease {
        self.protease.as_ref()
    }

    /// Digests one protein. Candidates are returned in deterministic
    /// order: ascending start site, then ascending missed cleavages.
    /// Duplicate sequences across proteins are left to the index.
    ///
    /// # Arguments
    /// * `protein_index` - Position of the protein in the store
    /// * `canonical_sequence` - Canonicalized (I folded to L) residues
    /// * `arena_offset` - Start of this protein in the canonical arena
    ///
    pub fn digest(
        &self,
        protein_index: usize,
        canonical_sequence: &[u8],
        arena_offset: usize,
    ) -> Vec<Peptide> {
        let length = canonical_sequence.len();
        let sites = self.protease.get_cleavage_sites(canonical_sequence);
        let segment_masses = get_segment_masses(canonical_sequence, &sites);
        let local_max_missed = cmp::min(self.max_missed_cleavages, sites.len() - 1);

        let mut peptides = Vec::new();
        for (index, &start) in sites.iter().enumerate() {
            for missed in 0..=local_max_missed {
                let end = if index + missed + 1 < sites.len() {
                    sites[index + missed + 1]
                } else {
                    length
                };

                // segments with mass 0.0 contain a residue without a
                // defined mass; every larger window at this start would
                // contain it too
                let mut mass = WATER_MONO_MASS;
                let mut intractable = false;
                for &segment_mass in &segment_masses[index..=index + missed] {
                    if segment_mass == 0.0 {
                        intractable = true;
                        break;
                    }
                    mass += segment_mass;
                }
                if intractable {
                    break;
                }

                if mass < self.min_mass || mass > self.max_mass {
                    if end == length {
                        break;
                    }
                    continue;
                }

                let n_term = if start == 0 {
                    TERMINUS_MARKER
                } else {
                    canonical_sequence[start - 1]
                };
                let c_term = if end == length {
                    TERMINUS_MARKER
                } else {
                    canonical_sequence[end]
                };
                peptides.push(Peptide {
                    sequence_start: arena_offset + start,
                    sequence_length: end - start,
                    n_term,
                    c_term,
                    mass,
                    protein_index,
                    offset: start,
                });

                // the last segment is included now, larger windows would
                // only repeat it
                if end == length {
                    break;
                }
            }
        }
        peptides
    }
}

/// Sums the residue masses of every stretch between two consecutive
/// cleavage sites, so enumerating missed cleavages adds precomputed
/// segments instead of re-walking residues. A segment containing a
/// residue without a defined mass is recorded as 0.0.
///
/// # Arguments
/// * `sequence` - Canonicalized residues
/// * `sites` - Ascending cleavage sites, starting with 0
///
fn get_segment_masses(sequence: &[u8], sites: &[usize]) -> Vec<f64> {
    let mut segment_masses = Vec::with_capacity(sites.len());
    for (index, &start) in sites.iter().enumerate() {
        let end = if index + 1 < sites.len() {
            sites[index + 1]
        } else {
            sequence.len()
        };

        let mut segment = 0.0;
        for &residue in &sequence[start..end] {
            match get_residue_mono_mass(residue) {
                Some(mass) => segment += mass,
                None => {
                    segment = 0.0;
                    break;
                }
            }
        }
        segment_masses.push(segment);
    }
    segment_masses
}
