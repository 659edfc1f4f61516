// std imports
use std::ops::Range;
use std::path::Path;

// 3rd party imports
use log::debug;

// internal imports
use crate::error::DatabaseError;
use crate::proteomics::io::fasta;

/// Name prefix marking reversed decoy proteins
///
pub const DECOY_PREFIX: &[u8] = b"DECOY_";

/// Location of one protein within the store arenas
///
#[derive(Debug, Clone)]
struct ProteinDescriptor {
    decoy: bool,
    name: Range<usize>,
    sequence: Range<usize>,
}

/// Read-only view of one protein record. The underlying bytes are owned
/// by the [ProteinStore] and stay valid for its whole lifetime.
///
#[derive(Debug, Clone, Copy)]
pub struct Protein<'a> {
    name: &'a [u8],
    sequence: &'a [u8],
    decoy: bool,
}

impl<'a> Protein<'a> {
    /// Returns the full header (without the leading `>`)
    ///
    pub fn get_name(&self) -> &'a [u8] {
        self.name
    }

    /// Returns the accession, the header up to the first whitespace
    ///
    pub fn get_accession(&self) -> &'a [u8] {
        match self.name.iter().position(|byte| byte.is_ascii_whitespace()) {
            Some(position) => &self.name[..position],
            None => self.name,
        }
    }

    /// Returns the residues exactly as read from the database
    /// (no isoleucine/leucine folding)
    ///
    pub fn get_sequence(&self) -> &'a [u8] {
        self.sequence
    }

    /// Returns the number of residues
    ///
    pub fn get_sequence_length(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true for reversed decoy entries
    ///
    pub fn is_decoy(&self) -> bool {
        self.decoy
    }
}

/// Owns the target and decoy byte arenas and the protein descriptors.
/// Created once when the database is built, never mutated afterwards.
///
#[derive(Debug)]
pub struct ProteinStore {
    target_data: Vec<u8>,
    decoy_data: Vec<u8>,
    proteins: Vec<ProteinDescriptor>,
}

impl ProteinStore {
    /// Reads a FASTA file and optionally appends a reversed decoy for
    /// every target protein. Decoys follow after all targets, in target
    /// order.
    ///
    /// # Arguments
    /// * `path` - Path to the FASTA file
    /// * `append_decoys` - Whether to generate decoys
    ///
    pub fn from_file(path: &Path, append_decoys: bool) -> Result<Self, DatabaseError> {
        let arena = fasta::read_fasta(path)?;
        let proteins = arena
            .entries
            .into_iter()
            .map(|entry| ProteinDescriptor {
                decoy: false,
                name: entry.name,
                sequence: entry.sequence,
            })
            .collect();
        let mut store = Self {
            target_data: arena.data,
            decoy_data: Vec::new(),
            proteins,
        };
        if append_decoys {
            store.append_decoys();
        }
        debug!(
            "protein store holds {} proteins ({} decoys)",
            store.len(),
            store.iter().filter(|protein| protein.is_decoy()).count()
        );
        Ok(store)
    }

    /// Builds the decoy arena: per target `DECOY_<name>\0<reversed sequence>\0`
    ///
    fn append_decoys(&mut self) {
        let target_count = self.proteins.len();
        let mut decoy_data =
            Vec::with_capacity(self.target_data.len() + target_count * DECOY_PREFIX.len());
        let mut decoys = Vec::with_capacity(target_count);

        for descriptor in &self.proteins {
            let name_start = decoy_data.len();
            decoy_data.extend_from_slice(DECOY_PREFIX);
            decoy_data.extend_from_slice(&self.target_data[descriptor.name.clone()]);
            let name = name_start..decoy_data.len();
            decoy_data.push(0);

            let sequence_start = decoy_data.len();
            decoy_data.extend(self.target_data[descriptor.sequence.clone()].iter().rev());
            let sequence = sequence_start..decoy_data.len();
            decoy_data.push(0);

            decoys.push(ProteinDescriptor {
                decoy: true,
                name,
                sequence,
            });
        }

        self.decoy_data = decoy_data;
        self.proteins.extend(decoys);
    }

    /// Returns the number of proteins (targets plus decoys)
    ///
    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    /// Returns the protein at the given position
    ///
    pub fn get(&self, index: usize) -> Option<Protein<'_>> {
        self.proteins
            .get(index)
            .map(|descriptor| self.resolve(descriptor))
    }

    /// Like [Self::get] for positions known to be valid
    ///
    pub(crate) fn resolve_index(&self, index: usize) -> Protein<'_> {
        self.resolve(&self.proteins[index])
    }

    /// Iterates all proteins in store order, targets before decoys
    ///
    pub fn iter(&self) -> impl Iterator<Item = Protein<'_>> + '_ {
        self.proteins
            .iter()
            .map(|descriptor| self.resolve(descriptor))
    }

    fn resolve(&self, descriptor: &ProteinDescriptor) -> Protein<'_> {
        let arena = if descriptor.decoy {
            &self.decoy_data
        } else {
            &self.target_data
        };
        Protein {
            name: &arena[descriptor.name.clone()],
            sequence: &arena[descriptor.sequence.clone()],
            decoy: descriptor.decoy,
        }
    }
}
