// std imports
use std::path::{Path, PathBuf};

// 3rd party imports
use log::info;
use serde::{Deserialize, Serialize};

// internal imports
use crate::error::DatabaseError;
use crate::proteomics::digest::Digester;
use crate::proteomics::index::PeptideIndex;
use crate::proteomics::peptide::{Peptide, PeptideView};
use crate::proteomics::protein::ProteinStore;
use crate::proteomics::proteases::functions as protease_functions;
use crate::proteomics::proteases::trypsin::NAME as TRYPSIN_NAME;

/// Default lower mass bound (Dalton)
///
pub const DEFAULT_MIN_MASS: f64 = 600.0;

/// Default upper mass bound (Dalton)
///
pub const DEFAULT_MAX_MASS: f64 = 5000.0;

/// Parameters for building a peptide database
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the FASTA protein database
    pub fasta_path: PathBuf,
    /// Append a reversed decoy for every target protein
    pub append_decoys: bool,
    /// Name of the protease used for the in-silico digestion
    pub protease: String,
    /// Maximum number of uncleaved sites within a peptide
    pub max_missed_cleavages: usize,
    /// Lower peptide mass bound (Dalton, inclusive)
    pub min_mass: f64,
    /// Upper peptide mass bound (Dalton, inclusive)
    pub max_mass: f64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            fasta_path: PathBuf::new(),
            append_decoys: false,
            protease: TRYPSIN_NAME.to_string(),
            max_missed_cleavages: 0,
            min_mass: DEFAULT_MIN_MASS,
            max_mass: DEFAULT_MAX_MASS,
        }
    }
}

impl DatabaseConfig {
    /// Checks the numeric constraints
    ///
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.min_mass <= 0.0 {
            return Err(DatabaseError::Config(format!(
                "min_mass must be positive, got {}",
                self.min_mass
            )));
        }
        if self.min_mass > self.max_mass {
            return Err(DatabaseError::Config(format!(
                "mass range is inverted: {} > {}",
                self.min_mass, self.max_mass
            )));
        }
        Ok(())
    }
}

/// Read-only peptide database: the protein store plus the mass sorted
/// peptide index over it. Everything is materialized on construction;
/// afterwards all operations are pure lookups and safe to run from
/// multiple threads.
///
#[derive(Debug)]
pub struct PeptideDatabase {
    config: DatabaseConfig,
    store: ProteinStore,
    index: PeptideIndex,
}

impl PeptideDatabase {
    /// Builds the database: reads the FASTA file, optionally appends
    /// decoys, digests every protein and indexes the resulting peptides.
    ///
    /// # Arguments
    /// * `config` - Database parameters, see [DatabaseConfig]
    ///
    pub fn new(config: DatabaseConfig) -> Result<Self, DatabaseError> {
        config.validate()?;
        let protease = protease_functions::get_by_name(&config.protease)?;
        let store = ProteinStore::from_file(&config.fasta_path, config.append_decoys)?;
        let digester = Digester::new(
            protease,
            config.max_missed_cleavages,
            config.min_mass,
            config.max_mass,
        );
        let index = PeptideIndex::build(&store, &digester);
        info!(
            "peptide database ready: {} proteins, {} peptides",
            store.len(),
            index.len()
        );
        Ok(Self {
            config,
            store,
            index,
        })
    }

    /// Builds the database with default parameters: trypsin, no decoys,
    /// no missed cleavages, masses within 600 to 5000 Dalton.
    ///
    /// # Arguments
    /// * `fasta_path` - Path to the FASTA protein database
    ///
    pub fn from_file(fasta_path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        Self::new(DatabaseConfig {
            fasta_path: fasta_path.as_ref().to_path_buf(),
            ..DatabaseConfig::default()
        })
    }

    pub fn get_config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the protein store backing this database
    ///
    pub fn get_proteins(&self) -> &ProteinStore {
        &self.store
    }

    /// Returns the number of indexed peptides
    ///
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the peptide at the given position of the mass sorted index
    ///
    pub fn get(&self, index: usize) -> Option<PeptideView<'_>> {
        self.index.get(index).map(|peptide| self.view(peptide))
    }

    /// Iterates all peptides in ascending mass order
    ///
    pub fn iter(&self) -> impl Iterator<Item = PeptideView<'_>> + '_ {
        self.index.iter().map(|peptide| self.view(peptide))
    }

    /// Returns the position of the first peptide with `mass >= mass`
    ///
    pub fn lower_bound(&self, mass: f64) -> usize {
        self.index.lower_bound(mass)
    }

    /// Returns the position of the first peptide with `mass > mass`
    ///
    pub fn upper_bound(&self, mass: f64) -> usize {
        self.index.upper_bound(mass)
    }

    /// Iterates all peptides with `lower_mass <= mass <= upper_mass` in
    /// ascending mass order, e.g. a precursor tolerance window around an
    /// observed mass. Empty for an inverted range.
    ///
    /// # Arguments
    /// * `lower_mass` - Lower bound (inclusive)
    /// * `upper_mass` - Upper bound (inclusive)
    ///
    pub fn mass_range(
        &self,
        lower_mass: f64,
        upper_mass: f64,
    ) -> impl Iterator<Item = PeptideView<'_>> + '_ {
        self.index
            .mass_range(lower_mass, upper_mass)
            .iter()
            .map(|peptide| self.view(peptide))
    }

    fn view<'a>(&'a self, peptide: &'a Peptide) -> PeptideView<'a> {
        PeptideView {
            peptide,
            sequence: self.index.get_sequence(peptide),
            protein: self.store.resolve_index(peptide.protein_index),
        }
    }
}

#[cfg(test)]
mod test {
    // std imports
    use std::collections::HashMap;
    use std::io::Write;

    // internal imports
    use super::*;

    const SINGLE_PROTEIN: &[u8] = b">P1\nMAIKR\nGPPK\n";

    lazy_static! {
        /// Expected tryptic peptides of `MAIKR GPPK` (canonical `MALKRGPPK`)
        /// without missed cleavages: sequence => (n_term, c_term, offset)
        static ref EXPECTED_PEPTIDES: HashMap<&'static [u8], (u8, u8, usize)> = collection! {
            b"MALK".as_slice() => (b'-', b'R', 0),
            b"R".as_slice() => (b'K', b'G', 4),
            b"GPPK".as_slice() => (b'R', b'-', 5),
        };
    }

    fn write_fixture(fasta_content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fasta_content).unwrap();
        file
    }

    fn new_config(file: &tempfile::NamedTempFile, max_missed_cleavages: usize) -> DatabaseConfig {
        DatabaseConfig {
            fasta_path: file.path().to_path_buf(),
            append_decoys: false,
            protease: "trypsin".to_string(),
            max_missed_cleavages,
            min_mass: 50.0,
            max_mass: 5000.0,
        }
    }

    #[test]
    fn test_single_protein_digestion() {
        let file = write_fixture(SINGLE_PROTEIN);
        let database = PeptideDatabase::new(DatabaseConfig {
            fasta_path: file.path().to_path_buf(),
            min_mass: 50.0,
            ..DatabaseConfig::default()
        })
        .unwrap();

        assert_eq!(database.len(), EXPECTED_PEPTIDES.len());
        for peptide in database.iter() {
            let (n_term, c_term, offset) = EXPECTED_PEPTIDES[peptide.get_sequence()];
            assert_eq!(peptide.get_n_term(), n_term);
            assert_eq!(peptide.get_c_term(), c_term);
            assert_eq!(peptide.get_offset(), offset);
            assert_eq!(peptide.get_protein().get_name(), b"P1");
        }

        // the protein record keeps the original residues, so the isoleucine
        // of MAIK is visible through the original sequence
        let malk = database
            .iter()
            .find(|peptide| peptide.get_sequence() == b"MALK")
            .unwrap();
        assert_eq!(malk.get_original_sequence(), b"MAIK");
    }

    #[test]
    fn test_missed_cleavage_peptide_counts() {
        let file = write_fixture(SINGLE_PROTEIN);
        for (max_missed_cleavages, expected) in [(0, 3), (1, 5), (2, 6)] {
            let database =
                PeptideDatabase::new(new_config(&file, max_missed_cleavages)).unwrap();
            assert_eq!(database.len(), expected);
        }
    }

    #[test]
    fn test_decoys_double_the_proteins() {
        let file = write_fixture(SINGLE_PROTEIN);
        let database = PeptideDatabase::new(DatabaseConfig {
            fasta_path: file.path().to_path_buf(),
            append_decoys: true,
            min_mass: 50.0,
            ..DatabaseConfig::default()
        })
        .unwrap();

        assert_eq!(database.get_proteins().len(), 2);
        let decoy = database.get_proteins().get(1).unwrap();
        assert!(decoy.is_decoy());
        assert_eq!(decoy.get_name(), b"DECOY_P1");
        assert_eq!(decoy.get_sequence(), b"KPPGRKIAM");

        // decoy peptides are indexed like target peptides
        assert!(database
            .iter()
            .any(|peptide| peptide.get_protein().is_decoy()));
    }

    #[test]
    fn test_mass_window_around_observed_precursor() {
        let file = write_fixture(SINGLE_PROTEIN);
        let database = PeptideDatabase::new(new_config(&file, 0)).unwrap();
        // GPPK, water + G + P + P + K
        let observed = 18.01528 + 57.02147 + 97.05277 + 97.05277 + 128.09497;
        let candidates: Vec<_> = database
            .mass_range(observed - 0.01, observed + 0.01)
            .collect();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].get_sequence(), b"GPPK");
        assert_eq!(
            database.upper_bound(observed + 0.01) - database.lower_bound(observed - 0.01),
            1
        );
    }

    #[test]
    fn test_construction_is_idempotent() {
        let file = write_fixture(b">P1\nMAIKR\nGPPK\n>P2\nACDEFGHKMNPQRSTVWYK\n");
        let config = DatabaseConfig {
            fasta_path: file.path().to_path_buf(),
            max_missed_cleavages: 2,
            min_mass: 50.0,
            ..DatabaseConfig::default()
        };
        let one = PeptideDatabase::new(config.clone()).unwrap();
        let another = PeptideDatabase::new(config).unwrap();
        assert_eq!(one.len(), another.len());
        for (left, right) in one.iter().zip(another.iter()) {
            assert_eq!(left.get_mass().to_bits(), right.get_mass().to_bits());
            assert_eq!(left.get_sequence(), right.get_sequence());
        }
    }

    #[test]
    fn test_invalid_mass_bounds_are_rejected() {
        let error = PeptideDatabase::new(DatabaseConfig {
            min_mass: 0.0,
            ..DatabaseConfig::default()
        })
        .unwrap_err();
        assert!(matches!(error, DatabaseError::Config(_)));

        let error = PeptideDatabase::new(DatabaseConfig {
            min_mass: 1000.0,
            max_mass: 500.0,
            ..DatabaseConfig::default()
        })
        .unwrap_err();
        assert!(matches!(error, DatabaseError::Config(_)));
    }

    #[test]
    fn test_unknown_protease_is_rejected() {
        let error = PeptideDatabase::new(DatabaseConfig {
            protease: "pepsin".to_string(),
            min_mass: 50.0,
            ..DatabaseConfig::default()
        })
        .unwrap_err();
        assert!(matches!(error, DatabaseError::UnsupportedProtease(_)));
    }

    #[test]
    fn test_missing_fasta_file_is_reported() {
        let error = PeptideDatabase::new(DatabaseConfig {
            fasta_path: PathBuf::from("/this/path/does/not/exist.fasta"),
            ..DatabaseConfig::default()
        })
        .unwrap_err();
        assert!(matches!(error, DatabaseError::Io { .. }));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let json = r#"{
            "fasta_path": "proteins.fasta",
            "append_decoys": true,
            "max_missed_cleavages": 2
        }"#;
        let config: DatabaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.fasta_path, PathBuf::from("proteins.fasta"));
        assert!(config.append_decoys);
        assert_eq!(config.max_missed_cleavages, 2);
        // omitted fields fall back to the defaults
        assert_eq!(config.protease, "trypsin");
        assert_eq!(config.min_mass, DEFAULT_MIN_MASS);
        assert_eq!(config.max_mass, DEFAULT_MAX_MASS);

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: DatabaseConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.max_missed_cleavages, 2);
    }
}
