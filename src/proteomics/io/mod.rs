/// Reader for FASTA protein databases
pub mod fasta;
