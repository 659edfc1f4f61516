// std imports
use std::fs;
use std::ops::Range;
use std::path::Path;

// 3rd party imports
use log::debug;

// internal imports
use crate::error::DatabaseError;

/// Slices of one database entry within [FastaArena::data]
///
#[derive(Debug, Clone)]
pub struct EntryDescriptor {
    /// Header without the leading `>` and the line terminator
    pub name: Range<usize>,
    /// Residues with all whitespace stripped, case as found in the file
    pub sequence: Range<usize>,
}

/// Compact in-memory form of a FASTA database: one byte buffer holding
/// `name\0sequence\0` per entry plus the descriptors referencing it.
/// Entry order is the file order.
///
#[derive(Debug)]
pub struct FastaArena {
    pub data: Vec<u8>,
    pub entries: Vec<EntryDescriptor>,
}

enum ParseState {
    Start,
    Name,
    Sequence,
}

/// Reads a FASTA file fully into memory and normalizes it into an arena.
///
/// # Arguments
/// * `path` - Path to the FASTA file
///
pub fn read_fasta(path: &Path) -> Result<FastaArena, DatabaseError> {
    let raw_data = fs::read(path).map_err(|source| DatabaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let arena = parse_fasta(&raw_data);
    debug!(
        "parsed {} fasta entries from {}",
        arena.entries.len(),
        path.display()
    );
    Ok(arena)
}

/// Single pass parse of raw FASTA bytes into an arena.
/// A `>` while reading sequence lines starts a new entry, as headers can
/// follow a sequence without a line break in sloppily concatenated files.
///
/// # Arguments
/// * `raw_data` - Raw file content
///
pub fn parse_fasta(raw_data: &[u8]) -> FastaArena {
    let mut data = Vec::with_capacity(raw_data.len() + 2);
    let mut entries = Vec::new();

    let mut state = ParseState::Start;
    let mut name = 0..0;
    let mut sequence_start = 0;

    for &byte in raw_data {
        match state {
            ParseState::Start => {
                if byte == b'>' {
                    name.start = data.len();
                    state = ParseState::Name;
                }
            }
            ParseState::Name => {
                if byte == b'\n' {
                    if data.last() == Some(&b'\r') {
                        data.pop();
                    }
                    name.end = data.len();
                    data.push(0);
                    sequence_start = data.len();
                    state = ParseState::Sequence;
                } else {
                    data.push(byte);
                }
            }
            ParseState::Sequence => {
                if byte == b'>' {
                    entries.push(EntryDescriptor {
                        name: name.clone(),
                        sequence: sequence_start..data.len(),
                    });
                    data.push(0);
                    name.start = data.len();
                    state = ParseState::Name;
                } else if !matches!(byte, b' ' | b'\t' | b'\r' | b'\n') {
                    data.push(byte);
                }
            }
        }
    }

    // finalize the pending entry, a trailing newline is not required
    match state {
        ParseState::Sequence => {
            entries.push(EntryDescriptor {
                name: name.clone(),
                sequence: sequence_start..data.len(),
            });
            data.push(0);
        }
        ParseState::Name => {
            // header hit EOF before its line break, keep it with an empty sequence
            if data.last() == Some(&b'\r') {
                data.pop();
            }
            name.end = data.len();
            data.push(0);
            entries.push(EntryDescriptor {
                name,
                sequence: data.len()..data.len(),
            });
            data.push(0);
        }
        ParseState::Start => {}
    }

    FastaArena { data, entries }
}

#[cfg(test)]
mod test {
    // std imports
    use std::io::Write;

    // internal imports
    use super::*;

    fn entry_bytes<'a>(arena: &'a FastaArena, index: usize) -> (&'a [u8], &'a [u8]) {
        let descriptor = &arena.entries[index];
        (
            &arena.data[descriptor.name.clone()],
            &arena.data[descriptor.sequence.clone()],
        )
    }

    #[test]
    fn test_parse_multiline_entries() {
        let arena = parse_fasta(b">sp|P1|FIRST Protein one\nMAIKR\nGPPK\n>sp|P2|SECOND\nACDEF\n");
        assert_eq!(arena.entries.len(), 2);
        assert_eq!(
            entry_bytes(&arena, 0),
            (&b"sp|P1|FIRST Protein one"[..], &b"MAIKRGPPK"[..])
        );
        assert_eq!(entry_bytes(&arena, 1), (&b"sp|P2|SECOND"[..], &b"ACDEF"[..]));
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let arena = parse_fasta(b">P1 desc\r\nMAIK\r\nR\r\n");
        assert_eq!(entry_bytes(&arena, 0), (&b"P1 desc"[..], &b"MAIKR"[..]));
    }

    #[test]
    fn test_parse_whitespace_in_sequence_lines() {
        let arena = parse_fasta(b">P1\nMA IK\t R\n");
        assert_eq!(entry_bytes(&arena, 0).1, b"MAIKR");
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let arena = parse_fasta(b">P1\nMAIKR");
        assert_eq!(arena.entries.len(), 1);
        assert_eq!(entry_bytes(&arena, 0).1, b"MAIKR");
    }

    #[test]
    fn test_parse_header_direct_after_sequence() {
        // no line break between the residues and the next header
        let arena = parse_fasta(b">P1\nMAIKR>P2\nGPPK\n");
        assert_eq!(arena.entries.len(), 2);
        assert_eq!(entry_bytes(&arena, 0).1, b"MAIKR");
        assert_eq!(entry_bytes(&arena, 1), (&b"P2"[..], &b"GPPK"[..]));
    }

    #[test]
    fn test_parse_leading_junk_is_skipped() {
        let arena = parse_fasta(b"; comment line\n>P1\nMAIKR\n");
        assert_eq!(arena.entries.len(), 1);
        assert_eq!(entry_bytes(&arena, 0), (&b"P1"[..], &b"MAIKR"[..]));
    }

    #[test]
    fn test_parse_empty_input() {
        let arena = parse_fasta(b"");
        assert!(arena.entries.is_empty());
        assert!(arena.data.is_empty());
    }

    #[test]
    fn test_parse_header_without_sequence_at_eof() {
        let arena = parse_fasta(b">P1\nMAIKR\n>P2 dangling");
        assert_eq!(arena.entries.len(), 2);
        assert_eq!(entry_bytes(&arena, 1), (&b"P2 dangling"[..], &b""[..]));
    }

    #[test]
    fn test_descriptors_within_bounds_and_terminated() {
        let arena = parse_fasta(b">P1\nMAIKR\nGPPK\n>P2\nACDEF\n");
        for descriptor in &arena.entries {
            assert!(descriptor.name.end <= arena.data.len());
            assert!(descriptor.sequence.end <= arena.data.len());
            // name and sequence are each followed by a null terminator
            assert_eq!(arena.data[descriptor.name.end], 0);
            assert_eq!(arena.data[descriptor.sequence.end], 0);
        }
    }

    #[test]
    fn test_read_fasta_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b">P1 one\nMAIKR\n>P2 two\nGPPK\n").unwrap();
        let arena = read_fasta(file.path()).unwrap();
        assert_eq!(arena.entries.len(), 2);
    }

    #[test]
    fn test_read_fasta_missing_file() {
        let error = read_fasta(Path::new("/this/path/does/not/exist.fasta")).unwrap_err();
        assert!(matches!(error, DatabaseError::Io { .. }));
    }
}
