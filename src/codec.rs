use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::bit_vec::BitVec;
use crate::code::CodeBook;
use crate::error::{HuffError, Result};
use crate::format::EncodedFile;
use crate::freq::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Encoder/decoder for one frequency distribution: the tree plus the
/// codebook derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    table: FrequencyTable,
    tree: HuffmanTree,
    book: CodeBook,
}

impl HuffmanCodec {
    pub fn from_table(table: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(&table)?;
        let book = CodeBook::from_tree(&tree.root);
        Ok(HuffmanCodec { table, tree, book })
    }

    /// Codec for the distribution of `data` itself.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_table(FrequencyTable::from_bytes(data))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn book(&self) -> &CodeBook {
        &self.book
    }

    /// Concatenate the code of every input symbol into a packed payload.
    ///
    /// A symbol absent from the codebook means the codec was built from a
    /// different source than `data`.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedFile> {
        let mut bits = BitVec::new();
        for &byte in data {
            let path = self
                .book
                .path(byte)
                .ok_or(HuffError::SymbolNotFound(byte))?;
            for bit in path.bits() {
                bits.push_bit(bit);
            }
        }
        Ok(EncodedFile {
            original_len: data.len() as u64,
            bit_count: bits.bit_count() as u64,
            table: self.table.clone(),
            payload: bits.into_bytes(),
        })
    }

    /// Walk the tree bit by bit, emitting a symbol at each leaf, until the
    /// declared number of symbols is out.
    ///
    /// The symbol count drives the loop rather than bit exhaustion: a
    /// single-leaf tree has zero-length codes, so counting is the only
    /// way to know when to stop. Running out of bits mid-walk is a
    /// truncated stream; leftover bits mean the payload and the table do
    /// not belong together.
    pub fn decode_payload(&self, encoded: &EncodedFile) -> Result<Vec<u8>> {
        if self.table.total() != encoded.original_len {
            return Err(HuffError::TreeMismatch(format!(
                "table counts {} symbols, header declares {}",
                self.table.total(),
                encoded.original_len
            )));
        }

        let bits = BitVec::from_bytes(&encoded.payload, encoded.bit_count as usize);
        let mut out = Vec::with_capacity(encoded.original_len as usize);
        let mut cursor = 0usize;

        while (out.len() as u64) < encoded.original_len {
            let mut node = &self.tree.root;
            loop {
                match node {
                    HuffNode::Leaf { symbol, .. } => {
                        out.push(*symbol);
                        break;
                    }
                    HuffNode::Internal { left, right, .. } => match bits.get(cursor) {
                        Some(bit) => {
                            cursor += 1;
                            node = if bit { right } else { left };
                        }
                        None => {
                            return Err(HuffError::TruncatedStream {
                                decoded: out.len() as u64,
                                expected: encoded.original_len,
                            })
                        }
                    },
                }
            }
        }

        if (cursor as u64) < encoded.bit_count {
            return Err(HuffError::TreeMismatch(format!(
                "{} bits left over after the final symbol",
                encoded.bit_count - cursor as u64
            )));
        }
        Ok(out)
    }
}

/// Decode a self-contained artifact using its embedded frequency table.
pub fn decode(encoded: &EncodedFile) -> Result<Vec<u8>> {
    let codec = HuffmanCodec::from_table(encoded.table.clone())?;
    codec.decode_payload(encoded)
}

/// Compress the file at `input` into a container at `output`.
pub fn encode_file(input: &Path, output: &Path) -> Result<()> {
    let data = fs::read(input).map_err(|source| HuffError::Source {
        path: input.to_path_buf(),
        source,
    })?;
    let codec = HuffmanCodec::from_bytes(&data)?;
    let encoded = codec.encode(&data)?;
    log::debug!(
        "encoded {} bytes as {} bits over {} distinct symbols",
        data.len(),
        encoded.bit_count,
        codec.book().len()
    );
    write_atomic(output, &encoded.to_bytes())
}

/// Decompress a container at `input` into the original bytes at `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<()> {
    let data = fs::read(input).map_err(|source| HuffError::Source {
        path: input.to_path_buf(),
        source,
    })?;
    let encoded = EncodedFile::from_bytes(&data)?;
    let decoded = decode(&encoded)?;
    log::debug!(
        "decoded {} bytes from {} payload bits",
        decoded.len(),
        encoded.bit_count
    );
    write_atomic(output, &decoded)
}

/// Write through a temp file in the destination directory and rename into
/// place, so a failed operation leaves no output file behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let destination = |source| HuffError::Destination {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(destination)?;
    tmp.write_all(bytes).map_err(destination)?;
    tmp.persist(path).map_err(|e| destination(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use super::*;

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let encoded = codec.encode(data).unwrap();
        decode(&encoded).unwrap()
    }

    #[test]
    fn encode_then_decode_restores_input() {
        let data = b"it was the best of times, it was the worst of times";
        assert_eq!(round_trip(data), data.to_vec());
    }

    #[test]
    fn concrete_three_symbol_scenario() {
        // {a:3, b:2, c:1}: a gets a one-bit code, b and c two bits, for
        // 3*1 + 2*2 + 1*2 = 9 payload bits.
        let data = b"aaabbc";
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let encoded = codec.encode(data).unwrap();
        assert_eq!(encoded.bit_count, 9);
        assert_eq!(encoded.original_len, 6);
        assert_eq!(decode(&encoded).unwrap(), data.to_vec());
    }

    #[test]
    fn random_data_round_trips() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [1usize, 2, 17, 1000, 4096] {
            let mut data = vec![0u8; len];
            rng.fill_bytes(&mut data);
            assert_eq!(round_trip(&data), data, "length {len}");
        }
    }

    #[test]
    fn wire_level_round_trip() {
        let data = b"serialize me, then bring me back";
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let bytes = codec.encode(data).unwrap().to_bytes();
        let parsed = EncodedFile::from_bytes(&bytes).unwrap();
        assert_eq!(decode(&parsed).unwrap(), data.to_vec());
    }

    #[test]
    fn single_symbol_alphabet_terminates() {
        let data = vec![b'z'; 1000];
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let encoded = codec.encode(&data).unwrap();
        // a lone leaf needs no bits at all
        assert_eq!(encoded.bit_count, 0);
        assert!(encoded.payload.is_empty());
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn single_byte_file_round_trips() {
        assert_eq!(round_trip(b"q"), b"q".to_vec());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            HuffmanCodec::from_bytes(b""),
            Err(HuffError::EmptyInput)
        ));
    }

    #[test]
    fn foreign_symbol_is_rejected() {
        let codec = HuffmanCodec::from_bytes(b"aaabbc").unwrap();
        assert!(matches!(
            codec.encode(b"abz"),
            Err(HuffError::SymbolNotFound(b'z'))
        ));
    }

    #[test]
    fn truncated_payload_is_detected() {
        let data = b"aaabbc";
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let mut encoded = codec.encode(data).unwrap();
        // drop the final code's bits
        encoded.bit_count -= 2;
        let err = decode(&encoded).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream { expected: 6, .. }));
    }

    #[test]
    fn leftover_bits_are_a_mismatch() {
        let data = b"aaabbc";
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let mut encoded = codec.encode(data).unwrap();
        encoded.payload.push(0);
        encoded.bit_count += 8;
        assert!(matches!(
            decode(&encoded).unwrap_err(),
            HuffError::TreeMismatch(_)
        ));
    }

    #[test]
    fn header_table_disagreeing_with_length_is_a_mismatch() {
        let data = b"aaabbc";
        let codec = HuffmanCodec::from_bytes(data).unwrap();
        let mut encoded = codec.encode(data).unwrap();
        encoded.original_len -= 1;
        assert!(matches!(
            decode(&encoded).unwrap_err(),
            HuffError::TreeMismatch(_)
        ));
    }

    #[test]
    fn decoding_against_a_reference_source_works() {
        // a caller holding the original source can rebuild the identical
        // tree and decode with it
        let data = b"reference coupled decode";
        let encoded = HuffmanCodec::from_bytes(data).unwrap().encode(data).unwrap();
        let reference = HuffmanCodec::from_bytes(data).unwrap();
        assert_eq!(reference.decode_payload(&encoded).unwrap(), data.to_vec());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.txt");
        let packed = dir.path().join("input.huff");
        let restored = dir.path().join("restored.txt");

        let data = b"files in, files out";
        fs::write(&source, data).unwrap();
        encode_file(&source, &packed).unwrap();
        decode_file(&packed, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), data.to_vec());
    }

    #[test]
    fn missing_input_reports_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let out = dir.path().join("out.huff");
        assert!(matches!(
            encode_file(&missing, &out),
            Err(HuffError::Source { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_destination_reports_destination_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.txt");
        fs::write(&source, b"some data").unwrap();
        let out = dir.path().join("no-such-dir").join("out.huff");
        assert!(matches!(
            encode_file(&source, &out),
            Err(HuffError::Destination { .. })
        ));
    }

    #[test]
    fn failed_decode_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.huff");
        fs::write(&garbage, b"not a container").unwrap();
        let out = dir.path().join("out.txt");
        assert!(decode_file(&garbage, &out).is_err());
        assert!(!out.exists());
    }
}
