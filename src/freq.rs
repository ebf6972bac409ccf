use std::io::{self, Read};

use crate::error::{HuffError, Result};

/// Number of distinct symbol values: the full byte range.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value in one source.
///
/// Built once per source and immutable afterwards. Symbols that never occur
/// stay at zero and take no part in tree construction.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count every byte in `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        FrequencyTable { counts }
    }

    /// Count every byte the reader yields until it is exhausted.
    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    for &byte in &buf[..n] {
                        counts[byte as usize] += 1;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(FrequencyTable { counts })
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbol values with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    /// Total number of symbols counted, i.e. the source length.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count != 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Wire form for the container header: a `u16` pair count followed by
    /// one `(u8 symbol, u64 LE count)` pair per present symbol, in
    /// ascending symbol order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + self.distinct() * 9);
        bytes.extend_from_slice(&(self.distinct() as u16).to_le_bytes());
        for (symbol, count) in self.symbols() {
            bytes.push(symbol);
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes
    }

    /// Parse the wire form produced by [`to_bytes`](Self::to_bytes).
    ///
    /// Rejects short input, zero counts, and duplicate symbols; any of
    /// those means the header was not produced by an encoder.
    pub fn from_encoded(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(HuffError::Format("frequency table header too short".into()));
        }
        let pairs = u16::from_le_bytes([data[0], data[1]]) as usize;
        if pairs > ALPHABET_SIZE {
            return Err(HuffError::Format(format!(
                "frequency table claims {pairs} distinct symbols"
            )));
        }
        let body = &data[2..];
        if body.len() != pairs * 9 {
            return Err(HuffError::Format(format!(
                "frequency table body is {} bytes, expected {}",
                body.len(),
                pairs * 9
            )));
        }

        let mut counts = [0u64; ALPHABET_SIZE];
        for pair in body.chunks_exact(9) {
            let symbol = pair[0] as usize;
            let mut count_bytes = [0u8; 8];
            count_bytes.copy_from_slice(&pair[1..]);
            let count = u64::from_le_bytes(count_bytes);
            if count == 0 {
                return Err(HuffError::Format(format!(
                    "zero count for symbol {symbol:#04x}"
                )));
            }
            if counts[symbol] != 0 {
                return Err(HuffError::Format(format!(
                    "duplicate entry for symbol {symbol:#04x}"
                )));
            }
            counts[symbol] = count;
        }
        Ok(FrequencyTable { counts })
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.symbols()).finish()
    }
}
