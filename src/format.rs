use crate::error::{HuffError, Result};
use crate::freq::FrequencyTable;

/// Marks a huffpress container; bumps if the framing ever changes.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// One encoded artifact, self-describing: the frequency table travels in
/// the header, so decoding never needs the original reference file.
///
/// Layout, all integers little-endian:
/// magic, `u64` original length, `u64` payload bit count, frequency table
/// (see [`FrequencyTable::to_bytes`]), `u64` payload byte length, payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub original_len: u64,
    pub bit_count: u64,
    pub table: FrequencyTable,
    pub payload: Vec<u8>,
}

impl EncodedFile {
    pub fn to_bytes(&self) -> Vec<u8> {
        let table = self.table.to_bytes();
        let mut bytes =
            Vec::with_capacity(MAGIC.len() + 8 * 3 + table.len() + self.payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&self.original_len.to_le_bytes());
        bytes.extend_from_slice(&self.bit_count.to_le_bytes());
        bytes.extend_from_slice(&table);
        bytes.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut input = data;

        let magic = take(&mut input, MAGIC.len())?;
        if magic != MAGIC {
            return Err(HuffError::Format("bad magic".into()));
        }

        let original_len = read_u64(&mut input)?;
        let bit_count = read_u64(&mut input)?;

        let count_bytes = peek(input, 2)?;
        let pair_count = u16::from_le_bytes([count_bytes[0], count_bytes[1]]) as usize;
        let table_len = 2 + pair_count * 9;
        let table = FrequencyTable::from_encoded(take(&mut input, table_len)?)?;

        let payload_len = read_u64(&mut input)? as usize;
        let payload = take(&mut input, payload_len)?.to_vec();
        if !input.is_empty() {
            return Err(HuffError::Format(format!(
                "{} trailing bytes after payload",
                input.len()
            )));
        }
        if payload.len() != (bit_count as usize).div_ceil(8) {
            return Err(HuffError::Format(format!(
                "payload is {} bytes but {bit_count} bits are declared",
                payload.len()
            )));
        }

        Ok(EncodedFile {
            original_len,
            bit_count,
            table,
            payload,
        })
    }
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if input.len() < n {
        return Err(HuffError::Format(format!(
            "container truncated: wanted {n} bytes, {} left",
            input.len()
        )));
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

fn peek<'a>(input: &'a [u8], n: usize) -> Result<&'a [u8]> {
    let mut copy = input;
    take(&mut copy, n)
}

fn read_u64(input: &mut &[u8]) -> Result<u64> {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(take(input, 8)?);
    Ok(u64::from_le_bytes(buf))
}
