// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! "Bag of cells" serialization.
//!
//! Layout of the generic container:
//! ```text
//! magic:u32 = 0xb5ee9c72
//! flags:u8  = has_idx(1) has_crc32c(1) has_cache_bits(1) unused(2) size(3)
//! off_bytes:u8
//! cells:size roots:size absent:size tot_cells_size:off_bytes
//! root_list:(roots * size)
//! index:(cells * off_bytes)        -- only when has_idx
//! cell_data:tot_cells_size
//! crc32c:u32 (little-endian)       -- only when has_crc32c
//! ```

use std::sync::Arc;

use crc::{CRC_32_ISCSI, Crc};

use super::{BocError, Cell, MAX_CELL_REFS};

const BOC_MAGIC: u32 = 0xb5ee_9c72;
/// Two descriptor bytes, no data, no references.
const MIN_SERIALIZED_CELL_LEN: usize = 2;
const CRC32C: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], BocError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.bytes.len());
        let Some(end) = end else {
            return Err(BocError::UnexpectedEof {
                offset: self.pos,
                needed: n,
            });
        };
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn byte(&mut self) -> Result<u8, BocError> {
        Ok(self.take(1)?[0])
    }

    fn uint(&mut self, width: usize) -> Result<usize, BocError> {
        Ok(self
            .take(width)?
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b)))
    }
}

struct RawCell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<usize>,
    exotic: bool,
}

/// Parse a hex-encoded container, as returned by indexer APIs for `cell`
/// stack slots.
pub fn parse_boc_hex(text: &str) -> Result<Cell, BocError> {
    let bytes = hex::decode(text.trim()).map_err(|e| BocError::InvalidHex(e.to_string()))?;
    parse_boc(&bytes)
}

/// Parse a serialized container and return its first root cell.
pub fn parse_boc(bytes: &[u8]) -> Result<Cell, BocError> {
    let mut r = Reader { bytes, pos: 0 };

    let magic = r.uint(4)? as u32;
    if magic != BOC_MAGIC {
        return Err(BocError::BadMagic(magic));
    }

    let flags = r.byte()?;
    let has_idx = flags & 0x80 != 0;
    let has_crc = flags & 0x40 != 0;
    let size = usize::from(flags & 0x07);
    if !(1..=4).contains(&size) {
        return Err(BocError::InvalidHeader(format!("reference size {size}")));
    }

    let off_bytes = usize::from(r.byte()?);
    if !(1..=8).contains(&off_bytes) {
        return Err(BocError::InvalidHeader(format!("offset size {off_bytes}")));
    }

    let cell_count = r.uint(size)?;
    let root_count = r.uint(size)?;
    let _absent = r.uint(size)?;
    let total_cells_size = r.uint(off_bytes)?;

    if root_count == 0 {
        return Err(BocError::NoRoot);
    }
    if root_count > cell_count {
        return Err(BocError::InvalidHeader(format!(
            "{root_count} roots but only {cell_count} cells"
        )));
    }

    // Counts are bounded by the input before anything is allocated for them.
    let available = bytes.len() - r.pos;
    if total_cells_size > available {
        return Err(BocError::UnexpectedEof {
            offset: r.pos,
            needed: total_cells_size,
        });
    }
    if cell_count > total_cells_size / MIN_SERIALIZED_CELL_LEN {
        return Err(BocError::InvalidHeader(format!(
            "{cell_count} cells cannot fit in {total_cells_size} bytes"
        )));
    }

    let mut roots = Vec::with_capacity(root_count);
    for _ in 0..root_count {
        roots.push(r.uint(size)?);
    }

    if has_idx {
        r.take(cell_count * off_bytes)?;
    }

    let cells_start = r.pos;
    let cell_data = r.take(total_cells_size)?;

    if has_crc {
        let expected = u32::from_le_bytes(
            r.take(4)?
                .try_into()
                .map_err(|_| BocError::InvalidHeader("checksum width".into()))?,
        );
        let computed = CRC32C.checksum(&bytes[..cells_start + total_cells_size]);
        if expected != computed {
            return Err(BocError::ChecksumMismatch { expected, computed });
        }
    }

    let mut cr = Reader {
        bytes: cell_data,
        pos: 0,
    };
    let mut raw = Vec::with_capacity(cell_count);
    for index in 0..cell_count {
        raw.push(read_raw_cell(&mut cr, index, cell_count, size)?);
    }

    // Children always follow their parents, so build back to front.
    let mut built: Vec<Option<Arc<Cell>>> = vec![None; cell_count];
    for (index, cell) in raw.into_iter().enumerate().rev() {
        let mut refs = Vec::with_capacity(cell.refs.len());
        for child in cell.refs {
            let child = built[child].clone().ok_or_else(|| BocError::InvalidCell {
                index,
                reason: format!("reference to unbuilt cell #{child}"),
            })?;
            refs.push(child);
        }
        built[index] = Some(Arc::new(Cell {
            data: cell.data,
            bit_len: cell.bit_len,
            refs,
            exotic: cell.exotic,
        }));
    }

    let root_index = roots[0];
    let root = built
        .get(root_index)
        .cloned()
        .flatten()
        .ok_or(BocError::NoRoot)?;

    Ok(Arc::unwrap_or_clone(root))
}

fn read_raw_cell(
    r: &mut Reader<'_>,
    index: usize,
    cell_count: usize,
    size: usize,
) -> Result<RawCell, BocError> {
    let d1 = r.byte()?;
    let d2 = r.byte()?;

    let ref_count = usize::from(d1 & 0x07);
    let exotic = d1 & 0x08 != 0;
    let with_hashes = d1 & 0x10 != 0;
    let level_mask = d1 >> 5;

    if ref_count > MAX_CELL_REFS {
        return Err(BocError::InvalidCell {
            index,
            reason: format!("{ref_count} references"),
        });
    }

    if with_hashes {
        let hash_count = level_mask.count_ones() as usize + 1;
        r.take(hash_count * (32 + 2))?;
    }

    let data_len = usize::from(d2).div_ceil(2);
    let mut data = r.take(data_len)?.to_vec();
    let bit_len = if d2 % 2 == 0 {
        data_len * 8
    } else {
        let last = data.len() - 1;
        let tag_bits = data[last].trailing_zeros() as usize + 1;
        if data[last] == 0 {
            return Err(BocError::InvalidCell {
                index,
                reason: "missing completion tag".into(),
            });
        }
        data[last] &= !(1u8 << (tag_bits - 1));
        data_len * 8 - tag_bits
    };

    let mut refs = Vec::with_capacity(ref_count);
    for _ in 0..ref_count {
        let child = r.uint(size)?;
        if child <= index || child >= cell_count {
            return Err(BocError::InvalidCell {
                index,
                reason: format!("invalid reference to cell #{child}"),
            });
        }
        refs.push(child);
    }

    Ok(RawCell {
        data,
        bit_len,
        refs,
        exotic,
    })
}

fn width_for(value: usize) -> usize {
    let bits = usize::BITS as usize - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Serialize a single-root container. Cells are numbered in pre-order so that
/// every parent precedes its children.
pub fn serialize_boc(root: &Cell, with_crc: bool) -> Vec<u8> {
    fn visit<'c>(cell: &'c Cell, order: &mut Vec<(&'c Cell, Vec<usize>)>) -> usize {
        let index = order.len();
        order.push((cell, Vec::new()));
        let refs = cell.refs.iter().map(|r| visit(r, order)).collect();
        order[index].1 = refs;
        index
    }

    let mut order = Vec::new();
    visit(root, &mut order);

    let size = width_for(order.len());
    let mut cells = Vec::new();
    for (cell, refs) in &order {
        cells.extend_from_slice(&cell.descriptors());
        cells.extend_from_slice(&cell.padded_data());
        for r in refs {
            cells.extend_from_slice(&r.to_be_bytes()[std::mem::size_of::<usize>() - size..]);
        }
    }
    let off_bytes = width_for(cells.len());

    let mut out = Vec::with_capacity(cells.len() + 32);
    out.extend_from_slice(&BOC_MAGIC.to_be_bytes());
    out.push(if with_crc { 0x40 } else { 0x00 } | size as u8);
    out.push(off_bytes as u8);
    let push_uint = |out: &mut Vec<u8>, value: usize, width: usize| {
        out.extend_from_slice(&value.to_be_bytes()[std::mem::size_of::<usize>() - width..]);
    };
    push_uint(&mut out, order.len(), size);
    push_uint(&mut out, 1, size);
    push_uint(&mut out, 0, size);
    push_uint(&mut out, cells.len(), off_bytes);
    push_uint(&mut out, 0, size);
    out.extend_from_slice(&cells);

    if with_crc {
        let crc = CRC32C.checksum(&out);
        out.extend_from_slice(&crc.to_le_bytes());
    }
    out
}
