//! Test-only builders for synthetic sections and embedded-filesystem
//! images.

use crate::section::{ByteOrder, SectionView};

/// Wraps raw bytes in a section view with the given geometry.
pub(crate) fn section<'a>(
    data: &'a [u8],
    ptr_size: usize,
    byte_order: ByteOrder,
    virtual_addr: u64,
    base_addr: u64,
    file_offset: u64,
) -> SectionView<'a> {
    SectionView {
        name: ".rodata".to_string(),
        virtual_addr,
        virtual_size: data.len() as u64,
        base_addr,
        file_offset,
        file_size: data.len() as u64,
        ptr_size,
        byte_order,
        data,
    }
}

/// Offsets of an appended filesystem image, relative to the section start.
pub(crate) struct FsLayout {
    pub header_offset: usize,
    pub entries_offset: usize,
}

/// Appends a well-formed embedded filesystem to `bytes`.
///
/// `va_plus_base` is the virtual address of the section start (including
/// any image base); all emitted pointers are virtual addresses. An entry
/// with `None` data is a directory record with a zero data pointer.
pub(crate) fn append_fs(
    bytes: &mut Vec<u8>,
    va_plus_base: u64,
    ptr: usize,
    order: ByteOrder,
    entries: &[(&str, Option<&[u8]>)],
) -> FsLayout {
    while bytes.len() % ptr != 0 {
        bytes.push(0);
    }

    let header_offset = bytes.len();
    let entries_offset = header_offset + ptr * 3;
    let entry_size = ptr * 4 + 16;

    let mut cursor = entries_offset + entries.len() * entry_size;
    let name_offsets: Vec<usize> = entries
        .iter()
        .map(|(name, _)| {
            let at = cursor;
            cursor += name.len();
            at
        })
        .collect();
    let data_offsets: Vec<Option<usize>> = entries
        .iter()
        .map(|(_, data)| {
            data.map(|d| {
                let at = cursor;
                cursor += d.len();
                at
            })
        })
        .collect();

    push_word(bytes, va_plus_base + entries_offset as u64, ptr, order);
    push_word(bytes, entries.len() as u64, ptr, order);
    push_word(bytes, entries.len() as u64, ptr, order);

    for (i, (name, data)) in entries.iter().enumerate() {
        push_word(bytes, va_plus_base + name_offsets[i] as u64, ptr, order);
        push_word(bytes, name.len() as u64, ptr, order);
        match (data, data_offsets[i]) {
            (Some(d), Some(at)) => {
                push_word(bytes, va_plus_base + at as u64, ptr, order);
                push_word(bytes, d.len() as u64, ptr, order);
            }
            _ => {
                push_word(bytes, 0, ptr, order);
                push_word(bytes, 0, ptr, order);
            }
        }
        bytes.extend_from_slice(&hash_for(i));
    }

    for (name, _) in entries {
        bytes.extend_from_slice(name.as_bytes());
    }
    for (_, data) in entries {
        if let Some(d) = data {
            bytes.extend_from_slice(d);
        }
    }

    FsLayout {
        header_offset,
        entries_offset,
    }
}

/// Deterministic per-entry hash bytes.
pub(crate) fn hash_for(index: usize) -> [u8; 16] {
    [0xA0u8.wrapping_add(index as u8); 16]
}

pub(crate) fn push_word(bytes: &mut Vec<u8>, value: u64, ptr: usize, order: ByteOrder) {
    match (ptr, order) {
        (4, ByteOrder::Little) => bytes.extend_from_slice(&(value as u32).to_le_bytes()),
        (4, ByteOrder::Big) => bytes.extend_from_slice(&(value as u32).to_be_bytes()),
        (8, ByteOrder::Little) => bytes.extend_from_slice(&value.to_le_bytes()),
        (8, ByteOrder::Big) => bytes.extend_from_slice(&value.to_be_bytes()),
        (sz, _) => panic!("invalid pointer size `{sz}`"),
    }
}

/// Overwrites one pointer-sized word in place.
pub(crate) fn put_word(bytes: &mut [u8], offset: usize, value: u64, ptr: usize, order: ByteOrder) {
    let slot = &mut bytes[offset..offset + ptr];
    match (ptr, order) {
        (4, ByteOrder::Little) => slot.copy_from_slice(&(value as u32).to_le_bytes()),
        (4, ByteOrder::Big) => slot.copy_from_slice(&(value as u32).to_be_bytes()),
        (8, ByteOrder::Little) => slot.copy_from_slice(&value.to_le_bytes()),
        (8, ByteOrder::Big) => slot.copy_from_slice(&value.to_be_bytes()),
        (sz, _) => panic!("invalid pointer size `{sz}`"),
    }
}
