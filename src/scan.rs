//! Candidate scanner and validator.
//!
//! An embedded filesystem is emitted as a header of three pointer-sized
//! words, `[entries_ptr][count][count]`, followed immediately by the
//! entry array. The repeated count plus the requirement that
//! `entries_ptr` equals the virtual address of the byte right after the
//! header anchor a hit to its own location and discard nearly all
//! coincidental matches before the entry table is ever walked.

use tracing::debug;

use crate::candidate::Candidate;
use crate::section::SectionView;

/// Largest plausible file size inside an embedded filesystem (~2 GB).
pub const MAX_FILE_SIZE: u64 = 2_000_000_000;

/// Default threshold between unchunked and chunked scanning (16 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Scan parameters, passed explicitly instead of living in process state.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Sections at least this large are scanned in fixed-size windows.
    pub chunk_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Scans a section for embedded filesystems.
///
/// Returns validated candidates in ascending scan order. Both scan modes
/// produce identical results for the same section.
pub fn find_candidates<'a>(section: &'a SectionView<'a>, config: &ScanConfig) -> Vec<Candidate<'a>> {
    let chunked = section.file_size >= config.chunk_size;
    debug!(
        "using {} scan for section {:?}",
        if chunked { "chunked" } else { "un-chunked" },
        section.name
    );

    if chunked {
        find_candidates_chunked(section, config.chunk_size)
    } else {
        scan_buffer(section, section.data, 0)
    }
}

/// Scans the section in fixed-size windows.
///
/// The window stride is rounded up to a multiple of the pointer size, and
/// consecutive windows overlap by `pattern_length - ptr_size` bytes so a
/// header straddling a window boundary is still seen exactly once.
fn find_candidates_chunked<'a>(section: &'a SectionView<'a>, chunk_size: u64) -> Vec<Candidate<'a>> {
    let ptr = section.ptr_size;
    let pattern_len = ptr * 3;

    let stride = (chunk_size.next_multiple_of(ptr as u64) as usize).max(pattern_len);
    let overlap = pattern_len - ptr;

    let data = section.data;
    let mut candidates = Vec::new();
    let mut start = 0usize;

    while start < data.len() {
        let end = (start + stride + overlap).min(data.len());
        candidates.extend(scan_buffer(section, &data[start..end], start as u64));
        start += stride;
    }

    candidates
}

/// Sweeps one buffer on pointer-aligned strides.
///
/// `chunk_offset` is the buffer's position relative to the section start;
/// the self-anchor test needs it to reconstruct each hit's file offset.
fn scan_buffer<'a>(
    section: &'a SectionView<'a>,
    buffer: &[u8],
    chunk_offset: u64,
) -> Vec<Candidate<'a>> {
    let ptr = section.ptr_size;
    let pattern_len = ptr * 3;

    let mut candidates = Vec::new();
    if buffer.len() < pattern_len {
        return candidates;
    }

    for i in (0..=buffer.len() - pattern_len).step_by(ptr) {
        let addr = section.read_ptr(&buffer[i..i + ptr]);
        let s1 = section.read_ptr(&buffer[i + ptr..i + ptr * 2]);
        let s2 = section.read_ptr(&buffer[i + ptr * 2..i + ptr * 3]);

        // Empty filesystems cannot be embedded, so a zero count is noise.
        if s1 != s2 || s1 == 0 || addr == 0 {
            continue;
        }
        if !section.contains_addr(addr) {
            continue;
        }

        // The entries pointer must equal the virtual address of the word
        // immediately following the header at this position.
        let here = section.file_offset + chunk_offset + i as u64;
        if addr != section.va_of(here + pattern_len as u64) {
            continue;
        }

        let candidate = Candidate::new(section, addr, s1);
        if !is_valid_candidate(section, &candidate) {
            continue;
        }

        debug!("found candidate: {addr:#010x} at file offset {here:#010x} ({s1} entries)");
        candidates.push(candidate);
    }

    candidates
}

/// Walks a raw hit's entry table and checks every record.
///
/// One malformed entry means the header was a coincidence, so the whole
/// candidate is dropped. Rejection is silent: a table that runs off the
/// section end is a rejection too, never an error.
fn is_valid_candidate(section: &SectionView<'_>, candidate: &Candidate<'_>) -> bool {
    let ptr = section.ptr_size;
    let entry_size = candidate.entry_size();

    for i in 0..candidate.entry_count {
        let offset = candidate.section_offset + i * entry_size;
        let Ok(raw) = section.read_at(offset, entry_size) else {
            return false;
        };

        let name_ptr = section.read_ptr(&raw[..ptr]);
        let name_len = section.read_ptr(&raw[ptr..ptr * 2]);
        let data_ptr = section.read_ptr(&raw[ptr * 2..ptr * 3]);
        let data_len = section.read_ptr(&raw[ptr * 3..ptr * 4]);

        if name_len == 0 || name_len > 255 {
            return false;
        }
        if !section.contains_addr(name_ptr) {
            return false;
        }
        if data_ptr != 0 && !section.contains_addr(data_ptr) {
            return false;
        }
        if data_len > MAX_FILE_SIZE {
            return false;
        }
    }

    true
}
