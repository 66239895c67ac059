//! Validated candidates and lazy entry materialization.

use crate::error::{Error, Result};
use crate::section::SectionView;

/// Raw content location inside the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    /// Virtual address of the content; zero for directories.
    pub addr: u64,
    pub size: u64,
}

/// A validated embedded-filesystem header.
///
/// Borrows the section view it was found in; candidates do not outlive the
/// scan's section.
#[derive(Debug)]
pub struct Candidate<'a> {
    /// Virtual address of the first entry record.
    pub addr: u64,
    pub entry_count: u64,
    /// `addr` translated to a section-relative offset.
    pub section_offset: u64,

    section: &'a SectionView<'a>,
}

impl<'a> Candidate<'a> {
    pub(crate) fn new(section: &'a SectionView<'a>, addr: u64, entry_count: u64) -> Self {
        Self {
            addr,
            entry_count,
            section_offset: section.sec_of(addr),
            section,
        }
    }

    /// Size of one entry record: four pointers plus the 16-byte hash.
    pub fn entry_size(&self) -> u64 {
        self.section.ptr_size as u64 * 4 + 16
    }

    /// Absolute file offset of the entry table.
    pub fn file_offset(&self) -> u64 {
        self.section.file_of(self.addr)
    }

    /// Decodes the entry at `index`.
    ///
    /// Each call is independent; iteration can be restarted at any index.
    pub fn entry(&self, index: u64) -> Result<Entry<'a>> {
        if index >= self.entry_count {
            return Err(Error::EntryOutOfRange {
                index,
                count: self.entry_count,
            });
        }

        let offset = self.section_offset + index * self.entry_size();
        let raw = self.section.read_at(offset, self.entry_size())?;
        Entry::decode(raw, self.section)
    }

    /// Iterates over all entries in stored order.
    pub fn entries(&self) -> impl Iterator<Item = Result<Entry<'a>>> + '_ {
        (0..self.entry_count).map(move |i| self.entry(i))
    }
}

/// One file or directory record.
#[derive(Debug)]
pub struct Entry<'a> {
    pub name: String,
    pub data: Blob,
    /// Content hash as emitted by the embedding toolchain; opaque here.
    pub hash: [u8; 16],
    /// Derived from the name's trailing `/`.
    pub is_dir: bool,

    section: &'a SectionView<'a>,
}

impl<'a> Entry<'a> {
    /// Decodes one raw entry record and resolves its name.
    fn decode(raw: &[u8], section: &'a SectionView<'a>) -> Result<Self> {
        let ptr = section.ptr_size;

        let name_ptr = section.read_ptr(&raw[..ptr]);
        let name_len = section.read_ptr(&raw[ptr..ptr * 2]);
        let data_ptr = section.read_ptr(&raw[ptr * 2..ptr * 3]);
        let data_len = section.read_ptr(&raw[ptr * 3..ptr * 4]);

        let mut hash = [0u8; 16];
        hash.copy_from_slice(&raw[ptr * 4..ptr * 4 + 16]);

        let name_bytes = section.read_at(section.sec_of(name_ptr), name_len)?;
        let name = String::from_utf8_lossy(name_bytes).into_owned();
        let is_dir = name.ends_with('/');

        Ok(Self {
            name,
            data: Blob {
                addr: data_ptr,
                size: data_len,
            },
            hash,
            is_dir,
            section,
        })
    }

    /// Fetches the entry's content.
    ///
    /// Directories carry no content and read as empty.
    pub fn read(&self) -> Result<Vec<u8>> {
        if self.data.addr == 0 {
            return Ok(Vec::new());
        }
        let bytes = self
            .section
            .read_at(self.section.sec_of(self.data.addr), self.data.size)?;
        Ok(bytes.to_vec())
    }
}
