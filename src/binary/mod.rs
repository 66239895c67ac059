//! Executable container front-ends.
//!
//! Each supported format (ELF, PE, Mach-O) knows how to locate its
//! read-only data section and supply the geometry the scanner needs:
//! pointer size, byte order, and base addresses. Container parsing is
//! delegated to the `object` crate.

mod elf;
mod macho;
mod pe;

use object::{Object, ObjectSection};

use crate::error::{Error, Result};
use crate::section::{ByteOrder, SectionView};

pub use elf::Elf;
pub use macho::MachO;
pub use pe::Pe;

/// A recognized executable container.
pub trait Executable<'data> {
    fn format_name(&self) -> &'static str;

    /// The read-only data section embedded filesystems are emitted into.
    fn rodata(&self) -> Result<SectionView<'data>>;

    /// Looks up an arbitrary section by name.
    fn section(&self, name: &str) -> Result<SectionView<'data>>;
}

/// Identifies the container by its leading bytes.
pub fn detect<'data>(data: &'data [u8]) -> Result<Box<dyn Executable<'data> + 'data>> {
    if data.starts_with(b"MZ") {
        return Ok(Box::new(Pe::parse(data)?));
    }
    if data.starts_with(b"\x7fELF") {
        return Ok(Box::new(Elf::parse(data)?));
    }
    if is_macho_magic(data) {
        return Ok(Box::new(MachO::parse(data)?));
    }

    Err(Error::UnrecognizedFormat)
}

fn is_macho_magic(data: &[u8]) -> bool {
    const MAGICS: [[u8; 4]; 4] = [
        [0xfe, 0xed, 0xfa, 0xce],
        [0xfe, 0xed, 0xfa, 0xcf],
        [0xce, 0xfa, 0xed, 0xfe],
        [0xcf, 0xfa, 0xed, 0xfe],
    ];
    MAGICS.iter().any(|magic| data.starts_with(magic))
}

fn locate<'data, 'file>(
    file: &'file object::File<'data>,
    name: &str,
) -> Result<object::Section<'data, 'file>> {
    file.section_by_name(name)
        .ok_or_else(|| Error::SectionMissing(name.to_string()))
}

fn byte_order(file: &object::File<'_>) -> ByteOrder {
    match file.endianness() {
        object::Endianness::Little => ByteOrder::Little,
        object::Endianness::Big => ByteOrder::Big,
    }
}

/// Assembles a section view from an `object` section.
///
/// `base_addr` is subtracted from the section's address, so formats whose
/// parsed addresses already include the image base report the plain
/// on-disk virtual address plus a separate base.
fn view_of<'data>(
    section: &object::Section<'data, '_>,
    name: &str,
    ptr_size: usize,
    byte_order: ByteOrder,
    base_addr: u64,
) -> Result<SectionView<'data>> {
    let (file_offset, _) = section
        .file_range()
        .ok_or_else(|| Error::SectionMissing(name.to_string()))?;
    let data = section.data()?;

    Ok(SectionView {
        name: name.to_string(),
        virtual_addr: section.address() - base_addr,
        virtual_size: section.size(),
        base_addr,
        file_offset,
        file_size: data.len() as u64,
        ptr_size,
        byte_order,
        data,
    })
}
