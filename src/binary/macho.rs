//! Mach-O front-end.

use super::Executable;
use crate::error::Result;
use crate::section::SectionView;

pub struct MachO<'data> {
    file: object::File<'data>,
}

impl<'data> MachO<'data> {
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        Ok(Self {
            file: object::File::parse(data)?,
        })
    }
}

impl<'data> Executable<'data> for MachO<'data> {
    fn format_name(&self) -> &'static str {
        "MACHO"
    }

    fn rodata(&self) -> Result<SectionView<'data>> {
        self.section("__rodata")
    }

    fn section(&self, name: &str) -> Result<SectionView<'data>> {
        let section = super::locate(&self.file, name)?;

        // 32-bit support on macOS ended before the embedding toolchain
        // shipped, so every target of interest uses 8-byte pointers.
        super::view_of(&section, name, 8, super::byte_order(&self.file), 0)
    }
}
