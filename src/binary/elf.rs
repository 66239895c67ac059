//! ELF front-end.

use object::Object;

use super::Executable;
use crate::error::Result;
use crate::section::SectionView;

pub struct Elf<'data> {
    file: object::File<'data>,
}

impl<'data> Elf<'data> {
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        Ok(Self {
            file: object::File::parse(data)?,
        })
    }
}

impl<'data> Executable<'data> for Elf<'data> {
    fn format_name(&self) -> &'static str {
        "ELF"
    }

    fn rodata(&self) -> Result<SectionView<'data>> {
        self.section(".rodata")
    }

    fn section(&self, name: &str) -> Result<SectionView<'data>> {
        let section = super::locate(&self.file, name)?;
        let ptr_size = if self.file.is_64() { 8 } else { 4 };

        // sh_size is the uncompressed size; compressed sections are not
        // supported here.
        super::view_of(&section, name, ptr_size, super::byte_order(&self.file), 0)
    }
}
