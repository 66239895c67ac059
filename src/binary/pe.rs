//! PE front-end.

use object::{Architecture, Object};

use super::Executable;
use crate::error::{Error, Result};
use crate::section::SectionView;

pub struct Pe<'data> {
    file: object::File<'data>,
}

impl<'data> Pe<'data> {
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        Ok(Self {
            file: object::File::parse(data)?,
        })
    }

    fn ptr_size(&self) -> Result<usize> {
        match self.file.architecture() {
            Architecture::I386 | Architecture::Arm => Ok(4),
            Architecture::X86_64 | Architecture::Aarch64 => Ok(8),
            _ => Err(Error::UnsupportedArchitecture("PE")),
        }
    }
}

impl<'data> Executable<'data> for Pe<'data> {
    fn format_name(&self) -> &'static str {
        "PE"
    }

    fn rodata(&self) -> Result<SectionView<'data>> {
        self.section(".rdata")
    }

    fn section(&self, name: &str) -> Result<SectionView<'data>> {
        let section = super::locate(&self.file, name)?;
        let ptr_size = self.ptr_size()?;

        // Parsed PE section addresses include the image base from the
        // optional header; `view_of` splits it back out.
        let base_addr = self.file.relative_address_base();
        super::view_of(
            &section,
            name,
            ptr_size,
            super::byte_order(&self.file),
            base_addr,
        )
    }
}
