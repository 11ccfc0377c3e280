// ## File: `src/segments/elf.rs`
//! ELF-backed segment source.
//!
//! Parsing is delegated to `goblin`; this file only walks the program header
//! table and slices each `PT_LOAD` payload (`p_offset .. p_offset + p_filesz`)
//! out of the raw file bytes. `p_paddr` is the load address, not `p_vaddr`.

use goblin::elf::program_header::{ProgramHeader, PT_LOAD};
use goblin::elf::Elf;

use crate::segments::types::{Segment, SegmentSource};
use crate::types::BootImageError;
use crate::utils::to_u32;

/// A parsed ELF image borrowing the file bytes it came from.
pub struct ElfSource<'a> {
    elf: Elf<'a>,
    bytes: &'a [u8],
}

impl<'a> ElfSource<'a> {
    /// Parse `bytes` as ELF (32- or 64-bit, either endianness).
    pub fn parse(bytes: &'a [u8]) -> Result<Self, BootImageError> {
        let elf = Elf::parse(bytes)?;
        Ok(Self { elf, bytes })
    }

    pub fn is_64(&self) -> bool {
        self.elf.is_64
    }

    /// Program headers of type `PT_LOAD`, in table order.
    pub fn load_headers(&self) -> impl Iterator<Item = &ProgramHeader> + '_ {
        self.elf.program_headers.iter().filter(|ph| ph.p_type == PT_LOAD)
    }

    fn payload_of(&self, index: usize, ph: &ProgramHeader, size: u32) -> Result<&'a [u8], BootImageError> {
        let bytes: &'a [u8] = self.bytes;
        let start = usize::try_from(ph.p_offset).ok();
        let end = start.and_then(|s| s.checked_add(size as usize));
        match (start, end) {
            (Some(start), Some(end)) if end <= bytes.len() => Ok(&bytes[start..end]),
            _ => Err(BootImageError::Malformed(format!(
                "PT_LOAD segment {} file range {:#x}+{:#x} exceeds file length {:#x}",
                index,
                ph.p_offset,
                size,
                bytes.len()
            ))),
        }
    }
}

impl SegmentSource for ElfSource<'_> {
    fn entry_point(&self) -> Result<u32, BootImageError> {
        to_u32("entry point", self.elf.entry)
    }

    fn segments(&self) -> Result<Vec<Segment>, BootImageError> {
        let mut out = Vec::new();
        for (index, ph) in self.load_headers().enumerate() {
            let physical_address = to_u32("p_paddr", ph.p_paddr)?;
            let size = to_u32("p_filesz", ph.p_filesz)?;
            let payload = self.payload_of(index, ph, size)?;
            out.push(Segment::with_declared_size(physical_address, size, payload.to_vec())?);
        }
        to_u32("segment count", out.len() as u64)?;
        Ok(out)
    }
}
