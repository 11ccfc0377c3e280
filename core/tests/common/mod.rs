// Minimal ELF writer for test fixtures.
//
// Produces a header, a program header table right after it, and the
// segment payloads packed back to back after the table. No section headers.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const PT_NULL: u32 = 0;
pub const PT_LOAD: u32 = 1;
pub const PT_NOTE: u32 = 4;
pub const PT_GNU_STACK: u32 = 0x6474_e551;

#[derive(Clone)]
pub struct Phdr {
    pub p_type: u32,
    pub paddr: u64,
    pub data: Vec<u8>,
    /// Place the payload at this file offset instead of packing it.
    pub offset: Option<u64>,
    /// Declare this file size instead of `data.len()`.
    pub filesz: Option<u64>,
}

pub struct ElfBuilder {
    is_64: bool,
    entry: u64,
    phdrs: Vec<Phdr>,
}

impl ElfBuilder {
    pub fn elf32(entry: u32) -> Self {
        Self { is_64: false, entry: entry as u64, phdrs: Vec::new() }
    }

    pub fn elf64(entry: u64) -> Self {
        Self { is_64: true, entry, phdrs: Vec::new() }
    }

    pub fn load(self, paddr: u64, data: &[u8]) -> Self {
        self.segment(PT_LOAD, paddr, data)
    }

    pub fn segment(mut self, p_type: u32, paddr: u64, data: &[u8]) -> Self {
        self.phdrs.push(Phdr { p_type, paddr, data: data.to_vec(), offset: None, filesz: None });
        self
    }

    pub fn raw(mut self, phdr: Phdr) -> Self {
        self.phdrs.push(phdr);
        self
    }

    fn ehsize(&self) -> usize {
        if self.is_64 { 64 } else { 52 }
    }

    fn phentsize(&self) -> usize {
        if self.is_64 { 56 } else { 32 }
    }

    pub fn build(&self) -> Vec<u8> {
        let phoff = self.ehsize();
        let data_start = phoff + self.phentsize() * self.phdrs.len();

        let mut offsets = Vec::with_capacity(self.phdrs.len());
        let mut cur = data_start;
        for p in &self.phdrs {
            offsets.push(cur as u64);
            if p.offset.is_none() {
                cur += p.data.len();
            }
        }

        let mut out = Vec::with_capacity(cur);
        // e_ident
        out.extend_from_slice(&[0x7f, b'E', b'L', b'F']);
        out.push(if self.is_64 { 2 } else { 1 }); // EI_CLASS
        out.push(1); // EI_DATA: little-endian
        out.push(1); // EI_VERSION
        out.extend_from_slice(&[0u8; 9]);

        put16(&mut out, 2); // ET_EXEC
        put16(&mut out, if self.is_64 { 0x3e } else { 0x03 });
        put32(&mut out, 1); // e_version
        if self.is_64 {
            put64(&mut out, self.entry);
            put64(&mut out, phoff as u64);
            put64(&mut out, 0); // e_shoff
        } else {
            put32(&mut out, self.entry as u32);
            put32(&mut out, phoff as u32);
            put32(&mut out, 0); // e_shoff
        }
        put32(&mut out, 0); // e_flags
        put16(&mut out, self.ehsize() as u16);
        put16(&mut out, self.phentsize() as u16);
        put16(&mut out, self.phdrs.len() as u16);
        put16(&mut out, if self.is_64 { 64 } else { 40 }); // e_shentsize
        put16(&mut out, 0); // e_shnum
        put16(&mut out, 0); // e_shstrndx
        assert_eq!(out.len(), phoff);

        for (p, packed) in self.phdrs.iter().zip(&offsets) {
            let offset = p.offset.unwrap_or(*packed);
            let filesz = p.filesz.unwrap_or(p.data.len() as u64);
            let vaddr = p.paddr ^ 0x8000_0000;
            let flags = 0x5u32; // R+X
            if self.is_64 {
                put32(&mut out, p.p_type);
                put32(&mut out, flags);
                put64(&mut out, offset);
                put64(&mut out, vaddr);
                put64(&mut out, p.paddr);
                put64(&mut out, filesz);
                put64(&mut out, filesz);
                put64(&mut out, 0x1000);
            } else {
                put32(&mut out, p.p_type);
                put32(&mut out, offset as u32);
                put32(&mut out, vaddr as u32);
                put32(&mut out, p.paddr as u32);
                put32(&mut out, filesz as u32);
                put32(&mut out, filesz as u32);
                put32(&mut out, flags);
                put32(&mut out, 0x1000);
            }
        }
        assert_eq!(out.len(), data_start);

        for p in &self.phdrs {
            if p.offset.is_none() {
                out.extend_from_slice(&p.data);
            }
        }
        out
    }
}

fn put16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `bytes` to a fresh file under the system temp dir.
pub fn write_temp(tag: &str, bytes: &[u8]) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("bootimg-{}-{}-{}.elf", tag, std::process::id(), n));
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

/// Path that does not exist.
pub fn missing_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bootimg-missing-{}-{}.elf", tag, std::process::id()))
}

pub fn le32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(buf[at..at + 4].try_into().unwrap())
}
