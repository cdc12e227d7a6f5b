//! Program Loader.
//!
//! This module provides utilities for placing a program image in memory. It performs:
//! 1. **Binary loading:** Reads an image file from disk into a byte buffer.
//! 2. **Format detection:** Distinguishes ELF images from flat binaries by their magic.
//! 3. **Placement:** Copies a flat binary to the memory base, or every `PT_LOAD`
//!    segment of an ELF32 RISC-V executable to its physical address, zero-filling
//!    the part of each segment beyond its file data.

use std::fs;
use std::path::Path;

use object::Endianness;
use object::elf::{ELFCLASS32, ELFMAG, EM_RISCV, ET_EXEC, PT_LOAD};
use object::read::elf::{ElfFile32, FileHeader, ProgramHeader};
use tracing::{debug, info};

use crate::common::error::{SimError, SimResult};
use crate::soc::memory::Memory;

/// Offset of the class byte (32/64-bit) in `e_ident`.
const EI_CLASS: usize = 4;

/// Format of a loaded program image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raw bytes placed at the memory base.
    Flat,
    /// ELF32 executable placed by its program headers.
    Elf,
}

/// Result of placing an image in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Detected format.
    pub format: ImageFormat,
    /// Entry point from the ELF header; flat images have none.
    pub entry: Option<u32>,
    /// `(address, size in bytes)` of every region written.
    pub segments: Vec<(u32, usize)>,
}

/// Loads a binary file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> SimResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Returns `true` if `data` starts with the ELF magic.
pub fn is_elf(data: &[u8]) -> bool {
    data.starts_with(&ELFMAG)
}

/// Places a program image in memory.
///
/// # Arguments
///
/// * `mem`  - Memory to load into.
/// * `data` - The raw image; ELF if it starts with the ELF magic, flat otherwise.
///
/// # Errors
///
/// [`SimError::Elf`] or [`SimError::UnsupportedImage`] for bad ELF files and
/// [`SimError::ImageOutOfRange`] if any byte would land outside memory.
pub fn load_image(mem: &mut Memory, data: &[u8]) -> SimResult<LoadedImage> {
    if is_elf(data) {
        load_elf(mem, data)
    } else {
        let base = mem.base();
        mem.load(base, data)?;
        info!("loaded {} byte flat image at {:#010x}", data.len(), base);
        Ok(LoadedImage {
            format: ImageFormat::Flat,
            entry: None,
            segments: vec![(base, data.len())],
        })
    }
}

/// Places the `PT_LOAD` segments of an ELF32 RISC-V executable.
fn load_elf(mem: &mut Memory, data: &[u8]) -> SimResult<LoadedImage> {
    if data.get(EI_CLASS) != Some(&ELFCLASS32) {
        return Err(SimError::UnsupportedImage("a 64-bit ELF".to_string()));
    }

    let elf = ElfFile32::<Endianness>::parse(data).map_err(|e| SimError::Elf(e.to_string()))?;
    let endian = elf.endian();
    let header = elf.elf_header();

    let machine = header.e_machine(endian);
    if machine != EM_RISCV {
        return Err(SimError::UnsupportedImage(format!("machine {machine}")));
    }
    let kind = header.e_type(endian);
    if kind != ET_EXEC {
        return Err(SimError::UnsupportedImage(format!("ELF type {kind}")));
    }

    let mut segments = Vec::new();
    for ph in elf.elf_program_headers() {
        if ph.p_type(endian) != PT_LOAD {
            continue;
        }
        let addr = ph.p_paddr(endian);
        let file_data = ph
            .data(endian, data)
            .map_err(|()| SimError::Elf(format!("segment at {addr:#010x} exceeds file")))?;
        let mem_size = ph.p_memsz(endian) as usize;
        let _ = mem.check_range(addr, mem_size.max(file_data.len()))?;

        mem.load(addr, file_data)?;
        if mem_size > file_data.len() {
            let bss = vec![0u8; mem_size - file_data.len()];
            mem.load(addr.wrapping_add(file_data.len() as u32), &bss)?;
        }
        debug!(
            "PT_LOAD {:#010x}: {:#x} file bytes, {:#x} memory bytes",
            addr,
            file_data.len(),
            mem_size
        );
        segments.push((addr, mem_size.max(file_data.len())));
    }

    let entry = header.e_entry(endian);
    info!("loaded ELF with {} segments, entry {:#010x}", segments.len(), entry);
    Ok(LoadedImage {
        format: ImageFormat::Elf,
        entry: Some(entry),
        segments,
    })
}
