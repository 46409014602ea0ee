//! The on-disk archive: a compressed payload together with the decode table needed to
//! restore it.
//!
//! Layout (all integers big-endian):
//!
//! | field      | size                 | notes                                        |
//! |------------|----------------------|----------------------------------------------|
//! | magic      | 3                    | "ATZ"                                        |
//! | version    | 1                    | currently 1                                  |
//! | flags      | 1                    | bit 0: transform used, bit 1: text payload   |
//! | symbols    | 2                    | number of code table entries, 0-256          |
//! | per symbol | 2 + ceil(len/8)      | byte, code length (1-255), packed code bits  |
//! | extra      | 1                    | significant bits in the last payload byte    |
//! | length     | 8                    | payload length in bytes                      |
//! | payload    | length               |                                              |
//!
//! A text payload holds the Huffman bits as ASCII '0'/'1' characters instead of packed
//! bytes; it is written by the encode-only tool mode.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, trace};

use crate::bitstream::bitstring::BitString;
use crate::error::{AtError, Result};
use crate::huffman_coding::huffman::CodeTable;

const MAGIC: &[u8; 3] = b"ATZ";
const VERSION: u8 = 1;

bitflags::bitflags! {
    /// How the payload was produced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ArchiveFlags: u8 {
        const TRANSFORM = 0b0000_0001;
        const TEXT      = 0b0000_0010;
    }
}

/// Everything needed to restore the original data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// The BWT and MTF stages were applied before Huffman coding.
    pub use_transform: bool,
    /// Payload is '0'/'1' text rather than packed bits.
    pub text: bool,
    /// Decode table. Carries the pad metadata when the payload is packed, and none for text.
    pub table: CodeTable,
    pub payload: Vec<u8>,
}

impl Archive {
    pub fn flags(&self) -> ArchiveFlags {
        let mut flags = ArchiveFlags::empty();
        flags.set(ArchiveFlags::TRANSFORM, self.use_transform);
        flags.set(ArchiveFlags::TEXT, self.text);
        flags
    }
}

/// Write an archive to any writer. Returns the number of bytes written.
///
/// A packed archive whose table has no pad metadata is refused with a Precondition error,
/// nothing is written in that case.
pub fn write_archive<W: Write>(writer: &mut W, archive: &Archive) -> Result<usize> {
    let extra = match (archive.text, archive.table.extra()) {
        (true, _) => 0,
        (false, Some(extra)) => extra,
        (false, None) => {
            return Err(AtError::Precondition(
                "packed payload without pad metadata in its decode table".to_string(),
            ))
        }
    };
    for (symbol, code) in archive.table.iter() {
        if code.is_empty() || code.len() > u8::MAX as usize {
            return Err(AtError::Format(format!(
                "code for symbol {} has unsupported length {}",
                symbol,
                code.len()
            )));
        }
    }

    writer.write_all(MAGIC)?;
    writer.write_u8(VERSION)?;
    writer.write_u8(archive.flags().bits())?;
    writer.write_u16::<BigEndian>(archive.table.len() as u16)?;
    let mut written = MAGIC.len() + 4;

    for (symbol, code) in archive.table.iter() {
        writer.write_u8(symbol)?;
        writer.write_u8(code.len() as u8)?;
        writer.write_all(code.as_bytes())?;
        written += 2 + code.as_bytes().len();
    }

    writer.write_u8(extra)?;
    writer.write_u64::<BigEndian>(archive.payload.len() as u64)?;
    writer.write_all(&archive.payload)?;
    writer.flush()?;
    written += 9 + archive.payload.len();

    debug!(
        "Wrote archive: {} table entries, {} payload bytes, {} bytes total",
        archive.table.len(),
        archive.payload.len(),
        written
    );
    Ok(written)
}

/// Read an archive written by write_archive(). The reader must hold exactly one archive.
pub fn read_archive<R: Read>(reader: &mut R) -> Result<Archive> {
    read_fields(reader).map_err(|e| match e {
        AtError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            AtError::Format("archive is truncated".to_string())
        }
        other => other,
    })
}

fn read_fields<R: Read>(reader: &mut R) -> Result<Archive> {
    let mut magic = [0_u8; 3];
    reader.read_exact(&mut magic)?;
    if magic != *MAGIC {
        return Err(AtError::Format("not an atzip archive (bad magic)".to_string()));
    }
    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(AtError::Format(format!("unsupported version {}", version)));
    }
    let flags_byte = reader.read_u8()?;
    let flags = ArchiveFlags::from_bits(flags_byte)
        .ok_or_else(|| AtError::Format(format!("unknown flags {:#04x}", flags_byte)))?;

    let symbols = reader.read_u16::<BigEndian>()? as usize;
    if symbols > 256 {
        return Err(AtError::Format(format!("{} table entries is more than 256", symbols)));
    }

    let mut table = CodeTable::new();
    for _ in 0..symbols {
        let symbol = reader.read_u8()?;
        let code_len = reader.read_u8()? as usize;
        if code_len == 0 {
            return Err(AtError::Format(format!("symbol {} has an empty code", symbol)));
        }
        let mut packed = vec![0_u8; (code_len + 7) / 8];
        reader.read_exact(&mut packed)?;
        let code = BitString::from_bytes(packed, code_len)
            .ok_or_else(|| AtError::Format("code length mismatch".to_string()))?;
        trace!("Table entry {} -> {}", symbol, code);
        if table.insert(symbol, code).is_some() {
            return Err(AtError::Format(format!("symbol {} appears twice", symbol)));
        }
    }
    if !table.is_prefix_free() {
        return Err(AtError::Format("decode table is not prefix free".to_string()));
    }

    let extra = reader.read_u8()?;
    if flags.contains(ArchiveFlags::TEXT) {
        if extra != 0 {
            return Err(AtError::Format(format!(
                "text payload with pad metadata {}",
                extra
            )));
        }
    } else {
        table.set_extra(extra);
    }

    let length = reader.read_u64::<BigEndian>()?;
    let mut payload = Vec::new();
    (&mut *reader).take(length).read_to_end(&mut payload)?;
    if payload.len() as u64 != length {
        return Err(AtError::Format(format!(
            "payload truncated: expected {} bytes, found {}",
            length,
            payload.len()
        )));
    }
    let mut probe = [0_u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(AtError::Format("trailing bytes after payload".to_string()));
    }

    debug!(
        "Read archive: {} table entries, {} payload bytes",
        table.len(),
        payload.len()
    );
    Ok(Archive {
        use_transform: flags.contains(ArchiveFlags::TRANSFORM),
        text: flags.contains(ArchiveFlags::TEXT),
        table,
        payload,
    })
}
