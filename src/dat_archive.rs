use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1252;
use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    ByteReader, ByteReaderError, CompressionError, CompressionFormat, DatError, Endian,
};

type Result<T> = std::result::Result<T, DatError>;

/// The last 8 bytes of the file: index block size, then total file size.
const TAIL_SIZE: u64 = 8;

/// Name length, flag and the three sizes. Real records also carry a name.
const MIN_RECORD_SIZE: usize = 4 + 1 + 4 + 4 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatEntry {
    name: Vec<u8>,
    compressed: bool,
    uncompressed_size: u32,
    compressed_size: u32,
    offset: u32,
}

impl DatEntry {
    /// The path exactly as stored, backslashes included.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Name decoded for display. Archives predate UTF-8, so the bytes are
    /// treated as Windows-1252.
    pub fn display_name(&self) -> String {
        let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(&self.name);
        decoded.into_owned()
    }

    /// The component after the last backslash.
    pub fn file_name(&self) -> &[u8] {
        match self.name.iter().rposition(|b| *b == b'\\') {
            Some(index) => &self.name[index + 1..],
            None => &self.name,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn uncompressed_size(&self) -> u32 {
        self.uncompressed_size
    }

    pub fn compressed_size(&self) -> u32 {
        self.compressed_size
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of bytes the payload occupies on disk.
    pub fn stored_size(&self) -> u32 {
        if self.compressed {
            self.compressed_size
        } else {
            self.uncompressed_size
        }
    }

    fn read(reader: &mut ByteReader) -> std::result::Result<Self, ByteReaderError> {
        let name_length = reader.read_u32()? as usize;
        let name = reader.read_bytes(name_length)?;
        let compressed = reader.read_u8()? != 0;
        let uncompressed_size = reader.read_u32()?;
        let compressed_size = reader.read_u32()?;
        let offset = reader.read_u32()?;
        Ok(DatEntry {
            name,
            compressed,
            uncompressed_size,
            compressed_size,
            offset,
        })
    }
}

/// Offset of the entry count, derived from the two trailing integers.
pub fn resolve_index_location(index_block_size: u32, total_file_size: u32) -> Result<u64> {
    (total_file_size as u64)
        .checked_sub(index_block_size as u64)
        .and_then(|v| v.checked_sub(TAIL_SIZE))
        .ok_or_else(|| {
            DatError::CorruptIndex(format!(
                "index block of {} bytes does not fit in a file of {} bytes",
                index_block_size, total_file_size
            ))
        })
}

fn allocate(length: usize) -> Result<Vec<u8>> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer
        .try_reserve_exact(length)
        .map_err(|_| DatError::AllocationFailure(length))?;
    Ok(buffer)
}

fn decompression_error(entry: &DatEntry, error: CompressionError) -> DatError {
    match error {
        CompressionError::AllocationFailure(length) => DatError::AllocationFailure(length),
        e => DatError::DecompressionFailed(entry.display_name(), e),
    }
}

fn parse_index(block: &[u8]) -> Result<Vec<DatEntry>> {
    let mut reader = ByteReader::new(block, Endian::Little);
    let count = reader
        .read_u32()
        .map_err(|e| DatError::CorruptIndex(e.to_string()))? as usize;
    if count > reader.remaining() / MIN_RECORD_SIZE {
        return Err(DatError::CorruptIndex(format!(
            "{} entries cannot fit in an index block of {} bytes",
            count,
            block.len()
        )));
    }

    let mut entries: Vec<DatEntry> = Vec::new();
    entries
        .try_reserve_exact(count)
        .map_err(|_| DatError::AllocationFailure(count * std::mem::size_of::<DatEntry>()))?;
    for i in 0..count {
        let entry = DatEntry::read(&mut reader)
            .map_err(|e| DatError::CorruptIndex(format!("entry {}: {}", i, e)))?;
        if entry.name.is_empty() {
            return Err(DatError::CorruptIndex(format!("entry {}: empty name", i)));
        }
        entries.push(entry);
    }
    if reader.remaining() > 0 {
        debug!(
            "Ignoring {} trailing bytes after the archive index",
            reader.remaining()
        );
    }
    Ok(entries)
}

/// An opened DAT2 container. The index is loaded once by `from_reader` and
/// never changes afterward.
pub struct DatArchive<R> {
    source: Mutex<R>,
    file_size: u32,
    entries: Vec<DatEntry>,
    lookup: FxHashMap<Vec<u8>, usize>,
}

impl DatArchive<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening archive {}", path.display());
        let file = File::open(path)?;
        DatArchive::from_reader(file)
    }
}

impl<R: Read + Seek> DatArchive<R> {
    pub fn from_reader(mut reader: R) -> Result<Self> {
        // Read the trailer.
        let actual_size = reader.seek(SeekFrom::End(0))?;
        if actual_size < TAIL_SIZE {
            return Err(DatError::CorruptIndex(format!(
                "file of {} bytes is too small to hold an index",
                actual_size
            )));
        }
        reader.seek(SeekFrom::End(-(TAIL_SIZE as i64)))?;
        let index_block_size = reader.read_u32::<LittleEndian>()?;
        let file_size = reader.read_u32::<LittleEndian>()?;
        if file_size as u64 != actual_size {
            return Err(DatError::CorruptIndex(format!(
                "archive declares {} bytes but the file holds {}",
                file_size, actual_size
            )));
        }

        // Pull the whole index block into memory and parse it from there.
        let index_offset = resolve_index_location(index_block_size, file_size)?;
        let block_length = index_block_size as usize;
        let mut block = allocate(block_length)?;
        reader.seek(SeekFrom::Start(index_offset))?;
        (&mut reader)
            .take(block_length as u64)
            .read_to_end(&mut block)?;
        if block.len() != block_length {
            return Err(DatError::CorruptIndex(format!(
                "index block is {} bytes but only {} could be read",
                block_length,
                block.len()
            )));
        }
        let entries = parse_index(&block)?;

        let mut lookup: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            lookup.entry(entry.name.clone()).or_insert(i);
        }
        debug!(
            "Loaded {} entries from index at 0x{:x}",
            entries.len(),
            index_offset
        );

        Ok(DatArchive {
            source: Mutex::new(reader),
            file_size,
            entries,
            lookup,
        })
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    /// Entries in on-disk index order.
    pub fn entries(&self) -> &[DatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive match on the stored name. With duplicate names
    /// the first one in the index wins.
    pub fn find_entry<N: AsRef<[u8]>>(&self, name: N) -> Result<&DatEntry> {
        let name = name.as_ref();
        match self.lookup.get(name) {
            Some(index) => Ok(&self.entries[*index]),
            None => Err(DatError::NotFound(
                WINDOWS_1252.decode_without_bom_handling(name).0.into_owned(),
            )),
        }
    }

    /// Reads an entry's payload, inflating it if needed. The result is always
    /// exactly `uncompressed_size` bytes long.
    pub fn extract(&self, entry: &DatEntry) -> Result<Vec<u8>> {
        let stored_size = entry.stored_size() as usize;
        let raw = {
            let mut source = self.source.lock().map_err(|_| {
                io::Error::new(io::ErrorKind::Other, "archive source lock was poisoned")
            })?;
            source.seek(SeekFrom::Start(entry.offset as u64))?;
            let mut raw = allocate(stored_size)?;
            (&mut *source)
                .take(stored_size as u64)
                .read_to_end(&mut raw)?;
            raw
        };
        if raw.len() != stored_size {
            return Err(DatError::TruncatedPayload {
                name: entry.display_name(),
                expected: stored_size,
                actual: raw.len(),
            });
        }
        debug!(
            "Extracting {} ({} bytes stored, compressed: {})",
            entry.display_name(),
            stored_size,
            entry.compressed
        );

        let format = CompressionFormat::from_flag(entry.compressed);
        format
            .decompress(raw, entry.uncompressed_size as usize)
            .map_err(|e| decompression_error(entry, e))
    }

    pub fn extract_by_name<N: AsRef<[u8]>>(&self, name: N) -> Result<Vec<u8>> {
        let entry = self.find_entry(name)?;
        self.extract(entry)
    }

    /// Releases the byte source. Entries borrowed from the archive cannot
    /// outlive this call.
    pub fn close(self) {
        debug!("Closing archive with {} entries", self.entries.len());
    }
}
