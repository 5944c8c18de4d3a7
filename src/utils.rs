use crate::{Endian, ZlibCompressionFormat};

struct Record {
    name: Vec<u8>,
    compressed: bool,
    uncompressed_size: u32,
    compressed_size: u32,
    offset: u32,
}

/// Lays out a DAT2 container in memory: payloads first, then the index and
/// the trailer.
pub struct DatBuilder {
    payload: Vec<u8>,
    records: Vec<Record>,
    count_override: Option<u32>,
    truncate_records: usize,
}

impl DatBuilder {
    pub fn new() -> Self {
        DatBuilder {
            payload: Vec::new(),
            records: Vec::new(),
            count_override: None,
            truncate_records: 0,
        }
    }

    pub fn add_stored(&mut self, name: &[u8], data: &[u8]) -> u32 {
        self.add_raw(name, data, false, data.len() as u32, 0)
    }

    pub fn add_compressed(&mut self, name: &[u8], data: &[u8]) -> u32 {
        let compressed = ZlibCompressionFormat {}.compress(data).unwrap();
        self.add_raw(
            name,
            &compressed,
            true,
            data.len() as u32,
            compressed.len() as u32,
        )
    }

    /// Appends `stored` to the payload area and records the sizes verbatim.
    pub fn add_raw(
        &mut self,
        name: &[u8],
        stored: &[u8],
        compressed: bool,
        uncompressed_size: u32,
        compressed_size: u32,
    ) -> u32 {
        let offset = self.payload.len() as u32;
        self.payload.extend_from_slice(stored);
        self.add_raw_at(name, compressed, uncompressed_size, compressed_size, offset);
        offset
    }

    pub fn add_raw_at(
        &mut self,
        name: &[u8],
        compressed: bool,
        uncompressed_size: u32,
        compressed_size: u32,
        offset: u32,
    ) {
        self.records.push(Record {
            name: name.to_vec(),
            compressed,
            uncompressed_size,
            compressed_size,
            offset,
        });
    }

    pub fn override_count(&mut self, count: u32) {
        self.count_override = Some(count);
    }

    pub fn truncate_records(&mut self, amount: usize) {
        self.truncate_records = amount;
    }

    pub fn build(&self) -> Vec<u8> {
        let endian = Endian::Little;
        let mut index: Vec<u8> = Vec::new();
        let count = self.count_override.unwrap_or(self.records.len() as u32);
        index.extend_from_slice(&endian.encode_u32(count));
        for record in &self.records {
            index.extend_from_slice(&endian.encode_u32(record.name.len() as u32));
            index.extend_from_slice(&record.name);
            index.push(record.compressed as u8);
            index.extend_from_slice(&endian.encode_u32(record.uncompressed_size));
            index.extend_from_slice(&endian.encode_u32(record.compressed_size));
            index.extend_from_slice(&endian.encode_u32(record.offset));
        }
        index.truncate(index.len() - self.truncate_records);

        let mut archive = self.payload.clone();
        archive.extend(index.iter());
        let total = archive.len() + 8;
        archive.extend_from_slice(&endian.encode_u32(index.len() as u32));
        archive.extend_from_slice(&endian.encode_u32(total as u32));
        archive
    }
}

/// Header fields for a synthetic FRM. Fields not listed get fixed,
/// recognizable values.
pub struct FrmSpec {
    pub width: u16,
    pub height: u16,
    pub animation_length: u16,
    pub animation_start: [u32; 6],
    pub pixels: Vec<u8>,
}

pub fn build_frm(spec: &FrmSpec) -> Vec<u8> {
    build_frm_with_length(spec, spec.pixels.len() as u32)
}

pub fn build_frm_with_length(spec: &FrmSpec, data_length: u32) -> Vec<u8> {
    let endian = Endian::Big;
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&endian.encode_u32(4));
    bytes.extend_from_slice(&endian.encode_u16(10));
    bytes.extend_from_slice(&endian.encode_u16(0));
    bytes.extend_from_slice(&endian.encode_u16(spec.animation_length));
    for i in 0..6 {
        bytes.extend_from_slice(&endian.encode_i16(-(i as i16) - 1));
    }
    for i in 0..6 {
        bytes.extend_from_slice(&endian.encode_i16(i as i16 * 2));
    }
    for start in spec.animation_start.iter() {
        bytes.extend_from_slice(&endian.encode_u32(*start));
    }
    bytes.extend_from_slice(&endian.encode_u32(data_length));
    bytes.extend_from_slice(&endian.encode_u16(spec.width));
    bytes.extend_from_slice(&endian.encode_u16(spec.height));
    bytes.extend_from_slice(&endian.encode_u32(spec.width as u32 * spec.height as u32));
    bytes.extend_from_slice(&endian.encode_u16(3));
    bytes.extend_from_slice(&endian.encode_u16(7));
    bytes.extend_from_slice(&spec.pixels);
    bytes
}

/// 768 bytes of palette entries where entry `i` is `(i % 64, (i + 1) % 64, (i + 2) % 64)`,
/// followed by a stand-in for the color-matching tables.
pub fn build_palette() -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::new();
    for i in 0..256usize {
        bytes.push((i % 64) as u8);
        bytes.push(((i + 1) % 64) as u8);
        bytes.push(((i + 2) % 64) as u8);
    }
    bytes.extend(std::iter::repeat(0xEE).take(32));
    bytes
}
