#![allow(dead_code)]

use groupset::wire::check::compute_crc;

// Base type bytes as they appear in definition records.
pub const ENUM: u8 = 0x00;
pub const SINT8: u8 = 0x01;
pub const UINT8: u8 = 0x02;
pub const SINT16: u8 = 0x83;
pub const UINT16: u8 = 0x84;
pub const SINT32: u8 = 0x85;
pub const UINT32: u8 = 0x86;
pub const STRING: u8 = 0x07;
pub const FLOAT32: u8 = 0x88;
pub const BYTE: u8 = 0x0D;

/// Incrementally encodes a FIT document for decoder tests.
#[derive(Default)]
pub struct FitFileBuilder {
    records: Vec<u8>,
}

impl FitFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a little-endian definition record. Fields are
    /// `(number, size, base type)` triples.
    pub fn definition(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.definition_record(local, 0, global, fields, None)
    }

    /// Append a big-endian definition record.
    pub fn definition_big_endian(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.definition_record(local, 1, global, fields, None)
    }

    /// Append a definition record carrying developer field definitions,
    /// given as `(number, size, developer data index)` triples.
    pub fn definition_with_developer(
        self,
        local: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer_fields: &[(u8, u8, u8)],
    ) -> Self {
        self.definition_record(local, 0, global, fields, Some(developer_fields))
    }

    fn definition_record(
        mut self,
        local: u8,
        architecture: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer_fields: Option<&[(u8, u8, u8)]>,
    ) -> Self {
        let mut header = 0x40 | (local & 0x0F);
        if developer_fields.is_some() {
            header |= 0x20;
        }
        self.records.push(header);
        self.records.push(0); // reserved
        self.records.push(architecture);
        let global = if architecture == 0 {
            global.to_le_bytes()
        } else {
            global.to_be_bytes()
        };
        self.records.extend_from_slice(&global);
        self.records.push(fields.len() as u8);
        for &(number, size, base_type) in fields {
            self.records.extend_from_slice(&[number, size, base_type]);
        }
        if let Some(developer_fields) = developer_fields {
            self.records.push(developer_fields.len() as u8);
            for &(number, size, index) in developer_fields {
                self.records.extend_from_slice(&[number, size, index]);
            }
        }
        self
    }

    /// Append a data record for a local type.
    pub fn data(mut self, local: u8, payload: &[u8]) -> Self {
        self.records.push(local & 0x0F);
        self.records.extend_from_slice(payload);
        self
    }

    /// Append a compressed-timestamp data record.
    pub fn compressed(mut self, local: u8, offset: u8, payload: &[u8]) -> Self {
        self.records
            .push(0x80 | ((local & 0x03) << 5) | (offset & 0x1F));
        self.records.extend_from_slice(payload);
        self
    }

    /// Encode with a fourteen-byte header and valid checksums.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(14 + self.records.len() + 2);
        buf.push(14);
        buf.push(0x20);
        buf.extend_from_slice(&2132u16.to_le_bytes());
        buf.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        buf.extend_from_slice(b".FIT");
        let header_crc = compute_crc(0, &buf);
        buf.extend_from_slice(&header_crc.to_le_bytes());

        buf.extend_from_slice(&self.records);
        let crc = compute_crc(0, &buf);
        buf.extend_from_slice(&crc.to_le_bytes());
        buf
    }

    /// Encode with the twelve-byte header form and no header checksum.
    pub fn build_short_header(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12 + self.records.len() + 2);
        buf.push(12);
        buf.push(0x10);
        buf.extend_from_slice(&2132u16.to_le_bytes());
        buf.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        buf.extend_from_slice(b".FIT");

        buf.extend_from_slice(&self.records);
        let crc = compute_crc(0, &buf);
        buf.extend_from_slice(&crc.to_le_bytes());
        buf
    }

    /// Encode with a corrupted trailing checksum.
    pub fn build_with_bad_crc(&self) -> Vec<u8> {
        let mut buf = self.build();
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;
        buf
    }
}
