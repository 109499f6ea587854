/// CRC-32 (ISO-HDLC) lookup table, as used by every PNG chunk.
const CRC_TABLE: [u32; 256] = {
    let mut table = [0; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                0xedb8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
};

/// Running CRC over one or more byte sequences.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Crc(u32);
impl Crc {
    pub(crate) fn new() -> Self {
        Self(0xffff_ffff)
    }

    pub(crate) fn update<I: IntoIterator<Item = u8>>(mut self, data: I) -> Self {
        for b in data {
            let index = (self.0 ^ b as u32) & 0xff;
            self.0 = CRC_TABLE[index as usize] ^ (self.0 >> 8);
        }
        self
    }

    pub(crate) fn finish(self) -> u32 {
        self.0 ^ 0xffff_ffff
    }
}

pub(crate) fn calculate_crc<I: IntoIterator<Item = u8>>(data: I) -> u32 {
    Crc::new().update(data).finish()
}
