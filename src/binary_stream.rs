/// Ordered sequence of single bits, packed most significant bit first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitStream {
    /// packed bits, unused trailing bits of the last byte are always zero
    buffer: Vec<u8>,
    /// how many bits of the buffer are in use
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitStream {
            buffer: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.len / 8;
        let bit_index = self.len % 8;
        if bit_index == 0 {
            self.buffer.push(0);
        }
        if bit {
            self.buffer[byte_index] |= 0b10000000_u8.rotate_right(bit_index as u32);
        }
        self.len += 1;
    }

    /// append the lowest `count` bits of `value`, most significant first
    pub fn push_bits(&mut self, value: u8, count: u8) {
        for shift in (0..count.min(8)).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let byte = self.buffer[index / 8];
        Some(byte & 0b10000000_u8.rotate_right((index % 8) as u32) != 0)
    }

    /// drop every bit from position `len` onwards
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.buffer.truncate(len.div_ceil(8));
        let used_bits_in_last_byte = len % 8;
        if used_bits_in_last_byte != 0 {
            if let Some(last) = self.buffer.last_mut() {
                *last &= 0xFF_u8 << (8 - used_bits_in_last_byte);
            }
        }
        self.len = len;
    }

    /// The packed bytes. A trailing partial byte is zero-padded on the right.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|index| self.get(index).unwrap_or(false))
    }

    /// Split the stream into consecutive groups of `width` bits.
    ///
    /// Each group is yielded as an unsigned integer whose most significant bit
    /// is the first bit of the group. The final group is padded with zero bits
    /// on the right when the stream length is not a multiple of `width`.
    pub fn groups(&self, width: u8) -> BitGroups<'_> {
        BitGroups {
            stream: self,
            width: width.clamp(1, 8),
            position: 0,
        }
    }
}

impl From<&[u8]> for BitStream {
    fn from(bytes: &[u8]) -> Self {
        BitStream {
            buffer: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }
}

pub struct BitGroups<'a> {
    stream: &'a BitStream,
    width: u8,
    position: usize,
}

impl BitGroups<'_> {
    /// number of bits of the stream not yet handed out
    pub fn remaining_bits(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }
}

impl Iterator for BitGroups<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.position >= self.stream.len() {
            return None;
        }
        let mut group = 0_u8;
        for offset in 0..self.width as usize {
            let bit = self.stream.get(self.position + offset).unwrap_or(false);
            group = (group << 1) | bit as u8;
        }
        self.position += self.width as usize;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_bits().div_ceil(self.width as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitGroups<'_> {}
