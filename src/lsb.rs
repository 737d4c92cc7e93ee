use std::fmt::Display;

use crate::{error::Error, Result};

/// Number of low bits of a sample that carry payload, always within 1..=8
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LsbCount(u8);

impl LsbCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn get(&self) -> u8 {
        self.0
    }

    fn mask(&self) -> u8 {
        (0xFF_u16 >> (8 - self.0)) as u8
    }
}

impl TryFrom<u8> for LsbCount {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(LsbCount(value))
        } else {
            Err(Error::LsbCountOutOfRange(value))
        }
    }
}

impl Default for LsbCount {
    fn default() -> Self {
        LsbCount(Self::MIN)
    }
}

impl Display for LsbCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// value stored in the lowest `count` bits of `sample`
pub fn read_low(sample: u8, count: LsbCount) -> u8 {
    sample & count.mask()
}

/// Replace the lowest `count` bits of `sample` by `value`, keeping the high bits.
///
/// A value that does not fit into `count` bits is a contract violation of the
/// caller and reported as [`Error::ValueOutOfRange`].
pub fn write_low(sample: u8, value: u16, count: LsbCount) -> Result<u8> {
    if value >= 1 << count.get() {
        return Err(Error::ValueOutOfRange {
            value,
            lsb_count: count.get(),
        });
    }
    Ok((sample & !count.mask()) | value as u8)
}

#[cfg(test)]
mod test {
    use super::{read_low, write_low, LsbCount};
    use crate::error::Error;

    fn lsb(count: u8) -> LsbCount {
        LsbCount::try_from(count).expect("count in range")
    }

    #[test]
    fn reject_count_out_of_range() {
        assert!(matches!(
            LsbCount::try_from(0),
            Err(Error::LsbCountOutOfRange(0))
        ));
        assert!(matches!(
            LsbCount::try_from(9),
            Err(Error::LsbCountOutOfRange(9))
        ));
        assert_eq!(lsb(8).get(), 8);
    }

    #[test]
    fn read_low_bits() {
        assert_eq!(read_low(0b1010_1101, lsb(1)), 0b1);
        assert_eq!(read_low(0b1010_1101, lsb(3)), 0b101);
        assert_eq!(read_low(0b1010_1101, lsb(8)), 0b1010_1101);
    }

    #[test]
    fn write_low_bits() {
        assert_eq!(write_low(20, 1, lsb(1)).unwrap(), 21);
        assert_eq!(write_low(0b1111_1111, 0b010, lsb(3)).unwrap(), 0b1111_1010);
        assert_eq!(write_low(77, 200, lsb(8)).unwrap(), 200);
    }

    #[test]
    fn write_low_rejects_wide_values() {
        match write_low(0, 4, lsb(2)) {
            Err(Error::ValueOutOfRange { value, lsb_count }) => {
                assert_eq!(value, 4);
                assert_eq!(lsb_count, 2);
            }
            other => panic!("expected ValueOutOfRange, got {:?}", other),
        }
        assert!(write_low(0, 256, lsb(8)).is_err());
    }

    #[test]
    fn write_then_read_for_every_sample_and_width() {
        for count in 1..=8_u8 {
            let count = lsb(count);
            for sample in 0..=255_u8 {
                for value in 0..(1_u16 << count.get()) {
                    let written = write_low(sample, value, count).unwrap();
                    assert_eq!(read_low(written, count) as u16, value);
                    assert_eq!(
                        (written as u16) >> count.get(),
                        (sample as u16) >> count.get(),
                        "high bits of {} changed for count {}",
                        sample,
                        count
                    );
                }
            }
        }
    }
}
