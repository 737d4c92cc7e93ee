//! Conversion between ASCII text and bit streams.
//!
//! Every character is framed as one byte, most significant bit first. No
//! length header is written, so a decoder only knows where a message ends
//! when told how many characters to read.

use clap::{builder::PossibleValue, ValueEnum};

use crate::{binary_stream::BitStream, error::Error, Result};

const BITS_PER_CHARACTER: usize = 8;
const HIGHEST_ASCII_CODE_POINT: u32 = 0x7F;

/// How code points outside of 7-bit ASCII are treated when bytes are turned back into text
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RecoveryPolicy {
    /// every byte of 128 or more becomes a single space
    #[default]
    Replace,
    /// only ASCII alphanumerics and spaces are kept, everything else is dropped
    Alphanumeric,
}

impl ValueEnum for RecoveryPolicy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Replace, Self::Alphanumeric]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Replace => Some(PossibleValue::new("Replace")),
            Self::Alphanumeric => Some(PossibleValue::new("Alphanumeric")),
        }
    }
}

impl RecoveryPolicy {
    fn recover(&self, byte: u8) -> Option<char> {
        match self {
            Self::Replace if byte.is_ascii() => Some(byte as char),
            Self::Replace => Some(' '),
            Self::Alphanumeric if byte.is_ascii_alphanumeric() || byte == b' ' => {
                Some(byte as char)
            }
            Self::Alphanumeric => None,
        }
    }
}

/// Reject any character that can not be written in 7 bits.
pub fn ensure_ascii(message: &str) -> Result<()> {
    match message
        .chars()
        .enumerate()
        .find(|(_, character)| *character as u32 > HIGHEST_ASCII_CODE_POINT)
    {
        Some((position, character)) => Err(Error::InvalidCharacter {
            position,
            code_point: character as u32,
        }),
        None => Ok(()),
    }
}

pub fn to_bits(message: &str) -> Result<BitStream> {
    ensure_ascii(message)?;
    Ok(BitStream::from(message.as_bytes()))
}

/// Interpret the stream as consecutive 8 bit characters.
///
/// A trailing chunk shorter than 8 bits is zero-padded on the right.
pub fn from_bits(stream: &BitStream, policy: RecoveryPolicy) -> String {
    stream
        .as_bytes()
        .iter()
        .filter_map(|&byte| policy.recover(byte))
        .collect()
}

pub fn character_count(bits: usize) -> usize {
    bits / BITS_PER_CHARACTER
}

pub fn bit_count(characters: usize) -> usize {
    characters.saturating_mul(BITS_PER_CHARACTER)
}
