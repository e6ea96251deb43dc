//! Hex dumps of DNS datagrams, in the spaced form used by packet logs:
//! `26 8c 84 00 00 01 ...`.
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("Odd number of hex digits ({0})")]
    OddLength(usize),
    #[error("Invalid hex character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Lowercase hex bytes separated by single spaces.
pub fn format_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing into a String cannot fail
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses hex digits into bytes, ignoring any whitespace between them.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let mut digits = Vec::with_capacity(input.len());
    for (position, character) in input.chars().enumerate() {
        if character.is_whitespace() {
            continue;
        }
        let value = character
            .to_digit(16)
            .ok_or(HexError::InvalidCharacter {
                character,
                position,
            })?;
        digits.push(value as u8);
    }

    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
