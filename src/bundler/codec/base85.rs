//! Base85 encoding with the RFC 1924 alphabet, unpadded.
//!
//! Output is identical to Python's `base64.b85encode(data)`, which is what
//! the generated stub decodes it with.

use crate::bundler::{Error, Result};

/// RFC 1924 symbol table.
pub const ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

/// Encode `data`. A trailing partial chunk of `n` bytes yields `n + 1` symbols.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(4) * 5);

    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(word);

        let mut symbols = [0u8; 5];
        for slot in symbols.iter_mut().rev() {
            *slot = ALPHABET[(value % 85) as usize];
            value /= 85;
        }
        out.extend(symbols[..chunk.len() + 1].iter().map(|&s| char::from(s)));
    }

    out
}

/// Decode base85 text. Whitespace is skipped; any other character outside the
/// alphabet is an error.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let table = decode_table();
    let digits = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| {
            table[b as usize].ok_or_else(|| {
                Error::Decode(format!("invalid base85 character {:?}", char::from(b)))
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    if digits.len() % 5 == 1 {
        return Err(Error::Decode(
            "base85 input ends with a single dangling symbol".into(),
        ));
    }

    let mut out = Vec::with_capacity(digits.len() / 5 * 4 + 4);
    for chunk in digits.chunks(5) {
        // pad with the highest digit so truncation rounds back to the input
        let mut padded = [84u8; 5];
        padded[..chunk.len()].copy_from_slice(chunk);

        let value = padded.iter().try_fold(0u32, |acc, &d| {
            acc.checked_mul(85)
                .and_then(|acc| acc.checked_add(u32::from(d)))
        });
        let value = value
            .ok_or_else(|| Error::Decode("base85 chunk overflows 32 bits".into()))?;

        out.extend_from_slice(&value.to_be_bytes()[..chunk.len() - 1]);
    }

    Ok(out)
}

fn decode_table() -> [Option<u8>; 256] {
    let mut table = [None; 256];
    for (index, &symbol) in ALPHABET.iter().enumerate() {
        table[symbol as usize] = Some(index as u8);
    }
    table
}
