//! basE91 encoding.
//!
//! Packs input bits into 13 or 14 bit groups, each written as two symbols of a
//! 91 character alphabet. A group takes 13 bits unless its low 13 bits are
//! `<= 88`, in which case it takes 14; the decoder applies the same test to the
//! recombined value, which is what keeps the packing lossless.

use crate::bundler::Result;

/// Symbol table shared with the generated stub's decoder.
///
/// Contains neither `\` nor `'`, so it can sit in a single-quoted literal.
pub const ALPHABET: &[u8; 91] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

const CUTOFF: u32 = 88;
const LOW13: u32 = 0x1FFF;
const LOW14: u32 = 0x3FFF;

/// Encode `data` as basE91 text.
pub fn encode(data: &[u8]) -> String {
    let mut out = Vec::with_capacity(data.len() * 16 / 13 + 2);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer |= u32::from(byte) << bits;
        bits += 8;
        if bits > 13 {
            let mut value = buffer & LOW13;
            if value > CUTOFF {
                buffer >>= 13;
                bits -= 13;
            } else {
                value = buffer & LOW14;
                buffer >>= 14;
                bits -= 14;
            }
            out.push(ALPHABET[(value % 91) as usize]);
            out.push(ALPHABET[(value / 91) as usize]);
        }
    }

    if bits > 0 {
        out.push(ALPHABET[(buffer % 91) as usize]);
        if bits > 7 || buffer > 90 {
            out.push(ALPHABET[(buffer / 91) as usize]);
        }
    }

    // every byte comes from ALPHABET
    out.into_iter().map(char::from).collect()
}

/// Decode basE91 text. Characters outside the alphabet (line breaks,
/// escapes) are skipped.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let table = decode_table();
    let mut out = Vec::with_capacity(text.len() * 13 / 16 + 1);
    let mut pending: Option<u32> = None;
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for symbol in text.bytes() {
        let Some(c) = table[symbol as usize] else {
            continue;
        };
        match pending.take() {
            None => pending = Some(u32::from(c)),
            Some(low) => {
                let value = low + u32::from(c) * 91;
                buffer |= value << bits;
                bits += if value & LOW13 > CUTOFF { 13 } else { 14 };
                loop {
                    out.push((buffer & 0xFF) as u8);
                    buffer >>= 8;
                    bits -= 8;
                    if bits <= 7 {
                        break;
                    }
                }
            }
        }
    }

    if let Some(low) = pending {
        out.push(((buffer | low << bits) & 0xFF) as u8);
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
