//! Payload encoding tests

use depbundle::bundler::codec::{
    EncodedPayload, LINE_WIDTH, Scheme, base85, base91, unescape_literal,
};

/// Deterministic pseudo-random bytes.
fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) as u8
        })
        .collect()
}

fn samples() -> Vec<Vec<u8>> {
    let mut samples = vec![
        Vec::new(),
        vec![0],
        vec![0; 4],
        vec![0; 13],
        vec![0xFF; 7],
        (0..=255u8).collect(),
        b"hello world".to_vec(),
    ];
    samples.extend((1..64).map(|len| noise(len, len as u32)));
    samples.push(noise(4096, 7));
    samples
}

#[test]
fn base91_round_trips() {
    for sample in samples() {
        let encoded = base91::encode(&sample);
        assert_eq!(base91::decode(&encoded).unwrap(), sample, "input {:?}", sample);
    }
}

#[test]
fn base85_round_trips() {
    for sample in samples() {
        let encoded = base85::encode(&sample);
        assert_eq!(base85::decode(&encoded).unwrap(), sample, "input {:?}", sample);
    }
}

#[test]
fn base91_matches_reference_output() {
    assert_eq!(base91::encode(b""), "");
    assert_eq!(base91::encode(b"\0"), "AA");
    assert_eq!(base91::encode(b"hello world"), "TPwJh>Io2Tv!lE");
    assert_eq!(base91::encode(&[0; 4]), "AAAAA");
}

#[test]
fn base85_matches_interpreter_b85encode() {
    assert_eq!(base85::encode(b"hello world"), "Xk~0{Zy<MXa%^M");
    assert_eq!(base85::encode(b"\0"), "00");
    assert_eq!(base85::encode(&[0xFF; 4]), "|NsC0");
    assert_eq!(base85::encode(&[0xFF; 3]), "|Ns9");
}

#[test]
fn base91_alphabet_is_literal_safe() {
    assert_eq!(base91::ALPHABET.len(), 91);
    let mut seen = std::collections::HashSet::new();
    for &symbol in base91::ALPHABET {
        assert!(seen.insert(symbol), "duplicate symbol {}", symbol as char);
        assert!(symbol.is_ascii_graphic());
        assert_ne!(symbol, b'\\');
        assert_ne!(symbol, b'\'');
    }
}

#[test]
fn base91_decoder_skips_foreign_characters() {
    let encoded = base91::encode(b"hello world");
    let (head, tail) = encoded.split_at(5);
    let noisy = format!("{}\n \\{}\n", head, tail);
    assert_eq!(base91::decode(&noisy).unwrap(), b"hello world");
}

#[test]
fn base85_rejects_invalid_input() {
    assert!(base85::decode("Xk~0{\"").is_err());
    // a lone trailing symbol cannot encode a byte
    assert!(base85::decode("Xk~0{Z").is_err());
    // five maximal digits overflow 32 bits
    assert!(base85::decode("~~~~~").is_err());
}

#[test]
fn payload_is_wrapped_and_escaped() {
    let container = noise(2000, 42);
    let payload = EncodedPayload::encode(&container, Scheme::Dense);

    let raw = base91::encode(&container);
    assert!(raw.contains('"'), "sample should exercise escaping");

    for line in payload.text.lines() {
        assert!(unescape_literal(line).len() <= LINE_WIDTH);
        assert!(!line.ends_with('\\'), "escape split across lines");
    }
    assert!(!payload.text.contains("\"\"\""));
    assert_eq!(payload.text.lines().count(), raw.len().div_ceil(LINE_WIDTH));
    assert_eq!(payload.decode().unwrap(), container);
}

#[test]
fn payload_round_trips_with_both_schemes() {
    for scheme in [Scheme::Dense, Scheme::Portable] {
        for sample in samples() {
            let payload = EncodedPayload::encode(&sample, scheme);
            assert_eq!(payload.scheme, scheme);
            assert_eq!(payload.decode().unwrap(), sample);
        }
    }
}

#[test]
fn payload_carries_container_digest() {
    let payload = EncodedPayload::encode(b"", Scheme::Portable);
    assert_eq!(
        payload.sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert!(payload.text.is_empty());
}

#[test]
fn portable_scheme_can_be_forced() {
    assert_eq!(Scheme::select(true), Scheme::Portable);
    assert!(!Scheme::select(true).is_dense());
}

#[cfg(feature = "dense")]
#[test]
fn dense_scheme_is_default_when_compiled_in() {
    assert_eq!(Scheme::select(false), Scheme::Dense);
}

#[cfg(not(feature = "dense"))]
#[test]
fn falls_back_to_portable_without_dense_feature() {
    assert_eq!(Scheme::select(false), Scheme::Portable);
}
