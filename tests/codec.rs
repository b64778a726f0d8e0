use wxx_codec::wxx::codec::color::{self, DEFAULT_LITERAL};
use wxx_codec::wxx::codec::envelope;
use wxx_codec::wxx::codec::number::{format_real, format_real_bare};
use wxx_codec::wxx::{ColorErrorKind, WxxError};
use wxx_codec::Rgba;

#[test]
fn real_formatting_matches_editor_output() {
    let cases: &[(f64, &str)] = &[
        (1234567.0, "1234567.0"),
        (0.1203, "0.1203"),
        (-0.5, "-0.5"),
        (100.0, "100.0"),
        (0.0, "0.0"),
        (120.97791408032022, "120.97791408032022"),
        (-1.0, "-1.0"),
        (0.9803921580314636, "0.9803921580314636"),
    ];
    for (value, expected) in cases {
        assert_eq!(format_real(*value), *expected, "formatting {}", value);
    }
}

#[test]
fn real_formatting_never_uses_exponent() {
    for value in [1e-5, 3.5e-9, 9.99e7, 1.5e22, -4.2e-6] {
        let text = format_real(value);
        assert!(!text.contains('e') && !text.contains('E'), "{} rendered as {}", value, text);
        assert!(text.contains('.'), "{} rendered as {}", value, text);
        assert!(!text.ends_with('.'), "{} rendered as {}", value, text);
    }
}

#[test]
fn bare_formatting_strips_whole_suffix() {
    assert_eq!(format_real_bare(50.0), "50");
    assert_eq!(format_real_bare(-1.0), "-1");
    assert_eq!(format_real_bare(12.25), "12.25");
}

#[test]
fn decode_default_treats_default_as_absent() {
    assert_eq!(color::decode_default(DEFAULT_LITERAL).unwrap(), None);
    assert_eq!(color::decode_default("").unwrap(), None);
    assert_eq!(color::decode_default("null").unwrap(), None);
    assert_eq!(color::decode_default("0.0,0.0,0.0,1").unwrap(), None);
    assert_eq!(
        color::decode_default("0.5,0.25,1.0,0.75").unwrap(),
        Some(Rgba::new(0.5, 0.25, 1.0, 0.75))
    );
}

#[test]
fn decode_zeroable_keeps_explicit_default() {
    assert_eq!(color::decode_zeroable(DEFAULT_LITERAL).unwrap(), Some(Rgba::DEFAULT));
    assert_eq!(color::decode_zeroable("").unwrap(), None);
    assert_eq!(color::decode_zeroable("null").unwrap(), None);
}

#[test]
fn decode_rejects_wrong_channel_count() {
    for text in ["1.0,1.0,1.0", "1,2,3,4,5", "garbage"] {
        let err = color::decode_default(text).unwrap_err();
        assert!(
            matches!(err.kind, ColorErrorKind::ChannelCount(_)),
            "{:?} gave {:?}",
            text,
            err
        );
        assert!(color::decode_zeroable(text).is_err());
    }
}

#[test]
fn decode_rejects_bad_channel_with_partial_value() {
    let err = color::decode_zeroable("0.1,x,0.3,1.0").unwrap_err();
    assert_eq!(err.partial, Rgba::new(0.1, 0.0, 0.0, 0.0));
    assert!(err.to_string().contains("green"), "message: {}", err);
}

#[test]
fn encode_variants() {
    let red = Rgba::new(1.0, 0.0, 0.0, 1.0);

    assert_eq!(color::encode_default(None), "0.0,0.0,0.0,1.0");
    assert_eq!(color::encode_default(Some(&Rgba::DEFAULT)), "0.0,0.0,0.0,1.0");
    assert_eq!(color::encode_default(Some(&red)), "1.0,0.0,0.0,1.0");

    assert_eq!(color::encode_nullable(None), "null");
    assert_eq!(color::encode_nullable(Some(&Rgba::DEFAULT)), "null");
    assert_eq!(color::encode_nullable(Some(&red)), "1.0,0.0,0.0,1.0");

    assert_eq!(color::encode_zeroable(None), "null");
    assert_eq!(color::encode_zeroable(Some(&Rgba::DEFAULT)), "0.0,0.0,0.0,1.0");
}

#[test]
fn envelope_round_trip_preserves_text() {
    let text = "<?xml version='1.0' encoding='utf-16'?>\n<map name=\"Ærø 𝔐ap\"/>";
    let packed = envelope::encode(text.as_bytes()).unwrap();
    assert_eq!(&packed[..2], &[0x1f, 0x8b], "gzip magic");

    let utf16 = envelope::gzip_decode(&packed).unwrap();
    assert_eq!(&utf16[..2], &envelope::BOM_BE);
    // BOM + one unit per BMP char + two per astral char
    assert_eq!(utf16.len(), 2 + 2 * text.encode_utf16().count());

    assert_eq!(envelope::decode(&packed).unwrap(), text);
}

#[test]
fn envelope_rejects_odd_length() {
    let packed = envelope::gzip_encode(&[0xFE, 0xFF, 0x00]).unwrap();
    assert!(matches!(envelope::decode(&packed), Err(WxxError::MissingFinalByte(3))));
}

#[test]
fn envelope_rejects_little_endian_bom() {
    let packed = envelope::gzip_encode(&[0xFF, 0xFE, 0x3C, 0x00]).unwrap();
    assert!(matches!(envelope::decode(&packed), Err(WxxError::NotBigEndian)));
}

#[test]
fn envelope_rejects_missing_bom() {
    let packed = envelope::gzip_encode(&[0x00, 0x3C, 0x00, 0x6D]).unwrap();
    assert!(matches!(envelope::decode(&packed), Err(WxxError::MissingBom)));
    assert!(matches!(envelope::utf16_to_utf8(&[]), Err(WxxError::MissingBom)));
}

#[test]
fn envelope_rejects_non_gzip_input() {
    assert!(matches!(envelope::decode(b""), Err(WxxError::DecompressionError(_))));
    assert!(matches!(
        envelope::decode(b"plain text, not gzip"),
        Err(WxxError::DecompressionError(_))
    ));
}

#[test]
fn envelope_rejects_invalid_utf8() {
    assert!(matches!(envelope::encode(&[0x3C, 0xFF, 0x3E]), Err(WxxError::InvalidUtf8(_))));
}

#[test]
fn unpaired_surrogate_becomes_replacement_char() {
    let data = [0xFE, 0xFF, 0x00, 0x41, 0xD8, 0x00, 0x00, 0x42];
    assert_eq!(envelope::utf16_to_utf8(&data).unwrap(), "A\u{FFFD}B");
}
