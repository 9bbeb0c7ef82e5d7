//! End-to-end: identity string → packed u64 → ciphertext → identity string.

use idcodec_core::{bitfield, Cipher, ErrorKind, IdCodecError, IdentityCodec, IdentityNumber};
use idcodec_crypto::codecs;
use idcodec_crypto::{CipherConfig, CipherKind, ConfigLayer, Speck64, SpeckParams, XorCipher};

const SAMPLES: &[&str] = &[
    "11010519491231002X",
    "110101199001011237",
    "310101198506152345",
    "510101197503214566",
    "110101000001011236",
    "110101999912311236",
];

const KEY_WORDS: [u32; 4] = [0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c];

fn key_bytes() -> Vec<u8> {
    (0u8..16).collect()
}

#[test]
fn round_trip_without_cipher() {
    let codec = codecs::plain();
    for &s in SAMPLES {
        let value = codec.encode_str(s).unwrap();
        assert_eq!(codec.decode(value).unwrap().as_str(), s);
    }
}

#[test]
fn round_trip_with_speck64() {
    let codec = codecs::speck64(&KEY_WORDS).unwrap();
    for &s in SAMPLES {
        let value = codec.encode_str(s).unwrap();
        assert_ne!(value, bitfield::encode(&IdentityNumber::parse(s).unwrap()));
        assert_eq!(codec.decode(value).unwrap().as_str(), s);
    }
}

#[test]
fn round_trip_with_xor() {
    let codec = codecs::xor(0x5A5A_5A5A_5A5A_5A5A);
    for &s in SAMPLES {
        let value = codec.encode_str(s).unwrap();
        assert_eq!(codec.decode(value).unwrap().as_str(), s);
    }
}

#[test]
fn lowercase_check_code_decodes_upper_case() {
    let codec = codecs::speck64(&KEY_WORDS).unwrap();
    let value = codec.encode_str("11010519491231002x").unwrap();
    assert_eq!(codec.decode(value).unwrap().as_str(), "11010519491231002X");
}

#[test]
fn byte_key_and_word_key_produce_identical_ciphertext() {
    let from_bytes = codecs::speck64_from_bytes(&key_bytes()).unwrap();
    let from_words = codecs::speck64(&KEY_WORDS).unwrap();
    for &s in SAMPLES {
        assert_eq!(
            from_bytes.encode_str(s).unwrap(),
            from_words.encode_str(s).unwrap()
        );
    }
}

#[test]
fn encryption_is_deterministic_and_key_dependent() {
    let a = codecs::speck64(&KEY_WORDS).unwrap();
    let b = codecs::speck64(&[0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0d]).unwrap();
    for &s in SAMPLES {
        assert_eq!(a.encode_str(s).unwrap(), a.encode_str(s).unwrap());
        assert_ne!(a.encode_str(s).unwrap(), b.encode_str(s).unwrap());
    }
}

#[test]
fn wrong_key_does_not_recover_the_number() {
    let a = codecs::speck64(&KEY_WORDS).unwrap();
    let b = codecs::speck64(&[9, 9, 9, 9]).unwrap();
    let value = a.encode_str("110101199001011237").unwrap();
    match b.decode(value) {
        Ok(id) => assert_ne!(id.as_str(), "110101199001011237"),
        Err(err) => assert!(matches!(err, IdCodecError::Encoding(_))),
    }
}

#[test]
fn invalid_inputs_surface_as_identity_errors() {
    let codec = codecs::speck64(&KEY_WORDS).unwrap();
    let cases = [
        ("11010519491231002", ErrorKind::InvalidLength),
        ("11010519491231002X1", ErrorKind::InvalidLength),
        ("1101A5199001011237", ErrorKind::InvalidCharacter),
        ("110101199001011236", ErrorKind::InvalidCheckCode),
        ("11010119990229123X", ErrorKind::InvalidDate),
    ];
    for (input, kind) in cases {
        let err = codec.encode_str(input).unwrap_err();
        assert!(matches!(err, IdCodecError::Identity(_)), "{input}");
        assert_eq!(err.kind(), kind, "{input}");
    }
}

#[test]
fn cipher_construction_errors_are_tagged_as_cipher_errors() {
    let err: IdCodecError = Speck64::new(&[1]).unwrap_err().into();
    assert!(matches!(err, IdCodecError::Cipher(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
}

#[test]
fn config_layers_drive_codec_choice() {
    let env = ConfigLayer::from_lookup(|name| match name {
        "IDCODEC_CIPHER" => Some("xor".to_string()),
        "IDCODEC_KEY" => Some("0102030405060708".to_string()),
        _ => None,
    })
    .unwrap();
    let flags = ConfigLayer {
        cipher: Some(CipherKind::Speck64),
        key: Some("000102030405060708090a0b0c0d0e0f".to_string()),
        ..ConfigLayer::default()
    };
    let config = env.overlay(flags).resolve().unwrap();
    let codec = codecs::from_config(&config).unwrap();
    let reference = codecs::speck64_from_bytes(&key_bytes()).unwrap();
    assert_eq!(
        codec.encode_str(SAMPLES[0]).unwrap(),
        reference.encode_str(SAMPLES[0]).unwrap()
    );
}

#[test]
fn yaml_config_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("idcodec.yaml");
    std::fs::write(
        &path,
        "cipher: speck64\nkey: \"000102030405060708090a0b0c0d0e0f\"\nrounds: 32\n",
    )
    .unwrap();
    let config = CipherConfig::from_file(&path).unwrap();
    assert_eq!(config.params.rounds, 32);

    let codec = codecs::from_config(&config).unwrap();
    let standard = codecs::speck64_from_bytes(&key_bytes()).unwrap();
    let value = codec.encode_str(SAMPLES[1]).unwrap();
    assert_ne!(value, standard.encode_str(SAMPLES[1]).unwrap());
    assert_eq!(codec.decode(value).unwrap().as_str(), SAMPLES[1]);
}

#[test]
fn shared_cipher_across_threads() {
    let cipher = std::sync::Arc::new(
        Speck64::with_params(&KEY_WORDS, SpeckParams::STANDARD).unwrap(),
    );
    let handles: Vec<_> = SAMPLES
        .iter()
        .map(|&s| {
            let codec = IdentityCodec::new(std::sync::Arc::clone(&cipher));
            std::thread::spawn(move || {
                let value = codec.encode_str(s).unwrap();
                codec.decode(value).unwrap().as_str() == s
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn xor_cipher_is_usable_as_trait_object() {
    let cipher: Box<dyn Cipher> = Box::new(XorCipher::new(7));
    assert_eq!(cipher.decrypt(cipher.encrypt(99)), 99);
}
