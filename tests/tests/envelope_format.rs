//! Byte-layout guarantees of the envelope formats

use envcrypt::prelude::*;
use envcrypt_keys::generate_secret_key;

#[test]
fn hello_world_scenario() {
    // AES-256-CBC-PKCS5 with a 32-zero-byte key: 16 IV bytes plus one
    // padded block.
    let key = KeyMaterial::Secret(SecretKey::new("AES", vec![0u8; 32]));
    let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
    let sealed = envcrypt::encrypt(b"HELLO WORLD", &key, &params).unwrap();
    assert_eq!(sealed.len(), 32);
    assert_eq!(envcrypt::decrypt(&sealed, &key, &params).unwrap(), b"HELLO WORLD");
}

#[test]
fn cbc_envelope_length_formula() {
    let key = KeyMaterial::Secret(generate_secret_key("AES", 256).unwrap());
    let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
    for len in [0usize, 1, 15, 16, 17, 31, 32, 1000] {
        let sealed = envcrypt::encrypt(&vec![7u8; len], &key, &params).unwrap();
        let expected = 16 + (len + 1).div_ceil(16) * 16;
        assert_eq!(sealed.len(), expected, "plaintext length {len}");
    }
}

#[test]
fn aead_envelope_length() {
    let key = KeyMaterial::Secret(generate_secret_key("ChaCha20-Poly1305", 256).unwrap());
    let params = CipherParameters::new("ChaCha20-Poly1305", Mode::Aead, Padding::None, 256);
    for len in [0usize, 1, 100] {
        let sealed = envcrypt::encrypt(&vec![7u8; len], &key, &params).unwrap();
        // nonce(12) ‖ ciphertext ‖ tag(16)
        assert_eq!(sealed.len(), 12 + len + 16);
    }
}

#[test]
fn sixty_four_bit_block_ciphers_use_eight_byte_ivs() {
    for (algorithm, bits) in [("DES", 56u32), ("TripleDES", 168), ("Blowfish", 128)] {
        let key = KeyMaterial::Secret(generate_secret_key(algorithm, bits).unwrap());
        let params = CipherParameters::new(algorithm, Mode::Cbc, Padding::Pkcs7, bits);
        let sealed = envcrypt::encrypt(b"1234567", &key, &params).unwrap();
        // 8-byte IV plus exactly one padded block
        assert_eq!(sealed.len(), 16, "{algorithm}");
    }
}

#[test]
fn short_envelopes_are_format_errors() {
    let aes = KeyMaterial::Secret(generate_secret_key("AES", 256).unwrap());
    let cbc = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
    for len in 0..16 {
        assert!(matches!(
            envcrypt::decrypt(&vec![0u8; len], &aes, &cbc),
            Err(Error::Format(_))
        ));
    }

    let chacha = KeyMaterial::Secret(generate_secret_key("ChaCha20-Poly1305", 256).unwrap());
    let aead = CipherParameters::new("ChaCha20-Poly1305", Mode::Aead, Padding::None, 256);
    assert!(matches!(
        envcrypt::decrypt(&[0u8; 11], &chacha, &aead),
        Err(Error::Format(_))
    ));
}

#[test]
fn aead_tamper_detection_over_every_byte() {
    let key = KeyMaterial::Secret(generate_secret_key("ChaCha20-Poly1305", 256).unwrap());
    let params = CipherParameters::new("ChaCha20-Poly1305", Mode::Aead, Padding::None, 256);
    let mut sealed = envcrypt::encrypt(b"integrity matters", &key, &params).unwrap();

    // flipping any ciphertext or tag byte must fail authentication
    for i in 12..sealed.len() {
        sealed[i] ^= 0x01;
        assert!(matches!(
            envcrypt::decrypt(&sealed, &key, &params),
            Err(Error::Authentication)
        ));
        sealed[i] ^= 0x01;
    }
}

#[test]
fn fresh_ivs_for_every_operation() {
    let key = KeyMaterial::Secret(generate_secret_key("AES", 256).unwrap());
    let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
    let a = envcrypt::encrypt(b"same plaintext", &key, &params).unwrap();
    let b = envcrypt::encrypt(b"same plaintext", &key, &params).unwrap();
    assert_ne!(a[..16], b[..16]);
    assert_ne!(a, b);
}
