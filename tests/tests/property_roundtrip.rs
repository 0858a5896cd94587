//! Property-based round-trip tests for the envelope codec

use envcrypt::prelude::*;
use proptest::prelude::*;

fn aes_key(bytes: [u8; 32]) -> KeyMaterial {
    KeyMaterial::Secret(SecretKey::new("AES", bytes.to_vec()))
}

proptest! {
    #[test]
    fn aes256_cbc_roundtrip(
        key in any::<[u8; 32]>(),
        data in prop::collection::vec(any::<u8>(), 0..=512)
    ) {
        let key = aes_key(key);
        let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
        let sealed = envcrypt::encrypt(&data, &key, &params).unwrap();
        let opened = envcrypt::decrypt(&sealed, &key, &params).unwrap();
        prop_assert_eq!(opened, data);
    }

    #[test]
    fn ciphertext_length_matches_padded_plaintext(
        key in any::<[u8; 32]>(),
        data_len in 0usize..=1000
    ) {
        let key = aes_key(key);
        let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
        let sealed = envcrypt::encrypt(&vec![0u8; data_len], &key, &params).unwrap();
        prop_assert_eq!(sealed.len(), 16 + (data_len / 16 + 1) * 16);
    }

    #[test]
    fn chacha20poly1305_roundtrip(
        key in any::<[u8; 32]>(),
        data in prop::collection::vec(any::<u8>(), 0..=512)
    ) {
        let key = KeyMaterial::Secret(SecretKey::new("ChaCha20-Poly1305", key.to_vec()));
        let params = CipherParameters::new("ChaCha20-Poly1305", Mode::Aead, Padding::None, 256);
        let sealed = envcrypt::encrypt(&data, &key, &params).unwrap();
        let opened = envcrypt::decrypt(&sealed, &key, &params).unwrap();
        prop_assert_eq!(opened, data);
    }

    #[test]
    fn fresh_randomness_separates_equal_inputs(
        key in any::<[u8; 32]>(),
        data in prop::collection::vec(any::<u8>(), 1..=128)
    ) {
        let key = aes_key(key);
        let params = CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256);
        let a = envcrypt::encrypt(&data, &key, &params).unwrap();
        let b = envcrypt::encrypt(&data, &key, &params).unwrap();
        prop_assert_ne!(a, b);
    }
}
