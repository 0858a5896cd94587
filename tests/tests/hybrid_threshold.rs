//! Direct-vs-hybrid boundary behavior for asymmetric encryption

use envcrypt::prelude::*;
use envcrypt_hybrid::{hybrid_threshold, HybridEnvelope};
use envcrypt_keys::generate_rsa_keypair;

#[test]
fn threshold_table_values() {
    assert_eq!(hybrid_threshold(1024, Padding::Pkcs1).unwrap(), 117);
    assert_eq!(hybrid_threshold(2048, Padding::Pkcs1).unwrap(), 245);
    assert_eq!(hybrid_threshold(4096, Padding::Pkcs1).unwrap(), 501);
    assert_eq!(hybrid_threshold(2048, Padding::OaepSha1).unwrap(), 214);
    assert_eq!(hybrid_threshold(2048, Padding::OaepSha256).unwrap(), 214);
    assert_eq!(hybrid_threshold(2048, Padding::None).unwrap(), 256);
}

#[test]
fn rsa_2048_pkcs1_boundary() {
    let (public, private) = generate_rsa_keypair(2048).unwrap();
    let public = KeyMaterial::Public(public);
    let private = KeyMaterial::Private(private);
    let params = CipherParameters::new("RSA", Mode::Ecb, Padding::Pkcs1, 2048);

    // 245 bytes: one direct asymmetric block, no framing at all
    let at_threshold = vec![0x41u8; 245];
    let sealed = envcrypt::encrypt(&at_threshold, &public, &params).unwrap();
    assert_eq!(sealed.len(), 256);
    assert!(!sealed.starts_with(b"HYBRID"));
    assert_eq!(envcrypt::decrypt(&sealed, &private, &params).unwrap(), at_threshold);

    // 246 bytes: the payload no longer fits, so the output is an envelope
    let over_threshold = vec![0x42u8; 246];
    let sealed = envcrypt::encrypt(&over_threshold, &public, &params).unwrap();
    assert!(sealed.starts_with(b"HYBRID"));
    assert_eq!(
        envcrypt::decrypt(&sealed, &private, &params).unwrap(),
        over_threshold
    );
}

#[test]
fn hybrid_envelope_carries_a_fresh_session_key() {
    let (public, _) = generate_rsa_keypair(1024).unwrap();
    let public = KeyMaterial::Public(public);
    let params = CipherParameters::new("RSA", Mode::Ecb, Padding::Pkcs1, 1024);

    let payload = vec![9u8; 1000];
    let a = HybridEnvelope::parse(&envcrypt::encrypt(&payload, &public, &params).unwrap()).unwrap();
    let b = HybridEnvelope::parse(&envcrypt::encrypt(&payload, &public, &params).unwrap()).unwrap();
    assert_eq!(a.iv.len(), 16);
    assert_eq!(a.wrapped_key.len(), 128);
    // fresh session key and IV per operation
    assert_ne!(a.iv, b.iv);
    assert_ne!(a.wrapped_key, b.wrapped_key);
    assert_ne!(a.bulk, b.bulk);
}

#[test]
fn corrupted_magic_is_a_format_error() {
    let (public, private) = generate_rsa_keypair(1024).unwrap();
    let params = CipherParameters::new("RSA", Mode::Ecb, Padding::Pkcs1, 1024);
    let mut sealed =
        envcrypt_hybrid::encrypt(&vec![1u8; 500], &public, &params).unwrap();
    sealed[0] = b'X';
    assert!(matches!(
        envcrypt_hybrid::decrypt(&sealed, &private, &params),
        Err(Error::Format(_))
    ));
}

#[test]
fn large_payload_roundtrips_under_every_rsa_padding() {
    let (public, private) = generate_rsa_keypair(1024).unwrap();
    let payload = vec![0x5Au8; 10_000];
    for padding in [Padding::Pkcs1, Padding::OaepSha1, Padding::OaepSha256] {
        let params = CipherParameters::new("RSA", Mode::Ecb, padding, 1024);
        let sealed = envcrypt_hybrid::encrypt(&payload, &public, &params).unwrap();
        assert!(sealed.starts_with(b"HYBRID"), "{padding}");
        assert_eq!(
            envcrypt_hybrid::decrypt(&sealed, &private, &params).unwrap(),
            payload,
            "{padding}"
        );
    }
}
