//! Streaming file cipher behavior through the facade

use std::fs;
use std::io::Cursor;

use envcrypt::prelude::*;
use envcrypt_keys::{generate_rsa_keypair, generate_secret_key};

fn aes_setup() -> (KeyMaterial, CipherParameters) {
    (
        KeyMaterial::Secret(generate_secret_key("AES", 256).unwrap()),
        CipherParameters::new("AES", Mode::Cbc, Padding::Pkcs7, 256),
    )
}

#[test]
fn progress_is_monotonic_and_ends_at_exactly_one() {
    let (key, params) = aes_setup();
    // several chunks plus a ragged tail
    let plaintext: Vec<u8> = (0u8..=255).cycle().take(8 * 1024 * 3 + 123).collect();

    let mut sealed = Vec::new();
    let mut seen = Vec::new();
    envcrypt::encrypt_stream(
        Cursor::new(&plaintext),
        &mut sealed,
        plaintext.len() as u64,
        &key,
        &params,
        |f| seen.push(f),
    )
    .unwrap();

    assert!(seen.len() >= 4);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "non-decreasing");
    assert!(seen.iter().all(|f| (0.0..=1.0).contains(f)));
    assert_eq!(*seen.last().unwrap(), 1.0);
}

#[test]
fn stream_and_in_memory_ciphertext_interoperate() {
    let (key, params) = aes_setup();
    let plaintext = vec![0x77u8; 50_000];

    // stream-encrypted bytes decode through the in-memory path
    let mut sealed = Vec::new();
    envcrypt::encrypt_stream(
        Cursor::new(&plaintext),
        &mut sealed,
        plaintext.len() as u64,
        &key,
        &params,
        |_| {},
    )
    .unwrap();
    assert_eq!(envcrypt::decrypt(&sealed, &key, &params).unwrap(), plaintext);

    // in-memory ciphertext decodes through the streaming path
    let sealed = envcrypt::encrypt(&plaintext, &key, &params).unwrap();
    let mut recovered = Vec::new();
    envcrypt::decrypt_stream(
        Cursor::new(&sealed),
        &mut recovered,
        sealed.len() as u64,
        &key,
        &params,
        |_| {},
    )
    .unwrap();
    assert_eq!(recovered, plaintext);
}

#[test]
fn symmetric_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("report.pdf");
    let sealed = dir.path().join("report.pdf.enc");
    let restored = dir.path().join("report.roundtrip.pdf");
    let content: Vec<u8> = (0u8..=255).cycle().take(100_000).collect();
    fs::write(&source, &content).unwrap();

    let (key, params) = aes_setup();
    envcrypt::encrypt_file(&source, &sealed, &key, &params, |_| {}).unwrap();
    envcrypt::decrypt_file(&sealed, &restored, &key, &params, |_| {}).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), content);

    // no staging leftovers
    assert!(!dir.path().join("report.pdf.enc.part").exists());
    assert!(!dir.path().join("report.roundtrip.pdf.part").exists());
}

#[test]
fn hybrid_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("dataset.bin");
    let sealed = dir.path().join("dataset.bin.enc");
    let restored = dir.path().join("dataset.roundtrip.bin");
    let content = vec![0x3Cu8; 64_000];
    fs::write(&source, &content).unwrap();

    let (public, private) = generate_rsa_keypair(1024).unwrap();
    let public = KeyMaterial::Public(public);
    let private = KeyMaterial::Private(private);
    let params = CipherParameters::new("RSA", Mode::Ecb, Padding::Pkcs1, 1024);

    envcrypt::encrypt_file(&source, &sealed, &public, &params, |_| {}).unwrap();
    assert!(fs::read(&sealed).unwrap().starts_with(b"HYBRID"));
    envcrypt::decrypt_file(&sealed, &restored, &private, &params, |_| {}).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), content);
}

#[test]
fn aead_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    let sealed = dir.path().join("notes.txt.enc");
    let restored = dir.path().join("notes.roundtrip.txt");
    let content = vec![0x11u8; 30_000];
    fs::write(&source, &content).unwrap();

    let key = KeyMaterial::Secret(generate_secret_key("ChaCha20-Poly1305", 256).unwrap());
    let params = CipherParameters::new("ChaCha20-Poly1305", Mode::Aead, Padding::None, 256);

    envcrypt::encrypt_file(&source, &sealed, &key, &params, |_| {}).unwrap();
    assert_eq!(fs::metadata(&sealed).unwrap().len(), 12 + 30_000 + 16);
    envcrypt::decrypt_file(&sealed, &restored, &key, &params, |_| {}).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), content);
}

#[test]
fn failed_decrypt_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("bogus.enc");
    let dest = dir.path().join("bogus.txt");
    // too short to even hold an IV
    fs::write(&source, [0u8; 4]).unwrap();

    let (key, params) = aes_setup();
    let err = envcrypt::decrypt_file(&source, &dest, &key, &params, |_| {}).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(!dest.exists());
    assert!(!dir.path().join("bogus.txt.part").exists());
}

#[test]
fn missing_source_is_an_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (key, params) = aes_setup();
    let err = envcrypt::encrypt_file(
        &dir.path().join("does-not-exist"),
        &dir.path().join("out.enc"),
        &key,
        &params,
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
