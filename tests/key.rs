//! Tests for key management.

#![cfg(test)]
#![expect(
	clippy::cargo_common_metadata,
	clippy::indexing_slicing,
	reason = "tests"
)]

mod util;

use oprf_server::cipher_suite::CipherSuite;
use oprf_server::group::Group;
use oprf_server::{Base, Error, KeyPair, Mode, PublicKey, SecretKey, Server, Verifiable};
use rand_core::OsRng;
use util::{INFO, INPUT};

test_ciphersuites!(consistency, Base);
test_ciphersuites!(consistency, Verifiable);

/// Tests that the public key is the generator multiplied by the private key.
fn consistency<CS: CipherSuite, M: Mode>() {
	let server = Server::<CS, M>::new(&mut OsRng).unwrap();
	let secret_key = SecretKey::<CS::Group>::from_repr(&server.private_key()).unwrap();
	let element = CS::Group::non_zero_scalar_mul_by_generator(secret_key.as_scalar());

	assert_eq!(
		&CS::Group::element_to_repr(&element),
		server.public_key().as_repr()
	);
	assert_eq!(
		&PublicKey::from_secret_key(server.key_pair().secret_key()),
		server.public_key()
	);
}

test_ciphersuites!(derive, Base);
test_ciphersuites!(derive, Verifiable);

/// Tests that key derivation is deterministic and domain separated.
fn derive<CS: CipherSuite, M: Mode>() {
	let seed = [0xA3; 32];

	let key_pair = KeyPair::<CS::Group>::derive::<CS, M>(&seed, b"test key").unwrap();
	assert_eq!(
		key_pair,
		KeyPair::derive::<CS, M>(&seed, b"test key").unwrap()
	);

	assert_ne!(
		key_pair,
		KeyPair::derive::<CS, M>(&seed, b"other key").unwrap()
	);
	assert_ne!(key_pair, KeyPair::derive::<CS, M>(&seed, b"").unwrap());
	assert_ne!(
		key_pair,
		KeyPair::derive::<CS, M>(&[0xA4; 32], b"test key").unwrap()
	);

	let server = Server::<CS, M>::from_seed(&seed, b"test key").unwrap();
	assert_eq!(server.key_pair(), &key_pair);
}

test_ciphersuites!(derive_mode_separation);

/// Tests that derived keys depend on the [`Mode`].
fn derive_mode_separation<CS: CipherSuite>() {
	let seed: [u8; 32] = rand::random();

	assert_ne!(
		KeyPair::<CS::Group>::derive::<CS, Base>(&seed, b"").unwrap(),
		KeyPair::<CS::Group>::derive::<CS, Verifiable>(&seed, b"").unwrap()
	);
}

test_ciphersuites!(derive_info_length);

/// Tests [`Error::InfoLength`] on key derivation.
fn derive_info_length<CS: CipherSuite>() {
	let long = vec![0; usize::from(u16::MAX) + 1];

	assert_eq!(
		KeyPair::<CS::Group>::derive::<CS, Base>(&[0; 32], &long).unwrap_err(),
		Error::InfoLength
	);
	assert_eq!(
		Server::<CS, Verifiable>::from_seed(&[0; 32], &long).unwrap_err(),
		Error::InfoLength
	);
	KeyPair::<CS::Group>::derive::<CS, Base>(&[0; 32], &long[1..]).unwrap();
}

test_ciphersuites!(repr);

/// Tests [`SecretKey`] and [`PublicKey`] (de)serialization.
fn repr<CS: CipherSuite>() {
	let key_pair = KeyPair::<CS::Group>::generate(&mut OsRng).unwrap();

	let decoded = KeyPair::<CS::Group>::from_repr(&key_pair.to_repr()).unwrap();
	assert_eq!(decoded, key_pair);
	assert_eq!(decoded.public_key(), key_pair.public_key());

	let public_key = PublicKey::<CS::Group>::from_repr(key_pair.public_key().as_repr()).unwrap();
	assert_eq!(&public_key, key_pair.public_key());

	let (secret_key, public_key) = key_pair.into_keys();
	assert_eq!(KeyPair::from_secret_key(secret_key).public_key(), &public_key);
}

test_ciphersuites!(invalid_repr);

/// Tests rejection of invalid key encodings.
fn invalid_repr<CS: CipherSuite>() {
	assert_eq!(
		SecretKey::<CS::Group>::from_repr(&[0; 32]).unwrap_err(),
		Error::FromRepr
	);
	assert_eq!(
		SecretKey::<CS::Group>::from_repr(&[1; 31]).unwrap_err(),
		Error::FromRepr
	);
	assert_eq!(
		SecretKey::<CS::Group>::from_repr(&[0xFF; 32]).unwrap_err(),
		Error::FromRepr
	);

	let identity = CS::Group::element_to_repr(&CS::Group::element_identity());
	assert_eq!(
		PublicKey::<CS::Group>::from_repr(&identity).unwrap_err(),
		Error::FromRepr
	);
	assert_eq!(
		PublicKey::<CS::Group>::from_repr(&[]).unwrap_err(),
		Error::FromRepr
	);
}

test_ciphersuites!(key_gen, Base);
test_ciphersuites!(key_gen, Verifiable);

/// Tests that [`Server::key_gen()`] replaces the key.
fn key_gen<CS: CipherSuite, M: Mode>() {
	let mut server = Server::<CS, M>::new(&mut OsRng).unwrap();
	let old = server.clone();
	let output = server.full_evaluate(INPUT, INFO).unwrap();

	server.key_gen(&mut OsRng).unwrap();

	assert_ne!(server.key_pair(), old.key_pair());
	assert_ne!(server.public_key(), old.public_key());
	assert_ne!(*server.private_key(), *old.private_key());
	assert!(!server.verify_finalize(INPUT, &output, INFO));
	assert!(old.verify_finalize(INPUT, &output, INFO));
}

test_ciphersuites!(private_key, Base);
test_ciphersuites!(private_key, Verifiable);

/// Tests that a [`Server`] restored from its private key behaves identically.
fn private_key<CS: CipherSuite, M: Mode>() {
	let server = Server::<CS, M>::new(&mut OsRng).unwrap();
	let restored =
		Server::<CS, M>::from_key_pair(KeyPair::from_repr(&server.private_key()).unwrap());

	assert_eq!(restored.public_key(), server.public_key());
	assert_eq!(
		restored.full_evaluate(INPUT, INFO).unwrap(),
		server.full_evaluate(INPUT, INFO).unwrap()
	);
}
