//! Server key material.

use core::fmt::{self, Debug, Formatter};
use core::slice;

use hybrid_array::Array;
use rand_core::TryCryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::cipher_suite::CipherSuite;
use crate::error::{Error, Result};
use crate::group::{Group, InternalGroup};
use crate::mode::Mode;
use crate::util::I2ospLength;

/// A [`SecretKey`] and its corresponding [`PublicKey`].
pub struct KeyPair<G: Group> {
	secret_key: SecretKey<G>,
	public_key: PublicKey<G>,
}

impl<G: Group> KeyPair<G> {
	/// Generates a random [`KeyPair`].
	///
	/// # Errors
	///
	/// Returns [`TryRngCore::Error`](rand_core::TryRngCore::Error) if the given
	/// `rng` fails.
	// `GenerateKeyPair`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.2-2
	pub fn generate<R: ?Sized + TryCryptoRng>(rng: &mut R) -> Result<Self, R::Error> {
		SecretKey::generate(rng).map(Self::from_secret_key)
	}

	/// Deterministically derives a [`KeyPair`] from `seed` and `info` for the
	/// given [`CipherSuite`] and [`Mode`].
	///
	/// # Errors
	///
	/// - [`Error::InfoLength`] if `info` exceeds a length of [`u16::MAX`].
	/// - [`Error::DeriveKeyPair`] if no non-zero scalar was found after 256
	///   attempts.
	/// - [`Error::InvalidCipherSuite`] if the [`CipherSuite`] is misconfigured.
	// `DeriveKeyPair`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.2.1-2
	pub fn derive<CS: CipherSuite<Group = G>, M: Mode>(
		seed: &[u8; 32],
		info: &[u8],
	) -> Result<Self> {
		SecretKey::derive::<CS, M>(seed, info).map(Self::from_secret_key)
	}

	/// Builds a [`KeyPair`] by computing the [`PublicKey`] of `secret_key`.
	#[must_use]
	pub fn from_secret_key(secret_key: SecretKey<G>) -> Self {
		let public_key = PublicKey::from_secret_key(&secret_key);

		Self {
			secret_key,
			public_key,
		}
	}

	/// Returns the [`SecretKey`].
	#[must_use]
	pub const fn secret_key(&self) -> &SecretKey<G> {
		&self.secret_key
	}

	/// Returns the [`PublicKey`].
	#[must_use]
	pub const fn public_key(&self) -> &PublicKey<G> {
		&self.public_key
	}

	/// Splits this [`KeyPair`].
	#[must_use]
	pub fn into_keys(self) -> (SecretKey<G>, PublicKey<G>) {
		(self.secret_key, self.public_key)
	}

	/// Serializes the [`SecretKey`]. The [`PublicKey`] is recomputed on
	/// deserialization.
	#[must_use]
	pub fn to_repr(&self) -> Zeroizing<Array<u8, G::ScalarLength>> {
		self.secret_key.to_repr()
	}

	/// Deserializes a [`KeyPair`] from an encoded [`SecretKey`].
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` is not a valid encoding.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		SecretKey::from_repr(bytes).map(Self::from_secret_key)
	}
}

/// A secret non-zero scalar. Zeroized on drop.
pub struct SecretKey<G: Group>(G::NonZeroScalar);

impl<G: Group> SecretKey<G> {
	/// Generates a random [`SecretKey`].
	///
	/// # Errors
	///
	/// Returns [`TryRngCore::Error`](rand_core::TryRngCore::Error) if the given
	/// `rng` fails.
	pub fn generate<R: ?Sized + TryCryptoRng>(rng: &mut R) -> Result<Self, R::Error> {
		G::scalar_random(rng).map(Self)
	}

	/// See [`KeyPair::derive()`].
	///
	/// # Errors
	///
	/// See [`KeyPair::derive()`].
	pub fn derive<CS: CipherSuite<Group = G>, M: Mode>(
		seed: &[u8; 32],
		info: &[u8],
	) -> Result<Self> {
		let info_length = info.i2osp_length().ok_or(Error::InfoLength)?;

		for counter in 0..=u8::MAX {
			let secret_key = CS::hash_to_scalar::<M>(
				&[
					seed.as_slice(),
					info_length.as_slice(),
					info,
					slice::from_ref(&counter),
				],
				Some(b"DeriveKeyPair".as_slice()),
			)?;

			if let Ok(secret_key) = secret_key.try_into() {
				return Ok(Self(secret_key));
			}
		}

		Err(Error::DeriveKeyPair)
	}

	/// Returns the scalar.
	#[must_use]
	pub const fn as_scalar(&self) -> &G::NonZeroScalar {
		&self.0
	}

	/// Serializes this [`SecretKey`].
	#[must_use]
	pub fn to_repr(&self) -> Zeroizing<Array<u8, G::ScalarLength>> {
		Zeroizing::new(G::scalar_to_repr(&self.0))
	}

	/// Deserializes a [`SecretKey`].
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` is not a canonical encoding of a
	/// non-zero scalar.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		G::non_zero_scalar_from_repr(bytes)
			.map(Self)
			.map_err(|_| Error::FromRepr)
	}
}

/// A public key with its cached encoding.
pub struct PublicKey<G: Group> {
	element: G::NonIdentityElement,
	repr: Array<u8, G::ElementLength>,
}

impl<G: Group> PublicKey<G> {
	/// Returns the element.
	#[must_use]
	pub const fn as_element(&self) -> &G::NonIdentityElement {
		&self.element
	}

	/// Returns the encoding.
	#[must_use]
	pub const fn as_repr(&self) -> &Array<u8, G::ElementLength> {
		&self.repr
	}

	/// Computes the [`PublicKey`] of a [`SecretKey`].
	#[must_use]
	pub fn from_secret_key(secret_key: &SecretKey<G>) -> Self {
		let element = G::non_zero_scalar_mul_by_generator(&secret_key.0);
		let repr = G::element_to_repr(&element);

		Self { element, repr }
	}

	/// Deserializes a [`PublicKey`].
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` is not a canonical encoding of a
	/// non-identity element.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		let element = G::non_identity_element_from_repr(bytes).map_err(|_| Error::FromRepr)?;
		let repr = G::element_to_repr(&element);

		Ok(Self { element, repr })
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Clone for KeyPair<G> {
	fn clone(&self) -> Self {
		Self {
			secret_key: self.secret_key.clone(),
			public_key: self.public_key.clone(),
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Debug for KeyPair<G> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeyPair")
			.field("secret_key", &self.secret_key)
			.field("public_key", &self.public_key)
			.finish()
	}
}

impl<G: Group> Eq for KeyPair<G> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> PartialEq for KeyPair<G> {
	fn eq(&self, other: &Self) -> bool {
		self.secret_key.eq(&other.secret_key)
	}
}

impl<G: Group> ZeroizeOnDrop for KeyPair<G> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Clone for SecretKey<G> {
	fn clone(&self) -> Self {
		Self(self.0)
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Debug for SecretKey<G> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("SecretKey(..)")
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Drop for SecretKey<G> {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

impl<G: Group> Eq for SecretKey<G> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> PartialEq for SecretKey<G> {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<G: Group> ZeroizeOnDrop for SecretKey<G> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Clone for PublicKey<G> {
	fn clone(&self) -> Self {
		Self {
			element: self.element,
			repr: self.repr.clone(),
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> Debug for PublicKey<G> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("PublicKey")
			.field("element", &self.element)
			.field("repr", &self.repr)
			.finish()
	}
}

impl<G: Group> Eq for PublicKey<G> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<G: Group> PartialEq for PublicKey<G> {
	fn eq(&self, other: &Self) -> bool {
		self.repr.eq(&other.repr)
	}
}
