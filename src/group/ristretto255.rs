//! [ristretto255](https://www.rfc-editor.org/rfc/rfc9496.html) implementation
//! of [`Group`].

use core::ops::{Deref, Mul};

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::traits::Identity;
use curve25519_dalek::{RistrettoPoint, Scalar};
#[cfg(feature = "ristretto255-ciphersuite")]
use hash2curve::ExpandMsgXmd;
use hash2curve::{ExpandMsg, Expander};
use hybrid_array::Array;
use hybrid_array::typenum::{U16, U32};
use rand_core::TryCryptoRng;
#[cfg(feature = "ristretto255-ciphersuite")]
use sha2::Sha512;
use subtle::{ConstantTimeEq, CtOption};
use zeroize::{Zeroize, Zeroizing};

use super::Group;
#[cfg(feature = "ristretto255-ciphersuite")]
use crate::cipher_suite::{CipherSuite, Id};
use crate::error::{InternalError, Result};

/// The ristretto255 prime-order group. With the `ristretto255-ciphersuite`
/// crate feature this is also the `ristretto255-SHA512` [`CipherSuite`].
#[derive(Clone, Copy, Debug)]
pub struct Ristretto255;

impl Group for Ristretto255 {
	type SecurityLevel = U16;

	type NonZeroScalar = NonZeroScalar;
	type Scalar = Scalar;
	type ScalarLength = U32;

	type NonIdentityElement = NonIdentityElement;
	type Element = RistrettoPoint;
	type ElementLength = U32;

	fn scalar_random<R>(rng: &mut R) -> Result<Self::NonZeroScalar, R::Error>
	where
		R: ?Sized + TryCryptoRng,
	{
		let mut bytes = Zeroizing::new([0; 64]);

		loop {
			rng.try_fill_bytes(bytes.as_mut_slice())?;

			if let Some(result) =
				NonZeroScalar::new(Scalar::from_bytes_mod_order_wide(&bytes)).into_option()
			{
				break Ok(result);
			}
		}
	}

	fn hash_to_scalar<E>(input: &[&[u8]], dst: &[&[u8]]) -> Result<Self::Scalar, InternalError>
	where
		E: ExpandMsg<Self::SecurityLevel>,
	{
		let mut uniform_bytes = Zeroizing::new([0; 64]);
		expand::<E>(input, dst, &mut uniform_bytes)?;

		Ok(Scalar::from_bytes_mod_order_wide(&uniform_bytes))
	}

	fn non_zero_scalar_mul_by_generator(scalar: &Self::NonZeroScalar) -> Self::NonIdentityElement {
		NonIdentityElement(RistrettoPoint::mul_base(scalar))
	}

	fn scalar_invert(scalar: &Self::NonZeroScalar) -> Self::NonZeroScalar {
		NonZeroScalar(scalar.0.invert())
	}

	fn scalar_to_repr(scalar: &Self::Scalar) -> Array<u8, Self::ScalarLength> {
		scalar.to_bytes().into()
	}

	fn non_zero_scalar_from_repr(bytes: &[u8]) -> Result<Self::NonZeroScalar, InternalError> {
		NonZeroScalar::from_repr(bytes)
			.and_then(CtOption::into_option)
			.ok_or(InternalError)
	}

	fn scalar_from_repr(bytes: &[u8]) -> Result<Self::Scalar, InternalError> {
		let bytes = bytes.try_into().map_err(|_| InternalError)?;
		Option::from(Scalar::from_canonical_bytes(bytes)).ok_or(InternalError)
	}

	fn element_identity() -> Self::Element {
		RistrettoPoint::identity()
	}

	fn element_generator() -> Self::Element {
		RISTRETTO_BASEPOINT_POINT
	}

	fn hash_to_curve<E>(input: &[&[u8]], dst: &[&[u8]]) -> Result<Self::Element, InternalError>
	where
		E: ExpandMsg<Self::SecurityLevel>,
	{
		let mut uniform_bytes = [0; 64];
		expand::<E>(input, dst, &mut uniform_bytes)?;

		Ok(RistrettoPoint::from_uniform_bytes(&uniform_bytes))
	}

	fn element_to_repr(element: &Self::Element) -> Array<u8, Self::ElementLength> {
		element.compress().to_bytes().into()
	}

	fn non_identity_element_from_repr(
		bytes: &[u8],
	) -> Result<Self::NonIdentityElement, InternalError> {
		NonIdentityElement::from_repr(bytes).ok_or(InternalError)
	}
}

/// Fills `uniform_bytes` with `expand_message(input, dst, 64)`.
fn expand<E>(
	input: &[&[u8]],
	dst: &[&[u8]],
	uniform_bytes: &mut [u8; 64],
) -> Result<(), InternalError>
where
	E: ExpandMsg<U16>,
{
	E::expand_message(input, dst, 64.try_into().map_err(|_| InternalError)?)
		.map_err(|_| InternalError)?
		.fill_bytes(uniform_bytes);

	Ok(())
}

#[cfg(feature = "ristretto255-ciphersuite")]
impl CipherSuite for Ristretto255 {
	const ID: Id = match Id::new(b"ristretto255-SHA512") {
		Some(id) => id,
		None => unreachable!(),
	};

	type Group = Self;
	type Hash = Sha512;
	type ExpandMsg = ExpandMsgXmd<Sha512>;
}

/// A [`Scalar`] that is guaranteed to be non-zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NonZeroScalar(Scalar);

impl NonZeroScalar {
	/// Returns [`None`] if `scalar` is zero.
	#[must_use]
	pub fn new(scalar: Scalar) -> CtOption<Self> {
		CtOption::new(Self(scalar), !scalar.ct_eq(&Scalar::ZERO))
	}

	/// Decodes a canonical little-endian encoding. The outer [`None`] is
	/// returned on a wrong length, which is public information.
	#[must_use]
	pub fn from_repr(repr: &[u8]) -> Option<CtOption<Self>> {
		let repr = repr.try_into().ok()?;
		let scalar = Scalar::from_canonical_bytes(repr);
		let is_some = scalar.is_some();
		let scalar = scalar.unwrap_or(Scalar::ZERO);

		Some(CtOption::new(
			Self(scalar),
			is_some & !scalar.ct_eq(&Scalar::ZERO),
		))
	}
}

impl Deref for NonZeroScalar {
	type Target = Scalar;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<NonZeroScalar> for Scalar {
	fn from(value: NonZeroScalar) -> Self {
		value.0
	}
}

impl Mul<&NonIdentityElement> for NonZeroScalar {
	type Output = NonIdentityElement;

	fn mul(self, rhs: &NonIdentityElement) -> Self::Output {
		NonIdentityElement(self.0 * rhs.0)
	}
}

impl TryFrom<Scalar> for NonZeroScalar {
	type Error = InternalError;

	fn try_from(value: Scalar) -> Result<Self, Self::Error> {
		Self::new(value).into_option().ok_or(InternalError)
	}
}

impl Zeroize for NonZeroScalar {
	fn zeroize(&mut self) {
		self.0 = Scalar::ONE;
	}
}

/// A [`RistrettoPoint`] that is guaranteed not to be the identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NonIdentityElement(RistrettoPoint);

impl NonIdentityElement {
	/// Returns [`None`] if `point` is the identity.
	#[must_use]
	pub fn new(point: RistrettoPoint) -> CtOption<Self> {
		CtOption::new(Self(point), !point.ct_eq(&RistrettoPoint::identity()))
	}

	/// Decodes a canonical encoding of a non-identity point.
	#[must_use]
	pub fn from_repr(repr: &[u8]) -> Option<Self> {
		let repr: [u8; 32] = repr.try_into().ok()?;
		let point = Option::from(CompressedRistretto(repr).decompress())?;
		Self::new(point).into_option()
	}
}

impl Deref for NonIdentityElement {
	type Target = RistrettoPoint;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<NonIdentityElement> for RistrettoPoint {
	fn from(value: NonIdentityElement) -> Self {
		value.0
	}
}

impl TryFrom<RistrettoPoint> for NonIdentityElement {
	type Error = InternalError;

	fn try_from(value: RistrettoPoint) -> Result<Self, Self::Error> {
		Self::new(value).into_option().ok_or(InternalError)
	}
}

impl Zeroize for NonIdentityElement {
	fn zeroize(&mut self) {
		self.0 = RISTRETTO_BASEPOINT_POINT;
	}
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;

	#[test]
	fn identity_rejected() {
		let identity = Ristretto255::element_to_repr(&Ristretto255::element_identity());

		assert_eq!(identity, Array::from([0; 32]));
		assert_eq!(
			Ristretto255::non_identity_element_from_repr(&identity),
			Err(InternalError)
		);
	}

	#[test]
	fn generator_round_trip() {
		let generator = Ristretto255::element_to_repr(&Ristretto255::element_generator());

		assert_eq!(
			generator.0,
			hex!("e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2d76")
		);
		assert_eq!(
			Ristretto255::non_identity_element_from_repr(&generator).map(RistrettoPoint::from),
			Ok(RISTRETTO_BASEPOINT_POINT)
		);
	}

	#[test]
	fn non_canonical_rejected() {
		// Encodings with the high bit set are never canonical.
		let mut repr = [0; 32];
		repr[31] = 0x80;
		repr[0] = 1;

		assert!(Ristretto255::non_identity_element_from_repr(&repr).is_err());
		assert!(Ristretto255::non_identity_element_from_repr(&repr[..31]).is_err());
		assert_eq!(Ristretto255::scalar_from_repr(&[0xFF; 32]), Err(InternalError));
		assert_eq!(
			Ristretto255::non_zero_scalar_from_repr(&[0; 32]),
			Err(InternalError)
		);
	}

	#[test]
	fn scalar_invert() {
		let scalar = NonZeroScalar::new(Scalar::from(7_u64)).unwrap();
		let inverse = Ristretto255::scalar_invert(&scalar);

		assert_eq!(*scalar * *inverse, Scalar::ONE);
	}
}
