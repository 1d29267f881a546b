//! The [`Group`] trait.

#[cfg(feature = "ristretto255")]
pub mod ristretto255;

use core::fmt::Debug;
use core::ops::{Add, Deref, Mul, Sub};

use hash2curve::ExpandMsg;
use hybrid_array::typenum::{IsLess, True, U65536, Unsigned};
use hybrid_array::{Array, ArraySize};
use rand_core::TryCryptoRng;
use zeroize::Zeroize;

use crate::cipher_suite::{CipherSuite, ElementLength, NonIdentityElement, Scalar};
use crate::error::{Error, InternalError, Result};
use crate::mode::Mode;
use crate::util::I2ospLength;

/// Prime-order group implementation for OPRF.
///
/// See [RFC 9497 § 4](https://www.rfc-editor.org/rfc/rfc9497.html#section-4-3.2).
pub trait Group {
	/// Target security level of this [`Group`].
	///
	/// See [RFC 9380 § 10.8](https://www.rfc-editor.org/rfc/rfc9380.html#name-target-security-levels).
	type SecurityLevel: Unsigned;

	/// Non-zero scalar type. This type must ensure that its value is not zero.
	type NonZeroScalar: Copy
		+ Debug
		+ Deref<Target = Self::Scalar>
		+ Eq
		+ Into<Self::Scalar>
		+ for<'element> Mul<&'element Self::NonIdentityElement, Output = Self::NonIdentityElement>
		+ Zeroize;

	/// Scalar type.
	type Scalar: Copy
		+ Debug
		+ Eq
		+ for<'scalar> Add<&'scalar Self::Scalar, Output = Self::Scalar>
		+ for<'scalar> Sub<&'scalar Self::Scalar, Output = Self::Scalar>
		+ for<'scalar> Mul<&'scalar Self::Scalar, Output = Self::Scalar>
		+ for<'element> Mul<&'element Self::Element, Output = Self::Element>
		+ TryInto<Self::NonZeroScalar>
		+ Zeroize;

	/// Length of a serialized [`Scalar`](Group::Scalar).
	type ScalarLength: Add<Self::ScalarLength, Output: ArraySize> + ArraySize;

	/// Non-identity element type. This type must ensure that its value is not
	/// the identity element.
	type NonIdentityElement: Copy
		+ Debug
		+ Deref<Target = Self::Element>
		+ Eq
		+ Into<Self::Element>
		+ Zeroize;

	/// Element type.
	type Element: Copy
		+ Debug
		+ Eq
		+ for<'element> Add<&'element Self::Element, Output = Self::Element>
		+ TryInto<Self::NonIdentityElement>;

	/// Length of a serialized [`Element`](Group::Element).
	type ElementLength: ArraySize + IsLess<U65536, Output = True>;

	/// Generates a uniformly random non-zero scalar with the given `rng`.
	///
	/// Corresponds to [`RandomScalar()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.12).
	///
	/// # Errors
	///
	/// Returns [`TryRngCore::Error`](rand_core::TryRngCore::Error) if the given
	/// `rng` fails.
	fn scalar_random<R>(rng: &mut R) -> Result<Self::NonZeroScalar, R::Error>
	where
		R: ?Sized + TryCryptoRng;

	/// Deterministically maps input to a [`Scalar`](Group::Scalar).
	///
	/// Corresponds to [`HashToScalar()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.10).
	///
	/// # Errors
	///
	/// Returns [`InternalError`] if the [`Group`] and [`ExpandMsg`] are
	/// incompatible.
	fn hash_to_scalar<E>(input: &[&[u8]], dst: &[&[u8]]) -> Result<Self::Scalar, InternalError>
	where
		E: ExpandMsg<Self::SecurityLevel>;

	/// Multiply the given [`NonZeroScalar`](Group::NonZeroScalar) with the
	/// generator element of this prime-order subgroup.
	#[must_use]
	fn non_zero_scalar_mul_by_generator(scalar: &Self::NonZeroScalar) -> Self::NonIdentityElement;

	/// Computes the inverse of the given
	/// [`NonZeroScalar`](Group::NonZeroScalar).
	///
	/// Corresponds to [`ScalarInverse()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.14).
	#[must_use]
	fn scalar_invert(scalar: &Self::NonZeroScalar) -> Self::NonZeroScalar;

	/// Serializes the given [`Scalar`](Group::Scalar).
	///
	/// Corresponds to [`SerializeScalar()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.20).
	#[must_use]
	fn scalar_to_repr(scalar: &Self::Scalar) -> Array<u8, Self::ScalarLength>;

	/// Deserializes the given `bytes` to a
	/// [`NonZeroScalar`](Group::NonZeroScalar).
	///
	/// # Errors
	///
	/// Returns [`InternalError`] if `bytes` is not a canonical encoding of a
	/// non-zero scalar.
	fn non_zero_scalar_from_repr(bytes: &[u8]) -> Result<Self::NonZeroScalar, InternalError>;

	/// Deserializes the given `bytes` to a [`Scalar`](Group::Scalar).
	///
	/// Corresponds to [`DeserializeScalar()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.22).
	///
	/// # Errors
	///
	/// Returns [`InternalError`] if `bytes` is not a canonical encoding.
	fn scalar_from_repr(bytes: &[u8]) -> Result<Self::Scalar, InternalError>;

	/// Returns the identity element.
	///
	/// Corresponds to [`Identity()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.4).
	fn element_identity() -> Self::Element;

	/// Returns the generator element of this prime-order subgroup.
	///
	/// Corresponds to [`Generator()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.6).
	fn element_generator() -> Self::Element;

	/// Deterministically maps input to an [`Element`](Group::Element).
	///
	/// Corresponds to
	/// [`HashToGroup()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.8).
	///
	/// # Errors
	///
	/// Returns [`InternalError`] if the [`Group`] and [`ExpandMsg`] are
	/// incompatible.
	fn hash_to_curve<E>(input: &[&[u8]], dst: &[&[u8]]) -> Result<Self::Element, InternalError>
	where
		E: ExpandMsg<Self::SecurityLevel>;

	/// Serializes the given [`Element`](Group::Element).
	///
	/// Corresponds to
	/// [`SerializeElement()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.16).
	fn element_to_repr(element: &Self::Element) -> Array<u8, Self::ElementLength>;

	/// Deserializes the given `bytes` to a
	/// [`NonIdentityElement`](Group::NonIdentityElement).
	///
	/// Corresponds to
	/// [`DeserializeElement()` in RFC 9497 § 2.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-2.1-4.18).
	///
	/// # Errors
	///
	/// Returns [`InternalError`] if `bytes` is not a canonical encoding or
	/// encodes the identity element.
	fn non_identity_element_from_repr(
		bytes: &[u8],
	) -> Result<Self::NonIdentityElement, InternalError>;

	/// Computes `element1 * scalar1 + element2 * scalar2`.
	///
	/// Implementations are free to replace this with an optimized linear
	/// combination.
	fn lincomb(elements_and_scalars: [(Self::Element, Self::Scalar); 2]) -> Self::Element {
		let [(element1, scalar1), (element2, scalar2)] = elements_and_scalars;
		scalar1 * &element1 + &(scalar2 * &element2)
	}
}

/// Domain separated hashing of a [`CipherSuite`] in a given [`Mode`].
pub(crate) trait InternalGroup: CipherSuite {
	/// `I2OSP(Ne, 2)`.
	const I2OSP_ELEMENT_LEN: [u8; 2];

	/// `HashToScalar()` with `dst_prefix || contextString`. Defaults to the
	/// `HashToScalar-` prefix.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidCipherSuite`] if the [`CipherSuite`]s
	/// [`Group`](CipherSuite::Group) and [`ExpandMsg`](CipherSuite::ExpandMsg)
	/// are incompatible.
	fn hash_to_scalar<M: Mode>(
		input: &[&[u8]],
		dst_prefix: Option<&'static [u8]>,
	) -> Result<Scalar<Self>>;

	/// `HashToGroup()` with `HashToGroup- || contextString`.
	///
	/// # Errors
	///
	/// - [`Error::InvalidCipherSuite`] if the [`CipherSuite`]s
	///   [`Group`](CipherSuite::Group) and
	///   [`ExpandMsg`](CipherSuite::ExpandMsg) are incompatible.
	/// - [`Error::InvalidInput`] if the given `input` maps to the identity
	///   element.
	fn hash_to_curve<M: Mode>(input: &[&[u8]]) -> Result<NonIdentityElement<Self>>;
}

impl<CS: CipherSuite> InternalGroup for CS {
	const I2OSP_ELEMENT_LEN: [u8; 2] = ElementLength::<CS>::U16.to_be_bytes();

	fn hash_to_scalar<M: Mode>(
		input: &[&[u8]],
		dst_prefix: Option<&'static [u8]>,
	) -> Result<Scalar<Self>> {
		CS::Group::hash_to_scalar::<CS::ExpandMsg>(
			input,
			&dst::<CS, M>(dst_prefix.unwrap_or(b"HashToScalar-"))?,
		)
		.map_err(|_| Error::InvalidCipherSuite)
	}

	fn hash_to_curve<M: Mode>(input: &[&[u8]]) -> Result<NonIdentityElement<Self>> {
		CS::Group::hash_to_curve::<CS::ExpandMsg>(input, &dst::<CS, M>(b"HashToGroup-")?)
			.map_err(|_| Error::InvalidCipherSuite)?
			.try_into()
			.map_err(|_| Error::InvalidInput)
	}
}

/// `prefix || contextString`, rejecting tags that can't be length-prefixed.
pub(crate) fn dst<CS: CipherSuite, M: Mode>(
	prefix: &'static [u8],
) -> Result<[&'static [u8]; 5]> {
	let [context_1, context_2, context_3, context_4] = M::context_string::<CS>();
	let dst = [prefix, context_1, context_2, context_3, context_4];

	if dst.i2osp_length().is_some() {
		Ok(dst)
	} else {
		Err(Error::InvalidCipherSuite)
	}
}
