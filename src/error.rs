//! [`Error`] and [`Result`] types.

use core::convert::Infallible;
use core::fmt::{Display, Formatter};
use core::{error, fmt, result};

use rand_core::TryCryptoRng;

/// [`Result`](result::Result) with a default of [`Error`].
pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors returned by this crate.
///
/// Failed verification of a client's output is not an error, see
/// [`Server::verify_finalize()`](crate::Server::verify_finalize).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::error_impl_error, reason = "only one error type")]
pub enum Error<E = Infallible> {
	/// The number of items doesn't match, is 0 or larger than `0xFFFF`.
	Batch,
	/// The blinded element at the given batch index is not a valid encoding
	/// of a non-identity element.
	BlindedElement(usize),
	/// No valid key can be derived from the given seed and `info`.
	DeriveKeyPair,
	/// Deserialization of a key, element or proof failed.
	FromRepr,
	/// Length of `info` is larger than `0xFFFF`.
	InfoLength,
	/// Length of `input` is larger than `0xFFFF`.
	InputLength,
	/// The [`CipherSuite`](crate::CipherSuite)s group and `ExpandMsg` are
	/// incompatible.
	InvalidCipherSuite,
	/// The given `input` maps to the identity element.
	InvalidInput,
	/// The [`Proof`](crate::Proof) is invalid.
	Proof,
	/// The random number generator failed.
	Random(E),
}

impl Error {
	/// Converts an [`Error`] without a random number generator error into one
	/// carrying the error type of `R`.
	#[must_use]
	pub const fn into_random<R: ?Sized + TryCryptoRng>(self) -> Error<R::Error> {
		match self {
			Self::Batch => Error::Batch,
			Self::BlindedElement(index) => Error::BlindedElement(index),
			Self::DeriveKeyPair => Error::DeriveKeyPair,
			Self::FromRepr => Error::FromRepr,
			Self::InfoLength => Error::InfoLength,
			Self::InputLength => Error::InputLength,
			Self::InvalidCipherSuite => Error::InvalidCipherSuite,
			Self::InvalidInput => Error::InvalidInput,
			Self::Proof => Error::Proof,
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<E: Display> Display for Error<E> {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
		formatter.write_str(match self {
			Self::Batch => "number of items don't match, are 0 or larger than 0xFFFF",
			Self::BlindedElement(index) => {
				return write!(formatter, "blinded element at index {index} is invalid");
			}
			Self::DeriveKeyPair => "key can't be derived from the given input",
			Self::FromRepr => "deserialization failed",
			Self::InfoLength => "length of `info` larger than 0xFFFF",
			Self::InputLength => "length of `input` larger than 0xFFFF",
			Self::InvalidCipherSuite => "the cipher suite's group and `ExpandMsg` are incompatible",
			Self::InvalidInput => "the given `input` maps to the identity element",
			Self::Proof => "the `Proof` is invalid",
			Self::Random(error) => return error.fmt(formatter),
		})
	}
}

impl<E: error::Error> error::Error for Error<E> {}

/// Failure reported by a [`Group`](crate::group::Group) implementation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct InternalError;
