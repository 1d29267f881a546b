//! Test utilities.

#![expect(dead_code, reason = "shared between test crates")]

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use digest::Output;
use hybrid_array::Array;
use oprf_server::cipher_suite::{CipherSuite, ElementLength, NonZeroScalar};
use oprf_server::group::Group;
use oprf_server::{EvaluationElement, Mode, transcript};
use rand_core::{CryptoRng, OsRng, RngCore, TryCryptoRng, TryRngCore};

/// Generates `#[test]` functions pre-fixed with the given `name` for all
/// available [`CipherSuite`]s, optionally for the given [`Mode`].
#[macro_export]
macro_rules! test_ciphersuites {
	($name:ident) => {
		::paste::paste! {
			#[test]
			fn [<$name _ristretto255>]() {
				$name::<::oprf_server::group::ristretto255::Ristretto255>();
			}
		}
	};
	($name:ident, $mode:ident) => {
		::paste::paste! {
			#[test]
			fn [<$name _ $mode:lower _ristretto255>]() {
				$name::<::oprf_server::group::ristretto255::Ristretto255, ::oprf_server::$mode>();
			}
		}
	};
}

/// Default `input`.
pub const INPUT: &[u8] = b"test input";
/// Default `info`.
pub const INFO: &[u8] = b"test info";

/// Minimal client performing `Blind`, `Finalize` and nothing else.
pub struct Client<CS: CipherSuite> {
	blind: NonZeroScalar<CS>,
	blinded_element: Array<u8, ElementLength<CS>>,
}

impl<CS: CipherSuite> Client<CS> {
	/// Blinds `input` with a random scalar.
	pub fn blind<M: Mode>(input: &[u8]) -> Self {
		let blind = CS::Group::scalar_random(&mut OsRng).unwrap();
		let element = transcript::hash_to_group::<CS, M>(input).unwrap();
		let blinded_element = CS::Group::element_to_repr(&(blind * &element));

		Self {
			blind,
			blinded_element,
		}
	}

	/// Blinds every input.
	pub fn batch<M: Mode>(inputs: &[&[u8]]) -> Vec<Self> {
		inputs.iter().map(|input| Self::blind::<M>(input)).collect()
	}

	pub fn blinded_element(&self) -> &[u8] {
		&self.blinded_element
	}

	/// Unblinds the `evaluation_element` and computes the PRF output.
	pub fn finalize(
		&self,
		input: &[u8],
		evaluation_element: &EvaluationElement<CS>,
		info: &[u8],
	) -> Output<CS::Hash> {
		let unblinded = CS::Group::scalar_invert(&self.blind) * evaluation_element.as_element();

		transcript::finalize::<CS>(input, &CS::Group::element_to_repr(&unblinded), info).unwrap()
	}
}

/// A random number generator that always fails.
#[derive(Clone, Copy, Debug)]
pub struct FailingRng;

/// Error returned by [`FailingRng`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RngError;

impl TryRngCore for FailingRng {
	type Error = RngError;

	fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
		Err(RngError)
	}

	fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
		Err(RngError)
	}

	fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), Self::Error> {
		Err(RngError)
	}
}

impl TryCryptoRng for FailingRng {}

impl Display for RngError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("failing RNG")
	}
}

impl Error for RngError {}

/// A random number generator cycling over the given bytes.
#[derive(Debug)]
pub struct CycleRng<'bytes> {
	bytes: &'bytes [u8],
	offset: usize,
}

impl<'bytes> CycleRng<'bytes> {
	pub const fn new(bytes: &'bytes [u8]) -> Self {
		Self { bytes, offset: 0 }
	}
}

impl RngCore for CycleRng<'_> {
	fn next_u32(&mut self) -> u32 {
		let mut bytes = [0; size_of::<u32>()];
		self.fill_bytes(&mut bytes);
		u32::from_le_bytes(bytes)
	}

	fn next_u64(&mut self) -> u64 {
		let mut bytes = [0; size_of::<u64>()];
		self.fill_bytes(&mut bytes);
		u64::from_le_bytes(bytes)
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		for (byte, value) in dst
			.iter_mut()
			.zip(self.bytes.iter().cycle().skip(self.offset))
		{
			*byte = *value;
		}

		self.offset = (self.offset + dst.len()) % self.bytes.len();
	}
}

impl CryptoRng for CycleRng<'_> {}
