//! OPRF and VOPRF server.
//!
//! See [RFC 9497 § 3.3](https://www.rfc-editor.org/rfc/rfc9497.html#name-online-protocol).

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use digest::Output;
use hybrid_array::Array;
use rand_core::TryCryptoRng;
use subtle::Choice;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::cipher_suite::{CipherSuite, ScalarLength};
use crate::common::{BlindedElement, Evaluation, EvaluationElement};
use crate::error::{Error, Result};
use crate::group::Group;
use crate::internal;
use crate::key::{KeyPair, PublicKey};
use crate::mode::{Base, Mode, Verifiable};
use crate::{ct, transcript};

/// Server holding a [`KeyPair`] for the [`CipherSuite`] `CS` in the [`Mode`]
/// `M`.
///
/// Evaluation and verification take `&self` and may run concurrently. Only
/// [`Server::key_gen()`] requires exclusive access.
pub struct Server<CS: CipherSuite, M: Mode> {
	key_pair: KeyPair<CS::Group>,
	mode: PhantomData<M>,
}

impl<CS: CipherSuite, M: Mode> Server<CS, M> {
	/// Creates a [`Server`] with a freshly generated [`KeyPair`].
	///
	/// # Errors
	///
	/// Returns [`Error::Random`] if the given `rng` fails.
	pub fn new<R>(rng: &mut R) -> Result<Self, Error<R::Error>>
	where
		R: ?Sized + TryCryptoRng,
	{
		let key_pair = KeyPair::generate(rng).map_err(Error::Random)?;
		log::debug!("server: generated key pair");

		Ok(Self::from_key_pair(key_pair))
	}

	/// Creates a [`Server`] with a [`KeyPair`] deterministically derived from
	/// `seed` and `info` under this servers [`Mode`].
	///
	/// # Errors
	///
	/// See [`KeyPair::derive()`].
	pub fn from_seed(seed: &[u8; 32], info: &[u8]) -> Result<Self> {
		KeyPair::derive::<CS, M>(seed, info).map(Self::from_key_pair)
	}

	/// Creates a [`Server`] from an existing [`KeyPair`].
	#[must_use]
	pub const fn from_key_pair(key_pair: KeyPair<CS::Group>) -> Self {
		Self {
			key_pair,
			mode: PhantomData,
		}
	}

	/// Returns the [`KeyPair`].
	#[must_use]
	pub const fn key_pair(&self) -> &KeyPair<CS::Group> {
		&self.key_pair
	}

	/// Replaces the [`KeyPair`] with a freshly generated one. The previous
	/// secret key is zeroized. On failure the previous [`KeyPair`] is kept.
	///
	/// # Errors
	///
	/// Returns [`Error::Random`] if the given `rng` fails.
	// `GenerateKeyPair`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.2-2
	pub fn key_gen<R>(&mut self, rng: &mut R) -> Result<(), Error<R::Error>>
	where
		R: ?Sized + TryCryptoRng,
	{
		self.key_pair = KeyPair::generate(rng).map_err(Error::Random)?;
		log::debug!("server: regenerated key pair");

		Ok(())
	}

	/// Returns the serialized private key.
	#[must_use]
	pub fn private_key(&self) -> Zeroizing<Array<u8, ScalarLength<CS>>> {
		self.key_pair.to_repr()
	}

	/// Returns the [`PublicKey`] clients verify [`Proof`](crate::Proof)s
	/// against.
	#[must_use]
	pub const fn public_key(&self) -> &PublicKey<CS::Group> {
		self.key_pair.public_key()
	}

	/// Computes the PRF output for `input` and `info` directly, without
	/// blinding.
	///
	/// # Errors
	///
	/// - [`Error::InputLength`] if `input` exceeds a length of [`u16::MAX`].
	/// - [`Error::InfoLength`] if `info` exceeds a length of [`u16::MAX`].
	/// - [`Error::InvalidInput`] if `input` maps to the identity element.
	// `Evaluate`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.3.1-9
	pub fn full_evaluate(&self, input: &[u8], info: &[u8]) -> Result<Output<CS::Hash>> {
		let input_element = transcript::hash_to_group::<CS, M>(input)?;
		let evaluated_element = *self.key_pair.secret_key().as_scalar() * &input_element;

		transcript::finalize::<CS>(
			input,
			&CS::Group::element_to_repr(&evaluated_element),
			info,
		)
	}

	/// Recomputes the PRF output for `input` and `info` and compares it with
	/// the clients `output` in constant time. Any failure yields `false`.
	// `VerifyFinalize`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.3.1-11
	#[must_use]
	pub fn verify_finalize(&self, input: &[u8], output: &[u8], info: &[u8]) -> bool {
		self.verify_finalize_batch(&[input], &[output], info)
	}

	/// Batched [`Server::verify_finalize()`]. Returns `false` if the number of
	/// `inputs` and `outputs` differ or is zero. An empty batch is rejected
	/// rather than vacuously verified.
	///
	/// Every pair is recomputed and compared, a mismatch is not detected
	/// before all comparisons are done.
	#[must_use]
	pub fn verify_finalize_batch<I, O>(&self, inputs: &[I], outputs: &[O], info: &[u8]) -> bool
	where
		I: AsRef<[u8]>,
		O: AsRef<[u8]>,
	{
		self.verify_finalize_batch_with(inputs, outputs, info, ct::bytes_eq)
	}

	fn verify_finalize_batch_with<I, O, C>(
		&self,
		inputs: &[I],
		outputs: &[O],
		info: &[u8],
		mut compare: C,
	) -> bool
	where
		I: AsRef<[u8]>,
		O: AsRef<[u8]>,
		C: FnMut(&[u8], &[u8]) -> Choice,
	{
		if inputs.is_empty() || inputs.len() != outputs.len() {
			return false;
		}

		log::debug!("verify_finalize: batch_size={}", inputs.len());

		ct::all(inputs.iter().zip(outputs).map(|(input, output)| {
			let (digest, valid) = match self.full_evaluate(input.as_ref(), info) {
				Ok(digest) => (digest, Choice::from(1)),
				Err(_) => (Output::<CS::Hash>::default(), Choice::from(0)),
			};

			compare(digest.as_slice(), output.as_ref()) & valid
		}))
		.into()
	}

	fn evaluate_element(&self, blinded_element: &BlindedElement<CS>) -> EvaluationElement<CS> {
		let secret_key = self.key_pair.secret_key().as_scalar();
		EvaluationElement::new(*secret_key * blinded_element.as_element())
	}
}

impl<CS: CipherSuite> Server<CS, Base> {
	/// Evaluates a single encoded blinded element.
	///
	/// # Errors
	///
	/// Returns [`Error::BlindedElement`] with index `0` if the element isn't a
	/// valid encoding of a non-identity element.
	// `BlindEvaluate`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.3.1-4
	pub fn evaluate(&self, blinded_element: &[u8]) -> Result<Evaluation<CS, Base>> {
		self.evaluate_batch(&[blinded_element])
	}

	/// Evaluates a batch of encoded blinded elements. The returned
	/// [`EvaluationElement`]s are in the same order.
	///
	/// # Errors
	///
	/// - [`Error::Batch`] if the batch is empty or larger than [`u16::MAX`].
	/// - [`Error::BlindedElement`] with the index of the first element that
	///   isn't a valid encoding of a non-identity element.
	pub fn evaluate_batch<B>(&self, blinded_elements: &[B]) -> Result<Evaluation<CS, Base>>
	where
		B: AsRef<[u8]>,
	{
		check_batch(blinded_elements.len())?;

		let elements = blinded_elements
			.iter()
			.enumerate()
			.map(|(index, blinded_element)| {
				decode(index, blinded_element.as_ref())
					.map(|blinded_element| self.evaluate_element(&blinded_element))
			})
			.collect::<Result<_>>()?;

		Ok(Evaluation::new(elements, ()))
	}
}

impl<CS: CipherSuite> Server<CS, Verifiable> {
	/// Evaluates a single encoded blinded element and proves it.
	///
	/// # Errors
	///
	/// - [`Error::BlindedElement`] with index `0` if the element isn't a valid
	///   encoding of a non-identity element.
	/// - [`Error::Random`] if the given `rng` fails.
	// `BlindEvaluate`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.3.2-2
	pub fn evaluate<R>(
		&self,
		rng: &mut R,
		blinded_element: &[u8],
	) -> Result<Evaluation<CS, Verifiable>, Error<R::Error>>
	where
		R: ?Sized + TryCryptoRng,
	{
		self.evaluate_batch(rng, &[blinded_element])
	}

	/// Evaluates a batch of encoded blinded elements. A single
	/// [`Proof`](crate::Proof) covers the whole batch.
	///
	/// # Errors
	///
	/// - [`Error::Batch`] if the batch is empty or larger than [`u16::MAX`].
	/// - [`Error::BlindedElement`] with the index of the first element that
	///   isn't a valid encoding of a non-identity element.
	/// - [`Error::Random`] if the given `rng` fails.
	// `BlindEvaluateBatch`
	// https://www.rfc-editor.org/rfc/rfc9497.html#section-4-3.2
	pub fn evaluate_batch<R, B>(
		&self,
		rng: &mut R,
		blinded_elements: &[B],
	) -> Result<Evaluation<CS, Verifiable>, Error<R::Error>>
	where
		R: ?Sized + TryCryptoRng,
		B: AsRef<[u8]>,
	{
		check_batch(blinded_elements.len()).map_err(Error::into_random::<R>)?;

		let blinded_elements: Vec<BlindedElement<CS>> = blinded_elements
			.iter()
			.enumerate()
			.map(|(index, blinded_element)| decode(index, blinded_element.as_ref()))
			.collect::<Result<_>>()
			.map_err(Error::into_random::<R>)?;
		let evaluation_elements: Vec<EvaluationElement<CS>> = blinded_elements
			.iter()
			.map(|blinded_element| self.evaluate_element(blinded_element))
			.collect();

		let proof = internal::generate_proof(
			rng,
			self.key_pair.secret_key().as_scalar(),
			self.key_pair.public_key(),
			blinded_elements.iter().map(BlindedElement::wrapper),
			evaluation_elements.iter().map(EvaluationElement::wrapper),
		)?;

		Ok(Evaluation::new(evaluation_elements, proof))
	}
}

fn check_batch(length: usize) -> Result<()> {
	if length == 0 || length > u16::MAX.into() {
		log::debug!("evaluate: rejected batch_size={length}");
		return Err(Error::Batch);
	}

	log::debug!("evaluate: batch_size={length}");

	Ok(())
}

fn decode<CS: CipherSuite>(index: usize, blinded_element: &[u8]) -> Result<BlindedElement<CS>> {
	BlindedElement::from_repr(blinded_element).map_err(|_| {
		log::warn!("evaluate: invalid blinded element at index {index}");
		Error::BlindedElement(index)
	})
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite, M: Mode> Clone for Server<CS, M> {
	fn clone(&self) -> Self {
		Self::from_key_pair(self.key_pair.clone())
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite, M: Mode> Debug for Server<CS, M> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Server")
			.field("key_pair", &self.key_pair)
			.finish_non_exhaustive()
	}
}

impl<CS: CipherSuite, M: Mode> ZeroizeOnDrop for Server<CS, M> {}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;
	use crate::group::ristretto255::Ristretto255;

	#[test]
	fn batch_comparisons_not_short_circuited() {
		let server = Server::<Ristretto255, Base>::from_seed(&[0; 32], b"").unwrap();
		let inputs = [b"a".as_slice(), b"b", b"c", b"d"];
		let mut outputs: [Output<<Ristretto255 as CipherSuite>::Hash>; 4] =
			inputs.map(|input| server.full_evaluate(input, b"").unwrap());
		outputs[0][0] ^= 1;

		let calls = Cell::new(0);
		let valid = server.verify_finalize_batch_with(&inputs, &outputs, b"", |a, b| {
			calls.set(calls.get() + 1);
			ct::bytes_eq(a, b)
		});

		assert!(!valid);
		assert_eq!(calls.get(), inputs.len());
	}

	#[test]
	fn batch_length_mismatch() {
		let server = Server::<Ristretto255, Base>::from_seed(&[0; 32], b"").unwrap();
		let output = server.full_evaluate(b"a", b"").unwrap();

		assert!(server.verify_finalize_batch(&[b"a"], &[output], b""));
		assert!(!server.verify_finalize_batch(&[b"a", b"a"], &[output], b""));
		assert!(!server.verify_finalize_batch::<&[u8], &[u8]>(&[], &[], b""));
	}
}
