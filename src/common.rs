//! Elements and proofs exchanged with the client.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use hybrid_array::Array;
use hybrid_array::typenum::{Sum, Unsigned};

use crate::cipher_suite::{CipherSuite, ElementLength, NonIdentityElement, Scalar, ScalarLength};
use crate::error::{Error, Result};
use crate::group::Group;
use crate::internal::{self, ElementWrapper};
use crate::key::PublicKey;
use crate::mode::{Mode, Verifiable};

/// A blinded element received from the client.
pub struct BlindedElement<CS: CipherSuite>(ElementWrapper<CS>);

/// An evaluated element returned to the client.
pub struct EvaluationElement<CS: CipherSuite>(ElementWrapper<CS>);

/// A proof that [`EvaluationElement`]s were computed with the private key
/// committed to by a [`PublicKey`].
pub struct Proof<CS: CipherSuite> {
	pub(crate) c: Scalar<CS>,
	pub(crate) s: Scalar<CS>,
}

/// Result of a server evaluation.
///
/// Holds one [`EvaluationElement`] per blinded element, in order, and
/// [`Mode::Proof`]: `()` for [`Base`](crate::Base) and a [`Proof`] for
/// [`Verifiable`].
pub struct Evaluation<CS: CipherSuite, M: Mode> {
	elements: Vec<EvaluationElement<CS>>,
	proof: M::Proof<CS>,
}

impl<CS: CipherSuite> BlindedElement<CS> {
	/// Deserializes a [`BlindedElement`].
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` is not a canonical encoding of a
	/// non-identity element.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		ElementWrapper::from_repr(bytes).map(Self)
	}

	/// Returns the encoding.
	#[must_use]
	pub const fn as_repr(&self) -> &Array<u8, ElementLength<CS>> {
		self.0.as_repr()
	}

	/// Returns the element.
	#[must_use]
	pub const fn as_element(&self) -> &NonIdentityElement<CS> {
		self.0.as_element()
	}

	pub(crate) const fn wrapper(&self) -> &ElementWrapper<CS> {
		&self.0
	}
}

impl<CS: CipherSuite> EvaluationElement<CS> {
	pub(crate) fn new(element: NonIdentityElement<CS>) -> Self {
		Self(ElementWrapper::new(element))
	}

	/// Deserializes an [`EvaluationElement`].
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` is not a canonical encoding of a
	/// non-identity element.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		ElementWrapper::from_repr(bytes).map(Self)
	}

	/// Returns the encoding.
	#[must_use]
	pub const fn as_repr(&self) -> &Array<u8, ElementLength<CS>> {
		self.0.as_repr()
	}

	/// Returns the element.
	#[must_use]
	pub const fn as_element(&self) -> &NonIdentityElement<CS> {
		self.0.as_element()
	}

	pub(crate) const fn wrapper(&self) -> &ElementWrapper<CS> {
		&self.0
	}
}

impl<CS: CipherSuite> Proof<CS> {
	/// Returns the challenge `c`.
	#[must_use]
	pub const fn c(&self) -> &Scalar<CS> {
		&self.c
	}

	/// Returns the response `s`.
	#[must_use]
	pub const fn s(&self) -> &Scalar<CS> {
		&self.s
	}

	/// Serializes this [`Proof`] as `c || s`.
	#[must_use]
	pub fn to_repr(&self) -> Array<u8, Sum<ScalarLength<CS>, ScalarLength<CS>>> {
		let mut repr = Array::<u8, Sum<ScalarLength<CS>, ScalarLength<CS>>>::default();
		let (c, s) = repr.split_at_mut(ScalarLength::<CS>::USIZE);
		c.copy_from_slice(&CS::Group::scalar_to_repr(&self.c));
		s.copy_from_slice(&CS::Group::scalar_to_repr(&self.s));

		repr
	}

	/// Deserializes a [`Proof`] from `c || s`.
	///
	/// # Errors
	///
	/// Returns [`Error::FromRepr`] if `bytes` has the wrong length or either
	/// scalar is not canonically encoded.
	pub fn from_repr(bytes: &[u8]) -> Result<Self> {
		let (c, s) = bytes
			.split_at_checked(ScalarLength::<CS>::USIZE)
			.ok_or(Error::FromRepr)?;

		Ok(Self {
			c: CS::Group::scalar_from_repr(c).map_err(|_| Error::FromRepr)?,
			s: CS::Group::scalar_from_repr(s).map_err(|_| Error::FromRepr)?,
		})
	}

	/// Verifies this [`Proof`] against the `public_key` and the positionally
	/// aligned `blinded_elements` and `evaluation_elements`.
	///
	/// # Errors
	///
	/// - [`Error::Batch`] if the number of elements doesn't match, is 0 or
	///   exceeds [`u16::MAX`].
	/// - [`Error::Proof`] if the proof is invalid.
	pub fn verify(
		&self,
		public_key: &PublicKey<CS::Group>,
		blinded_elements: &[BlindedElement<CS>],
		evaluation_elements: &[EvaluationElement<CS>],
	) -> Result<()> {
		if blinded_elements.is_empty()
			|| blinded_elements.len() != evaluation_elements.len()
			|| blinded_elements.len() > u16::MAX.into()
		{
			return Err(Error::Batch);
		}

		internal::verify_proof(
			public_key,
			blinded_elements.iter().map(BlindedElement::wrapper),
			evaluation_elements.iter().map(EvaluationElement::wrapper),
			self,
		)
	}
}

impl<CS: CipherSuite, M: Mode> Evaluation<CS, M> {
	pub(crate) const fn new(elements: Vec<EvaluationElement<CS>>, proof: M::Proof<CS>) -> Self {
		Self { elements, proof }
	}

	/// Returns the [`EvaluationElement`]s, aligned with the input batch.
	#[must_use]
	pub fn elements(&self) -> &[EvaluationElement<CS>] {
		&self.elements
	}

	/// Returns the number of [`EvaluationElement`]s.
	#[must_use]
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Returns `true` if there are no [`EvaluationElement`]s. A returned
	/// [`Evaluation`] is never empty.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Returns the [`Proof`] in [`Verifiable`] mode, otherwise [`None`].
	#[must_use]
	pub fn proof_pair(&self) -> Option<&Proof<CS>> {
		M::proof(&self.proof)
	}

	/// Returns the [`EvaluationElement`]s and the [`Mode::Proof`].
	#[must_use]
	pub fn into_parts(self) -> (Vec<EvaluationElement<CS>>, M::Proof<CS>) {
		(self.elements, self.proof)
	}
}

impl<CS: CipherSuite> Evaluation<CS, Verifiable> {
	/// Returns the [`Proof`].
	#[must_use]
	pub const fn proof(&self) -> &Proof<CS> {
		&self.proof
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Clone for BlindedElement<CS> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Debug for BlindedElement<CS> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("BlindedElement").field(&self.0).finish()
	}
}

impl<CS: CipherSuite> Eq for BlindedElement<CS> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> PartialEq for BlindedElement<CS> {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Clone for EvaluationElement<CS> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Debug for EvaluationElement<CS> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EvaluationElement").field(&self.0).finish()
	}
}

impl<CS: CipherSuite> Eq for EvaluationElement<CS> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> PartialEq for EvaluationElement<CS> {
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Clone for Proof<CS> {
	fn clone(&self) -> Self {
		Self {
			c: self.c,
			s: self.s,
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Debug for Proof<CS> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Proof")
			.field("c", &self.c)
			.field("s", &self.s)
			.finish()
	}
}

impl<CS: CipherSuite> Eq for Proof<CS> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> PartialEq for Proof<CS> {
	fn eq(&self, other: &Self) -> bool {
		self.c.eq(&other.c) && self.s.eq(&other.s)
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite, M: Mode> Clone for Evaluation<CS, M> {
	fn clone(&self) -> Self {
		Self {
			elements: self.elements.clone(),
			proof: self.proof.clone(),
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite, M: Mode> Debug for Evaluation<CS, M> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Evaluation")
			.field("elements", &self.elements)
			.field("proof", &self.proof)
			.finish()
	}
}

impl<CS: CipherSuite, M: Mode> Eq for Evaluation<CS, M> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite, M: Mode> PartialEq for Evaluation<CS, M> {
	fn eq(&self, other: &Self) -> bool {
		self.elements.eq(&other.elements) && self.proof.eq(&other.proof)
	}
}
