//! Discrete log equivalence proofs.

#![expect(non_snake_case, reason = "RFC 9497 notation")]

use core::fmt::{self, Debug, Formatter};
use core::ops::Deref;

use digest::{FixedOutput, OutputSizeUser, Update};
use hybrid_array::Array;
use hybrid_array::typenum::Unsigned;
use rand_core::TryCryptoRng;
use zeroize::Zeroizing;

use crate::cipher_suite::{
	CipherSuite, Element, ElementLength, NonIdentityElement, NonZeroScalar, Scalar,
};
use crate::common::Proof;
use crate::error::{Error, Result};
use crate::group::{self, Group, InternalGroup};
use crate::key::PublicKey;
use crate::mode::Verifiable;
use crate::util::{I2osp, I2ospLength, UpdateIter};

/// A decoded element next to its canonical encoding.
pub(crate) struct ElementWrapper<CS: CipherSuite> {
	element: NonIdentityElement<CS>,
	repr: Array<u8, ElementLength<CS>>,
}

struct Composites<CS: CipherSuite> {
	M: Element<CS>,
	Z: Element<CS>,
}

impl<CS: CipherSuite> ElementWrapper<CS> {
	pub(crate) fn new(element: NonIdentityElement<CS>) -> Self {
		let repr = CS::Group::element_to_repr(&element);

		Self { element, repr }
	}

	pub(crate) fn from_repr(bytes: &[u8]) -> Result<Self> {
		CS::Group::non_identity_element_from_repr(bytes)
			.map(Self::new)
			.map_err(|_| Error::FromRepr)
	}

	pub(crate) const fn as_element(&self) -> &NonIdentityElement<CS> {
		&self.element
	}

	pub(crate) const fn as_repr(&self) -> &Array<u8, ElementLength<CS>> {
		&self.repr
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Clone for ElementWrapper<CS> {
	fn clone(&self) -> Self {
		Self {
			element: self.element,
			repr: self.repr.clone(),
		}
	}
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> Debug for ElementWrapper<CS> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementWrapper")
			.field("element", &self.element)
			.field("repr", &self.repr)
			.finish()
	}
}

impl<CS: CipherSuite> Eq for ElementWrapper<CS> {}

#[cfg_attr(coverage_nightly, coverage(off))]
impl<CS: CipherSuite> PartialEq for ElementWrapper<CS> {
	fn eq(&self, other: &Self) -> bool {
		self.repr.eq(&other.repr)
	}
}

// `A` is always the generator element and `B` the public key.
// `GenerateProof`
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.1-3
pub(crate) fn generate_proof<'items, CS, R>(
	rng: &mut R,
	k: &NonZeroScalar<CS>,
	B: &PublicKey<CS::Group>,
	C: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
	D: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
) -> Result<Proof<CS>, Error<R::Error>>
where
	CS: CipherSuite,
	R: ?Sized + TryCryptoRng,
{
	debug_assert_ne!(C.len(), 0, "found zero item length");
	debug_assert_eq!(C.len(), D.len(), "found unequal item length");
	debug_assert!(C.len() <= u16::MAX.into(), "found overflowing item length");

	let Composites::<CS> { M, Z } =
		compute_composites(Some(k), B.as_repr(), C, D).map_err(Error::into_random::<R>)?;

	let r = Zeroizing::new(CS::Group::scalar_random(rng).map_err(Error::Random)?);
	let t2 = CS::Group::non_zero_scalar_mul_by_generator(&r);
	let t3 = **r * &M;

	let c = compute_c::<CS>(B.as_repr(), &M, &Z, &t2, &t3).map_err(Error::into_random::<R>)?;
	let s = **r - &(c * &**k);

	Ok(Proof { c, s })
}

// `VerifyProof`
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.2-2
pub(crate) fn verify_proof<'items, CS>(
	B: &PublicKey<CS::Group>,
	C: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
	D: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
	proof: &Proof<CS>,
) -> Result<()>
where
	CS: CipherSuite,
{
	debug_assert_ne!(C.len(), 0, "found zero item length");
	debug_assert_eq!(C.len(), D.len(), "found unequal item length");
	debug_assert!(C.len() <= u16::MAX.into(), "found overflowing item length");

	let Composites::<CS> { M, Z } = compute_composites(None, B.as_repr(), C, D)?;
	let Proof { c, s } = proof;

	let t2 = CS::Group::lincomb([
		(CS::Group::element_generator(), *s),
		(**B.as_element(), *c),
	]);
	let t3 = CS::Group::lincomb([(M, *s), (Z, *c)]);

	let expected_c = compute_c::<CS>(B.as_repr(), &M, &Z, &t2, &t3)?;

	if &expected_c == c {
		Ok(())
	} else {
		Err(Error::Proof)
	}
}

// Shared code between `GenerateProof` and `VerifyProof`
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.1-3
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.2-2
fn compute_c<CS: CipherSuite>(
	Bm: &[u8],
	M: &Element<CS>,
	Z: &Element<CS>,
	t2: &Element<CS>,
	t3: &Element<CS>,
) -> Result<Scalar<CS>> {
	let [a0, a1, a2, a3] = [M, Z, t2, t3].map(CS::Group::element_to_repr);

	CS::hash_to_scalar::<Verifiable>(
		&[
			&CS::I2OSP_ELEMENT_LEN,
			Bm,
			&CS::I2OSP_ELEMENT_LEN,
			&a0,
			&CS::I2OSP_ELEMENT_LEN,
			&a1,
			&CS::I2OSP_ELEMENT_LEN,
			&a2,
			&CS::I2OSP_ELEMENT_LEN,
			&a3,
			b"Challenge",
		],
		None,
	)
}

// `ComputeComposites` and `ComputeCompositesFast`
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.1-5
// https://www.rfc-editor.org/rfc/rfc9497.html#section-2.2.2-4
fn compute_composites<'items, CS>(
	k: Option<&NonZeroScalar<CS>>,
	Bm: &[u8],
	C: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
	D: impl ExactSizeIterator<Item = &'items ElementWrapper<CS>>,
) -> Result<Composites<CS>>
where
	CS: CipherSuite,
{
	let seed_dst = group::dst::<CS, Verifiable>(b"Seed-")?;
	let seed = CS::Hash::default()
		.chain(CS::I2OSP_ELEMENT_LEN)
		.chain(Bm)
		.chain(seed_dst.i2osp_length().ok_or(Error::InvalidCipherSuite)?)
		.chain_iter(seed_dst.into_iter())
		.finalize_fixed();

	let mut M = CS::Group::element_identity();
	let mut Z = CS::Group::element_identity();

	for (i, (Ci, Di)) in (0..=u16::MAX).zip(C.zip(D)) {
		let di = CS::hash_to_scalar::<Verifiable>(
			&[
				&<CS::Hash as OutputSizeUser>::OutputSize::U16.i2osp(),
				&seed,
				&i.i2osp(),
				&CS::I2OSP_ELEMENT_LEN,
				Ci.as_repr(),
				&CS::I2OSP_ELEMENT_LEN,
				Di.as_repr(),
				b"Composite",
			],
			None,
		)?;

		M = di * Ci.as_element().deref() + &M;

		if k.is_none() {
			Z = di * Di.as_element().deref() + &Z;
		}
	}

	if let Some(k) = k {
		Z = **k * &M;
	}

	Ok(Composites { M, Z })
}
