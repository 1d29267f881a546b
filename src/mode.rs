//! Protocol modes.
//!
//! See [RFC 9497 § 3.1](https://www.rfc-editor.org/rfc/rfc9497.html#name-identifiers-for-protocol-va).

use core::fmt::Debug;

use crate::cipher_suite::CipherSuite;
use crate::common::Proof;

/// A protocol mode: [`Base`] or [`Verifiable`].
///
/// The mode is part of every domain separation tag and determines whether an
/// [`Evaluation`](crate::Evaluation) carries a [`Proof`].
pub trait Mode: 'static + Copy + Debug + Send + Sync + private::Sealed {
	/// `I2OSP(modeId, 1)`.
	const I2OSP: &'static [u8];

	/// Proof carried by an [`Evaluation`](crate::Evaluation) in this mode.
	type Proof<CS: CipherSuite>: Clone + Debug + Eq;

	/// Returns the [`Proof`] if this mode carries one.
	fn proof<CS: CipherSuite>(proof: &Self::Proof<CS>) -> Option<&Proof<CS>>;

	/// `CreateContextString(mode, identifier)`.
	///
	/// See [RFC 9497 § 3.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-3.1-5).
	#[must_use]
	fn context_string<CS: CipherSuite>() -> [&'static [u8]; 4] {
		[b"OPRFV1-", Self::I2OSP, b"-", CS::ID.as_bytes()]
	}
}

/// The OPRF mode. Evaluations carry no proof.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Base;

/// The VOPRF mode. Evaluations carry a [`Proof`] that the server's committed
/// public key was used.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Verifiable;

impl Mode for Base {
	const I2OSP: &'static [u8] = &[0x00];

	type Proof<CS: CipherSuite> = ();

	fn proof<CS: CipherSuite>((): &Self::Proof<CS>) -> Option<&Proof<CS>> {
		None
	}
}

impl Mode for Verifiable {
	const I2OSP: &'static [u8] = &[0x01];

	type Proof<CS: CipherSuite> = Proof<CS>;

	fn proof<CS: CipherSuite>(proof: &Self::Proof<CS>) -> Option<&Proof<CS>> {
		Some(proof)
	}
}

mod private {
	pub trait Sealed {}

	impl Sealed for super::Base {}
	impl Sealed for super::Verifiable {}
}
