//! [`CipherSuite`] and other related types.

use core::ops::Deref;

use digest::{FixedOutput, Update};
use hash2curve::ExpandMsg;
use hybrid_array::typenum::{IsLess, True, U65536};

use crate::group::Group;

/// OPRF cipher suite. The default cipher suite can be found by enabling the
/// `ristretto255-ciphersuite` crate feature.
///
/// See [RFC 9497 § 4](https://www.rfc-editor.org/rfc/rfc9497.html#name-ciphersuites).
pub trait CipherSuite: 'static {
	/// The ID of this [`CipherSuite`].
	///
	/// See [RFC 9497 § 3.1](https://www.rfc-editor.org/rfc/rfc9497.html#section-3.1-3).
	const ID: Id;

	/// The prime-order [`Group`] of this [`CipherSuite`].
	type Group: Group;

	/// The hash of this [`CipherSuite`], used for the composite seed and the
	/// final PRF output.
	type Hash: Default + FixedOutput<OutputSize: IsLess<U65536, Output = True>> + Update;

	/// The [`ExpandMsg`] to use with this [`Group`](CipherSuite::Group).
	type ExpandMsg: ExpandMsg<<Self::Group as Group>::SecurityLevel>;
}

/// Typedef to [`CipherSuite::Group`].
type CsGroup<Cs> = <Cs as CipherSuite>::Group;
/// Typedef to [`Group::NonZeroScalar`] via [`CipherSuite`].
pub type NonZeroScalar<Cs> = <CsGroup<Cs> as Group>::NonZeroScalar;
/// Typedef to [`Group::Scalar`] via [`CipherSuite`].
pub type Scalar<Cs> = <CsGroup<Cs> as Group>::Scalar;
/// Typedef to [`Group::ScalarLength`] via [`CipherSuite`].
pub type ScalarLength<Cs> = <CsGroup<Cs> as Group>::ScalarLength;
/// Typedef to [`Group::NonIdentityElement`] via [`CipherSuite`].
pub type NonIdentityElement<Cs> = <CsGroup<Cs> as Group>::NonIdentityElement;
/// Typedef to [`Group::Element`] via [`CipherSuite`].
pub type Element<Cs> = <CsGroup<Cs> as Group>::Element;
/// Typedef to [`Group::ElementLength`] via [`CipherSuite`].
pub type ElementLength<Cs> = <CsGroup<Cs> as Group>::ElementLength;

/// A valid [`CipherSuite::ID`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Id(&'static [u8]);

impl Id {
	/// Creates an [`Id`]. Returns [`None`] if `id` is longer than 65,513 bytes.
	#[must_use]
	pub const fn new(id: &'static [u8]) -> Option<Self> {
		// The longest domain separation tag is `HashToScalar-` or `DeriveKeyPair`
		// followed by `OPRFV1-`, the mode and `-`, 22 bytes before the ID. Its
		// length must fit `I2OSP` with 2 bytes.
		if id.len() <= 65_513 {
			Some(Self(id))
		} else {
			None
		}
	}

	/// Returns the raw identifier.
	#[must_use]
	pub const fn as_bytes(self) -> &'static [u8] {
		self.0
	}
}

impl Deref for Id {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		self.0
	}
}
