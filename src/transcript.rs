//! Transcript hashing shared by the server and clients.
//!
//! Both sides must agree on these byte layouts for the PRF output to match.

use digest::{FixedOutput, Output, Update};

use crate::cipher_suite::{CipherSuite, NonIdentityElement};
use crate::error::{Error, Result};
use crate::group::InternalGroup;
use crate::mode::Mode;
use crate::util::I2ospLength;

/// Maps `input` to a group element under the context string of `M`.
///
/// # Errors
///
/// - [`Error::InputLength`] if `input` exceeds a length of [`u16::MAX`].
/// - [`Error::InvalidInput`] if `input` maps to the identity element.
/// - [`Error::InvalidCipherSuite`] if the [`CipherSuite`] is misconfigured.
pub fn hash_to_group<CS: CipherSuite, M: Mode>(input: &[u8]) -> Result<NonIdentityElement<CS>> {
	if input.i2osp_length().is_none() {
		return Err(Error::InputLength);
	}

	CS::hash_to_curve::<M>(&[input])
}

/// Computes the PRF output from the `input`, the encoded unblinded element
/// and `info`. `info` is only framed into the transcript when it is not
/// empty.
///
/// # Errors
///
/// - [`Error::InputLength`] if `input` exceeds a length of [`u16::MAX`].
/// - [`Error::InfoLength`] if `info` exceeds a length of [`u16::MAX`].
/// - [`Error::FromRepr`] if `element` exceeds a length of [`u16::MAX`].
// `Finalize`
// https://www.rfc-editor.org/rfc/rfc9497.html#section-3.3.1-7
pub fn finalize<CS: CipherSuite>(
	input: &[u8],
	element: &[u8],
	info: &[u8],
) -> Result<Output<CS::Hash>> {
	let mut hash = CS::Hash::default()
		.chain(input.i2osp_length().ok_or(Error::InputLength)?)
		.chain(input);

	if !info.is_empty() {
		hash.update(&info.i2osp_length().ok_or(Error::InfoLength)?);
		hash.update(info);
	}

	Ok(hash
		.chain(element.i2osp_length().ok_or(Error::FromRepr)?)
		.chain(element)
		.chain(b"Finalize")
		.finalize_fixed())
}
