//! Constant-time comparison of PRF outputs.

use subtle::{Choice, ConstantTimeEq};

/// Compares `a` and `b` in time independent of their content. Only the lengths
/// leak.
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
	bytes_eq(a, b).into()
}

pub(crate) fn bytes_eq(a: &[u8], b: &[u8]) -> Choice {
	// `subtle` short-circuits on a length mismatch, which is public.
	a.ct_eq(b)
}

/// ANDs all [`Choice`]s without short-circuiting.
pub(crate) fn all(choices: impl IntoIterator<Item = Choice>) -> Choice {
	choices
		.into_iter()
		.fold(Choice::from(1), |acc, choice| acc & choice)
}
