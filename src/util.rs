//! Utility functions.

use digest::Update;

/// [`Update`] taking [`Iterator`]s.
#[expect(single_use_lifetimes, reason = "false-positive")]
pub(crate) trait UpdateIter {
	/// Equivalent of [`Update::chain()`] taking an [`Iterator`] of byte slices.
	fn chain_iter<'slice>(self, iter: impl Iterator<Item = &'slice [u8]>) -> Self;
}

#[expect(single_use_lifetimes, reason = "false-positive")]
impl<T: Update> UpdateIter for T {
	fn chain_iter<'slice>(self, iter: impl Iterator<Item = &'slice [u8]>) -> Self {
		let mut this = self;

		for bytes in iter {
			this = this.chain(bytes);
		}

		this
	}
}

/// [`I2OSP`](https://datatracker.ietf.org/doc/html/rfc8017#section-4.1) implementation directly on types.
pub(crate) trait I2osp {
	/// [`I2OSP(self, 2)`](https://datatracker.ietf.org/doc/html/rfc8017#section-4.1).
	fn i2osp(self) -> [u8; 2];
}

impl I2osp for u16 {
	fn i2osp(self) -> [u8; 2] {
		self.to_be_bytes()
	}
}

/// [`I2OSP`](https://datatracker.ietf.org/doc/html/rfc8017#section-4.1) of a length.
pub(crate) trait I2ospLength {
	/// [`I2OSP(length, 2)`](https://datatracker.ietf.org/doc/html/rfc8017#section-4.1)
	/// where `length` is the number of bytes of the given slice(s). Returns
	/// [`None`] if it doesn't fit.
	fn i2osp_length(&self) -> Option<[u8; 2]>;
}

impl I2ospLength for [u8] {
	fn i2osp_length(&self) -> Option<[u8; 2]> {
		u16::try_from(self.len()).map(u16::i2osp).ok()
	}
}

impl I2ospLength for [&[u8]] {
	fn i2osp_length(&self) -> Option<[u8; 2]> {
		u16::try_from(self.iter().map(|slice| slice.len()).sum::<usize>())
			.map(u16::i2osp)
			.ok()
	}
}

impl<const L: usize> I2ospLength for [&[u8]; L] {
	fn i2osp_length(&self) -> Option<[u8; 2]> {
		self.as_slice().i2osp_length()
	}
}
