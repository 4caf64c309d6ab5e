/*!
# `Blend` - Traits.
*/



/// # Progress.
///
/// Rendering can take a while, particularly for the shapeburst shapes or
/// when supersampling is enabled. Anything implementing this trait can be
/// passed to [`Blend::render`](crate::Blend::render) to receive status
/// updates along the way.
///
/// Calls are plain and synchronous; there is no way to cancel a render from
/// here.
///
/// The unit type `()` implements this as a no-op.
pub trait Progress {
	/// # Set Text.
	///
	/// Describe the current phase of work.
	fn set_text(&mut self, text: &str);

	/// # Set Value.
	///
	/// Report the completed fraction of the current phase, from `0.0` to
	/// `1.0`.
	fn set_value(&mut self, value: f64);
}

impl Progress for () {
	#[inline]
	fn set_text(&mut self, _text: &str) {}

	#[inline]
	fn set_value(&mut self, _value: f64) {}
}
