/*!
# `Blend` - Context
*/

use crate::Color;



#[derive(Debug, Clone, Copy, PartialEq)]
/// # Color Context.
///
/// This holds the foreground and background colors that segment endpoints
/// and the non-custom blend modes refer to. It is passed explicitly wherever
/// it is needed.
pub struct Context {
	/// # Foreground.
	pub foreground: Color,

	/// # Background.
	pub background: Color,
}

impl Default for Context {
	#[inline]
	fn default() -> Self { Self::new(Color::BLACK, Color::WHITE) }
}

impl Context {
	#[must_use]
	/// # New.
	pub const fn new(foreground: Color, background: Color) -> Self {
		Self { foreground, background }
	}
}
