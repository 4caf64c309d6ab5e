/*!
# `Blend` - Color Type
*/

use crate::{
	BlendError,
	Color,
	Context,
};



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Segment Color Type.
///
/// A segment endpoint either holds its own fixed color, or refers to one of
/// the [`Context`] colors, which are looked up at evaluation time.
///
/// The "transparent" variants use the referenced color with its alpha forced
/// to zero.
pub enum ColorType {
	/// # Fixed.
	Fixed,
	/// # Foreground.
	Foreground,
	/// # Foreground (Transparent).
	ForegroundTransparent,
	/// # Background.
	Background,
	/// # Background (Transparent).
	BackgroundTransparent,
}

impl Default for ColorType {
	#[inline]
	fn default() -> Self { Self::Fixed }
}

impl TryFrom<u8> for ColorType {
	type Error = BlendError;

	fn try_from(src: u8) -> Result<Self, Self::Error> {
		match src {
			0 => Ok(Self::Fixed),
			1 => Ok(Self::Foreground),
			2 => Ok(Self::ForegroundTransparent),
			3 => Ok(Self::Background),
			4 => Ok(Self::BackgroundTransparent),
			_ => Err(BlendError::Parse),
		}
	}
}

impl From<ColorType> for u8 {
	#[inline]
	fn from(src: ColorType) -> Self {
		match src {
			ColorType::Fixed => 0,
			ColorType::Foreground => 1,
			ColorType::ForegroundTransparent => 2,
			ColorType::Background => 3,
			ColorType::BackgroundTransparent => 4,
		}
	}
}

/// # Getters.
impl ColorType {
	#[inline]
	#[must_use]
	/// # Is Fixed?
	pub const fn is_fixed(self) -> bool { matches!(self, Self::Fixed) }

	#[must_use]
	/// # Resolve.
	///
	/// Return the effective color for an endpoint of this type. Fixed
	/// endpoints return their own color; everything else comes from the
	/// context.
	pub fn resolve(self, fixed: Color, context: &Context) -> Color {
		match self {
			Self::Fixed => fixed,
			Self::Foreground => context.foreground,
			Self::ForegroundTransparent => context.foreground.with_alpha(0.0),
			Self::Background => context.background,
			Self::BackgroundTransparent => context.background.with_alpha(0.0),
		}
	}
}
