/*!
# `Blend` - Render Kinds
*/

use crate::BlendError;
use std::{
	fmt,
	str::FromStr,
};



/// # Helper: String and Integer Conversions.
///
/// Each render kind has a stable integer code and a kebab-case name used by
/// the command line.
macro_rules! kind {
	($ty:ty, $($var:ident $num:literal $name:literal),+ $(,)?) => (
		impl $ty {
			/// # All Variants.
			pub const ALL: &'static [Self] = &[$(Self::$var),+];

			#[must_use]
			/// # As Str.
			///
			/// Return the kebab-case name.
			pub const fn as_str(self) -> &'static str {
				match self { $(Self::$var => $name),+ }
			}
		}

		impl fmt::Display for $ty {
			#[inline]
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl From<$ty> for u8 {
			#[inline]
			fn from(src: $ty) -> Self {
				match src { $(<$ty>::$var => $num),+ }
			}
		}

		impl TryFrom<u8> for $ty {
			type Error = BlendError;

			fn try_from(src: u8) -> Result<Self, Self::Error> {
				match src {
					$($num => Ok(Self::$var),)+
					_ => Err(BlendError::Parse),
				}
			}
		}

		impl FromStr for $ty {
			type Err = BlendError;

			fn from_str(src: &str) -> Result<Self, Self::Err> {
				let src = src.trim();
				$(
					if src.eq_ignore_ascii_case($name) { return Ok(Self::$var); }
				)+
				Err(BlendError::Parse)
			}
		}
	);
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Blend Mode.
///
/// This decides where colors come from: the gradient itself, or a flat ramp
/// between the context colors.
pub enum BlendMode {
	/// # Foreground to Background (RGB).
	FgBgRgb,

	/// # Foreground to Background (HSV).
	FgBgHsv,

	/// # Foreground to Transparent.
	FgTransparent,

	#[default]
	/// # Custom (Use the Gradient).
	Custom,
}

kind!(
	BlendMode,
	FgBgRgb 0 "fg-bg-rgb",
	FgBgHsv 1 "fg-bg-hsv",
	FgTransparent 2 "fg-transparent",
	Custom 3 "custom",
);



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Gradient Shape.
///
/// This maps pixel positions to gradient factors.
pub enum GradientShape {
	#[default]
	/// # Linear.
	Linear,

	/// # Bilinear.
	Bilinear,

	/// # Radial.
	Radial,

	/// # Square.
	Square,

	/// # Conical (Symmetric).
	ConicalSymmetric,

	/// # Conical (Asymmetric).
	ConicalAsymmetric,

	/// # Shapeburst (Angular).
	ShapeburstAngular,

	/// # Shapeburst (Spherical).
	ShapeburstSpherical,

	/// # Shapeburst (Dimpled).
	ShapeburstDimpled,

	/// # Spiral (Clockwise).
	SpiralCw,

	/// # Spiral (Counter-Clockwise).
	SpiralCcw,
}

kind!(
	GradientShape,
	Linear 0 "linear",
	Bilinear 1 "bilinear",
	Radial 2 "radial",
	Square 3 "square",
	ConicalSymmetric 4 "conical-symmetric",
	ConicalAsymmetric 5 "conical-asymmetric",
	ShapeburstAngular 6 "shapeburst-angular",
	ShapeburstSpherical 7 "shapeburst-spherical",
	ShapeburstDimpled 8 "shapeburst-dimpled",
	SpiralCw 9 "spiral-clockwise",
	SpiralCcw 10 "spiral-anticlockwise",
);

impl GradientShape {
	#[must_use]
	/// # Is Shapeburst?
	///
	/// Shapeburst shapes read a precomputed distance map rather than the
	/// start and end points.
	pub const fn is_shapeburst(self) -> bool {
		matches!(
			self,
			Self::ShapeburstAngular | Self::ShapeburstSpherical | Self::ShapeburstDimpled
		)
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Repeat Mode.
///
/// This decides what happens to factors outside `0..=1`.
pub enum RepeatMode {
	#[default]
	/// # None (Clamp).
	None,

	/// # Sawtooth.
	Sawtooth,

	/// # Triangular.
	Triangular,
}

kind!(
	RepeatMode,
	None 0 "none",
	Sawtooth 1 "sawtooth",
	Triangular 2 "triangular",
);

impl RepeatMode {
	#[must_use]
	/// # Apply.
	///
	/// Fold a raw shape factor into `0..=1`.
	pub fn apply(self, factor: f64) -> f64 {
		match self {
			Self::None => factor.clamp(0.0, 1.0),
			Self::Sawtooth => factor - factor.floor(),
			Self::Triangular => {
				let factor = factor.abs();
				let band = factor.trunc();
				let factor = factor - band;
				// Odd bands run backwards.
				if band % 2.0 == 1.0 { 1.0 - factor }
				else { factor }
			},
		}
	}
}
