/*!
# `Blend` - Gradient Segment
*/

use crate::{
	BlendError,
	Color,
	ColorType,
	Context,
	Hsv,
};
use std::f64::consts::{
	FRAC_PI_2,
	PI,
};



/// # Epsilon.
///
/// Segments narrower than this are treated as having no width, and positional
/// clamps keep this much distance between neighboring handles.
pub const EPSILON: f64 = 1e-10;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Blend (Easing) Function.
///
/// This maps a segment-local position to an interpolation factor.
pub enum BlendFunction {
	/// # Linear.
	Linear,
	/// # Curved.
	Curved,
	/// # Sine.
	Sine,
	/// # Sphere (Increasing).
	SphereIncreasing,
	/// # Sphere (Decreasing).
	SphereDecreasing,
}

impl Default for BlendFunction {
	#[inline]
	fn default() -> Self { Self::Linear }
}

impl TryFrom<u8> for BlendFunction {
	type Error = BlendError;

	fn try_from(src: u8) -> Result<Self, Self::Error> {
		match src {
			0 => Ok(Self::Linear),
			1 => Ok(Self::Curved),
			2 => Ok(Self::Sine),
			3 => Ok(Self::SphereIncreasing),
			4 => Ok(Self::SphereDecreasing),
			_ => Err(BlendError::Parse),
		}
	}
}

impl From<BlendFunction> for u8 {
	#[inline]
	fn from(src: BlendFunction) -> Self {
		match src {
			BlendFunction::Linear => 0,
			BlendFunction::Curved => 1,
			BlendFunction::Sine => 2,
			BlendFunction::SphereIncreasing => 3,
			BlendFunction::SphereDecreasing => 4,
		}
	}
}

impl BlendFunction {
	#[must_use]
	/// # Flipped.
	///
	/// The sphere functions trade places when a segment is mirrored; the rest
	/// are their own mirror image.
	pub const fn flipped(self) -> Self {
		match self {
			Self::SphereIncreasing => Self::SphereDecreasing,
			Self::SphereDecreasing => Self::SphereIncreasing,
			other => other,
		}
	}

	#[must_use]
	/// # Factor.
	///
	/// Return the interpolation factor for the segment-local `pos`, given the
	/// segment-local `middle`.
	pub fn factor(self, middle: f64, pos: f64) -> f64 {
		match self {
			Self::Linear => linear_factor(middle, pos),
			Self::Curved => {
				let middle = middle.clamp(EPSILON, 1.0 - EPSILON);
				pos.powf(0.5_f64.ln() / middle.ln())
			},
			Self::Sine => {
				let f = linear_factor(middle, pos);
				(PI.mul_add(f, -FRAC_PI_2).sin() + 1.0) / 2.0
			},
			Self::SphereIncreasing => {
				let f = linear_factor(middle, pos) - 1.0;
				f.mul_add(-f, 1.0).sqrt()
			},
			Self::SphereDecreasing => {
				let f = linear_factor(middle, pos);
				1.0 - f.mul_add(-f, 1.0).sqrt()
			},
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Coloring.
///
/// This is the color space a segment interpolates through.
pub enum Coloring {
	/// # RGB.
	Rgb,
	/// # HSV (Counter-Clockwise).
	HsvCcw,
	/// # HSV (Clockwise).
	HsvCw,
}

impl Default for Coloring {
	#[inline]
	fn default() -> Self { Self::Rgb }
}

impl TryFrom<u8> for Coloring {
	type Error = BlendError;

	fn try_from(src: u8) -> Result<Self, Self::Error> {
		match src {
			0 => Ok(Self::Rgb),
			1 => Ok(Self::HsvCcw),
			2 => Ok(Self::HsvCw),
			_ => Err(BlendError::Parse),
		}
	}
}

impl From<Coloring> for u8 {
	#[inline]
	fn from(src: Coloring) -> Self {
		match src {
			Coloring::Rgb => 0,
			Coloring::HsvCcw => 1,
			Coloring::HsvCw => 2,
		}
	}
}

impl Coloring {
	#[must_use]
	/// # Flipped.
	///
	/// Mirroring a segment reverses the hue direction.
	pub const fn flipped(self) -> Self {
		match self {
			Self::Rgb => Self::Rgb,
			Self::HsvCcw => Self::HsvCw,
			Self::HsvCw => Self::HsvCcw,
		}
	}

	#[must_use]
	/// # Mix.
	///
	/// Blend `left` and `right` by `factor` in this color space. Alpha is
	/// always mixed linearly.
	pub fn mix(self, left: Color, right: Color, factor: f64) -> Color {
		match self {
			Self::Rgb => left.lerp(right, factor),
			Self::HsvCcw | Self::HsvCw => {
				let l = Hsv::from(left);
				let r = Hsv::from(right);

				let s = (r.s - l.s).mul_add(factor, l.s);
				let v = (r.v - l.v).mul_add(factor, l.v);
				let h =
					if matches!(self, Self::HsvCcw) {
						let h =
							if l.h < r.h { (r.h - l.h).mul_add(factor, l.h) }
							else { (1.0 - (l.h - r.h)).mul_add(factor, l.h) };
						if h > 1.0 { h - 1.0 } else { h }
					}
					else {
						let h =
							if r.h < l.h { (l.h - r.h).mul_add(-factor, l.h) }
							else { (1.0 - (r.h - l.h)).mul_add(-factor, l.h) };
						if h < 0.0 { h + 1.0 } else { h }
					};

				let mut out = Color::from(Hsv::new(h, s, v, 1.0));
				out.a = (right.a - left.a).mul_add(factor, left.a);
				out
			},
		}
	}
}



#[derive(Debug, Clone, Copy, PartialEq)]
/// # Gradient Segment.
///
/// A segment covers `left..=right` of the gradient, with `middle` somewhere
/// in between marking where the blend reaches its halfway point.
pub struct Segment {
	/// # Left Position.
	pub left: f64,

	/// # Middle Position.
	pub middle: f64,

	/// # Right Position.
	pub right: f64,

	/// # Left Color.
	pub left_color: Color,

	/// # Left Color Type.
	pub left_color_type: ColorType,

	/// # Right Color.
	pub right_color: Color,

	/// # Right Color Type.
	pub right_color_type: ColorType,

	/// # Blend Function.
	pub blend_function: BlendFunction,

	/// # Coloring.
	pub coloring: Coloring,
}

impl Default for Segment {
	fn default() -> Self {
		Self {
			left: 0.0,
			middle: 0.5,
			right: 1.0,
			left_color: Color::BLACK,
			left_color_type: ColorType::Fixed,
			right_color: Color::WHITE,
			right_color_type: ColorType::Fixed,
			blend_function: BlendFunction::Linear,
			coloring: Coloring::Rgb,
		}
	}
}

/// ## Getters.
impl Segment {
	#[inline]
	#[must_use]
	/// # Contains Position?
	pub fn contains(&self, pos: f64) -> bool {
		self.left <= pos && pos <= self.right
	}

	#[must_use]
	/// # Has Context Colors?
	///
	/// Returns `true` if either end refers to the foreground or background.
	pub const fn has_fg_bg(&self) -> bool {
		! self.left_color_type.is_fixed() || ! self.right_color_type.is_fixed()
	}

	#[must_use]
	/// # Effective Left Color.
	pub fn left_color(&self, context: &Context) -> Color {
		self.left_color_type.resolve(self.left_color, context)
	}

	#[must_use]
	/// # Effective Right Color.
	pub fn right_color(&self, context: &Context) -> Color {
		self.right_color_type.resolve(self.right_color, context)
	}

	#[must_use]
	/// # Width.
	pub fn width(&self) -> f64 { self.right - self.left }

	#[must_use]
	/// # Color At.
	///
	/// Evaluate this segment at the absolute gradient position `pos`. The
	/// position is not checked against the segment's bounds.
	///
	/// The result is always clamped to `0.0..=1.0`, even if the segment's own
	/// colors are not.
	pub fn color_at(&self, pos: f64, context: &Context) -> Color {
		let len = self.width();
		let (middle, pos) =
			if len < EPSILON { (0.5, 0.5) }
			else { ((self.middle - self.left) / len, (pos - self.left) / len) };

		let factor = self.blend_function.factor(middle, pos);
		self.coloring.mix(self.left_color(context), self.right_color(context), factor)
			.clamped()
	}
}

/// ## Setters.
impl Segment {
	/// # Flatten.
	///
	/// Resolve both ends against the context and mark them fixed.
	pub fn flatten(&mut self, context: &Context) {
		self.left_color = self.left_color(context);
		self.right_color = self.right_color(context);
		self.left_color_type = ColorType::Fixed;
		self.right_color_type = ColorType::Fixed;
	}

	/// # Recenter.
	pub fn recenter(&mut self) {
		self.middle = (self.left + self.right) / 2.0;
	}
}



/// # Linear Factor.
fn linear_factor(middle: f64, pos: f64) -> f64 {
	if pos <= middle {
		if middle < EPSILON { 0.0 }
		else { 0.5 * pos / middle }
	}
	else {
		let pos = pos - middle;
		let middle = 1.0 - middle;
		if middle < EPSILON { 1.0 }
		else { 0.5_f64.mul_add(pos / middle, 0.5) }
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	const FUNCTIONS: [BlendFunction; 5] = [
		BlendFunction::Linear,
		BlendFunction::Curved,
		BlendFunction::Sine,
		BlendFunction::SphereIncreasing,
		BlendFunction::SphereDecreasing,
	];

	#[test]
	fn t_factor_bounds() {
		for f in FUNCTIONS {
			for middle in [0.1, 0.5, 0.9] {
				assert!(f.factor(middle, 0.0).abs() < 1e-9, "{f:?} at 0");
				assert!((f.factor(middle, 1.0) - 1.0).abs() < 1e-9, "{f:?} at 1");

				for i in 0..=100 {
					let v = f.factor(middle, f64::from(i) / 100.0);
					assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{f:?} {middle} {i}");
				}
			}
		}
	}

	#[test]
	fn t_factor_edges() {
		// A middle sitting right on either end is legal, and must not blow up.
		for f in FUNCTIONS {
			for middle in [0.0, 1.0] {
				for i in 0..=100 {
					let v = f.factor(middle, f64::from(i) / 100.0);
					assert!(v.is_finite(), "{f:?} {middle} {i}");
					assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{f:?} {middle} {i}");
				}
			}
		}
	}

	#[test]
	fn t_factor_middle() {
		// Linear, curved, and sine all hit one half at the midpoint.
		for f in [BlendFunction::Linear, BlendFunction::Curved, BlendFunction::Sine] {
			for middle in [0.25, 0.5, 0.8] {
				assert!((f.factor(middle, middle) - 0.5).abs() < 1e-9, "{f:?}");
			}
		}

		// Degenerate middles.
		assert_eq!(linear_factor(0.0, 0.0), 0.0);
		assert_eq!(linear_factor(1.0, 1.0), 0.5);
		assert_eq!(linear_factor(0.0, 0.5), 0.75);
	}

	#[test]
	fn t_flipped() {
		for f in FUNCTIONS {
			assert_eq!(f.flipped().flipped(), f);
			assert_eq!(BlendFunction::try_from(u8::from(f)), Ok(f));
		}
		assert_eq!(BlendFunction::SphereIncreasing.flipped(), BlendFunction::SphereDecreasing);
		assert_eq!(BlendFunction::Sine.flipped(), BlendFunction::Sine);
		assert_eq!(Coloring::HsvCcw.flipped(), Coloring::HsvCw);
		assert_eq!(Coloring::Rgb.flipped(), Coloring::Rgb);
		assert_eq!(BlendFunction::try_from(5), Err(BlendError::Parse));
		assert_eq!(Coloring::try_from(3), Err(BlendError::Parse));
	}

	#[test]
	fn t_hsv_direction() {
		// Red (hue 0) to blue (hue 2/3).
		let red = Color::new(1.0, 0.0, 0.0, 1.0);
		let blue = Color::new(0.0, 0.0, 1.0, 0.0);

		// Counter-clockwise goes up through green.
		let ccw = Hsv::from(Coloring::HsvCcw.mix(red, blue, 0.5));
		assert!((ccw.h - 1.0 / 3.0).abs() < 1e-9);

		// Clockwise goes down through magenta.
		let cw = Hsv::from(Coloring::HsvCw.mix(red, blue, 0.5));
		assert!((cw.h - 5.0 / 6.0).abs() < 1e-9);

		// Alpha is linear either way.
		assert!((Coloring::HsvCw.mix(red, blue, 0.25).a - 0.75).abs() < 1e-12);
	}

	#[test]
	fn t_color_at() {
		let seg = Segment::default();
		let ctx = Context::default();
		assert_eq!(seg.color_at(0.0, &ctx), Color::BLACK);
		assert_eq!(seg.color_at(1.0, &ctx), Color::WHITE);
		assert_eq!(seg.color_at(0.5, &ctx), Color::new(0.5, 0.5, 0.5, 1.0));

		// Zero-width segments sit at the halfway mark.
		let seg = Segment { left: 0.3, middle: 0.3, right: 0.3, ..Segment::default() };
		assert_eq!(seg.color_at(0.3, &ctx), Color::new(0.5, 0.5, 0.5, 1.0));

		// Colors outside the unit range come back clamped.
		let seg = Segment {
			left_color: Color::new(1.5, -0.5, 0.25, 2.0),
			right_color: Color::new(1.5, -0.5, 0.25, 2.0),
			..Segment::default()
		};
		assert_eq!(seg.color_at(0.5, &ctx), Color::new(1.0, 0.0, 0.25, 1.0));
	}
}
