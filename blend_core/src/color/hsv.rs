/*!
# `Blend` - HSV Color
*/

use crate::Color;



#[derive(Debug, Copy, Clone, PartialEq)]
/// # HSV Color.
///
/// Hue, saturation, and value all use the range `0.0..=1.0`. Alpha is
/// carried along unchanged.
pub struct Hsv {
	/// # Hue.
	pub h: f64,
	/// # Saturation.
	pub s: f64,
	/// # Value.
	pub v: f64,
	/// # Alpha.
	pub a: f64,
}

impl From<Color> for Hsv {
	fn from(src: Color) -> Self {
		let max = src.r.max(src.g).max(src.b);
		let min = src.r.min(src.g).min(src.b);
		let delta = max - min;

		// Out-of-range inputs can leave the brightest channel at or below
		// zero; those are treated as black.
		if delta > 0.0001 && max > 0.0 {
			let s = delta / max;
			#[allow(clippy::float_cmp)] // Max is one of these exactly.
			let mut h =
				if src.r == max { (src.g - src.b) / delta }
				else if src.g == max { 2.0 + (src.b - src.r) / delta }
				else { 4.0 + (src.r - src.g) / delta };

			if h < 0.0 { h += 6.0; }

			Self { h: h / 6.0, s, v: max, a: src.a }
		}
		else {
			Self { h: 0.0, s: 0.0, v: max, a: src.a }
		}
	}
}

impl From<Hsv> for Color {
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Sextants are 0..6.
	fn from(src: Hsv) -> Self {
		if src.s <= 0.0 {
			return Self::new(src.v, src.v, src.v, src.a);
		}

		// Hue wraps, so 1.0 is the same as 0.0.
		let hue = src.h.rem_euclid(1.0) * 6.0;
		let sextant = (hue.floor() as usize).min(5);
		let f = hue - hue.floor();

		let v = src.v;
		let w = v * (1.0 - src.s);
		let q = v * src.s.mul_add(-f, 1.0);
		let t = v * src.s.mul_add(f - 1.0, 1.0);

		let (r, g, b) = match sextant {
			0 => (v, t, w),
			1 => (q, v, w),
			2 => (w, v, t),
			3 => (w, q, v),
			4 => (t, w, v),
			_ => (v, w, q),
		};

		Self::new(r, g, b, src.a)
	}
}

impl Hsv {
	#[must_use]
	/// # New.
	pub const fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
		Self { h, s, v, a }
	}

	#[must_use]
	/// # Linear Interpolation.
	///
	/// Mix all four components linearly. Unlike segment blending, the hue
	/// takes no particular direction around the wheel.
	pub fn lerp(self, other: Self, factor: f64) -> Self {
		Self::new(
			(other.h - self.h).mul_add(factor, self.h),
			(other.s - self.s).mul_add(factor, self.s),
			(other.v - self.v).mul_add(factor, self.v),
			(other.a - self.a).mul_add(factor, self.a),
		)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Color, b: Color) -> bool {
		a.distance(b) < 1e-9
	}

	#[test]
	fn t_primaries() {
		let red = Hsv::from(Color::new(1.0, 0.0, 0.0, 1.0));
		assert_eq!(red, Hsv::new(0.0, 1.0, 1.0, 1.0));

		let green = Hsv::from(Color::new(0.0, 1.0, 0.0, 0.5));
		assert!((green.h - 1.0 / 3.0).abs() < 1e-12);
		assert_eq!(green.a, 0.5);

		let blue = Hsv::from(Color::new(0.0, 0.0, 1.0, 1.0));
		assert!((blue.h - 2.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn t_grey() {
		let grey = Hsv::from(Color::new(0.25, 0.25, 0.25, 1.0));
		assert_eq!(grey, Hsv::new(0.0, 0.0, 0.25, 1.0));
		assert_eq!(Color::from(grey), Color::new(0.25, 0.25, 0.25, 1.0));
	}

	#[test]
	fn t_there_and_back() {
		for c in [
			Color::new(1.0, 0.5, 0.0, 1.0),
			Color::new(0.2, 0.4, 0.6, 0.8),
			Color::new(0.9, 0.1, 0.7, 0.0),
			Color::new(0.3, 0.9, 0.35, 1.0),
		] {
			assert!(close(c, Color::from(Hsv::from(c))), "{c:?}");
		}
	}

	#[test]
	fn t_out_of_range() {
		let dark = Hsv::from(Color::new(0.0, -0.5, -0.25, 1.0));
		assert_eq!(dark.s, 0.0);
		assert_eq!(dark.v, 0.0);

		let hot = Hsv::from(Color::new(1.5, -0.5, 0.0, 1.0));
		assert!(hot.h.is_finite() && hot.s.is_finite() && hot.v.is_finite());
		let back = Color::from(hot);
		assert!(back.r.is_finite() && back.g.is_finite() && back.b.is_finite());
	}

	#[test]
	fn t_hue_wrap() {
		// A hue of exactly one is red again.
		let c = Color::from(Hsv::new(1.0, 1.0, 1.0, 1.0));
		assert!(close(c, Color::new(1.0, 0.0, 0.0, 1.0)));
	}
}
