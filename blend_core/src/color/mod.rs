/*!
# `Blend` - Color
*/

pub(super) mod hsv;
pub(super) mod kind;

use crate::Hsv;
use rgb::{
	RGBA,
	RGBA8,
};



#[derive(Debug, Copy, Clone, PartialEq)]
/// # RGBA Color.
///
/// Each channel is nominally in the range of `0.0..=1.0`, though intermediate
/// values are allowed to stray during blending. Use [`Color::clamped`] to pull
/// them back in.
pub struct Color {
	/// # Red.
	pub r: f64,
	/// # Green.
	pub g: f64,
	/// # Blue.
	pub b: f64,
	/// # Alpha.
	pub a: f64,
}

impl Default for Color {
	#[inline]
	fn default() -> Self { Self::BLACK }
}

impl From<Color> for RGBA<f32> {
	#[allow(clippy::cast_possible_truncation)] // We want f32.
	#[inline]
	fn from(src: Color) -> Self {
		Self::new(src.r as f32, src.g as f32, src.b as f32, src.a as f32)
	}
}

impl From<RGBA8> for Color {
	#[inline]
	fn from(src: RGBA8) -> Self {
		Self::new(
			f64::from(src.r) / 255.0,
			f64::from(src.g) / 255.0,
			f64::from(src.b) / 255.0,
			f64::from(src.a) / 255.0,
		)
	}
}

impl From<Color> for RGBA8 {
	#[inline]
	fn from(src: Color) -> Self {
		Self::new(
			channel_u8(src.r),
			channel_u8(src.g),
			channel_u8(src.b),
			channel_u8(src.a),
		)
	}
}

/// ## Constants.
impl Color {
	/// # Opaque Black.
	pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

	/// # Opaque White.
	pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// ## Instantiation.
impl Color {
	#[must_use]
	/// # New.
	pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
		Self { r, g, b, a }
	}

	#[must_use]
	/// # From Hex.
	///
	/// Parse a six- or eight-digit hex string (`RRGGBB` or `RRGGBBAA`), with
	/// or without a leading `#`. Six-digit values are fully opaque.
	pub fn from_hex(src: &str) -> Option<Self> {
		let src = src.trim().trim_start_matches('#');
		if ! matches!(src.len(), 6 | 8) || ! src.is_ascii() { return None; }

		let mut out = [255_u8; 4];
		for (idx, v) in out.iter_mut().take(src.len() / 2).enumerate() {
			*v = u8::from_str_radix(&src[idx * 2..idx * 2 + 2], 16).ok()?;
		}

		Some(Self::from(RGBA8::new(out[0], out[1], out[2], out[3])))
	}
}

/// ## Getters.
impl Color {
	#[must_use]
	/// # Clamped.
	///
	/// Return a copy with every channel clamped to `0.0..=1.0`.
	pub fn clamped(self) -> Self {
		Self::new(
			self.r.clamp(0.0, 1.0),
			self.g.clamp(0.0, 1.0),
			self.b.clamp(0.0, 1.0),
			self.a.clamp(0.0, 1.0),
		)
	}

	#[must_use]
	/// # Distance.
	///
	/// Return the sum of the absolute differences of each channel, alpha
	/// included.
	pub fn distance(self, other: Self) -> f64 {
		(self.r - other.r).abs() +
		(self.g - other.g).abs() +
		(self.b - other.b).abs() +
		(self.a - other.a).abs()
	}

	#[must_use]
	/// # Linear Interpolation.
	///
	/// Mix each channel of `self` and `other` by `factor`, where `0.0` is all
	/// `self` and `1.0` is all `other`.
	pub fn lerp(self, other: Self, factor: f64) -> Self {
		Self::new(
			(other.r - self.r).mul_add(factor, self.r),
			(other.g - self.g).mul_add(factor, self.g),
			(other.b - self.b).mul_add(factor, self.b),
			(other.a - self.a).mul_add(factor, self.a),
		)
	}

	#[must_use]
	/// # To HSV.
	pub fn to_hsv(self) -> Hsv { Hsv::from(self) }

	#[must_use]
	/// # With Alpha.
	pub const fn with_alpha(mut self, a: f64) -> Self {
		self.a = a;
		self
	}
}



#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Values are in range.
/// # Channel to `u8`.
fn channel_u8(v: f64) -> u8 {
	(v.clamp(0.0, 1.0) * 255.0).round() as u8
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_from_hex() {
		assert_eq!(Color::from_hex("#000000"), Some(Color::BLACK));
		assert_eq!(Color::from_hex("ffffff"), Some(Color::WHITE));
		assert_eq!(
			Color::from_hex("ff000000"),
			Some(Color::new(1.0, 0.0, 0.0, 0.0))
		);
		assert_eq!(Color::from_hex("fff"), None);
		assert_eq!(Color::from_hex("gg0000"), None);
		assert_eq!(Color::from_hex("ff00ff00ff"), None);
	}

	#[test]
	fn t_distance() {
		assert_eq!(Color::BLACK.distance(Color::BLACK), 0.0);
		assert_eq!(Color::BLACK.distance(Color::WHITE), 3.0);
		assert_eq!(
			Color::BLACK.distance(Color::BLACK.with_alpha(0.0)),
			1.0
		);
	}

	#[test]
	fn t_lerp() {
		let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
		assert!((mid.r - 0.5).abs() < 1e-12);
		assert!((mid.g - 0.5).abs() < 1e-12);
		assert!((mid.b - 0.5).abs() < 1e-12);
		assert!((mid.a - 1.0).abs() < 1e-12);

		assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
		assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
	}

	#[test]
	fn t_rgba8() {
		let px = RGBA8::new(255, 128, 0, 255);
		assert_eq!(RGBA8::from(Color::from(px)), px);

		// Out-of-range values are clamped.
		assert_eq!(
			RGBA8::from(Color::new(1.5, -0.5, 0.5, 1.0)),
			RGBA8::new(255, 0, 128, 255)
		);
	}
}
