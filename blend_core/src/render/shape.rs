/*!
# `Blend` - Shape Factors
*/

use crate::GradientShape;
use std::f64::consts::{
	PI,
	TAU,
};
use super::shapeburst::DistanceMap;



#[derive(Debug, Clone)]
/// # Geometry.
///
/// This holds everything needed to turn a pixel position into a raw
/// (pre-repeat) gradient factor.
pub(super) struct Geometry<'a> {
	/// # Shape.
	shape: GradientShape,

	/// # Start Point.
	start: (f64, f64),

	/// # Length.
	dist: f64,

	/// # Unit Axis.
	axis: (f64, f64),

	/// # Offset (`0..=100`).
	offset: f64,

	/// # Shapeburst Map.
	burst: Option<&'a DistanceMap>,
}

impl<'a> Geometry<'a> {
	/// # New.
	pub(super) fn new(
		shape: GradientShape,
		start: (f64, f64),
		end: (f64, f64),
		offset: f64,
		burst: Option<&'a DistanceMap>,
	) -> Self {
		let dx = end.0 - start.0;
		let dy = end.1 - start.1;

		let dist =
			if matches!(shape, GradientShape::Square) { dx.abs().max(dy.abs()) }
			else { dx.hypot(dy) };

		let axis =
			if 0.0 < dist { (dx / dist, dy / dist) }
			else { (0.0, 0.0) };

		Self { shape, start, dist, axis, offset, burst }
	}

	#[must_use]
	/// # Length.
	pub(super) const fn dist(&self) -> f64 { self.dist }

	/// # Factor.
	///
	/// Return the raw factor for the pixel at `(x, y)`.
	pub(super) fn factor(&self, x: f64, y: f64) -> f64 {
		let (rx, ry) = (x - self.start.0, y - self.start.1);
		let (dist, axis, offset) = (self.dist, self.axis, self.offset);

		match self.shape {
			GradientShape::Linear => linear(dist, axis, offset, rx, ry),
			GradientShape::Bilinear => bilinear(dist, axis, offset, rx, ry),
			GradientShape::Radial => radial(dist, offset, rx, ry),
			GradientShape::Square => square(dist, offset, rx, ry),
			GradientShape::ConicalSymmetric => conical_symmetric(dist, axis, offset, rx, ry),
			GradientShape::ConicalAsymmetric => conical_asymmetric(dist, axis, offset, rx, ry),
			GradientShape::ShapeburstAngular => 1.0 - self.burst(x, y),
			GradientShape::ShapeburstSpherical => 1.0 - (0.5 * PI * self.burst(x, y)).sin(),
			GradientShape::ShapeburstDimpled => (0.5 * PI * self.burst(x, y)).cos(),
			GradientShape::SpiralCw => spiral(dist, axis, offset, rx, ry, true),
			GradientShape::SpiralCcw => spiral(dist, axis, offset, rx, ry, false),
		}
	}

	/// # Shapeburst Value.
	///
	/// Note shapeburst positions are absolute, not relative to the start.
	fn burst(&self, x: f64, y: f64) -> f64 {
		self.burst.map_or(0.0, |m| m.sample(x, y))
	}
}



#[allow(clippy::float_cmp)] // Exact ends.
/// # Offset Band.
///
/// Squash `rat` so that everything inside the offset (a `0..=1` fraction)
/// comes out as zero.
fn banded(rat: f64, offset: f64) -> f64 {
	if rat < offset { 0.0 }
	else if offset == 1.0 {
		if 1.0 <= rat { 1.0 } else { 0.0 }
	}
	else { (rat - offset) / (1.0 - offset) }
}

#[allow(clippy::float_cmp)] // Exact ends.
/// # Linear.
///
/// Project onto the axis. Positions behind the start run negative.
pub(super) fn linear(dist: f64, axis: (f64, f64), offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { return 0.0; }

	let offset = offset / 100.0;
	let rat = axis.0.mul_add(x, axis.1 * y) / dist;

	if (0.0..offset).contains(&rat) { 0.0 }
	else if offset == 1.0 {
		if 1.0 <= rat { 1.0 } else { 0.0 }
	}
	else if rat < 0.0 { rat / (1.0 - offset) }
	else { (rat - offset) / (1.0 - offset) }
}

#[allow(clippy::float_cmp)] // Exact ends.
/// # Bilinear.
///
/// As linear, but mirrored about the start.
pub(super) fn bilinear(dist: f64, axis: (f64, f64), offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { return 0.0; }

	let offset = offset / 100.0;
	let rat = axis.0.mul_add(x, axis.1 * y) / dist;

	if rat.abs() < offset { 0.0 }
	else if offset == 1.0 {
		if rat == 1.0 { 1.0 } else { 0.0 }
	}
	else { (rat.abs() - offset) / (1.0 - offset) }
}

/// # Radial.
pub(super) fn radial(dist: f64, offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { 0.0 }
	else { banded(x.hypot(y) / dist, offset / 100.0) }
}

/// # Square.
pub(super) fn square(dist: f64, offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { 0.0 }
	else { banded(x.abs().max(y.abs()) / dist, offset / 100.0) }
}

/// # Conical (Symmetric).
///
/// The angle from the axis, either way round, as a fraction of a half turn.
/// The offset bends the curve.
pub(super) fn conical_symmetric(dist: f64, axis: (f64, f64), offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { return 0.0; }
	if x == 0.0 && y == 0.0 { return 0.5; }

	let r = x.hypot(y);
	let dot = axis.0.mul_add(x / r, axis.1 * (y / r)).clamp(-1.0, 1.0);
	let rat = (dot.acos() / PI).powf(offset / 10.0 + 1.0);
	rat.clamp(0.0, 1.0)
}

/// # Conical (Asymmetric).
///
/// The angle from the axis, measured all the way round, as a fraction of a
/// full turn.
pub(super) fn conical_asymmetric(dist: f64, axis: (f64, f64), offset: f64, x: f64, y: f64) -> f64 {
	if dist == 0.0 { return 0.0; }
	if x == 0.0 && y == 0.0 { return 0.5; }

	let mut ang = x.atan2(y) - axis.0.atan2(axis.1);
	if ang < 0.0 { ang += TAU; }

	let rat = (ang / TAU).powf(offset / 10.0 + 1.0);
	rat.clamp(0.0, 1.0)
}

/// # Spiral.
///
/// The angle from the axis plus the distance from the start, wrapped. The
/// offset here is a raw turn fraction, not a percentage.
pub(super) fn spiral(
	dist: f64,
	axis: (f64, f64),
	offset: f64,
	x: f64,
	y: f64,
	clockwise: bool,
) -> f64 {
	if dist == 0.0 { return 0.0; }
	if x == 0.0 && y == 0.0 { return 0.5; }

	let ang0 = axis.0.atan2(axis.1);
	let ang1 = x.atan2(y);
	let mut ang = if clockwise { ang1 - ang0 } else { ang0 - ang1 };
	if ang < 0.0 { ang += TAU; }

	let r = x.hypot(y) / dist;
	(ang / TAU + r + offset) % 1.0
}
