/*!
# `Blend` - Gradient
*/

pub(super) mod edit;
pub(super) mod file;
pub(super) mod segment;

use ahash::RandomState;
use crate::{
	BlendError,
	Color,
	Context,
	Segment,
};
use imgref::ImgVec;
use rgb::RGBA8;
use std::hash::{
	BuildHasher,
	Hasher,
};



/// # Tolerance.
///
/// Gradients read from elsewhere may carry tiny rounding errors at their
/// boundaries; gaps smaller than this are quietly closed.
const TOLERANCE: f64 = 1e-6;

/// # Static Hasher.
///
/// Checksums need to be stable from run to run, so the keys are fixed.
const AHASH_STATE: RandomState = RandomState::with_seeds(13, 19, 23, 71);



#[derive(Debug, Clone)]
/// # Gradient.
///
/// A gradient is a named, ordered chain of [`Segment`]s covering `0.0..=1.0`
/// without gaps or overlaps. There is always at least one segment.
///
/// Segments are addressed by index. Editing methods validate their arguments
/// before changing anything, so an `Err` leaves the gradient untouched.
///
/// Cloning a gradient duplicates it.
pub struct Gradient {
	name: String,
	segments: Vec<Segment>,
	revision: u64,
}

impl Default for Gradient {
	#[inline]
	fn default() -> Self { Self::standard() }
}

/// ## Instantiation.
impl Gradient {
	/// # New.
	///
	/// Create a new gradient with a single default (black-to-white) segment.
	///
	/// ## Errors
	///
	/// The name may not be empty.
	pub fn new<S>(name: S) -> Result<Self, BlendError>
	where S: Into<String> {
		let name = name.into();
		if ! valid_name(&name) { return Err(BlendError::Name); }

		Ok(Self {
			name,
			segments: vec![Segment::default()],
			revision: 0,
		})
	}

	#[must_use]
	/// # Standard.
	///
	/// Return the built-in "Standard" gradient.
	pub fn standard() -> Self {
		Self {
			name: String::from("Standard"),
			segments: vec![Segment::default()],
			revision: 0,
		}
	}

	/// # From Segments.
	///
	/// Build a gradient from an existing set of segments. Endpoints within
	/// a millionth of where they should be are snapped into place.
	///
	/// ## Errors
	///
	/// The name may not be empty, and the segments must form a complete,
	/// ordered chain from `0.0` to `1.0`.
	pub fn from_segments<S>(name: S, mut segments: Vec<Segment>)
	-> Result<Self, BlendError>
	where S: Into<String> {
		let name = name.into();
		if ! valid_name(&name) { return Err(BlendError::Name); }

		// Snap the ends and seams.
		let len = segments.len();
		if len == 0 { return Err(BlendError::Count); }
		if segments[0].left.abs() < TOLERANCE { segments[0].left = 0.0; }
		if (segments[len - 1].right - 1.0).abs() < TOLERANCE {
			segments[len - 1].right = 1.0;
		}
		for i in 1..len {
			if (segments[i].left - segments[i - 1].right).abs() < TOLERANCE {
				segments[i].left = segments[i - 1].right;
			}
		}

		let out = Self { name, segments, revision: 0 };
		if out.is_valid() { Ok(out) }
		else { Err(BlendError::Parse) }
	}
}

/// ## Getters.
impl Gradient {
	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Segments.
	pub fn segments(&self) -> &[Segment] { &self.segments }

	#[must_use]
	/// # Segment.
	pub fn segment(&self, idx: usize) -> Option<&Segment> { self.segments.get(idx) }

	#[must_use]
	/// # Segment Count.
	///
	/// This is always at least one.
	pub fn segment_count(&self) -> usize { self.segments.len() }

	#[must_use]
	/// # Revision.
	///
	/// This number increases by one with each completed edit, so callers
	/// holding derived data know when to refresh it.
	pub const fn revision(&self) -> u64 { self.revision }

	#[must_use]
	/// # Checksum.
	///
	/// Hash the segment data (positions, colors, types, and functions). The
	/// name and revision are not included, so a gradient and its unedited
	/// clones always agree.
	pub fn checksum(&self) -> u64 {
		let mut hasher = AHASH_STATE.build_hasher();
		for seg in &self.segments {
			hasher.write_u64(seg.left.to_bits());
			hasher.write_u64(seg.middle.to_bits());
			hasher.write_u64(seg.right.to_bits());
			hasher.write_u8(seg.left_color_type.into());
			hash_color(&mut hasher, seg.left_color);
			hasher.write_u8(seg.right_color_type.into());
			hash_color(&mut hasher, seg.right_color);
			hasher.write_u8(seg.blend_function.into());
			hasher.write_u8(seg.coloring.into());
		}
		hasher.finish()
	}

	#[must_use]
	/// # Has Foreground/Background Segments?
	///
	/// Returns `true` if any segment end refers to a context color rather
	/// than a fixed one.
	pub fn has_fg_bg_segments(&self) -> bool {
		self.segments.iter().any(Segment::has_fg_bg)
	}

	#[must_use]
	/// # Flatten.
	///
	/// Return a copy with every context color resolved and fixed in place.
	pub fn flatten(&self, context: &Context) -> Self {
		let mut out = self.clone();
		for seg in &mut out.segments { seg.flatten(context); }
		out
	}

	/// # Evaluate.
	///
	/// Return the color at `pos`, along with the index of the segment it came
	/// from. Passing that index back as the `seed` of the next call speeds up
	/// ordered scans.
	///
	/// The position is clamped to `0.0..=1.0` (`NaN` is treated as zero),
	/// then inverted if `reverse` is set.
	///
	/// ## Errors
	///
	/// An error is only possible if the segment chain is broken, which would
	/// be a bug.
	pub fn evaluate(&self, pos: f64, reverse: bool, seed: Option<usize>, context: &Context)
	-> Result<(Color, usize), BlendError> {
		let mut pos = if pos.is_nan() { 0.0 } else { pos.clamp(0.0, 1.0) };
		if reverse { pos = 1.0 - pos; }

		let idx = self.find(pos, seed)?;
		Ok((self.segments[idx].color_at(pos, context), idx))
	}

	/// # Segment At.
	///
	/// Return the index of the segment containing `pos`.
	///
	/// ## Errors
	///
	/// As with [`Gradient::evaluate`], this only fails if the chain is
	/// broken.
	pub fn segment_at(&self, pos: f64) -> Result<usize, BlendError> {
		let pos = if pos.is_nan() { 0.0 } else { pos.clamp(0.0, 1.0) };
		self.find(pos, None)
	}

	/// # Preview.
	///
	/// Render the gradient into a horizontal strip, left to right. Every row
	/// is the same.
	///
	/// ## Errors
	///
	/// Both dimensions must be non-zero.
	#[allow(clippy::cast_precision_loss)] // Previews are small.
	pub fn preview(&self, width: usize, height: usize, context: &Context)
	-> Result<ImgVec<RGBA8>, BlendError> {
		if width == 0 || height == 0 { return Err(BlendError::Overflow); }
		let size = width.checked_mul(height).ok_or(BlendError::Overflow)?;

		let step = if width == 1 { 0.0 } else { 1.0 / (width - 1) as f64 };

		let mut row = Vec::with_capacity(width);
		let mut seed = None;
		for x in 0..width {
			let (color, idx) = self.evaluate(x as f64 * step, false, seed, context)?;
			seed = Some(idx);
			row.push(RGBA8::from(color));
		}

		let mut buf = Vec::with_capacity(size);
		for _ in 0..height { buf.extend_from_slice(&row); }
		Ok(ImgVec::new(buf, width, height))
	}
}

/// ## Setters.
impl Gradient {
	/// # Set Name.
	///
	/// ## Errors
	///
	/// The name may not be empty.
	pub fn set_name<S>(&mut self, name: S) -> Result<(), BlendError>
	where S: Into<String> {
		let name = name.into();
		if ! valid_name(&name) { Err(BlendError::Name) }
		else {
			self.name = name;
			self.revision = self.revision.wrapping_add(1);
			Ok(())
		}
	}
}

/// ## Internal.
impl Gradient {
	/// # Find Segment.
	///
	/// Walk the chain from `seed` (or the start) until a segment containing
	/// `pos` turns up.
	fn find(&self, pos: f64, seed: Option<usize>) -> Result<usize, BlendError> {
		let len = self.segments.len();
		let mut idx = seed.filter(|&i| i < len).unwrap_or(0);

		// A healthy chain never needs more steps than it has segments.
		for _ in 0..=len {
			let Some(seg) = self.segments.get(idx) else { break; };
			if pos >= seg.left {
				if pos <= seg.right { return Ok(idx); }
				idx += 1;
			}
			else if idx == 0 { break; }
			else { idx -= 1; }
		}

		log::error!("No gradient segment covers position {pos:.15}.");
		Err(BlendError::NoSegment)
	}

	#[must_use]
	/// # Is Valid?
	///
	/// Check the chain is complete: it starts at zero, ends at one, each
	/// segment picks up where the previous left off, and every middle lies
	/// between its ends.
	pub(crate) fn is_valid(&self) -> bool {
		let (Some(first), Some(last)) = (self.segments.first(), self.segments.last())
		else { return false; };

		#[allow(clippy::float_cmp)] // Seams must match exactly.
		let seams = self.segments.windows(2).all(|w| w[0].right == w[1].left);

		first.left == 0.0 &&
		last.right == 1.0 &&
		seams &&
		self.segments.iter().all(|s|
			s.left <= s.middle && s.middle <= s.right
		)
	}

	/// # Commit.
	///
	/// Bump the revision after an edit.
	fn commit(&mut self) {
		debug_assert!(self.is_valid(), "Broken gradient chain: {:?}", self.segments);
		self.revision = self.revision.wrapping_add(1);
	}
}



/// # Valid Name?
///
/// Names must have something other than whitespace, and fit on one line.
fn valid_name(name: &str) -> bool {
	! name.trim().is_empty() && ! name.contains(['\n', '\r'])
}

/// # Hash Color.
fn hash_color<H: Hasher>(hasher: &mut H, color: Color) {
	hasher.write_u64(color.r.to_bits());
	hasher.write_u64(color.g.to_bits());
	hasher.write_u64(color.b.to_bits());
	hasher.write_u64(color.a.to_bits());
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		BlendFunction,
		ColorType,
		Coloring,
	};

	/// # Three-Segment Test Gradient.
	pub(crate) fn sample() -> Gradient {
		let ctx = Context::default();
		let mut out = Gradient::new("Sample").unwrap();
		out.split_uniform(0, 3, &ctx).unwrap();
		out.set_left_color_type(0, ColorType::Foreground).unwrap();
		out.set_right_color(1, Color::new(1.0, 0.0, 0.0, 0.5)).unwrap();
		out.set_left_color(2, Color::new(0.0, 0.0, 1.0, 1.0)).unwrap();
		out.set_right_color_type(2, ColorType::BackgroundTransparent).unwrap();
		out.range_set_blend_function(1..=1, BlendFunction::SphereIncreasing).unwrap();
		out.range_set_coloring(2..=2, Coloring::HsvCw).unwrap();
		out.set_middle_pos(0, 0.1).unwrap();
		out
	}

	#[test]
	fn t_new() {
		assert_eq!(Gradient::new("").unwrap_err(), BlendError::Name);
		assert_eq!(Gradient::new("   ").unwrap_err(), BlendError::Name);
		assert_eq!(Gradient::new("Two\nLines").unwrap_err(), BlendError::Name);

		let g = Gradient::new("Hello").unwrap();
		assert_eq!(g.name(), "Hello");
		assert_eq!(g.segment_count(), 1);
		assert_eq!(g.segments()[0], Segment::default());
		assert_eq!(g.revision(), 0);
		assert!(g.is_valid());

		let s = Gradient::standard();
		assert_eq!(s.name(), "Standard");
		assert_eq!(s.checksum(), g.checksum());
	}

	#[test]
	fn t_midgrey() {
		let g = Gradient::standard();
		let ctx = Context::default();
		let (color, idx) = g.evaluate(0.5, false, None, &ctx).unwrap();
		assert_eq!(color, Color::new(0.5, 0.5, 0.5, 1.0));
		assert_eq!(idx, 0);

		// Reversed, and out of range.
		assert_eq!(g.evaluate(0.0, true, None, &ctx).unwrap().0, Color::WHITE);
		assert_eq!(g.evaluate(-3.0, false, None, &ctx).unwrap().0, Color::BLACK);
		assert_eq!(g.evaluate(7.0, false, None, &ctx).unwrap().0, Color::WHITE);
		assert_eq!(g.evaluate(f64::NAN, false, None, &ctx).unwrap().0, Color::BLACK);
	}

	#[test]
	fn t_boundaries() {
		let ctx = Context::new(
			Color::new(0.2, 0.4, 0.6, 1.0),
			Color::new(0.9, 0.8, 0.7, 1.0),
		);

		for f in [
			BlendFunction::Linear,
			BlendFunction::Curved,
			BlendFunction::Sine,
			BlendFunction::SphereIncreasing,
			BlendFunction::SphereDecreasing,
		] {
			let mut g = sample();
			let last = g.segment_count() - 1;
			g.range_set_blend_function(0..=last, f).unwrap();

			let first = g.segments()[0];
			let end = g.segments()[last];

			let (c, idx) = g.evaluate(0.0, false, None, &ctx).unwrap();
			assert_eq!(idx, 0);
			assert!(c.distance(first.left_color(&ctx)) < 1e-9, "{f:?}");

			let (c, idx) = g.evaluate(1.0, false, None, &ctx).unwrap();
			assert_eq!(idx, last);
			assert!(c.distance(end.right_color(&ctx)) < 1e-9, "{f:?}");
		}
	}

	#[test]
	fn t_channel_range() {
		let g = sample();
		let ctx = Context::default();
		let mut seed = None;
		for i in 0..=1000 {
			let (c, idx) = g.evaluate(f64::from(i) / 1000.0, false, seed, &ctx).unwrap();
			seed = Some(idx);
			for v in [c.r, c.g, c.b, c.a] {
				assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{i}: {c:?}");
			}
		}
	}

	#[test]
	fn t_channel_range_wild() {
		// Fixed colors outside the unit range, and curved segments with their
		// middles pinned to an edge.
		let src = "GIMP Gradient
Name: Wild
3
0.000000 0.400000 0.400000 1.500000 -0.500000 0.000000 2.000000 -1.000000 0.500000 3.000000 1.000000 1 0
0.400000 0.400000 0.700000 0.000000 0.000000 0.000000 1.000000 1.000000 1.000000 1.000000 -0.500000 1 0
0.700000 1.000000 1.000000 0.000000 1.000000 0.000000 1.000000 1.000000 0.000000 1.000000 1.000000 1 0
";
		let ctx = Context::default();
		for coloring in [Coloring::Rgb, Coloring::HsvCcw, Coloring::HsvCw] {
			let mut g: Gradient = src.parse().unwrap();
			g.range_set_coloring(0..=2, coloring).unwrap();

			let mut seed = None;
			for i in 0..=1000 {
				let (c, idx) = g.evaluate(f64::from(i) / 1000.0, false, seed, &ctx).unwrap();
				seed = Some(idx);
				for v in [c.r, c.g, c.b, c.a] {
					assert!(v.is_finite(), "{coloring:?} {i}: {c:?}");
					assert!((0.0..=1.0).contains(&v), "{coloring:?} {i}: {c:?}");
				}
			}
		}
	}

	#[test]
	fn t_seed() {
		let g = sample();
		let ctx = Context::default();

		// Any seed leads to the same answer.
		for pos in [0.0, 0.2, 0.5, 0.9, 1.0] {
			let expected = g.evaluate(pos, false, None, &ctx).unwrap();
			for seed in 0..g.segment_count() + 2 {
				assert_eq!(g.evaluate(pos, false, Some(seed), &ctx).unwrap(), expected);
			}
		}
	}

	#[test]
	fn t_segment_at() {
		let g = sample();
		assert_eq!(g.segment_at(0.0), Ok(0));
		assert_eq!(g.segment_at(0.5), Ok(1));
		assert_eq!(g.segment_at(0.99), Ok(2));
		assert_eq!(g.segment_at(1.0), Ok(2));
	}

	#[test]
	fn t_broken_chain() {
		let mut g = Gradient::standard();
		g.segments.push(Segment { left: 0.8, middle: 0.9, right: 1.0, ..Segment::default() });
		g.segments[0].right = 0.5;
		assert_eq!(g.segment_at(0.6), Err(BlendError::NoSegment));
		assert!(! g.is_valid());
	}

	#[test]
	fn t_flatten() {
		let g = sample();
		assert!(g.has_fg_bg_segments());

		let ctx = Context::new(Color::new(0.0, 1.0, 0.0, 1.0), Color::WHITE);
		let flat = g.flatten(&ctx);
		assert!(! flat.has_fg_bg_segments());
		assert_eq!(flat.segments()[0].left_color, ctx.foreground);
		assert_eq!(flat.segments()[2].right_color, Color::WHITE.with_alpha(0.0));

		// The colors don't change.
		for i in 0..=100 {
			let pos = f64::from(i) / 100.0;
			assert_eq!(
				g.evaluate(pos, false, None, &ctx).unwrap().0,
				flat.evaluate(pos, false, None, &ctx).unwrap().0,
			);
		}

		// Flattening again changes nothing.
		let again = flat.flatten(&Context::default());
		assert_eq!(again.segments(), flat.segments());
		assert_eq!(again.checksum(), flat.checksum());
	}

	#[test]
	fn t_checksum() {
		let g = sample();
		let mut h = g.clone();
		assert_eq!(g.checksum(), h.checksum());

		h.set_name("Something Else").unwrap();
		assert_eq!(g.checksum(), h.checksum());

		h.recenter(0..=0).unwrap();
		assert_ne!(g.checksum(), h.checksum());
	}

	#[test]
	fn t_from_segments() {
		let mut segs = sample().segments().to_vec();
		segs[1].left += 1e-8;
		segs[2].right = 1.0 - 1e-8;
		let g = Gradient::from_segments("Fixed", segs.clone()).unwrap();
		assert!(g.is_valid());

		segs[1].left += 0.1;
		assert_eq!(Gradient::from_segments("Gap", segs).unwrap_err(), BlendError::Parse);
		assert_eq!(Gradient::from_segments("Empty", Vec::new()).unwrap_err(), BlendError::Count);
	}

	#[test]
	fn t_preview() {
		let g = Gradient::standard();
		let img = g.preview(3, 2, &Context::default()).unwrap();
		assert_eq!(img.width(), 3);
		assert_eq!(img.height(), 2);
		for row in img.rows() {
			assert_eq!(row, &[
				RGBA8::new(0, 0, 0, 255),
				RGBA8::new(128, 128, 128, 255),
				RGBA8::new(255, 255, 255, 255),
			]);
		}

		assert!(g.preview(0, 2, &Context::default()).is_err());
	}
}
