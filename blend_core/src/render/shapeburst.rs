/*!
# `Blend` - Shapeburst
*/

use crate::BlendError;
use imgref::{
	ImgRef,
	ImgVec,
};
use rgb::RGBA8;



#[derive(Debug, Clone, Copy, Default)]
/// # Shapeburst Source.
///
/// The shapeburst shapes color each pixel by its distance from the edge of a
/// shape. The shape comes from one of these. Image sources must have the
/// same dimensions as the render.
pub enum BurstSource<'a> {
	/// # Selection Mask.
	///
	/// Zero is outside the shape, `255` fully inside, anything else
	/// partially.
	Mask(ImgRef<'a, u8>),

	/// # Alpha Channel.
	///
	/// As with a mask, but read from the alpha channel of an image.
	Alpha(ImgRef<'a, RGBA8>),

	#[default]
	/// # Solid.
	///
	/// The whole render area is the shape, so distances are measured from
	/// its borders.
	Solid,
}

impl BurstSource<'_> {
	/// # Coverage.
	///
	/// Return the source as a flat row-major list of `0.0..=1.0` coverage
	/// values.
	///
	/// ## Errors
	///
	/// Image sources must match the requested dimensions.
	fn coverage(&self, width: usize, height: usize) -> Result<Vec<f32>, BlendError> {
		match self {
			Self::Mask(img) => {
				check_size(img.width(), img.height(), width, height)?;
				Ok(img.rows().flatten().map(|&p| f32::from(p) / 255.0).collect())
			},
			Self::Alpha(img) => {
				check_size(img.width(), img.height(), width, height)?;
				Ok(img.rows().flatten().map(|p| f32::from(p.a) / 255.0).collect())
			},
			Self::Solid => {
				let size = width.checked_mul(height).ok_or(BlendError::Overflow)?;
				Ok(vec![1.0; size])
			},
		}
	}
}



#[derive(Debug, Clone)]
/// # Distance Map.
///
/// Each pixel holds its distance from the nearest pixel outside the shape
/// (or the border), normalized so the deepest pixel is `1.0`.
pub(super) struct DistanceMap(ImgVec<f32>);

impl DistanceMap {
	/// # New.
	///
	/// Distances are chessboard steps weighted by coverage, built with a
	/// forward and a backward pass over the image.
	///
	/// ## Errors
	///
	/// The source must match the dimensions.
	pub(super) fn new(src: &BurstSource<'_>, width: usize, height: usize)
	-> Result<Self, BlendError> {
		let cover = src.coverage(width, height)?;
		let mut dist = vec![0.0_f32; cover.len()];

		// Out of bounds is outside the shape.
		let get = |d: &[f32], x: isize, y: isize| -> f32 {
			if x < 0 || y < 0 { return 0.0; }
			#[allow(clippy::cast_sign_loss)] // Checked above.
			let (x, y) = (x as usize, y as usize);
			if x < width && y < height { d[y * width + x] }
			else { 0.0 }
		};

		// Top-left to bottom-right.
		for y in 0..height {
			for x in 0..width {
				let idx = y * width + x;
				let m = cover[idx];
				if m <= 0.0 { continue; }

				let (xi, yi) = signed(x, y);
				let near = get(&dist, xi - 1, yi)
					.min(get(&dist, xi - 1, yi - 1))
					.min(get(&dist, xi, yi - 1))
					.min(get(&dist, xi + 1, yi - 1));
				dist[idx] = m + near;
			}
		}

		// Bottom-right to top-left.
		for y in (0..height).rev() {
			for x in (0..width).rev() {
				let idx = y * width + x;
				let m = cover[idx];
				if m <= 0.0 { continue; }

				let (xi, yi) = signed(x, y);
				let near = get(&dist, xi + 1, yi)
					.min(get(&dist, xi + 1, yi + 1))
					.min(get(&dist, xi, yi + 1))
					.min(get(&dist, xi - 1, yi + 1));
				dist[idx] = dist[idx].min(m + near);
			}
		}

		let max = dist.iter().copied().fold(0.0_f32, f32::max);
		if 0.0 < max {
			for d in &mut dist { *d /= max; }
		}

		Ok(Self(ImgVec::new(dist, width, height)))
	}

	#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
	/// # Sample.
	///
	/// Return the value nearest to `(x, y)`, clamping to the edges.
	pub(super) fn sample(&self, x: f64, y: f64) -> f64 {
		let (w, h) = (self.0.width(), self.0.height());
		if w == 0 || h == 0 { return 0.0; }

		let ix = x.max(0.0).min(w as f64 - 0.7) as usize;
		let iy = y.max(0.0).min(h as f64 - 0.7) as usize;
		f64::from(self.0.buf()[iy * self.0.stride() + ix])
	}
}



/// # Check Size.
const fn check_size(w1: usize, h1: usize, w2: usize, h2: usize)
-> Result<(), BlendError> {
	if w1 == w2 && h1 == h2 { Ok(()) }
	else { Err(BlendError::Mask) }
}

#[allow(clippy::cast_possible_wrap)] // Images are never that big.
/// # Signed Coordinates.
const fn signed(x: usize, y: usize) -> (isize, isize) { (x as isize, y as isize) }
