/*!
# `Blend` - Adaptive Supersampling
*/

use crate::{
	BlendError,
	Color,
};



/// # Sample Cell.
///
/// `None` means not yet sampled.
type Cell = Option<Color>;



#[derive(Debug, Clone, Copy, PartialEq)]
/// # Supersampler.
///
/// Each pixel is treated as a grid of `2^max_depth` cells per side. The four
/// corners are sampled first; if any two differ by at least the threshold,
/// the square is split into quarters and the process repeats, down to the
/// maximum depth.
///
/// Corner samples are shared with neighboring pixels, so flat regions cost
/// little more than a plain render.
pub(super) struct Supersampler {
	/// # Maximum Depth.
	max_depth: u8,

	/// # Threshold.
	threshold: f64,
}

impl Supersampler {
	/// # New.
	pub(super) const fn new(max_depth: u8, threshold: f64) -> Self {
		Self { max_depth, threshold }
	}

	/// # Run.
	///
	/// Sample the `width` by `height` area, passing each finished pixel to
	/// `put` in row-major order, and calling `row_done` after each row.
	///
	/// ## Errors
	///
	/// Sampling errors are passed through as-is.
	pub(super) fn run<S, W, R>(
		self,
		width: usize,
		height: usize,
		sample: S,
		mut put: W,
		mut row_done: R,
	) -> Result<(), BlendError>
	where
		S: FnMut(f64, f64) -> Result<Color, BlendError>,
		W: FnMut(usize, usize, Color),
		R: FnMut(usize),
	{
		let sub = 1_usize << self.max_depth;
		let side = sub + 1;
		let row_len = sub.checked_mul(width)
			.and_then(|n| n.checked_add(1))
			.ok_or(BlendError::Overflow)?;

		let mut top: Vec<Cell> = vec![None; row_len];
		let mut bottom: Vec<Cell> = vec![None; row_len];
		let mut pass = Pass {
			sample,
			block: vec![None; side * side],
			side,
			sub,
			max_depth: self.max_depth,
			threshold: self.threshold,
		};

		for y in 0..height {
			bottom.fill(None);
			for yy in 0..side { pass.block[yy * side] = None; }

			for x in 0..width {
				// Everything but the first column is new.
				for yy in 1..side {
					pass.block[yy * side + 1..(yy + 1) * side].fill(None);
				}

				// The first row comes from the previous row of pixels.
				let xt = x * sub;
				pass.block[..side].copy_from_slice(&top[xt..xt + side]);

				let color = pass.sub_pixel(1, x, y, [0, 0, sub, sub])?;
				put(x, y, color);

				// Share the last row and column with the neighbors.
				bottom[xt..xt + side].copy_from_slice(&pass.block[sub * side..]);
				for yy in 0..side {
					pass.block[yy * side] = pass.block[yy * side + sub];
				}
			}

			std::mem::swap(&mut top, &mut bottom);
			row_done(y);
		}

		Ok(())
	}
}



/// # Sampling Pass.
struct Pass<S> {
	/// # Sampler.
	sample: S,

	/// # Sub-Pixel Block.
	block: Vec<Cell>,

	/// # Block Side Length.
	side: usize,

	/// # Cells Per Side.
	sub: usize,

	/// # Maximum Depth.
	max_depth: u8,

	/// # Threshold.
	threshold: f64,
}

impl<S> Pass<S>
where S: FnMut(f64, f64) -> Result<Color, BlendError> {
	/// # Sub-Pixel.
	///
	/// Return the color of the square `area` (`[x1, y1, x3, y3]` in block
	/// cells) within pixel `(x, y)`, subdividing as needed.
	fn sub_pixel(&mut self, depth: u8, x: usize, y: usize, area: [usize; 4])
	-> Result<Color, BlendError> {
		let [x1, y1, x3, y3] = area;

		let mut corners = [
			self.corner(x, y, x1, y1)?,
			self.corner(x, y, x3, y1)?,
			self.corner(x, y, x1, y3)?,
			self.corner(x, y, x3, y3)?,
		];

		if depth <= self.max_depth && self.uneven(&corners) {
			let x2 = (x1 + x3) >> 1;
			let y2 = (y1 + y3) >> 1;
			let depth = depth + 1;

			corners = [
				self.sub_pixel(depth, x, y, [x1, y1, x2, y2])?,
				self.sub_pixel(depth, x, y, [x2, y1, x3, y2])?,
				self.sub_pixel(depth, x, y, [x1, y2, x2, y3])?,
				self.sub_pixel(depth, x, y, [x2, y2, x3, y3])?,
			];
		}

		Ok(average(corners))
	}

	#[allow(clippy::cast_precision_loss)] // Blocks and images are small.
	/// # Corner.
	///
	/// Return the sample at block cell `(xi, yi)`, taking it if needed.
	fn corner(&mut self, x: usize, y: usize, xi: usize, yi: usize)
	-> Result<Color, BlendError> {
		let idx = yi * self.side + xi;
		if let Some(c) = self.block[idx] { return Ok(c); }

		let sub = self.sub as f64;
		let half = sub * 0.5;
		let c = (self.sample)(
			x as f64 + (xi as f64 - half) / sub,
			y as f64 + (yi as f64 - half) / sub,
		)?;
		self.block[idx] = Some(c);
		Ok(c)
	}

	/// # Uneven?
	///
	/// True if any two corners are at least a threshold apart.
	fn uneven(&self, c: &[Color; 4]) -> bool {
		let t = self.threshold;
		t <= c[0].distance(c[1]) ||
		t <= c[0].distance(c[2]) ||
		t <= c[0].distance(c[3]) ||
		t <= c[1].distance(c[2]) ||
		t <= c[1].distance(c[3]) ||
		t <= c[2].distance(c[3])
	}
}



/// # Average.
///
/// When any of the colors is fully transparent, the color channels are
/// weighted by alpha so the invisible ones don't bleed through.
fn average(c: [Color; 4]) -> Color {
	if c.iter().any(|c| c.a == 0.0) {
		let weight = c.iter().map(|c| c.a).sum::<f64>();
		if weight == 0.0 { return Color::new(0.0, 0.0, 0.0, 0.0); }

		Color::new(
			c.iter().map(|c| c.r * c.a).sum::<f64>() / weight,
			c.iter().map(|c| c.g * c.a).sum::<f64>() / weight,
			c.iter().map(|c| c.b * c.a).sum::<f64>() / weight,
			weight * 0.25,
		)
	}
	else {
		Color::new(
			(c[0].r + c[1].r + c[2].r + c[3].r) * 0.25,
			(c[0].g + c[1].g + c[2].g + c[3].g) * 0.25,
			(c[0].b + c[1].b + c[2].b + c[3].b) * 0.25,
			(c[0].a + c[1].a + c[2].a + c[3].a) * 0.25,
		)
	}
}
