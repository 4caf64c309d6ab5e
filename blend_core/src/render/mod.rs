/*!
# `Blend` - Renderer
*/

pub(super) mod kind;
pub(super) mod shape;
pub(super) mod shapeburst;
pub(super) mod supersample;

use crate::{
	BlendError,
	BlendMode,
	BurstSource,
	Color,
	Context,
	Gradient,
	GradientShape,
	Hsv,
	Progress,
	RepeatMode,
};
use imgref::ImgVec;
use rand::{
	Rng,
	SeedableRng,
	rngs::StdRng,
};
use rgb::RGBA;
use shape::Geometry;
use shapeburst::DistanceMap;
use std::borrow::Cow;
use supersample::Supersampler;



#[derive(Debug, Clone, Copy, PartialEq)]
/// # Blend.
///
/// This holds the settings for a gradient fill: where colors come from, how
/// pixel positions map onto the gradient, and how the result is smoothed.
///
/// Build one up with the `with_*` methods, then call [`Blend::render`].
///
/// ## Examples
///
/// ```
/// use blend_core::{Blend, BurstSource, Context, Gradient, GradientShape};
///
/// let img = Blend::default()
///     .with_shape(GradientShape::Radial)
///     .with_points((32.0, 32.0), (64.0, 32.0))
///     .render(
///         64,
///         64,
///         &Gradient::standard(),
///         &Context::default(),
///         BurstSource::Solid,
///         &mut (),
///     )
///     .unwrap();
///
/// assert_eq!(img.width(), 64);
/// ```
pub struct Blend {
	/// # Blend Mode.
	mode: BlendMode,

	/// # Shape.
	shape: GradientShape,

	/// # Repeat.
	repeat: RepeatMode,

	/// # Start Point.
	start: (f64, f64),

	/// # End Point.
	end: (f64, f64),

	/// # Offset (`0..=100`).
	offset: f64,

	/// # Reverse?
	reverse: bool,

	/// # Dither?
	dither: bool,

	/// # Dither Seed.
	seed: Option<u64>,

	/// # Supersampling (Depth and Threshold).
	supersample: Option<(u8, f64)>,
}

impl Default for Blend {
	#[inline]
	fn default() -> Self { Self::new() }
}

/// ## Instantiation.
impl Blend {
	/// # Default Supersampling Depth.
	pub const DEFAULT_DEPTH: u8 = 3;

	/// # Default Supersampling Threshold.
	pub const DEFAULT_THRESHOLD: f64 = 0.2;

	/// # Maximum Supersampling Depth.
	pub const MAX_DEPTH: u8 = 9;

	#[must_use]
	/// # New.
	///
	/// Start with a custom-mode linear blend from `(0, 0)` to `(1, 0)`.
	pub const fn new() -> Self {
		Self {
			mode: BlendMode::Custom,
			shape: GradientShape::Linear,
			repeat: RepeatMode::None,
			start: (0.0, 0.0),
			end: (1.0, 0.0),
			offset: 0.0,
			reverse: false,
			dither: false,
			seed: None,
			supersample: None,
		}
	}

	#[must_use]
	/// # With Mode.
	pub const fn with_mode(mut self, mode: BlendMode) -> Self {
		self.mode = mode;
		self
	}

	#[must_use]
	/// # With Shape.
	pub const fn with_shape(mut self, shape: GradientShape) -> Self {
		self.shape = shape;
		self
	}

	#[must_use]
	/// # With Repeat.
	pub const fn with_repeat(mut self, repeat: RepeatMode) -> Self {
		self.repeat = repeat;
		self
	}

	#[must_use]
	/// # With Points.
	///
	/// Set the start and end points, in pixels. The shapeburst shapes ignore
	/// these.
	pub const fn with_points(mut self, start: (f64, f64), end: (f64, f64)) -> Self {
		self.start = start;
		self.end = end;
		self
	}

	#[must_use]
	/// # With Offset.
	///
	/// Set the offset, a percentage from `0.0..=100.0`. Out of range values
	/// are clamped; `NaN` is zero.
	pub fn with_offset(mut self, offset: f64) -> Self {
		self.offset =
			if offset.is_nan() { 0.0 }
			else { offset.clamp(0.0, 100.0) };
		self
	}

	#[must_use]
	/// # With Reverse.
	pub const fn with_reverse(mut self, reverse: bool) -> Self {
		self.reverse = reverse;
		self
	}

	#[must_use]
	/// # With Dither.
	///
	/// Dithering adds up to `1/256` of noise to each channel to break up
	/// banding.
	pub const fn with_dither(mut self, dither: bool) -> Self {
		self.dither = dither;
		self
	}

	#[must_use]
	/// # With Dither Seed.
	///
	/// Fix the dither noise so renders are reproducible. Without a seed, the
	/// noise differs each time.
	pub const fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	#[must_use]
	/// # With Supersampling.
	///
	/// Enable adaptive supersampling. The depth is clamped to `1..=9`. A
	/// pixel is subdivided when its corner colors differ by at least
	/// `threshold`; negative or `NaN` thresholds are treated as zero.
	pub fn with_supersample(mut self, max_depth: u8, threshold: f64) -> Self {
		let threshold =
			if threshold.is_nan() { 0.0 }
			else { threshold.max(0.0) };
		self.supersample = Some((max_depth.clamp(1, Self::MAX_DEPTH), threshold));
		self
	}

	#[must_use]
	/// # Without Supersampling.
	pub const fn without_supersample(mut self) -> Self {
		self.supersample = None;
		self
	}
}

/// ## Getters.
impl Blend {
	#[must_use]
	/// # Mode.
	pub const fn mode(&self) -> BlendMode { self.mode }

	#[must_use]
	/// # Shape.
	pub const fn shape(&self) -> GradientShape { self.shape }

	#[must_use]
	/// # Repeat.
	pub const fn repeat(&self) -> RepeatMode { self.repeat }

	#[must_use]
	/// # Start Point.
	pub const fn start(&self) -> (f64, f64) { self.start }

	#[must_use]
	/// # End Point.
	pub const fn end(&self) -> (f64, f64) { self.end }

	#[must_use]
	/// # Offset.
	pub const fn offset(&self) -> f64 { self.offset }

	#[must_use]
	/// # Reverse?
	pub const fn reverse(&self) -> bool { self.reverse }

	#[must_use]
	/// # Dither?
	pub const fn dither(&self) -> bool { self.dither }

	#[must_use]
	/// # Dither Seed.
	pub const fn seed(&self) -> Option<u64> { self.seed }

	#[must_use]
	/// # Supersampling.
	///
	/// Return the maximum depth and threshold, if enabled.
	pub const fn supersample(&self) -> Option<(u8, f64)> { self.supersample }
}

/// ## Rendering.
impl Blend {
	#[allow(clippy::cast_precision_loss)] // Images are never that big.
	/// # Render.
	///
	/// Fill a `width` by `height` image. Pixel `(x, y)` is sampled at its
	/// integer coordinates, unless supersampling is enabled, in which case
	/// samples span half a pixel either way.
	///
	/// In custom mode, colors come from `gradient`, flattened against
	/// `context` if any segment refers to it. The other modes ramp between
	/// the context colors and ignore the gradient.
	///
	/// The burst `source` is only read by the shapeburst shapes.
	///
	/// ## Errors
	///
	/// Returns an error if either dimension is zero, if the burst source does
	/// not match the dimensions, or if the gradient is broken.
	pub fn render<P: Progress>(
		&self,
		width: usize,
		height: usize,
		gradient: &Gradient,
		context: &Context,
		source: BurstSource<'_>,
		progress: &mut P,
	) -> Result<ImgVec<RGBA<f32>>, BlendError> {
		if width == 0 || height == 0 { return Err(BlendError::Overflow); }
		let size = width.checked_mul(height).ok_or(BlendError::Overflow)?;

		let map =
			if self.shape.is_shapeburst() {
				progress.set_text("Calculating distance map");
				Some(DistanceMap::new(&source, width, height)?)
			}
			else { None };
		let geometry = Geometry::new(self.shape, self.start, self.end, self.offset, map.as_ref());
		let ramp = Ramp::new(self.mode, gradient, context);

		log::debug!(
			"Rendering a {width}x{height} {} blend ({} mode, {} repeat, length {:.2}).",
			self.shape,
			self.mode,
			self.repeat,
			geometry.dist(),
		);

		progress.set_text("Blending");
		progress.set_value(0.0);

		let mut dither = self.dither.then(|| Dither::new(self.seed));
		let mut row_rng: Option<StdRng> = None;
		let mut out: Vec<RGBA<f32>> = Vec::with_capacity(size);

		let mut seed = None;
		let mut sample = |x: f64, y: f64| -> Result<Color, BlendError> {
			let factor = self.repeat.apply(geometry.factor(x, y));
			ramp.color(factor, self.reverse, &mut seed)
		};

		if let Some((depth, threshold)) = self.supersample {
			log::debug!("Supersampling to depth {depth} (threshold {threshold}).");
			Supersampler::new(depth, threshold).run(
				width,
				height,
				sample,
				|x, _, color| {
					if x == 0 { row_rng = dither.as_mut().map(Dither::row); }
					out.push(finish(color, row_rng.as_mut()));
				},
				|y| progress.set_value((y + 1) as f64 / height as f64),
			)?;
		}
		else {
			for y in 0..height {
				row_rng = dither.as_mut().map(Dither::row);
				for x in 0..width {
					let color = sample(x as f64, y as f64)?;
					out.push(finish(color, row_rng.as_mut()));
				}
				progress.set_value((y + 1) as f64 / height as f64);
			}
		}

		Ok(ImgVec::new(out, width, height))
	}
}



/// # Color Ramp.
///
/// This is where colors come from, given a folded factor.
enum Ramp<'a> {
	/// # A Gradient.
	Gradient(Cow<'a, Gradient>, &'a Context),

	/// # Straight RGB.
	Rgb(Color, Color),

	/// # Straight HSV.
	Hsv(Hsv, Hsv),
}

impl<'a> Ramp<'a> {
	/// # New.
	fn new(mode: BlendMode, gradient: &'a Gradient, context: &'a Context) -> Self {
		let (fg, bg) = (context.foreground, context.background);
		match mode {
			BlendMode::FgBgRgb => Self::Rgb(fg, bg),
			BlendMode::FgBgHsv => Self::Hsv(fg.to_hsv(), bg.to_hsv()),
			BlendMode::FgTransparent => Self::Rgb(fg, fg.with_alpha(0.0)),
			BlendMode::Custom =>
				if gradient.has_fg_bg_segments() {
					log::debug!("Flattening gradient {:?} against the context.", gradient.name());
					Self::Gradient(Cow::Owned(gradient.flatten(context)), context)
				}
				else { Self::Gradient(Cow::Borrowed(gradient), context) },
		}
	}

	/// # Color.
	///
	/// Gradient lookups start from the previous segment; `seed` is updated
	/// with the new one after each call.
	fn color(&self, factor: f64, reverse: bool, seed: &mut Option<usize>)
	-> Result<Color, BlendError> {
		match self {
			Self::Gradient(g, ctx) => {
				let (color, idx) = g.evaluate(factor, reverse, *seed, ctx)?;
				*seed = Some(idx);
				Ok(color)
			},
			Self::Rgb(fg, bg) => Ok(fg.lerp(*bg, flip(factor, reverse))),
			Self::Hsv(fg, bg) => Ok(Color::from(fg.lerp(*bg, flip(factor, reverse)))),
		}
	}
}



/// # Dither Source.
///
/// Each row gets its own generator, seeded from this one.
struct Dither(StdRng);

impl Dither {
	/// # New.
	fn new(seed: Option<u64>) -> Self {
		Self(seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64))
	}

	/// # Next Row.
	fn row(&mut self) -> StdRng { StdRng::seed_from_u64(self.0.gen()) }
}



/// # Flip Factor.
fn flip(factor: f64, reverse: bool) -> f64 {
	if reverse { 1.0 - factor }
	else { factor }
}

/// # Finish Pixel.
///
/// Apply dithering, if any, and convert. Each channel gets one byte of a
/// random `u32` as a fraction of `1/256`.
fn finish(color: Color, rng: Option<&mut StdRng>) -> RGBA<f32> {
	match rng {
		Some(rng) => {
			let [r, g, b, a] = rng.gen::<u32>().to_le_bytes();
			RGBA::from(Color::new(
				color.r + f64::from(r) / 65_536.0,
				color.g + f64::from(g) / 65_536.0,
				color.b + f64::from(b) / 65_536.0,
				color.a + f64::from(a) / 65_536.0,
			))
		},
		None => RGBA::from(color),
	}
}
