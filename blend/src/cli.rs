/*!
# `Blend` - CLI Settings
*/

use argyle::Argument;
use blend_core::{
	Blend,
	BlendError,
	Color,
	Context,
	GradientShape,
	RepeatMode,
};
use std::{
	path::PathBuf,
	str::FromStr,
};



/// # Default Width/Height.
const DEFAULT_SIZE: usize = 256;

/// # Maximum Width/Height.
const MAX_SIZE: usize = 32_768;



#[derive(Debug, Clone)]
/// # Settings.
///
/// Everything the command line asked for.
pub(super) struct Settings {
	/// # Blend Settings.
	pub(super) blend: Blend,

	/// # Colors.
	pub(super) context: Context,

	/// # Width.
	pub(super) width: usize,

	/// # Height.
	pub(super) height: usize,

	/// # Gradient File.
	pub(super) gradient: Option<PathBuf>,

	/// # Output File.
	pub(super) output: Option<PathBuf>,

	/// # Mask File.
	pub(super) mask: Option<PathBuf>,

	/// # Alpha File.
	pub(super) alpha: Option<PathBuf>,

	/// # Print POV?
	pub(super) pov: bool,

	/// # Ignored Options.
	///
	/// Options that were given but have no effect, paired with the reason.
	pub(super) ignored: Vec<(&'static str, &'static str)>,
}

impl Settings {
	/// # From Environment.
	///
	/// ## Errors
	///
	/// Returns an error if any argument is invalid, or if help or version
	/// information was requested.
	pub(super) fn from_env() -> Result<Self, BlendError> {
		let args = argyle::args()
			.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));
		Self::from_args(args)
	}

	/// # From Arguments.
	///
	/// ## Errors
	///
	/// Returns an error if any argument is invalid, or if help or version
	/// information was requested.
	pub(super) fn from_args<I>(args: I) -> Result<Self, BlendError>
	where I: IntoIterator<Item=Argument> {
		let mut blend = Blend::new();
		let mut context = Context::default();
		let mut width = DEFAULT_SIZE;
		let mut height = DEFAULT_SIZE;
		let mut start = (0.0, 0.0);
		let mut end = None;
		let mut supersample = false;
		let mut depth = Blend::DEFAULT_DEPTH;
		let mut threshold = Blend::DEFAULT_THRESHOLD;
		let mut tuned = None;
		let mut seeded = false;
		let mut gradient = None;
		let mut output = None;
		let mut mask = None;
		let mut alpha = None;
		let mut pov = false;

		for arg in args {
			match arg {
				Argument::Key("--dither") => { blend = blend.with_dither(true); },
				Argument::Key("-h" | "--help") => return Err(BlendError::PrintHelp),
				Argument::Key("--pov") => { pov = true; },
				Argument::Key("--reverse") => { blend = blend.with_reverse(true); },
				Argument::Key("--supersample") => { supersample = true; },
				Argument::Key("-V" | "--version") => return Err(BlendError::PrintVersion),

				Argument::KeyWithValue("--alpha", s) => { alpha = Some(PathBuf::from(s)); },
				Argument::KeyWithValue("--bg", s) => {
					context.background = parse_hex(&s)?;
				},
				Argument::KeyWithValue("--depth", s) => {
					depth = parse_value("--depth", &s)?;
					tuned = Some("--depth");
				},
				Argument::KeyWithValue("--end", s) => { end = Some(parse_point("--end", &s)?); },
				Argument::KeyWithValue("--fg", s) => {
					context.foreground = parse_hex(&s)?;
				},
				Argument::KeyWithValue("-g" | "--gradient", s) => {
					gradient = Some(PathBuf::from(s));
				},
				Argument::KeyWithValue("--height", s) => { height = parse_size("--height", &s)?; },
				Argument::KeyWithValue("--mask", s) => { mask = Some(PathBuf::from(s)); },
				Argument::KeyWithValue("--mode", s) => {
					blend = blend.with_mode(parse_value("--mode", &s)?);
				},
				Argument::KeyWithValue("--offset", s) => {
					let offset: f64 = parse_value("--offset", &s)?;
					if ! (0.0..=100.0).contains(&offset) { return Err(invalid("--offset", &s)); }
					blend = blend.with_offset(offset);
				},
				Argument::KeyWithValue("-o" | "--output", s) => {
					output = Some(PathBuf::from(s));
				},
				Argument::KeyWithValue("--repeat", s) => {
					blend = blend.with_repeat(parse_value::<RepeatMode>("--repeat", &s)?);
				},
				Argument::KeyWithValue("--seed", s) => {
					blend = blend.with_seed(parse_value("--seed", &s)?);
					seeded = true;
				},
				Argument::KeyWithValue("--shape", s) => {
					blend = blend.with_shape(parse_value::<GradientShape>("--shape", &s)?);
				},
				Argument::KeyWithValue("--start", s) => { start = parse_point("--start", &s)?; },
				Argument::KeyWithValue("--threshold", s) => {
					threshold = parse_value("--threshold", &s)?;
					if ! threshold.is_finite() || threshold < 0.0 {
						return Err(invalid("--threshold", &s));
					}
					tuned = Some("--threshold");
				},
				Argument::KeyWithValue("--width", s) => { width = parse_size("--width", &s)?; },

				Argument::Other(s) => return Err(invalid("argument", &s)),
				Argument::InvalidUtf8(s) => return Err(invalid("argument", &s.to_string_lossy())),

				// Nothing else is relevant.
				_ => {},
			}
		}

		if ! (1..=Blend::MAX_DEPTH).contains(&depth) {
			return Err(invalid("--depth", &depth.to_string()));
		}

		#[allow(clippy::cast_precision_loss)] // Sizes are capped.
		let end = end.unwrap_or((width as f64, 0.0));
		blend = blend.with_points(start, end);
		if supersample { blend = blend.with_supersample(depth, threshold); }

		let mut ignored = Vec::new();
		if seeded && ! blend.dither() { ignored.push(("--seed", "--dither is not set")); }
		if let Some(key) = tuned.filter(|_| ! supersample) {
			ignored.push((key, "--supersample is not set"));
		}
		if mask.is_some() && alpha.is_some() { ignored.push(("--alpha", "--mask takes precedence")); }

		Ok(Self {
			blend,
			context,
			width,
			height,
			gradient,
			output,
			mask,
			alpha,
			pov,
			ignored,
		})
	}
}



/// # Invalid Argument.
///
/// Log the details and return a generic error.
fn invalid(key: &str, value: &str) -> BlendError {
	log::error!("Invalid {key} value: {value:?}");
	BlendError::Argument
}

/// # Parse Value.
fn parse_value<T: FromStr>(key: &str, src: &str) -> Result<T, BlendError> {
	src.trim().parse::<T>().map_err(|_| invalid(key, src))
}

/// # Parse Size.
///
/// Dimensions must be between one and `MAX_SIZE`.
fn parse_size(key: &str, src: &str) -> Result<usize, BlendError> {
	let size: usize = parse_value(key, src)?;
	if (1..=MAX_SIZE).contains(&size) { Ok(size) }
	else { Err(invalid(key, src)) }
}

/// # Parse Point.
///
/// Points are written `X,Y`.
fn parse_point(key: &str, src: &str) -> Result<(f64, f64), BlendError> {
	let (x, y) = src.split_once(',').ok_or_else(|| invalid(key, src))?;
	let x: f64 = parse_value(key, x)?;
	let y: f64 = parse_value(key, y)?;
	if x.is_finite() && y.is_finite() { Ok((x, y)) }
	else { Err(invalid(key, src)) }
}

/// # Parse Hex Color.
fn parse_hex(src: &str) -> Result<Color, BlendError> {
	Color::from_hex(src).ok_or_else(|| invalid("color", src))
}
