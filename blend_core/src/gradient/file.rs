/*!
# `Blend` - Gradient Files
*/

use crate::{
	BlendError,
	BlendFunction,
	Color,
	ColorType,
	Coloring,
	Context,
	Gradient,
	Segment,
};
use std::{
	fmt::Write,
	path::Path,
	str::FromStr,
};



/// # File Marker.
const MAGIC: &str = "GIMP Gradient";



impl FromStr for Gradient {
	type Err = BlendError;

	/// # Parse `.ggr`.
	///
	/// The format is line-based: a marker, the name, the segment count, and
	/// then one line of fields per segment. The two color type fields at the
	/// end of each segment line are optional, defaulting to fixed.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let mut lines = src.lines()
			.map(str::trim)
			.filter(|l| ! l.is_empty());

		if lines.next() != Some(MAGIC) { return Err(BlendError::Parse); }

		let name = lines.next()
			.and_then(|l| l.strip_prefix("Name:"))
			.ok_or(BlendError::Parse)?
			.trim();

		let count: usize = lines.next()
			.and_then(|l| l.parse().ok())
			.ok_or(BlendError::Parse)?;
		if count == 0 { return Err(BlendError::Count); }

		let mut segments = Vec::with_capacity(count.min(1024));
		for _ in 0..count {
			let line = lines.next().ok_or(BlendError::Parse)?;
			segments.push(parse_segment(line)?);
		}

		Self::from_segments(name, segments)
	}
}

/// ## Reading and Writing.
impl Gradient {
	/// # Load.
	///
	/// Read and parse a `.ggr` file.
	///
	/// ## Errors
	///
	/// Returns an error if the file cannot be read or is malformed.
	pub fn load<P>(path: P) -> Result<Self, BlendError>
	where P: AsRef<Path> {
		let raw = std::fs::read_to_string(path).map_err(|_| BlendError::Read)?;
		raw.parse()
	}

	/// # Save.
	///
	/// Write the gradient to `path` in `.ggr` format. The write is atomic; if
	/// it fails, nothing is left behind.
	///
	/// ## Errors
	///
	/// Returns an error if the file cannot be written.
	pub fn save<P>(&self, path: P) -> Result<(), BlendError>
	where P: AsRef<Path> {
		write_atomic::write_file(path.as_ref(), self.to_ggr().as_bytes())
			.map_err(|_| BlendError::Write)
	}

	#[must_use]
	/// # To `.ggr`.
	///
	/// Return the gradient as `.ggr` source.
	pub fn to_ggr(&self) -> String {
		let mut out = format!("{MAGIC}\nName: {}\n{}\n", self.name, self.segments.len());

		for seg in &self.segments {
			let _res = writeln!(
				&mut out,
				"{:.6} {:.6} {:.6} {} {} {} {} {}",
				seg.left,
				seg.middle,
				seg.right,
				GgrColor(seg.left_color),
				GgrColor(seg.right_color),
				u8::from(seg.blend_function),
				u8::from(seg.coloring),
				GgrTypes(seg.left_color_type, seg.right_color_type),
			);
		}

		out
	}

	#[must_use]
	/// # To POV-Ray Color Map.
	///
	/// Return the gradient as a POV-Ray `color_map` block. Each segment
	/// contributes its left, middle, and right points, with the middle color
	/// averaged from the ends. Alpha is expressed as transmittance.
	///
	/// This is export-only; there is no corresponding parser.
	pub fn to_pov(&self, context: &Context) -> String {
		let mut out = String::from("/* color_map file created by Blend */\ncolor_map {\n");

		for seg in &self.segments {
			let left = seg.left_color(context);
			let right = seg.right_color(context);
			let middle = left.lerp(right, 0.5);

			for (pos, color) in [(seg.left, left), (seg.middle, middle), (seg.right, right)] {
				let _res = writeln!(
					&mut out,
					"\t[{pos:.6} color rgbt <{:.6}, {:.6}, {:.6}, {:.6}>]",
					color.r,
					color.g,
					color.b,
					1.0 - color.a,
				);
			}
		}

		out.push_str("} /* color_map */\n");
		out
	}
}



/// # Color Formatter.
struct GgrColor(Color);

impl std::fmt::Display for GgrColor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:.6} {:.6} {:.6} {:.6}", self.0.r, self.0.g, self.0.b, self.0.a)
	}
}

/// # Color Type Formatter.
struct GgrTypes(ColorType, ColorType);

impl std::fmt::Display for GgrTypes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", u8::from(self.0), u8::from(self.1))
	}
}



/// # Parse Segment.
///
/// Parse one segment line: three positions, two RGBA colors, the blend
/// function and coloring, and (optionally) the two color types.
fn parse_segment(line: &str) -> Result<Segment, BlendError> {
	let mut parts = line.split_ascii_whitespace();

	let mut floats = [0.0_f64; 11];
	for v in &mut floats {
		*v = parts.next()
			.and_then(|p| p.parse::<f64>().ok())
			.filter(|p| p.is_finite())
			.ok_or(BlendError::Parse)?;
	}

	let blend_function = BlendFunction::try_from(parse_u8(parts.next())?)?;
	let coloring = Coloring::try_from(parse_u8(parts.next())?)?;

	let (left_color_type, right_color_type) = match parts.next() {
		Some(l) => (
			ColorType::try_from(parse_u8(Some(l))?)?,
			ColorType::try_from(parse_u8(parts.next())?)?,
		),
		None => (ColorType::Fixed, ColorType::Fixed),
	};

	if parts.next().is_some() { return Err(BlendError::Parse); }

	Ok(Segment {
		left: floats[0],
		middle: floats[1],
		right: floats[2],
		left_color: Color::new(floats[3], floats[4], floats[5], floats[6]),
		left_color_type,
		right_color: Color::new(floats[7], floats[8], floats[9], floats[10]),
		right_color_type,
		blend_function,
		coloring,
	})
}

/// # Parse `u8`.
fn parse_u8(src: Option<&str>) -> Result<u8, BlendError> {
	src.and_then(|s| s.parse::<u8>().ok()).ok_or(BlendError::Parse)
}
