/*!
# `Blend` - Error
*/

use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r"
   .-~~~~~~~~~~~~~~-.
  |░░░▒▒▒▒▓▓▓▓████|   ", "\x1b[38;5;199mBlend\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r#"
  |░░░▒▒▒▒▓▓▓▓████|   Render gradient blends to PNG.
   '-~~~~~~~~~~~~~~-'

USAGE:
    blend [FLAGS] [OPTIONS] -o <FILE>

FLAGS:
        --dither      Add a little noise to break up banding.
    -h, --help        Print help information and exit.
        --pov         Print the gradient as a POV-Ray color map and exit
                      instead of rendering anything.
        --reverse     Reverse the gradient direction.
        --supersample Use adaptive supersampling to smooth hard edges.
    -V, --version     Print version information and exit.

OPTIONS:
        --alpha <FILE>     Use this PNG's alpha channel as the shapeburst
                           source.
        --bg <HEX>         Background color, RRGGBB or RRGGBBAA.
                           [default: ffffff]
        --depth <NUM>      Maximum supersampling depth (1-9). [default: 3]
        --end <X,Y>        End point. [default: <WIDTH>,0]
        --fg <HEX>         Foreground color, RRGGBB or RRGGBBAA.
                           [default: 000000]
    -g, --gradient <FILE>  Load the gradient from this .ggr file instead of
                           using the standard black-to-white one.
        --height <NUM>     Output height. [default: 256]
        --mask <FILE>      Use this PNG (greyscale) as the shapeburst
                           selection mask.
        --mode <MODE>      One of fg-bg-rgb, fg-bg-hsv, fg-transparent, or
                           custom. [default: custom]
        --offset <NUM>     Offset (0-100). [default: 0]
    -o, --output <FILE>    Save the rendered PNG here.
        --repeat <REPEAT>  One of none, sawtooth, or triangular.
                           [default: none]
        --seed <NUM>       Dither seed, for reproducible noise.
        --shape <SHAPE>    One of linear, bilinear, radial, square,
                           conical-symmetric, conical-asymmetric,
                           shapeburst-angular, shapeburst-spherical,
                           shapeburst-dimpled, spiral-clockwise, or
                           spiral-anticlockwise. [default: linear]
        --start <X,Y>      Start point. [default: 0,0]
        --threshold <NUM>  Supersampling threshold. [default: 0.2]
        --width <NUM>      Output width. [default: 256]
"#);



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Errors.
pub enum BlendError {
	/// # Mismatched or unreadable burst source.
	Mask,

	/// # Cannot delete every segment.
	DeleteAll,

	/// # Invalid count.
	Count,

	/// # Image encoding failed.
	Encode,

	/// # Invalid gradient name.
	Name,

	/// # No segment covers a position.
	///
	/// This indicates a broken segment chain, i.e. a bug.
	NoSegment,

	/// # Image dimensions are out of range.
	Overflow,

	/// # Malformed gradient file.
	Parse,

	/// # Invalid segment range.
	Range,

	/// # I/O read error.
	Read,

	/// # I/O write error.
	Write,

	#[cfg(feature = "bin")]
	/// # Invalid CLI argument.
	Argument,

	#[cfg(feature = "bin")]
	/// # No output path.
	NoOutput,

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for BlendError {}

impl AsRef<str> for BlendError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for BlendError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl BlendError {
	#[must_use]
	/// # As Str.
	///
	/// Return the error as an English string slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Mask => "The shapeburst source does not match the render dimensions.",
			Self::DeleteAll => "A gradient must keep at least one segment.",
			Self::Count => "The count must be at least one.",
			Self::Encode => "The image could not be encoded.",
			Self::Name => "Gradient names cannot be empty.",
			Self::NoSegment => "No gradient segment covers the requested position.",
			Self::Overflow => "The image dimensions are out of range.",
			Self::Parse => "The gradient file is malformed.",
			Self::Range => "The segment range is out of bounds.",
			Self::Read => "Unable to read the file.",
			Self::Write => "Unable to save the file.",

			#[cfg(feature = "bin")]
			Self::Argument => "Invalid command line argument.",
			#[cfg(feature = "bin")]
			Self::NoOutput => "An output path (-o) is required.",
			#[cfg(feature = "bin")]
			Self::PrintHelp => HELP,
			#[cfg(feature = "bin")]
			Self::PrintVersion => concat!("Blend v", env!("CARGO_PKG_VERSION")),
		}
	}
}
