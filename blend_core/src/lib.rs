/*!
# `Blend` - Library

This crate holds the gradient model and the blend renderer behind the
`blend` command line tool.

A [`Gradient`] is a contiguous run of [`Segment`]s covering `0.0..=1.0`, each
with its own endpoint colors, midpoint, easing, and color interpolation.
Gradients can be edited in place, read from and written to `.ggr` files, or
exported as POV-Ray color maps.

A [`Blend`] paints a gradient (or a simple foreground/background ramp) into
an image using one of eleven shapes, with optional repetition, dithering, and
adaptive supersampling.
*/

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]



mod color;
mod context;
mod error;
mod gradient;
pub mod image;
mod render;
mod traits;

pub use color::{
	Color,
	hsv::Hsv,
	kind::ColorType,
};
pub use context::Context;
pub use error::BlendError;
pub use gradient::{
	Gradient,
	segment::{
		BlendFunction,
		Coloring,
		EPSILON,
		Segment,
	},
};
pub use render::{
	Blend,
	kind::{
		BlendMode,
		GradientShape,
		RepeatMode,
	},
	shapeburst::BurstSource,
};
pub use traits::Progress;
