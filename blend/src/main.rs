/*!
# `Blend`

Render a GIMP-style gradient blend to a PNG, or export a `.ggr` gradient as a
POV-Ray color map.
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



mod cli;
mod utility;

use blend_core::{
	BlendError,
	BurstSource,
	Gradient,
	image,
};
use cli::Settings;
use fyi_msg::Msg;
use std::{
	process::ExitCode,
	time::Instant,
};
use utility::Status;



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match _main() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (BlendError::PrintHelp | BlendError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			Msg::error(e.as_str()).eprint();
			ExitCode::FAILURE
		},
	}
}

#[inline]
/// # Actual Main.
fn _main() -> Result<(), BlendError> {
	init_logger();
	let settings = Settings::from_env()?;
	for (key, reason) in &settings.ignored {
		Msg::warning(format!("Ignoring {key}; {reason}.")).eprint();
	}

	let gradient = match settings.gradient.as_deref() {
		Some(path) => Gradient::load(path)?,
		None => Gradient::standard(),
	};

	// Export instead of render?
	if settings.pov {
		print!("{}", gradient.to_pov(&settings.context));
		return Ok(());
	}

	let output = settings.output.as_deref().ok_or(BlendError::NoOutput)?;
	let now = Instant::now();

	// Shapeburst sources.
	let mask = match settings.mask.as_deref() {
		Some(path) => Some(image::to_mask(image::load_png(path)?.as_ref())),
		None => None,
	};
	let alpha = match settings.alpha.as_deref() {
		Some(path) => Some(image::load_png(path)?),
		None => None,
	};
	let source = match (&mask, &alpha) {
		(Some(m), _) => BurstSource::Mask(m.as_ref()),
		(None, Some(a)) => BurstSource::Alpha(a.as_ref()),
		(None, None) => BurstSource::Solid,
	};

	let img = settings.blend.render(
		settings.width,
		settings.height,
		&gradient,
		&settings.context,
		source,
		&mut Status::default(),
	)?;
	image::save_png(output, img.as_ref())?;

	utility::print_success(output, settings.width, settings.height, now.elapsed());
	Ok(())
}

/// # Initialize Logger.
///
/// Warnings and errors are shown by default; `RUST_LOG` can ask for more.
fn init_logger() {
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Warn)
		.parse_default_env()
		.init();
}
