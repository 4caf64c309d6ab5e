/*!
# `Blend` - Utility
*/

use blend_core::Progress;
use dactyl::NiceElapsed;
use fyi_msg::Msg;
use std::{
	borrow::Cow,
	ffi::OsStr,
	path::Path,
	time::Duration,
};



#[derive(Debug, Default)]
/// # Status Logger.
///
/// Render progress is sent to the log: phase changes at `info`, and every
/// quarter at `debug`.
pub(super) struct Status {
	/// # Current Phase.
	phase: String,

	/// # Last Quarter Reported.
	quarter: u8,
}

impl Progress for Status {
	fn set_text(&mut self, text: &str) {
		log::info!("{text}…");
		text.clone_into(&mut self.phase);
		self.quarter = 0;
	}

	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Clamped.
	fn set_value(&mut self, value: f64) {
		let quarter = (value.clamp(0.0, 1.0) * 4.0).floor() as u8;
		if self.quarter < quarter {
			self.quarter = quarter;
			log::debug!("{}: {}%", self.phase, u16::from(quarter) * 25);
		}
	}
}



#[must_use]
/// # File Name.
///
/// This extracts the file name from a path. If for some reason it doesn't have
/// one, "?" is returned so that _something_ can be printed.
pub(super) fn file_name(path: &Path) -> Cow<'_, str> {
	path.file_name().map_or_else(|| Cow::Borrowed("?"), OsStr::to_string_lossy)
}

/// # Print Success.
pub(super) fn print_success(path: &Path, width: usize, height: usize, time: Duration) {
	Msg::success(format!(
		"Rendered \x1b[1m{}\x1b[0m ({width}x{height}).",
		file_name(path),
	))
		.with_suffix(format!(
			" \x1b[2m({}.)\x1b[0m",
			NiceElapsed::from(time).as_str(),
		))
		.print();
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_status() {
		let mut status = Status::default();
		status.set_text("Blending");
		assert_eq!(status.phase, "Blending");

		status.set_value(0.1);
		assert_eq!(status.quarter, 0);
		status.set_value(0.6);
		assert_eq!(status.quarter, 2);
		status.set_value(0.3);
		assert_eq!(status.quarter, 2);
		status.set_value(1.0);
		assert_eq!(status.quarter, 4);

		status.set_text("Again");
		assert_eq!(status.quarter, 0);
	}

	#[test]
	fn t_file_name() {
		assert_eq!(file_name(Path::new("/tmp/out.png")), "out.png");
		assert_eq!(file_name(Path::new("/")), "?");
	}
}
