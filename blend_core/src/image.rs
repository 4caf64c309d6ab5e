/*!
# `Blend` - PNG
*/

use crate::{
	BlendError,
	Color,
};
use imgref::{
	ImgRef,
	ImgVec,
};
use rgb::{
	RGBA,
	RGBA8,
};
use std::path::Path;



/// # PNG Magic.
const MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];



/// # Load PNG.
///
/// Read and decode a PNG image as 8-bit RGBA, e.g. for use as a shapeburst
/// source.
///
/// ## Errors
///
/// Returns an error if the file cannot be read, or is not a valid PNG.
pub fn load_png<P>(path: P) -> Result<ImgVec<RGBA8>, BlendError>
where P: AsRef<Path> {
	let data = std::fs::read(path).map_err(|_| BlendError::Read)?;
	decode_png(&data)
}

/// # Decode PNG.
///
/// ## Errors
///
/// Returns an error if the data is not a valid PNG.
pub fn decode_png(data: &[u8]) -> Result<ImgVec<RGBA8>, BlendError> {
	if data.get(..4) != Some(&MAGIC[..]) { return Err(BlendError::Mask); }

	let img = lodepng::decode32(data).map_err(|_| BlendError::Mask)?;
	Ok(ImgVec::new(img.buffer, img.width, img.height))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Clamped.
#[must_use]
/// # Mask From Image.
///
/// Reduce an image to a single-channel selection mask using its luminance,
/// scaled by its alpha.
pub fn to_mask(img: ImgRef<'_, RGBA8>) -> ImgVec<u8> {
	let buf: Vec<u8> = img.pixels()
		.map(|p| {
			let luma = 0.0722_f64.mul_add(
				f64::from(p.b),
				0.2126_f64.mul_add(f64::from(p.r), 0.7152 * f64::from(p.g)),
			);
			(luma * f64::from(p.a) / 255.0).round().clamp(0.0, 255.0) as u8
		})
		.collect();

	ImgVec::new(buf, img.width(), img.height())
}

/// # Encode PNG.
///
/// Convert a rendered image to 8-bit RGBA and encode it as PNG. Channels
/// are clamped and rounded.
///
/// ## Errors
///
/// Returns an error if encoding fails.
pub fn encode_png(img: ImgRef<'_, RGBA<f32>>) -> Result<Vec<u8>, BlendError> {
	let buf: Vec<RGBA8> = img.pixels()
		.map(|p| RGBA8::from(Color::new(
			f64::from(p.r),
			f64::from(p.g),
			f64::from(p.b),
			f64::from(p.a),
		)))
		.collect();

	lodepng::encode32(&buf, img.width(), img.height())
		.map_err(|_| BlendError::Encode)
}

/// # Save PNG.
///
/// Encode and atomically write a rendered image to `path`.
///
/// ## Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_png<P>(path: P, img: ImgRef<'_, RGBA<f32>>) -> Result<(), BlendError>
where P: AsRef<Path> {
	let data = encode_png(img)?;
	write_atomic::write_file(path.as_ref(), &data).map_err(|_| BlendError::Write)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_png() {
		let raw = vec![
			RGBA::new(0.0_f32, 0.0, 0.0, 1.0),
			RGBA::new(1.0, 0.5, 0.25, 1.0),
			RGBA::new(2.0, -1.0, 0.5, 1.0),
			RGBA::new(1.0, 1.0, 1.0, 0.5),
		];
		let img = ImgVec::new(raw, 2, 2);

		let data = encode_png(img.as_ref()).expect("Encode failed.");
		assert!(data.starts_with(&MAGIC));

		let back = decode_png(&data).expect("Decode failed.");
		assert_eq!(back.width(), 2);
		assert_eq!(back.height(), 2);
		assert_eq!(
			back.buf(),
			&[
				RGBA8::new(0, 0, 0, 255),
				RGBA8::new(255, 128, 64, 255),
				RGBA8::new(255, 0, 128, 255),
				RGBA8::new(255, 255, 255, 128),
			],
		);

		assert_eq!(decode_png(b"GIF89a").unwrap_err(), BlendError::Mask);
		assert_eq!(decode_png(&data[..20]).unwrap_err(), BlendError::Mask);
	}

	#[test]
	fn t_save_load() {
		let tmp = tempfile::tempdir().expect("Tempdir failed.");
		let path = tmp.path().join("out.png");

		let img = ImgVec::new(vec![RGBA::new(0.5_f32, 0.5, 0.5, 1.0); 6], 3, 2);
		save_png(&path, img.as_ref()).expect("Save failed.");

		let back = load_png(&path).expect("Load failed.");
		assert_eq!(back.width(), 3);
		assert_eq!(back.height(), 2);
		assert!(back.pixels().all(|p| p == RGBA8::new(128, 128, 128, 255)));

		assert_eq!(
			load_png(tmp.path().join("missing.png")).unwrap_err(),
			BlendError::Read,
		);
		assert_eq!(save_png(tmp.path(), img.as_ref()).unwrap_err(), BlendError::Write);
	}

	#[test]
	fn t_mask() {
		let raw = [
			RGBA8::new(255, 255, 255, 255),
			RGBA8::new(0, 0, 0, 255),
			RGBA8::new(255, 255, 255, 0),
			RGBA8::new(100, 100, 100, 255),
		];
		let mask = to_mask(ImgRef::new(&raw, 4, 1));
		assert_eq!(mask.buf(), &[255_u8, 0, 0, 100]);
	}
}
