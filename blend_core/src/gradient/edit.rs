/*!
# `Blend` - Gradient Editing
*/

use crate::{
	BlendError,
	BlendFunction,
	Color,
	ColorType,
	Coloring,
	Context,
	EPSILON,
	Gradient,
	Segment,
};
use std::ops::RangeInclusive;



/// ## Single Segments.
impl Gradient {
	/// # Set Left Position.
	///
	/// Move the segment's left edge (and its neighbor's right edge), keeping
	/// it between the neighbor's middle and its own. The first segment is
	/// always pinned to zero.
	///
	/// Returns the position actually applied.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_left_pos(&mut self, idx: usize, pos: f64) -> Result<f64, BlendError> {
		self.check_index(idx)?;
		if idx == 0 { return Ok(0.0); }

		let lo = self.segments[idx - 1].middle + EPSILON;
		let hi = self.segments[idx].middle - EPSILON;
		if hi < lo { return Ok(self.segments[idx].left); }

		let pos = pos.max(lo).min(hi);
		self.segments[idx].left = pos;
		self.segments[idx - 1].right = pos;
		self.commit();
		Ok(pos)
	}

	/// # Set Right Position.
	///
	/// Move the segment's right edge (and its neighbor's left edge), keeping
	/// it between its own middle and the neighbor's. The last segment is
	/// always pinned to one.
	///
	/// Returns the position actually applied.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_right_pos(&mut self, idx: usize, pos: f64) -> Result<f64, BlendError> {
		self.check_index(idx)?;
		if idx + 1 == self.segments.len() { return Ok(1.0); }

		let lo = self.segments[idx].middle + EPSILON;
		let hi = self.segments[idx + 1].middle - EPSILON;
		if hi < lo { return Ok(self.segments[idx].right); }

		let pos = pos.max(lo).min(hi);
		self.segments[idx].right = pos;
		self.segments[idx + 1].left = pos;
		self.commit();
		Ok(pos)
	}

	/// # Set Middle Position.
	///
	/// Move the segment's midpoint, keeping it strictly inside the segment.
	///
	/// Returns the position actually applied.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_middle_pos(&mut self, idx: usize, pos: f64) -> Result<f64, BlendError> {
		self.check_index(idx)?;

		let seg = &mut self.segments[idx];
		let lo = seg.left + EPSILON;
		let hi = seg.right - EPSILON;
		if hi < lo { return Ok(seg.middle); }

		let pos = pos.max(lo).min(hi);
		seg.middle = pos;
		self.commit();
		Ok(pos)
	}

	/// # Set Left Color.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_left_color(&mut self, idx: usize, color: Color) -> Result<(), BlendError> {
		self.check_index(idx)?;
		self.segments[idx].left_color = color;
		self.commit();
		Ok(())
	}

	/// # Set Right Color.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_right_color(&mut self, idx: usize, color: Color) -> Result<(), BlendError> {
		self.check_index(idx)?;
		self.segments[idx].right_color = color;
		self.commit();
		Ok(())
	}

	/// # Set Left Color Type.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_left_color_type(&mut self, idx: usize, kind: ColorType)
	-> Result<(), BlendError> {
		self.check_index(idx)?;
		self.segments[idx].left_color_type = kind;
		self.commit();
		Ok(())
	}

	/// # Set Right Color Type.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn set_right_color_type(&mut self, idx: usize, kind: ColorType)
	-> Result<(), BlendError> {
		self.check_index(idx)?;
		self.segments[idx].right_color_type = kind;
		self.commit();
		Ok(())
	}

	/// # Split at Midpoint.
	///
	/// Replace the segment with two, divided at its middle. The color at that
	/// point becomes the fixed color both halves share.
	///
	/// Returns the indices of the new pair.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range.
	pub fn split_midpoint(&mut self, idx: usize, context: &Context)
	-> Result<RangeInclusive<usize>, BlendError> {
		self.check_index(idx)?;
		self.split_midpoint_raw(idx, context);
		self.commit();
		log::trace!("Split segment {idx} at its midpoint.");
		Ok(idx..=idx + 1)
	}

	/// # Split Uniformly.
	///
	/// Replace the segment with `parts` equal-width segments, coloring the
	/// new boundaries from the original.
	///
	/// Returns the indices of the new segments.
	///
	/// ## Errors
	///
	/// Returns an error if the index is out of range or `parts` is zero.
	pub fn split_uniform(&mut self, idx: usize, parts: usize, context: &Context)
	-> Result<RangeInclusive<usize>, BlendError> {
		self.check_index(idx)?;
		if parts == 0 { return Err(BlendError::Count); }
		if parts == 1 { return Ok(idx..=idx); }

		self.split_uniform_raw(idx, parts, context);
		self.commit();
		log::trace!("Split segment {idx} into {parts} parts.");
		Ok(idx..=idx + parts - 1)
	}
}

/// ## Segment Ranges.
impl Gradient {
	/// # Set Blend Function.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn range_set_blend_function(
		&mut self,
		range: RangeInclusive<usize>,
		blend_function: BlendFunction,
	) -> Result<(), BlendError> {
		let (start, end) = self.check_range(&range)?;
		for seg in &mut self.segments[start..=end] { seg.blend_function = blend_function; }
		self.commit();
		Ok(())
	}

	/// # Set Coloring.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn range_set_coloring(&mut self, range: RangeInclusive<usize>, coloring: Coloring)
	-> Result<(), BlendError> {
		let (start, end) = self.check_range(&range)?;
		for seg in &mut self.segments[start..=end] { seg.coloring = coloring; }
		self.commit();
		Ok(())
	}

	/// # Blend Colors.
	///
	/// Recolor the range so its endpoints run linearly (by position) from
	/// `from` to `to`. Set `colors` to change the RGB channels, and `opacity`
	/// to change the alpha.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn range_blend(
		&mut self,
		range: RangeInclusive<usize>,
		from: Color,
		to: Color,
		colors: bool,
		opacity: bool,
	) -> Result<(), BlendError> {
		let (start, end) = self.check_range(&range)?;
		let left = self.segments[start].left;
		let len = self.segments[end].right - left;

		for seg in &mut self.segments[start..=end] {
			let (l, r) =
				if len > 0.0 {
					(
						from.lerp(to, (seg.left - left) / len),
						from.lerp(to, (seg.right - left) / len),
					)
				}
				else { (from, from) };

			if colors {
				seg.left_color = Color { a: seg.left_color.a, ..l };
				seg.right_color = Color { a: seg.right_color.a, ..r };
			}
			if opacity {
				seg.left_color.a = l.a;
				seg.right_color.a = r.a;
			}
		}

		self.commit();
		Ok(())
	}

	/// # Split Range at Midpoints.
	///
	/// Split every segment in the range in two.
	///
	/// Returns the range covering all the new segments.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn range_split_midpoint(&mut self, range: RangeInclusive<usize>, context: &Context)
	-> Result<RangeInclusive<usize>, BlendError> {
		let (start, end) = self.check_range(&range)?;

		// Working backwards keeps the pending indices stable.
		for idx in (start..=end).rev() { self.split_midpoint_raw(idx, context); }

		self.commit();
		log::trace!("Split segments {start}..={end} at their midpoints.");
		Ok(start..=start + (end - start + 1) * 2 - 1)
	}

	/// # Split Range Uniformly.
	///
	/// Split every segment in the range into `parts` equal pieces.
	///
	/// Returns the range covering all the new segments.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid or `parts` is zero.
	pub fn range_split_uniform(
		&mut self,
		range: RangeInclusive<usize>,
		parts: usize,
		context: &Context,
	) -> Result<RangeInclusive<usize>, BlendError> {
		let (start, end) = self.check_range(&range)?;
		if parts == 0 { return Err(BlendError::Count); }
		if parts == 1 { return Ok(start..=end); }

		for idx in (start..=end).rev() { self.split_uniform_raw(idx, parts, context); }

		self.commit();
		log::trace!("Split segments {start}..={end} into {parts} parts each.");
		Ok(start..=start + (end - start + 1) * parts - 1)
	}

	#[allow(clippy::cast_precision_loss)] // Counts are small.
	/// # Replicate.
	///
	/// Repeat the range `times` times within its original span, each copy
	/// scaled down to fit.
	///
	/// Returns the range covering all the copies.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid or `times` is zero.
	pub fn replicate(&mut self, range: RangeInclusive<usize>, times: usize)
	-> Result<RangeInclusive<usize>, BlendError> {
		let (start, end) = self.check_range(&range)?;
		if times == 0 { return Err(BlendError::Count); }
		if times == 1 { return Ok(start..=end); }

		let sel_left = self.segments[start].left;
		let sel_right = self.segments[end].right;
		let sel_len = sel_right - sel_left;
		let factor = 1.0 / times as f64;

		let src = &self.segments[start..=end];
		let mut out: Vec<Segment> = Vec::with_capacity(src.len() * times);
		for i in 0..times {
			let new_left = (i as f64 * factor).mul_add(sel_len, sel_left);
			for o in src {
				out.push(Segment {
					left: out.last().map_or(sel_left, |p| p.right),
					middle: factor.mul_add(o.middle - sel_left, new_left),
					right: factor.mul_add(o.right - sel_left, new_left),
					..*o
				});
			}
		}

		let len = out.len();
		if let Some(last) = out.last_mut() { last.right = sel_right; }
		self.segments.splice(start..=end, out);

		self.commit();
		log::trace!("Replicated segments {start}..={end} {times} times.");
		Ok(start..=start + len - 1)
	}

	/// # Flip.
	///
	/// Mirror the range in place: positions are reflected within the span,
	/// the order is reversed, and each segment's ends trade colors. The
	/// sphere functions and hue directions are swapped to match.
	///
	/// Flipping the same range twice restores the original.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn flip(&mut self, range: RangeInclusive<usize>)
	-> Result<RangeInclusive<usize>, BlendError> {
		let (start, end) = self.check_range(&range)?;
		let left = self.segments[start].left;
		let right = self.segments[end].right;
		let span = left + right;

		let mut out: Vec<Segment> = self.segments[start..=end].iter()
			.rev()
			.map(|o| Segment {
				left: span - o.right,
				middle: span - o.middle,
				right: span - o.left,
				left_color: o.right_color,
				left_color_type: o.right_color_type,
				right_color: o.left_color,
				right_color_type: o.left_color_type,
				blend_function: o.blend_function.flipped(),
				coloring: o.coloring.flipped(),
			})
			.collect();

		if let Some(first) = out.first_mut() { first.left = left; }
		if let Some(last) = out.last_mut() { last.right = right; }
		self.segments.splice(start..=end, out);

		self.commit();
		log::trace!("Flipped segments {start}..={end}.");
		Ok(start..=end)
	}

	/// # Delete.
	///
	/// Remove the range, stretching the neighbors to meet in the middle of
	/// the gap. If the range touches either end of the gradient, the
	/// remaining neighbor takes the whole gap.
	///
	/// Returns the index of the neighbor to select afterward.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid or covers every segment.
	pub fn delete(&mut self, range: RangeInclusive<usize>) -> Result<usize, BlendError> {
		let (start, end) = self.check_range(&range)?;
		let has_left = 0 < start;
		let has_right = end + 1 < self.segments.len();
		if ! has_left && ! has_right { return Err(BlendError::DeleteAll); }

		let join =
			if ! has_left { 0.0 }
			else if ! has_right { 1.0 }
			else { (self.segments[start].left + self.segments[end].right) / 2.0 };

		if has_left {
			let l = self.segments[start - 1].left;
			self.compress_raw(start - 1, start - 1, l, join);
		}
		if has_right {
			let r = self.segments[end + 1].right;
			self.compress_raw(end + 1, end + 1, join, r);
		}

		self.segments.drain(start..=end);
		self.commit();
		log::trace!("Deleted segments {start}..={end}.");

		Ok(if has_right { start } else { start - 1 })
	}

	/// # Compress.
	///
	/// Rescale the range into `new_left..=new_right`, keeping the relative
	/// spacing of its segments. The neighbors' shared edges follow along.
	///
	/// Edges at either end of the gradient stay put, and the others may not
	/// cross the neighboring midpoints; the bounds are clamped accordingly.
	///
	/// Returns the bounds actually applied.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid or the clamped bounds are
	/// empty.
	pub fn compress(
		&mut self,
		range: RangeInclusive<usize>,
		new_left: f64,
		new_right: f64,
	) -> Result<(f64, f64), BlendError> {
		let (start, end) = self.check_range(&range)?;
		if new_left.is_nan() || new_right.is_nan() { return Err(BlendError::Range); }

		let last = self.segments.len() - 1;
		let new_left =
			if start == 0 { 0.0 }
			else { new_left.max(self.segments[start - 1].middle + EPSILON) };
		let new_right =
			if end == last { 1.0 }
			else { new_right.min(self.segments[end + 1].middle - EPSILON) };
		if new_right <= new_left { return Err(BlendError::Range); }

		self.compress_raw(start, end, new_left, new_right);
		if start != 0 { self.segments[start - 1].right = new_left; }
		if end != last { self.segments[end + 1].left = new_right; }

		self.commit();
		Ok((new_left, new_right))
	}

	/// # Move.
	///
	/// Shift the range by `delta`. The movement is limited so the range
	/// cannot cross its neighbors' midpoints; in `compress` mode the limits
	/// are the neighbors' far edges instead, and the neighbors are squeezed
	/// to make room.
	///
	/// A range touching either end of the gradient keeps that edge pinned,
	/// moving only the middle.
	///
	/// Returns the delta actually applied.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid or `delta` is not a number.
	pub fn move_range(&mut self, range: RangeInclusive<usize>, delta: f64, compress: bool)
	-> Result<f64, BlendError> {
		let (start, end) = self.check_range(&range)?;
		if delta.is_nan() { return Err(BlendError::Range); }

		let last = self.segments.len() - 1;
		let is_first = start == 0;
		let is_last = end == last;

		let lbound =
			if is_first { self.segments[start].left + EPSILON }
			else if compress { 2.0_f64.mul_add(EPSILON, self.segments[start - 1].left) }
			else { self.segments[start - 1].middle + EPSILON };
		let rbound =
			if is_last { self.segments[end].right - EPSILON }
			else if compress { 2.0_f64.mul_add(-EPSILON, self.segments[end + 1].right) }
			else { self.segments[end + 1].middle - EPSILON };

		let mut delta = delta;
		if delta < 0.0 {
			let edge =
				if is_first { self.segments[start].middle }
				else { self.segments[start].left };
			if edge + delta < lbound { delta = (lbound - edge).min(0.0); }
		}
		else {
			let edge =
				if is_last { self.segments[end].middle }
				else { self.segments[end].right };
			if edge + delta > rbound { delta = (rbound - edge).max(0.0); }
		}

		for idx in start..=end {
			let seg = &mut self.segments[idx];
			if ! (is_first && idx == start) { seg.left += delta; }
			seg.middle += delta;
			if ! (is_last && idx == end) { seg.right += delta; }
		}

		if ! is_first {
			let edge = self.segments[start].left;
			if compress {
				let l = self.segments[start - 1].left;
				self.compress_raw(start - 1, start - 1, l, edge);
			}
			else { self.segments[start - 1].right = edge; }
		}

		if ! is_last {
			let edge = self.segments[end].right;
			if compress {
				let r = self.segments[end + 1].right;
				self.compress_raw(end + 1, end + 1, edge, r);
			}
			else { self.segments[end + 1].left = edge; }
		}

		self.commit();
		log::trace!("Moved segments {start}..={end} by {delta}.");
		Ok(delta)
	}

	/// # Recenter.
	///
	/// Put each segment's middle halfway between its edges.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn recenter(&mut self, range: RangeInclusive<usize>) -> Result<(), BlendError> {
		let (start, end) = self.check_range(&range)?;
		for seg in &mut self.segments[start..=end] { seg.recenter(); }
		self.commit();
		Ok(())
	}

	#[allow(clippy::cast_precision_loss)] // Counts are small.
	/// # Redistribute.
	///
	/// Resize the segments in the range so they all have the same width,
	/// recentering their middles too.
	///
	/// ## Errors
	///
	/// Returns an error if the range is invalid.
	pub fn redistribute(&mut self, range: RangeInclusive<usize>) -> Result<(), BlendError> {
		let (start, end) = self.check_range(&range)?;
		let left = self.segments[start].left;
		let right = self.segments[end].right;
		let len = (right - left) / (end - start + 1) as f64;

		for (i, seg) in self.segments[start..=end].iter_mut().enumerate() {
			seg.left = (i as f64).mul_add(len, left);
			seg.right = ((i + 1) as f64).mul_add(len, left);
			seg.recenter();
		}

		self.segments[start].left = left;
		self.segments[end].right = right;

		self.commit();
		Ok(())
	}
}

/// ## Internal.
impl Gradient {
	/// # Check Index.
	fn check_index(&self, idx: usize) -> Result<(), BlendError> {
		if idx < self.segments.len() { Ok(()) }
		else { Err(BlendError::Range) }
	}

	/// # Check Range.
	///
	/// Make sure the range is non-empty and in bounds, returning its start
	/// and end.
	fn check_range(&self, range: &RangeInclusive<usize>) -> Result<(usize, usize), BlendError> {
		let (start, end) = (*range.start(), *range.end());
		if start <= end && end < self.segments.len() { Ok((start, end)) }
		else { Err(BlendError::Range) }
	}

	/// # Compress (Unchecked).
	///
	/// Rescale `start..=end` into `new_left..=new_right`. Edges at the ends of
	/// the gradient are left alone, and the neighbors are not touched.
	fn compress_raw(&mut self, start: usize, end: usize, new_left: f64, new_right: f64) {
		let last = self.segments.len() - 1;
		let orig_left = self.segments[start].left;
		let orig_len = self.segments[end].right - orig_left;
		let scale =
			if orig_len > 0.0 { (new_right - new_left) / orig_len }
			else { 0.0 };

		for idx in start..=end {
			let seg = &mut self.segments[idx];
			if idx != 0 { seg.left = scale.mul_add(seg.left - orig_left, new_left); }
			seg.middle = scale.mul_add(seg.middle - orig_left, new_left);
			if idx != last { seg.right = scale.mul_add(seg.right - orig_left, new_left); }
		}

		if start != 0 { self.segments[start].left = new_left; }
		if end != last { self.segments[end].right = new_right; }
	}

	/// # Split at Midpoint (Unchecked).
	fn split_midpoint_raw(&mut self, idx: usize, context: &Context) {
		let seg = &mut self.segments[idx];
		let color = seg.color_at(seg.middle, context);

		let mut next = *seg;
		next.left = seg.middle;
		next.left_color = color;
		next.left_color_type = ColorType::Fixed;
		next.recenter();

		seg.right = next.left;
		seg.right_color = color;
		seg.right_color_type = ColorType::Fixed;
		seg.recenter();

		self.segments.insert(idx + 1, next);
	}

	#[allow(clippy::cast_precision_loss)] // Counts are small.
	/// # Split Uniformly (Unchecked).
	fn split_uniform_raw(&mut self, idx: usize, parts: usize, context: &Context) {
		let orig = self.segments[idx];
		let len = orig.width() / parts as f64;

		let mut out: Vec<Segment> = (0..parts)
			.map(|i| {
				let left = (i as f64).mul_add(len, orig.left);
				let right = ((i + 1) as f64).mul_add(len, orig.left);
				Segment {
					left,
					middle: (left + right) / 2.0,
					right,
					left_color: orig.color_at(left, context),
					left_color_type: ColorType::Fixed,
					right_color: orig.color_at(right, context),
					right_color_type: ColorType::Fixed,
					..orig
				}
			})
			.collect();

		if let Some(first) = out.first_mut() {
			first.left = orig.left;
			first.left_color = orig.left_color;
			first.left_color_type = orig.left_color_type;
		}
		if let Some(last) = out.last_mut() {
			last.right = orig.right;
			last.right_color = orig.right_color;
			last.right_color_type = orig.right_color_type;
		}

		self.segments.splice(idx..=idx, out);
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use super::super::tests::sample;

	fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

	#[test]
	fn t_split_midpoint() {
		let ctx = Context::default();
		let mut g = Gradient::standard();
		let expected = g.evaluate(0.5, false, None, &ctx).unwrap().0;

		assert_eq!(g.split_midpoint(0, &ctx), Ok(0..=1));
		assert!(g.is_valid());
		assert_eq!(g.segment_count(), 2);

		let (a, b) = (g.segments()[0], g.segments()[1]);
		assert!(close(a.width(), 0.5));
		assert!(close(b.width(), 0.5));
		assert!(close(a.middle, 0.25));
		assert!(close(b.middle, 0.75));
		assert_eq!(a.right_color, expected);
		assert_eq!(b.left_color, expected);
		assert_eq!(a.left_color, Color::BLACK);
		assert_eq!(b.right_color, Color::WHITE);

		assert_eq!(g.split_midpoint(2, &ctx), Err(BlendError::Range));
	}

	#[test]
	fn t_split_midpoint_context() {
		// Context colors stay symbolic on the outside, fixed in the middle.
		let ctx = Context::new(Color::new(1.0, 0.0, 0.0, 1.0), Color::new(0.0, 0.0, 1.0, 1.0));
		let mut g = Gradient::standard();
		g.set_left_color_type(0, ColorType::Foreground).unwrap();
		g.set_right_color_type(0, ColorType::Background).unwrap();
		g.split_midpoint(0, &ctx).unwrap();

		let (a, b) = (g.segments()[0], g.segments()[1]);
		assert_eq!(a.left_color_type, ColorType::Foreground);
		assert_eq!(a.right_color_type, ColorType::Fixed);
		assert_eq!(b.left_color_type, ColorType::Fixed);
		assert_eq!(b.right_color_type, ColorType::Background);
		assert_eq!(a.right_color, Color::new(0.5, 0.0, 0.5, 1.0));
	}

	#[test]
	fn t_split_uniform() {
		let ctx = Context::default();
		let orig = sample();
		let mut g = orig.clone();

		assert_eq!(g.split_uniform(1, 4, &ctx), Ok(1..=4));
		assert!(g.is_valid());
		assert_eq!(g.segment_count(), 6);

		// The colors along the old segment haven't changed at the seams.
		for seg in &g.segments()[1..=4] {
			let pos = seg.left;
			assert!(
				seg.left_color(&ctx).distance(orig.segments()[1].color_at(pos, &ctx)) < 1e-9
			);
		}
		assert_eq!(g.segments()[1].left, orig.segments()[1].left);
		assert_eq!(g.segments()[4].right, orig.segments()[1].right);
		assert_eq!(g.segments()[4].right_color, orig.segments()[1].right_color);

		assert_eq!(g.split_uniform(1, 0, &ctx), Err(BlendError::Count));
		assert_eq!(g.split_uniform(1, 1, &ctx), Ok(1..=1));
		assert_eq!(g.split_uniform(6, 2, &ctx), Err(BlendError::Range));
	}

	#[test]
	fn t_range_split() {
		let ctx = Context::default();
		let mut g = sample();
		assert_eq!(g.range_split_midpoint(0..=2, &ctx), Ok(0..=5));
		assert_eq!(g.segment_count(), 6);
		assert!(g.is_valid());

		assert_eq!(g.range_split_uniform(1..=2, 3, &ctx), Ok(1..=6));
		assert_eq!(g.segment_count(), 10);
		assert!(g.is_valid());

		assert_eq!(g.range_split_uniform(1..=2, 0, &ctx), Err(BlendError::Count));
	}

	#[test]
	fn t_replicate() {
		let mut g = Gradient::standard();
		assert_eq!(g.replicate(0..=0, 3), Ok(0..=2));
		assert!(g.is_valid());
		assert_eq!(g.segment_count(), 3);
		for seg in g.segments() {
			assert!(close(seg.width(), 1.0 / 3.0));
			assert_eq!(seg.left_color, Color::BLACK);
			assert_eq!(seg.right_color, Color::WHITE);
		}

		let mut g = sample();
		assert_eq!(g.replicate(1..=2, 2), Ok(1..=4));
		assert!(g.is_valid());
		assert_eq!(g.segments()[3].blend_function, g.segments()[1].blend_function);
		assert_eq!(g.segments()[4].coloring, Coloring::HsvCw);

		assert_eq!(g.replicate(1..=2, 1), Ok(1..=2));
		assert_eq!(g.replicate(1..=2, 0), Err(BlendError::Count));
	}

	#[test]
	fn t_flip() {
		let g = sample();
		let mut h = g.clone();
		assert_eq!(h.flip(0..=2), Ok(0..=2));
		assert!(h.is_valid());

		let (a, b) = (g.segments()[2], h.segments()[0]);
		assert_eq!(b.left_color, a.right_color);
		assert_eq!(b.left_color_type, a.right_color_type);
		assert_eq!(b.right_color, a.left_color);
		assert_eq!(b.coloring, Coloring::HsvCcw);
		assert_eq!(h.segments()[1].blend_function, BlendFunction::SphereDecreasing);

		// Flip it back.
		h.flip(0..=2).unwrap();
		for (a, b) in g.segments().iter().zip(h.segments()) {
			assert!(close(a.left, b.left));
			assert!(close(a.middle, b.middle));
			assert!(close(a.right, b.right));
			assert_eq!(a.left_color, b.left_color);
			assert_eq!(a.right_color, b.right_color);
			assert_eq!(a.left_color_type, b.left_color_type);
			assert_eq!(a.right_color_type, b.right_color_type);
			assert_eq!(a.blend_function, b.blend_function);
			assert_eq!(a.coloring, b.coloring);
		}
	}

	#[test]
	fn t_flip_exact() {
		// With binary-friendly positions, the round trip is exact.
		let ctx = Context::default();
		let mut g = Gradient::standard();
		g.split_uniform(0, 4, &ctx).unwrap();
		g.set_middle_pos(1, 0.3125).unwrap();
		g.range_set_coloring(2..=3, Coloring::HsvCcw).unwrap();
		let orig = g.clone();

		g.flip(1..=3).unwrap();
		assert_ne!(g.segments(), orig.segments());
		assert!(g.is_valid());
		g.flip(1..=3).unwrap();
		assert_eq!(g.segments(), orig.segments());
		assert_eq!(g.checksum(), orig.checksum());
	}

	#[test]
	fn t_delete() {
		let mut g = sample();
		assert_eq!(g.delete(1..=1), Ok(1));
		assert!(g.is_valid());
		assert_eq!(g.segment_count(), 2);
		assert!(close(g.segments()[0].right, 0.5));

		// The end segments hand their space to the neighbor.
		let mut g = sample();
		assert_eq!(g.delete(0..=0), Ok(0));
		assert!(g.is_valid());
		assert_eq!(g.segments()[0].left, 0.0);

		let mut g = sample();
		assert_eq!(g.delete(1..=2), Ok(0));
		assert!(g.is_valid());
		assert_eq!(g.segment_count(), 1);
		assert_eq!(g.segments()[0].right, 1.0);

		let mut g = sample();
		let rev = g.revision();
		assert_eq!(g.delete(0..=2), Err(BlendError::DeleteAll));
		assert_eq!(g.segment_count(), 3);
		assert_eq!(g.revision(), rev);
	}

	#[test]
	fn t_compress() {
		let mut g = sample();
		assert_eq!(g.compress(1..=1, 0.4, 0.6), Ok((0.4, 0.6)));
		assert!(g.is_valid());
		assert_eq!(g.segments()[0].right, 0.4);
		assert_eq!(g.segments()[2].left, 0.6);
		assert!(close(g.segments()[1].middle, 0.5));

		// Too far; the neighbors' middles stop it.
		let mut g = sample();
		let (l, r) = g.compress(1..=1, 0.0, 1.0).unwrap();
		assert!(close(l, g.segments()[0].middle));
		assert!(close(r, g.segments()[2].middle));
		assert!(g.is_valid());

		// The ends are pinned.
		let mut g = sample();
		let (l, r) = g.compress(0..=0, 0.3, 0.25).unwrap();
		assert_eq!(l, 0.0);
		assert_eq!(r, 0.25);
		assert!(g.is_valid());

		let mut g = sample();
		assert_eq!(g.compress(1..=1, 0.6, 0.4), Err(BlendError::Range));
		assert_eq!(g.compress(1..=1, f64::NAN, 0.4), Err(BlendError::Range));
	}

	#[test]
	fn t_move() {
		let third = 1.0 / 3.0;

		// Stopped by the next middle.
		let mut g = sample();
		let delta = g.move_range(1..=1, 0.5, false).unwrap();
		assert!(close(delta, 5.0 / 6.0 - 2.0 * third));
		assert!(g.is_valid());

		// Stopped by the next edge.
		let mut g = sample();
		let delta = g.move_range(1..=1, 0.5, true).unwrap();
		assert!(close(delta, third));
		assert!(g.is_valid());
		assert!(g.segments()[2].width() < 1e-9);

		// Stopped by the previous middle.
		let mut g = sample();
		let delta = g.move_range(1..=1, -1.0, false).unwrap();
		assert!(close(delta, 0.1 - third));
		assert!(g.is_valid());

		// The first segment only moves its middle.
		let mut g = sample();
		let delta = g.move_range(0..=0, -1.0, false).unwrap();
		assert!(close(delta, -0.1));
		assert_eq!(g.segments()[0].left, 0.0);
		assert!(g.is_valid());

		// Small moves just move.
		let mut g = sample();
		assert_eq!(g.move_range(1..=2, 0.01, true), Ok(0.01));
		assert!(g.is_valid());
		assert_eq!(g.segments()[2].right, 1.0);

		assert_eq!(g.move_range(1..=1, f64::NAN, true), Err(BlendError::Range));
	}

	#[test]
	fn t_recenter_redistribute() {
		let mut g = sample();
		g.recenter(0..=0).unwrap();
		assert!(close(g.segments()[0].middle, 1.0 / 6.0));

		let mut g = sample();
		g.compress(1..=1, 0.5, 0.6).unwrap();
		g.redistribute(0..=2).unwrap();
		assert!(g.is_valid());
		for seg in g.segments() {
			assert!(close(seg.width(), 1.0 / 3.0));
			assert!(close(seg.middle, (seg.left + seg.right) / 2.0));
		}
	}

	#[test]
	fn t_range_blend() {
		let red = Color::new(1.0, 0.0, 0.0, 0.0);
		let blue = Color::new(0.0, 0.0, 1.0, 1.0);

		let mut g = Gradient::standard();
		g.split_midpoint(0, &Context::default()).unwrap();
		g.range_blend(0..=1, red, blue, true, false).unwrap();

		let (a, b) = (g.segments()[0], g.segments()[1]);
		assert_eq!(a.left_color, Color::new(1.0, 0.0, 0.0, 1.0));
		assert_eq!(a.right_color, Color::new(0.5, 0.0, 0.5, 1.0));
		assert_eq!(b.right_color, Color::new(0.0, 0.0, 1.0, 1.0));

		g.range_blend(0..=1, red, blue, false, true).unwrap();
		assert_eq!(g.segments()[0].left_color, Color::new(1.0, 0.0, 0.0, 0.0));
		assert_eq!(g.segments()[1].left_color.a, 0.5);
	}

	#[test]
	fn t_positions() {
		let mut g = sample();
		assert_eq!(g.set_left_pos(0, 0.5), Ok(0.0));
		assert_eq!(g.set_right_pos(2, 0.5), Ok(1.0));

		let v = g.set_left_pos(1, 0.0).unwrap();
		assert!(close(v, 0.1));
		assert_eq!(g.segments()[0].right, v);

		let v = g.set_right_pos(1, 0.7).unwrap();
		assert_eq!(v, 0.7);
		assert_eq!(g.segments()[2].left, 0.7);

		let v = g.set_middle_pos(2, 5.0).unwrap();
		assert!(close(v, 1.0));
		assert!(v < 1.0);
		assert!(g.is_valid());

		assert_eq!(g.set_middle_pos(3, 0.5), Err(BlendError::Range));
	}

	#[test]
	fn t_invalid_ranges() {
		let mut g = sample();
		let rev = g.revision();
		let backwards = RangeInclusive::new(2, 1);

		assert_eq!(g.flip(backwards.clone()), Err(BlendError::Range));
		assert_eq!(g.recenter(backwards), Err(BlendError::Range));
		assert_eq!(g.flip(0..=3), Err(BlendError::Range));
		assert_eq!(g.replicate(3..=3, 2), Err(BlendError::Range));
		assert_eq!(g.delete(5..=6), Err(BlendError::Range));
		assert_eq!(g.revision(), rev);
	}

	#[test]
	fn t_chain_invariant() {
		let ctx = Context::default();
		let mut g = sample();
		let mut rev = g.revision();

		for i in 0..40_usize {
			let len = g.segment_count();
			let a = i % len;
			let b = (a + i % 3).min(len - 1);
			match i % 8 {
				0 => { g.split_midpoint(a, &ctx).unwrap(); },
				1 => { g.replicate(a..=b, 2).unwrap(); },
				2 => { g.flip(a..=b).unwrap(); },
				3 => if len > 4 { g.delete(a..=b).unwrap(); } else { g.split_uniform(a, 3, &ctx).unwrap(); },
				4 => { g.move_range(a..=b, 0.05, i % 16 < 8).unwrap(); },
				5 => { g.move_range(a..=b, -0.05, i % 16 >= 8).unwrap(); },
				6 => { let _ = g.compress(a..=b, 0.2, 0.8); },
				_ => { g.redistribute(a..=b).unwrap(); },
			}

			assert!(g.is_valid(), "Step {i}: {:?}", g.segments());
			assert!(g.revision() >= rev);
			rev = g.revision();
		}
	}
}
