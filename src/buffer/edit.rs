// In-place edits: none of these relocate storage except `grow_zero()` and `copy_from()`,
// which go through `reserve()` and thus leave the buffer intact if they fail.

// https://github.com/rust-lang/rust/issues/54236
use copy_in_place::*;
use memchr::memchr;

use super::Buffer;
use crate::error::Result;

impl Buffer {
	/**
	Turn content into its `start..=end` subrange, shifting it to the front of the storage.

	Negative indices count from the end: -1 is the last byte, -2 the penultimate, and so on.
	Indices are clamped to the content, and a range that ends up empty
	(`start > end`, or starting past the end of content) leaves the buffer empty.
	Freed bytes become free space.

	```
	# use dynbuf::Buffer;
	let mut buf = Buffer::new(b"Hello World").unwrap();
	buf.range(1, -1);
	assert_eq!(&buf[..], b"ello World");
	```
	*/
	pub fn range(&mut self, start: isize, end: isize) {
		let len = self.len;
		if len == 0 {
			return;
		}
		let start = clamp_index(start, len);
		let end = clamp_index(end, len);
		/*
		before:
		|xxxyyyzz\0free|
		    |  |end
		    |start

		after:
		|yyy\0........|
		*/
		let newlen = if start > end || start >= len {
			0
		} else {
			// end is inclusive
			std::cmp::min(end, len - 1) - start + 1
		};
		if start != 0 && newlen != 0 {
			copy_in_place(&mut self.buf, start .. (start + newlen), 0);
		}
		self.set_len(newlen);
	}

	/**
	Strip the longest prefix and suffix made only of bytes found in `cset`.

	```
	# use dynbuf::Buffer;
	let mut buf = Buffer::new(b"AA...AA.a.aa.aHelloWorld     :::").unwrap();
	buf.trim(b"Aa. :");
	assert_eq!(&buf[..], b"HelloWorld");
	```
	*/
	pub fn trim(&mut self, cset: &[u8]) {
		let content = self.filled();
		let start = match content.iter().position(|c| !cset.contains(c)) {
			Some(start) => start,
			// nothing but trimmed bytes
			None => return self.clear(),
		};
		// there's at least one byte to keep, so rposition can't miss
		let end = content.iter().rposition(|c| !cset.contains(c)).unwrap_or(start);
		let newlen = end - start + 1;
		if start != 0 {
			copy_in_place(&mut self.buf, start .. (start + newlen), 0);
		}
		self.set_len(newlen);
	}

	/// Empty the buffer while keeping its storage as free space for later appends
	pub fn clear(&mut self) {
		self.set_len(0);
	}

	/// Extend content to `len` bytes, padding it with zeroes; does nothing if it's already that long
	pub fn grow_zero(&mut self, len: usize) -> Result<()> {
		let curlen = self.len;
		if len <= curlen {
			return Ok(());
		}
		self.reserve(len - curlen)?;
		// free space may still hold whatever range() or trim() left behind
		for b in &mut self.buf[ curlen .. len ] {
			*b = 0;
		}
		self.set_len(len);
		Ok(())
	}

	/// Replace content with a copy of `data`, reusing storage if it is large enough
	pub fn copy_from(&mut self, data: &[u8]) -> Result<()> {
		if self.buf.len() - 1 < data.len() {
			self.reserve(data.len() - self.len)?;
		}
		self.buf[ .. data.len() ].copy_from_slice(data);
		self.set_len(data.len());
		Ok(())
	}

	/**
	Substitute every occurrence of `from[i]` with `to[i]`.

	For instance, mapping `b"ho"` to `b"01"` turns `hello` into `0ell1`.

	# Panics

	If `from` and `to` differ in length.
	*/
	pub fn map_chars(&mut self, from: &[u8], to: &[u8]) {
		assert_eq!(from.len(), to.len(), "mapping sets differ in length");
		for c in self.filled_mut() {
			if let Some(i) = from.iter().position(|f| f == c) {
				*c = to[i];
			}
		}
	}

	/// Cut content at the first zero byte, if there is any
	pub fn update_len(&mut self) {
		if let Some(len) = memchr(0, self.filled()) {
			self.set_len(len);
		}
	}

	/// Reallocate storage so that there's no free space left
	pub fn remove_free_space(&mut self) {
		self.buf.truncate(self.len + 1);
		self.buf.shrink_to_fit();
	}
}

// negative indices count from the end, anything before the start is 0
fn clamp_index(index: isize, len: usize) -> usize {
	if index >= 0 {
		index as usize
	} else {
		len.saturating_sub(index.unsigned_abs())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranged(start: isize, end: isize) -> Buffer {
		let x = Buffer::new(b"ciao").unwrap();
		let mut y = x.dup().unwrap();
		y.range(start, end);
		y
	}

	#[test]
	fn range_one_one() {
		assert_eq!(ranged(1, 1).filled_with_nul(), b"i\0");
	}

	#[test]
	fn range_one_minus_one() {
		assert_eq!(ranged(1, -1).filled_with_nul(), b"iao\0");
	}

	#[test]
	fn range_minus_two_minus_one() {
		assert_eq!(ranged(-2, -1).filled_with_nul(), b"ao\0");
	}

	#[test]
	fn range_two_one() {
		let y = ranged(2, 1);
		assert_eq!(y.len(), 0);
		assert_eq!(y.filled_with_nul(), b"\0");
	}

	#[test]
	fn range_one_hundred() {
		assert_eq!(ranged(1, 100).filled_with_nul(), b"iao\0");
	}

	#[test]
	fn range_hundred_hundred() {
		assert_eq!(ranged(100, 100).filled_with_nul(), b"\0");
	}

	#[test]
	fn range_far_negative() {
		assert_eq!(ranged(-100, 1).filled_with_nul(), b"ci\0");
		assert_eq!(ranged(-100, -100).filled_with_nul(), b"c\0");
	}

	#[test]
	fn range_keeps_storage() {
		let mut buf = Buffer::new(b"ciao").unwrap();
		let size = buf.alloc_size();
		buf.range(1, 2);
		assert_eq!(buf.alloc_size(), size);
		assert_eq!(buf.avail(), 2);
	}

	#[test]
	fn range_empty() {
		let mut buf = Buffer::empty().unwrap();
		buf.range(0, -1);
		assert_eq!(buf.filled_with_nul(), b"\0");
	}

	#[test]
	fn trim() {
		let mut x = Buffer::new(b"xxciaoyy").unwrap();
		x.trim(b"xy");
		assert_eq!(x.len(), 4);
		assert_eq!(x.filled_with_nul(), b"ciao\0");
		assert_eq!(x.avail(), 4);
	}

	#[test]
	fn trim_single() {
		let mut x = Buffer::new(b"xxyyxx").unwrap();
		x.trim(b"x");
		assert_eq!(x.filled_with_nul(), b"yy\0");
	}

	#[test]
	fn trim_multiple() {
		let mut x = Buffer::new(b"xxyyz").unwrap();
		x.trim(b"xy");
		assert_eq!(x.filled_with_nul(), b"z\0");
	}

	#[test]
	fn trim_all() {
		let mut x = Buffer::new(b"xxxxxxxx").unwrap();
		x.trim(b"x");
		assert_eq!(x.filled_with_nul(), b"\0");
	}

	#[test]
	fn trim_nothing() {
		let mut x = Buffer::new(b"foo").unwrap();
		x.trim(b"x");
		assert_eq!(x.filled_with_nul(), b"foo\0");
	}

	#[test]
	fn clear_keeps_storage() {
		let mut buf = Buffer::new(b"foobar").unwrap();
		let size = buf.alloc_size();
		buf.clear();
		assert_eq!(buf.filled_with_nul(), b"\0");
		assert_eq!(buf.avail(), 6);
		buf.append(b"bazqux").unwrap();
		assert_eq!(buf.alloc_size(), size);
		assert_eq!(&buf[..], b"bazqux");
	}

	#[test]
	fn grow_zero() {
		let mut buf = Buffer::new(b"abcdef").unwrap();
		buf.range(0, 1);
		buf.grow_zero(4).unwrap();
		assert_eq!(buf.filled_with_nul(), b"ab\0\0\0");
		buf.grow_zero(2).unwrap();
		assert_eq!(buf.len(), 4);
		buf.grow_zero(10).unwrap();
		assert_eq!(&buf[..], b"ab\0\0\0\0\0\0\0\0");
	}

	#[test]
	fn copy_from_shorter() {
		let mut x = Buffer::new(b"foo").unwrap();
		x.copy_from(b"a").unwrap();
		assert_eq!(x.filled_with_nul(), b"a\0");
		assert_eq!(x.avail(), 2);
	}

	#[test]
	fn copy_from_longer() {
		let mut x = Buffer::new(&b"foo"[..2]).unwrap();
		x.copy_from(b"xxxxyyyyzzzz").unwrap();
		assert_eq!(x.len(), 12);
		assert_eq!(x.filled_with_nul(), b"xxxxyyyyzzzz\0");
	}

	#[test]
	fn map_chars() {
		let mut x = Buffer::new(b"hello").unwrap();
		x.map_chars(b"ho", b"01");
		assert_eq!(&x[..], b"0ell1");
	}

	#[test]
	fn ascii_case() {
		let mut x = Buffer::new(b"0FoO1bar\n").unwrap();
		x.make_ascii_lowercase();
		assert_eq!(x.filled_with_nul(), b"0foo1bar\n\0");
		x.make_ascii_uppercase();
		assert_eq!(x.filled_with_nul(), b"0FOO1BAR\n\0");
	}

	#[test]
	fn update_len() {
		let mut x = Buffer::new(b"foobar").unwrap();
		x[2] = 0;
		assert_eq!(x.len(), 6);
		x.update_len();
		assert_eq!(x.len(), 2);
		assert_eq!(x.avail(), 4);
		x.update_len();
		assert_eq!(x.len(), 2);
	}

	#[test]
	fn remove_free_space() {
		let mut x = Buffer::new(b"foo").unwrap();
		x.reserve(1000).unwrap();
		x.remove_free_space();
		assert_eq!(x.avail(), 0);
		assert_eq!(x.alloc_size(), 4);
		assert_eq!(x.filled_with_nul(), b"foo\0");
	}
}
