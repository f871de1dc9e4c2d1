// Printable forms of a buffer: formatted append and the quoted escape syntax
// understood by `split_args()`.

use std::fmt::{self, Write};

use super::Buffer;
use crate::error::{Error, Result};

/*
Escape a single byte, returning its escaped form in `out[..n]`.

Printable ASCII stays as is, except for `\` and `"`.
Control characters with a one-letter escape use it, the rest become `\xHH`.
*/
fn escape(c: u8, out: &mut [u8; 4]) -> usize {
	const HEX: &[u8; 16] = b"0123456789abcdef";
	let short = match c {
		b'\\' | b'"' => c,
		b'\n' => b'n',
		b'\r' => b'r',
		b'\t' => b't',
		0x07 => b'a',
		0x08 => b'b',
		0x20 ..= 0x7e => {
			out[0] = c;
			return 1;
		},
		_ => {
			*out = [b'\\', b'x', HEX[(c >> 4) as usize], HEX[(c & 0xf) as usize]];
			return 4;
		},
	};
	out[0] = b'\\';
	out[1] = short;
	2
}

pub(super) fn write_repr(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
	let mut out = [0u8; 4];
	f.write_char('"')?;
	for &c in data {
		let n = escape(c, &mut out);
		for &e in &out[..n] {
			f.write_char(e as char)?;
		}
	}
	f.write_char('"')
}

impl Buffer {
	/**
	Append `data` as a double-quoted string where all the special and non-printable bytes are escaped.

	The result can be parsed back into the original bytes with [`split_args()`](crate::split_args).

	```
	# use dynbuf::Buffer;
	let mut buf = Buffer::empty().unwrap();
	buf.append_repr(b"\x07\n\0foo\r").unwrap();
	assert_eq!(&buf[..], br#""\a\n\x00foo\r""#);
	```
	*/
	pub fn append_repr(&mut self, data: &[u8]) -> Result<()> {
		let start = self.len;
		let res = self.append_repr_inner(data);
		if res.is_err() {
			self.set_len(start);
		}
		res
	}

	fn append_repr_inner(&mut self, data: &[u8]) -> Result<()> {
		// most bytes escape to themselves, so this is usually the only reallocation
		self.reserve(data.len() + 2)?;
		let mut out = [0u8; 4];
		self.append(b"\"")?;
		for &c in data {
			let n = escape(c, &mut out);
			self.append(&out[..n])?;
		}
		self.append(b"\"")
	}

	/**
	Append formatted text.

	```
	# use dynbuf::Buffer;
	let mut buf = Buffer::new(b"Sum is: ").unwrap();
	buf.append_fmt(format_args!("{} + {} = {}", 1, 2, 1 + 2)).unwrap();
	assert_eq!(&buf[..], b"Sum is: 1 + 2 = 3");
	```

	On failure, content is left as it was before the call.
	*/
	pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
		// keeps the actual allocation error that fmt::Error can't carry
		struct Adapter<'a> {
			buf: &'a mut Buffer,
			error: Option<Error>,
		}
		impl Write for Adapter<'_> {
			fn write_str(&mut self, s: &str) -> fmt::Result {
				let error = &mut self.error;
				self.buf.append(s.as_bytes()).map_err(|e| {
					*error = Some(e);
					fmt::Error
				})
			}
		}

		let start = self.len;
		let mut adapter = Adapter { buf: &mut *self, error: None };
		match fmt::write(&mut adapter, args) {
			Ok(()) => Ok(()),
			Err(e) => {
				let error = adapter.error.take().unwrap_or(Error::Fmt(e));
				self.set_len(start);
				Err(error)
			},
		}
	}
}

impl Write for Buffer {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.append(s.as_bytes()).map_err(|_| fmt::Error)
	}
}
