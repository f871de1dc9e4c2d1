/*!
Shell-like argument splitting

Arguments are separated by blanks and can be quoted:

```text
foo bar "newlines are supported\n" and "\xff\x00otherstuff" 'single \'quoted\''
```

Inside double quotes, `\xHH` gives a raw byte and `\n`, `\r`, `\t`, `\b`, `\a` give their
usual control characters; any other escaped byte stands for itself.
Inside single quotes, `\'` is the only escape.
A closing quote must be followed by a blank or the end of input.

This is the inverse of [`Buffer::append_repr()`](crate::Buffer::append_repr).
*/

use log::debug;

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::split::reserve_slots;

/// Returns true if `c` is a hexadecimal digit, in either case
pub fn is_hex_digit(c: u8) -> bool {
	c.is_ascii_hexdigit()
}

/// Value of the hexadecimal digit `c`, or 0 if it's not one
pub fn hex_digit_to_int(c: u8) -> u8 {
	match c {
		b'0' ..= b'9' => c - b'0',
		b'a' ..= b'f' => c - b'a' + 10,
		b'A' ..= b'F' => c - b'A' + 10,
		_ => 0,
	}
}

// blanks skipped between arguments and allowed after a closing quote
fn is_space(c: u8) -> bool {
	match c {
		b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c => true,
		_ => false,
	}
}

fn unescape(c: u8) -> u8 {
	match c {
		b'n' => b'\n',
		b'r' => b'\r',
		b't' => b'\t',
		b'b' => 0x08,
		b'a' => 0x07,
		_ => c,
	}
}

#[derive(Clone, Copy)]
enum Quoting {
	None,
	// position of the opening quote
	Double(usize),
	Single(usize),
}

struct Args<'a> {
	line: &'a [u8],
	pos: usize,
}

impl<'a> Args<'a> {
	fn rest(&self) -> &'a [u8] {
		&self.line[ self.pos .. ]
	}

	// returns false once there's nothing left
	fn skip_blanks(&mut self) -> bool {
		while let Some(&c) = self.line.get(self.pos) {
			if !is_space(c) {
				return true;
			}
			self.pos += 1;
		}
		false
	}

	// consumes closing quote at the current position
	fn close_quote(&mut self) -> Result<()> {
		match self.line.get(self.pos + 1) {
			Some(&c) if !is_space(c) => Err(Error::TrailingAfterQuote(self.pos)),
			_ => {
				self.pos += 1;
				Ok(())
			},
		}
	}

	// parses one argument starting at a non-blank byte
	fn token(&mut self) -> Result<Buffer> {
		let mut current = Buffer::empty()?;
		let mut quoting = Quoting::None;
		loop {
			match quoting {
				Quoting::None => match self.rest() {
					[] | [b' ', ..] | [b'\n', ..] | [b'\r', ..] | [b'\t', ..] => return Ok(current),
					[b'"', ..] => {
						quoting = Quoting::Double(self.pos);
						self.pos += 1;
					},
					[b'\'', ..] => {
						quoting = Quoting::Single(self.pos);
						self.pos += 1;
					},
					[c, ..] => {
						current.append(&[*c])?;
						self.pos += 1;
					},
				},
				Quoting::Double(open) => match self.rest() {
					[b'\\', b'x', hi, lo, ..] if is_hex_digit(*hi) && is_hex_digit(*lo) => {
						current.append(&[hex_digit_to_int(*hi) * 16 + hex_digit_to_int(*lo)])?;
						self.pos += 4;
					},
					[b'\\', c, ..] => {
						current.append(&[unescape(*c)])?;
						self.pos += 2;
					},
					[b'"', ..] => {
						self.close_quote()?;
						return Ok(current);
					},
					[] => return Err(Error::UnterminatedQuote(open)),
					[c, ..] => {
						current.append(&[*c])?;
						self.pos += 1;
					},
				},
				Quoting::Single(open) => match self.rest() {
					[b'\\', b'\'', ..] => {
						current.append(b"'")?;
						self.pos += 2;
					},
					[b'\'', ..] => {
						self.close_quote()?;
						return Ok(current);
					},
					[] => return Err(Error::UnterminatedQuote(open)),
					[c, ..] => {
						current.append(&[*c])?;
						self.pos += 1;
					},
				},
			}
		}
	}
}

/**
Split `line` into arguments.

Returns every argument parsed, or no arguments at all for a blank `line`.
Unbalanced quotes and closing quotes followed by anything but a blank
(as in `"foo"bar` or `"foo'`) fail the whole line, dropping anything parsed so far.

```
use dynbuf::split_args;

let args = split_args(br#"set key "hello\x21\n" 'it\'s'"#).unwrap();
assert_eq!(args.len(), 4);
assert_eq!(&args[2][..], b"hello!\n");
assert_eq!(&args[3][..], b"it's");

assert!(split_args(br#""foo"bar"#).is_err());
```
*/
pub fn split_args(line: &[u8]) -> Result<Vec<Buffer>> {
	let mut args = Args { line, pos: 0 };
	let mut tokens = Vec::new();
	while args.skip_blanks() {
		let token = args.token().map_err(|e| {
			debug!("failed to split arguments after {} tokens: {}", tokens.len(), e);
			e
		})?;
		reserve_slots(&mut tokens)?;
		tokens.push(token);
	}
	Ok(tokens)
}
