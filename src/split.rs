use memchr::{memchr_iter, memmem};
use log::debug;

use crate::buffer::Buffer;
use crate::error::{Error, Result};

const INITIAL_SLOTS: usize = 5;

/*
Make sure `tokens` can take two more elements, doubling its slots if it can't.

Shared by split() and split_args(): either one might still need room for a final token.
*/
pub(crate) fn reserve_slots(tokens: &mut Vec<Buffer>) -> Result<()> {
	let slots = tokens.capacity();
	if slots < tokens.len() + 2 {
		let slots = std::cmp::max(slots * 2, INITIAL_SLOTS);
		tokens.try_reserve_exact(slots - tokens.len())?;
	}
	Ok(())
}

/**
Split `s` on every occurrence of `sep`, which may be several bytes long.

Separators are never part of the output and never overlap each other,
and whatever follows the last one is always returned, even if empty.
Empty input gives no tokens at all.

```
use dynbuf::split;

let tokens = split(b"foo_-_bar", b"_-_").unwrap();
assert_eq!(tokens.len(), 2);
assert_eq!(&tokens[0][..], b"foo");
assert_eq!(&tokens[1][..], b"bar");
```

Fails on an empty separator, or if any allocation fails,
in which case tokens produced so far are dropped.
*/
pub fn split(s: &[u8], sep: &[u8]) -> Result<Vec<Buffer>> {
	match sep.len() {
		0 => {
			debug!("refusing to split {} bytes on an empty separator", s.len());
			Err(Error::EmptySeparator)
		},
		_ if s.is_empty() => Ok(Vec::new()),
		// fast path for the common case
		1 => cut(s, 1, memchr_iter(sep[0], s)),
		n => cut(s, n, memmem::find_iter(s, sep)),
	}
}

// `matches` must yield non-overlapping separator positions in increasing order
fn cut<I>(s: &[u8], seplen: usize, matches: I) -> Result<Vec<Buffer>>
where I: Iterator<Item = usize>
{
	let mut tokens = Vec::new();
	let mut start = 0;
	for pos in matches {
		reserve_slots(&mut tokens)?;
		tokens.push(Buffer::new(&s[ start .. pos ])?);
		start = pos + seplen;
	}
	// there's always room for the final element
	reserve_slots(&mut tokens)?;
	tokens.push(Buffer::new(&s[ start .. ])?);
	Ok(tokens)
}

/**
Concatenate `parts`, putting `sep` between each two of them.

```
use dynbuf::join;

let joined = join(&[&b"foo"[..], b"bar", b""], b", ").unwrap();
assert_eq!(&joined[..], b"foo, bar, ");
```
*/
pub fn join<T: AsRef<[u8]>>(parts: &[T], sep: &[u8]) -> Result<Buffer> {
	let total = parts.iter().map(|p| p.as_ref().len()).sum::<usize>()
		+ sep.len() * parts.len().saturating_sub(1);
	let mut joined = Buffer::empty()?;
	joined.reserve(total)?;
	for (i, part) in parts.iter().enumerate() {
		if i != 0 {
			joined.append(sep)?;
		}
		joined.append(part.as_ref())?;
	}
	Ok(joined)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contents(tokens: &[Buffer]) -> Vec<&[u8]> {
		tokens.iter().map(|t| t.filled()).collect()
	}

	#[test]
	fn single_byte() {
		let tokens = split(b"a,b,,c", b",").unwrap();
		assert_eq!(contents(&tokens), vec![&b"a"[..], b"b", b"", b"c"]);
	}

	#[test]
	fn multi_byte() {
		let tokens = split(b"foo_-_bar", b"_-_").unwrap();
		assert_eq!(contents(&tokens), vec![&b"foo"[..], b"bar"]);
	}

	#[test]
	fn trailing_separator() {
		let tokens = split(b"foo ", b" ").unwrap();
		assert_eq!(contents(&tokens), vec![&b"foo"[..], b""]);
		let tokens = split(b" ", b" ").unwrap();
		assert_eq!(contents(&tokens), vec![&b""[..], b""]);
	}

	#[test]
	fn no_separator() {
		let tokens = split(b"foobar", b"--").unwrap();
		assert_eq!(contents(&tokens), vec![&b"foobar"[..]]);
	}

	#[test]
	fn shorter_than_separator() {
		let tokens = split(b"a", b"abc").unwrap();
		assert_eq!(contents(&tokens), vec![&b"a"[..]]);
	}

	#[test]
	fn non_overlapping() {
		let tokens = split(b"aaaaa", b"aa").unwrap();
		assert_eq!(contents(&tokens), vec![&b""[..], b"", b"a"]);
	}

	#[test]
	fn binary() {
		let tokens = split(b"\0x\0\0y", b"\0").unwrap();
		assert_eq!(contents(&tokens), vec![&b""[..], b"x", b"", b"y"]);
	}

	#[test]
	fn empty_separator() {
		assert_eq!(split(b"foo", b""), Err(Error::EmptySeparator));
		assert_eq!(split(b"", b""), Err(Error::EmptySeparator));
	}

	#[test]
	fn empty_input() {
		assert!(split(b"", b",").unwrap().is_empty());
	}

	#[test]
	fn many_tokens() {
		let input = vec![b'x'; 1000];
		let tokens = split(&input, b"x").unwrap();
		assert_eq!(tokens.len(), 1001);
		assert!(tokens.iter().all(|t| t.is_empty()));
	}

	#[test]
	fn slots_grow_geometrically() {
		let mut tokens = Vec::new();
		reserve_slots(&mut tokens).unwrap();
		assert!(tokens.capacity() >= INITIAL_SLOTS);
		while tokens.capacity() >= tokens.len() + 2 {
			tokens.push(Buffer::empty().unwrap());
		}
		let slots = tokens.capacity();
		reserve_slots(&mut tokens).unwrap();
		assert!(tokens.capacity() >= tokens.len() + 2);
		assert!(tokens.capacity() >= slots * 2);
	}

	#[test]
	fn join_buffers() {
		let parts = split(b"a b c", b" ").unwrap();
		let joined = join(&parts, b"--").unwrap();
		assert_eq!(joined.filled_with_nul(), b"a--b--c\0");
	}

	#[test]
	fn join_nothing() {
		let parts: [&[u8]; 0] = [];
		assert!(join(&parts, b",").unwrap().is_empty());
	}
}
