/*!
Binary-safe, length-tracked, growable byte buffer

## Example usage

```
use dynbuf::Buffer;
use std::io::Read;

# fn foo<R: Read>(mut input: R) -> Result<(), Box<dyn std::error::Error>> {
let mut buf = Buffer::new(b"header: ")?;

// regular copying append
buf.append(b"value")?;

// make sure at least 4 KiB can be written without reallocating
buf.reserve(4096)?;
// write data into free part of the buffer
let read = input.read(buf.appendable())?;
// commit actually written bytes, no copy involved
buf.mark_appended(read);

// borrow checker will prevent slices of `buf` from outliving
// the next call that might reallocate its storage
let head = &buf[..6];
assert_eq!(head, b"header");

# Ok(())
# }
```
*/

use std::cmp;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Deref, DerefMut};

use log::{debug, trace};

use crate::error::{Error, Result};

mod edit;
mod repr;

/// Growth threshold: below it storage doubles, above it storage grows by this much
pub const MAX_PREALLOC: usize = 1024 * 1024;

/**
Owned byte buffer that keeps track of its logical length and the free space past it.

Storage layout:
```text
|content.........|free.......|\0|
 0           len  len+avail    alloc_size()-1
```
The trailing zero byte is never counted in [`len()`](#method.len)
and is rewritten after every operation that moves the end of content.
Content itself may contain zero bytes.
*/
pub struct Buffer {
	buf: Vec<u8>,
	len: usize,
	max_prealloc: usize,
}

// zero-filled storage of exactly `size` bytes, or an error if the allocator refuses
fn storage(size: usize) -> Result<Vec<u8>> {
	let mut buf = Vec::new();
	buf.try_reserve_exact(size)?;
	buf.resize(size, 0);
	Ok(buf)
}

impl Buffer {
	/// Allocate a buffer holding a copy of `init`, without any free space
	pub fn new(init: &[u8]) -> Result<Self> {
		let mut buf = storage(init.len() + 1)?;
		buf[..init.len()].copy_from_slice(init);
		Ok(Buffer {
			buf,
			len: init.len(),
			max_prealloc: MAX_PREALLOC,
		})
	}

	/// Allocate a buffer of `len` zero bytes
	pub fn zeroed(len: usize) -> Result<Self> {
		Ok(Buffer {
			buf: storage(len.saturating_add(1))?,
			len,
			max_prealloc: MAX_PREALLOC,
		})
	}

	pub fn empty() -> Result<Self> {
		Self::zeroed(0)
	}

	/// Decimal representation of `value`
	pub fn from_i64(value: i64) -> Result<Self> {
		let mut digits = [0u8; 20];
		let mut pos = digits.len();
		let mut v = value.unsigned_abs();
		loop {
			pos -= 1;
			digits[pos] = b'0' + (v % 10) as u8;
			v /= 10;
			if v == 0 { break }
		}
		if value < 0 {
			pos -= 1;
			digits[pos] = b'-';
		}
		Self::new(&digits[pos..])
	}

	/// Fallible counterpart of `clone()`
	pub fn dup(&self) -> Result<Self> {
		let mut dup = Self::new(self.filled())?;
		dup.max_prealloc = self.max_prealloc;
		Ok(dup)
	}

	/// Number of bytes of content
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of bytes that can be appended without reallocating
	pub fn avail(&self) -> usize {
		self.buf.len() - 1 - self.len
	}

	/// Total size of storage: content, free space and terminator
	pub fn alloc_size(&self) -> usize {
		self.buf.len()
	}

	/// Return content part of the buffer
	pub fn filled(&self) -> &[u8] {
		&self.buf[ .. self.len ]
	}

	pub fn filled_mut(&mut self) -> &mut [u8] {
		&mut self.buf[ .. self.len ]
	}

	/// Content followed by the terminating zero byte
	pub fn filled_with_nul(&self) -> &[u8] {
		&self.buf[ ..= self.len ]
	}

	/**
	Free part of the buffer right after the content, terminator excluded.

	Use [`mark_appended()`](#method.mark_appended) to turn bytes written here into content.
	*/
	pub fn appendable(&mut self) -> &mut [u8] {
		let end = self.buf.len() - 1;
		&mut self.buf[ self.len .. end ]
	}

	/**
	Attach `amount` bytes of [`appendable()`](#method.appendable) to the content.

	# Panics

	If `amount` exceeds [`avail()`](#method.avail).
	*/
	pub fn mark_appended(&mut self, amount: usize) {
		assert!(
			amount <= self.avail(),
			"committing {} bytes with only {} bytes of free space", amount, self.avail(),
		);
		self.set_len(self.len + amount);
	}

	/**
	Make sure at least `additional` bytes can be appended without reallocating.

	Does nothing if there's already enough free space.
	Otherwise storage is sized for twice the required length,
	or for the required length plus the growth threshold once that gets large.
	Content is preserved; on failure the buffer is left as it was.
	*/
	pub fn reserve(&mut self, additional: usize) -> Result<()> {
		if self.avail() >= additional {
			return Ok(());
		}
		// saturating math lets try_reserve report the overflow for us
		let target = self.len.saturating_add(additional);
		let target = if target < self.max_prealloc {
			target.saturating_mul(2)
		} else {
			target.saturating_add(self.max_prealloc)
		};
		let size = target.saturating_add(1);

		trace!("growing buffer storage from {} to {} bytes", self.buf.len(), size);
		if let Err(e) = self.buf.try_reserve_exact(size - self.buf.len()) {
			debug!("failed to grow buffer storage to {} bytes: {}", size, e);
			return Err(e.into());
		}
		self.buf.resize(size, 0);
		Ok(())
	}

	/// Append a copy of `data` to the content
	pub fn append(&mut self, data: &[u8]) -> Result<()> {
		self.reserve(data.len())?;
		let len = self.len;
		self.buf[ len .. (len + data.len()) ].copy_from_slice(data);
		self.set_len(len + data.len());
		Ok(())
	}

	// all changes of `len` go through here to keep the terminator in place
	fn set_len(&mut self, len: usize) {
		debug_assert!(len < self.buf.len());
		self.len = len;
		self.buf[len] = 0;
	}
}

impl Clone for Buffer {
	fn clone(&self) -> Self {
		Buffer {
			buf: self.filled_with_nul().to_vec(),
			len: self.len,
			max_prealloc: self.max_prealloc,
		}
	}
}

impl Deref for Buffer {
	type Target = [u8];
	fn deref(&self) -> &[u8] {
		self.filled()
	}
}

impl DerefMut for Buffer {
	fn deref_mut(&mut self) -> &mut [u8] {
		self.filled_mut()
	}
}

impl AsRef<[u8]> for Buffer {
	fn as_ref(&self) -> &[u8] {
		self.filled()
	}
}

impl TryFrom<&[u8]> for Buffer {
	type Error = Error;
	fn try_from(init: &[u8]) -> Result<Self> {
		Self::new(init)
	}
}

impl TryFrom<&str> for Buffer {
	type Error = Error;
	fn try_from(init: &str) -> Result<Self> {
		Self::new(init.as_bytes())
	}
}

// equality and ordering only look at content, never at free space
impl PartialEq for Buffer {
	fn eq(&self, other: &Self) -> bool {
		self.filled() == other.filled()
	}
}
impl Eq for Buffer {}

impl PartialEq<[u8]> for Buffer {
	fn eq(&self, other: &[u8]) -> bool {
		self.filled() == other
	}
}

impl<'a> PartialEq<&'a [u8]> for Buffer {
	fn eq(&self, other: &&'a [u8]) -> bool {
		self.filled() == *other
	}
}

impl PartialOrd for Buffer {
	fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
		Some(self.cmp(other))
	}
}

/// Bytewise comparison, with a shorter buffer ordered before a longer one sharing its prefix
impl Ord for Buffer {
	fn cmp(&self, other: &Self) -> cmp::Ordering {
		self.filled().cmp(other.filled())
	}
}

impl fmt::Debug for Buffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Buffer(")?;
		repr::write_repr(f, self.filled())?;
		f.write_str(")")
	}
}

/**
Configures initial free space and growth threshold before allocating a [`Buffer`]

```
use dynbuf::BufferBuilder;

let buf = BufferBuilder::new()
	.capacity(64)
	.max_prealloc(4096)
	.build()
	.unwrap();
assert_eq!(buf.len(), 0);
assert_eq!(buf.avail(), 64);
```
*/
pub struct BufferBuilder {
	capacity: usize,
	max_prealloc: usize,
}

impl BufferBuilder {
	pub fn new() -> Self {
		BufferBuilder {
			capacity: 0,
			max_prealloc: MAX_PREALLOC,
		}
	}

	/// Free space available right after allocation
	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	/// Growth threshold used by [`Buffer::reserve()`]
	pub fn max_prealloc(mut self, max_prealloc: usize) -> Self {
		if max_prealloc == 0 {
			panic!("non-positive growth threshold requested")
		}
		self.max_prealloc = max_prealloc;
		self
	}

	pub fn build(self) -> Result<Buffer> {
		Ok(Buffer {
			buf: storage(self.capacity.saturating_add(1))?,
			len: 0,
			max_prealloc: self.max_prealloc,
		})
	}
}

impl Default for BufferBuilder {
	fn default() -> Self {
		Self::new()
	}
}
