/*!
Binary-safe, growable byte buffers, plus a couple of ways to chop input into them.

[`Buffer`] owns its storage and tracks both the length of its content and the free space past it,
so appends are amortized O(1) and data can be written straight into the free part of the buffer
before being committed with [`mark_appended()`](Buffer::mark_appended).
Content is always followed by an uncounted zero byte.

[`split()`] cuts a byte string on a fixed (possibly multi-byte) separator,
while [`split_args()`] parses a shell-like line with quoted and escaped arguments,
the same syntax [`Buffer::append_repr()`] produces.

```
use dynbuf::{Buffer, split_args};

let mut line = Buffer::new(b"GET ").unwrap();
line.append_repr(b"weird\x00key\n").unwrap();

let args = split_args(&line).unwrap();
assert_eq!(args.len(), 2);
assert_eq!(&args[1][..], b"weird\x00key\n");
```

Every operation that may allocate returns a [`Result`]; on failure the buffer it was called on
keeps its previous content.
*/

mod buffer;
pub use buffer::*;

mod error;
pub use error::{Error, Result};

mod split;
pub use split::{split, join};

mod args;
pub use args::{split_args, is_hex_digit, hex_digit_to_int};
