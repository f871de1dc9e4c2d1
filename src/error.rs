use std::collections::TryReserveError;
use std::fmt;

use quick_error::quick_error;

quick_error! {
	/// Everything that can go wrong while building or editing a [`Buffer`](crate::Buffer)
	#[derive(Debug, Clone, PartialEq, Eq)]
	pub enum Error {
		/// Storage could not be (re)allocated; the buffer passed in is left intact
		Alloc(err: TryReserveError) {
			from()
			display("failed to allocate buffer storage: {}", err)
			cause(err)
		}
		/// A formatting trait implementation reported an error
		Fmt(err: fmt::Error) {
			from()
			display("formatting failed")
		}
		EmptySeparator {
			display("separator must not be empty")
		}
		/// Input ended inside a quoted argument opened at byte `pos`
		UnterminatedQuote(pos: usize) {
			display("unterminated quote opened at byte {}", pos)
		}
		/// Closing quote at byte `pos` is immediately followed by something other than a blank
		TrailingAfterQuote(pos: usize) {
			display("closing quote at byte {} must be followed by a blank or end of input", pos)
		}
	}
}

impl Error {
	/// True for errors caused by the input itself rather than by the allocator
	pub fn is_malformed(&self) -> bool {
		match self {
			Error::EmptySeparator
			| Error::UnterminatedQuote(_)
			| Error::TrailingAfterQuote(_) => true,
			Error::Alloc(_) | Error::Fmt(_) => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
