//! PostgreSQL BYTEA hex format: a `\x` marker followed by one lowercase hex pair per byte

use thiserror::Error;

use crate::util::hex;

/// The two-character `\x` prefix of BYTEA hex text
pub const MARKER: &str = "\\x";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
	#[error("invalid BYTEA encoding: `{}` at offset {offset} is not a hex pair", .pair.escape_ascii())]
	InvalidEncoding { offset: usize, pair: [u8; 2] },
}

/// Length of the hex text produced for `n` bytes
pub const fn encoded_len(n: usize) -> usize {
	MARKER.len() + 2 * n
}

/// Encodes `bytes` as BYTEA hex text. Empty input yields the bare marker.
pub fn encode(bytes: &[u8]) -> String {
	let mut result = String::with_capacity(encoded_len(bytes.len()));
	result.push_str(MARKER);
	hex::encode_into(bytes, &mut result);
	result
}

/// Decodes BYTEA hex text, with or without the leading marker.
///
/// Digits are read in pairs, either case. A trailing unpaired digit is dropped rather than
/// rejected, so `\x890` decodes to `[0x89]`. Any pair that isn't hex fails the whole decode.
pub fn decode<T: AsRef<[u8]>>(text: T) -> Result<Vec<u8>, Error> {
	let text = text.as_ref();
	let (skip, digits) = match text.strip_prefix(MARKER.as_bytes()) {
		Some(rest) => (MARKER.len(), rest),
		None => (0, text),
	};

	digits
		.chunks_exact(2)
		.enumerate()
		.map(|(i, pair)| {
			let pair = [pair[0], pair[1]];
			hex::decode_pair(pair).ok_or(Error::InvalidEncoding {
				offset: skip + 2 * i,
				pair,
			})
		})
		.collect()
}
