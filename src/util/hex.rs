const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Appends the lowercase-hex encoding of `bytes` to `out`, most significant nibble first
pub fn encode_into(bytes: &[u8], out: &mut String) {
	for byte in bytes {
		out.push(HEX_CHARS[(*byte >> 4) as usize] as char);
		out.push(HEX_CHARS[(*byte & 0x0F) as usize] as char);
	}
}

/// Value of a single hex digit, either case
pub fn val_of(c: u8) -> Option<u8> {
	match c {
		b'0'..=b'9' => Some(c - b'0'),
		b'a'..=b'f' => Some(c - b'a' + 10),
		b'A'..=b'F' => Some(c - b'A' + 10),
		_ => None,
	}
}

/// Decodes one two-digit pair into a byte, `None` if either digit isn't hex
pub fn decode_pair(pair: [u8; 2]) -> Option<u8> {
	Some((val_of(pair[0])? << 4) | val_of(pair[1])?)
}
