//! Image type detection from leading magic bytes

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
	Jpeg,
	Png,
	Gif,
	OctetStream,
}

impl ContentType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ContentType::Jpeg => "image/jpeg",
			ContentType::Png => "image/png",
			ContentType::Gif => "image/gif",
			ContentType::OctetStream => "application/octet-stream",
		}
	}

	/// File extension used when saving bytes of this type
	pub fn extension(&self) -> &'static str {
		match self {
			ContentType::Jpeg => "jpg",
			ContentType::Png => "png",
			ContentType::Gif => "gif",
			ContentType::OctetStream => "bin",
		}
	}

	pub fn is_image(&self) -> bool {
		!matches!(self, ContentType::OctetStream)
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// Checked in order, first match wins
const SIGNATURES: &[(&[u8], ContentType)] = &[
	(&[0xFF, 0xD8, 0xFF], ContentType::Jpeg),
	(&[0x89, 0x50, 0x4E, 0x47], ContentType::Png),
	(&[0x47, 0x49, 0x46], ContentType::Gif),
];

/// Longest prefix [`detect_type`] ever looks at
const SNIFF_LEN: usize = 4;

/// Guesses the content type of `bytes` from at most their first four bytes.
///
/// Input too short for a signature just doesn't match it, so this never fails.
pub fn detect_type(bytes: &[u8]) -> ContentType {
	let head = &bytes[..bytes.len().min(SNIFF_LEN)];
	SIGNATURES
		.iter()
		.find(|(magic, _)| head.starts_with(magic))
		.map_or(ContentType::OctetStream, |(_, content_type)| *content_type)
}
