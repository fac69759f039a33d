//! Conversion between raw bytes and PostgreSQL BYTEA hex text (`\x89504e47...`), plus detection
//! of the image type held by a byte sequence.

pub mod codec;
pub mod config;
pub mod mime;
pub mod util;

pub use codec::{decode, encode, encoded_len, Error, MARKER};
pub use mime::{detect_type, ContentType};
