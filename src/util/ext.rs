use std::{
	ffi::OsString,
	os::unix::prelude::{OsStrExt, OsStringExt},
	path::{Path, PathBuf},
};

pub trait PathExt {
	fn tilde_expand(&self) -> PathBuf;
	fn is_stdio(&self) -> bool;
}

impl PathExt for Path {
	fn tilde_expand(&self) -> PathBuf {
		OsString::from_vec(tilde_expand::tilde_expand(self.as_os_str().as_bytes())).into()
	}

	/// `-` stands for stdin or stdout, depending on direction
	fn is_stdio(&self) -> bool {
		self.as_os_str() == "-"
	}
}
