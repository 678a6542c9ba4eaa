//! # File Helpers
//!
//! Small filesystem helpers for plugin settings that accept either inline
//! content or a path, and for scratch files handed to external tools.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Inputs at least this long are never treated as paths.
const MAX_PATH_LENGTH: usize = 248;

/// Return the contents of the file named by `input`, or `input` itself when no
/// such file exists.
///
/// The boolean is `true` when the value was read from a file.
pub fn read_string_or_file(input: &str) -> io::Result<(String, bool)> {
  if input.len() >= MAX_PATH_LENGTH {
    return Ok((input.to_string(), false));
  }

  match fs::metadata(input) {
    Ok(_) => Ok((fs::read_to_string(input)?, true)),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok((input.to_string(), false)),
    Err(err) => Err(err),
  }
}

/// Remove a directory and everything below it. Missing directories are not an
/// error.
pub fn delete_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
  match fs::remove_dir_all(path.as_ref()) {
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
    result => result,
  }
}

/// Whether `path` exists and is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> io::Result<bool> {
  match fs::metadata(path.as_ref()) {
    Ok(metadata) => Ok(metadata.is_dir()),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
    Err(err) => Err(err),
  }
}

/// Whether the directory at `path` has no entries. A missing directory is an
/// error.
pub fn is_dir_empty<P: AsRef<Path>>(path: P) -> io::Result<bool> {
  let mut entries = fs::read_dir(path.as_ref())?;
  Ok(entries.next().is_none())
}

/// Write `content` to a new file in the system temp directory and return its
/// path. The file name starts with `name` and is kept after returning.
pub fn write_tmp_file(name: &str, content: &str) -> io::Result<PathBuf> {
  let mut file = tempfile::Builder::new().prefix(name).tempfile()?;
  file.write_all(content.as_bytes())?;
  file.flush()?;

  let (_, path) = file.keep().map_err(|err| err.error)?;
  Ok(path)
}
