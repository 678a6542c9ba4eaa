//! # Plugin Core Library
//!
//! Building blocks shared by CI plugins: flag value types that can be bound to
//! environment variables, semver tag derivation for container images,
//! template rendering, and small file, process and slice helpers.

pub mod exec;
pub mod file;
pub mod flags;
pub mod slice;
pub mod tag;
pub mod template;
pub mod util;

// Re-export the types plugin authors reach for most often
pub use exec::{Cmd, ExecError};
pub use flags::{DeepStringMap, FlagError, Map, StringMap, StringSlice, StringSliceParser, parse_int};
pub use tag::{TagError, is_taggable, semver_tag_suffix, semver_tags};
pub use template::{TemplateError, add_prefix, render, render_trim, to_sentence};
