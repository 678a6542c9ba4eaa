//! Print the markdown reference for wp-demo.

use std::io::{self, Write};

use anyhow::Result;

fn main() -> Result<()> {
  let markdown = wp_plugin_docs::to_markdown(&wp_demo::plugin().command())?;
  io::stdout().write_all(markdown.as_bytes())?;
  Ok(())
}
