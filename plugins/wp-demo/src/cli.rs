use clap::Args;
use clap::builder::FalseyValueParser;
use wp_plugin::headings;
use wp_plugin_core::{Map, StringSlice, StringSliceParser};

/// Settings of the demo plugin.
#[derive(Debug, Clone, Args)]
#[command(next_help_heading = headings::PLUGIN)]
pub struct Settings {
  /// summary template, inline text or an http(s):// or file:// URL
  #[arg(
    id = "template",
    long = "template",
    env = "PLUGIN_TEMPLATE",
    default_value = "{{ repository.slug | default(value=\"\") }}@{{ curr.sha }}"
  )]
  pub template: String,

  /// tags to publish
  #[arg(
    id = "tags",
    long = "tags",
    env = "PLUGIN_TAGS",
    value_name = "LIST",
    value_parser = StringSliceParser::default(),
    default_value = "latest"
  )]
  pub tags: StringSlice,

  /// derive tags from the commit ref
  #[arg(
    id = "auto-tag",
    long = "auto-tag",
    env = "PLUGIN_AUTO_TAG",
    action = clap::ArgAction::SetTrue,
    value_parser = FalseyValueParser::new()
  )]
  pub auto_tag: bool,

  /// suffix appended to derived tags
  #[arg(id = "auto-tag-suffix", long = "auto-tag-suffix", env = "PLUGIN_AUTO_TAG_SUFFIX", default_value = "")]
  pub auto_tag_suffix: String,

  /// reject versions that are not strict semver
  #[arg(
    id = "strict-semver",
    long = "strict-semver",
    env = "PLUGIN_STRICT_SEMVER",
    action = clap::ArgAction::SetTrue,
    value_parser = FalseyValueParser::new()
  )]
  pub strict_semver: bool,

  /// labels available to the template
  #[arg(id = "labels", long = "labels", env = "PLUGIN_LABELS", default_value = "")]
  pub labels: Map,

  /// command to run after rendering, program first
  #[arg(
    id = "command",
    long = "command",
    env = "PLUGIN_COMMAND",
    value_name = "LIST",
    value_parser = StringSliceParser::default(),
    default_value = ""
  )]
  pub command: StringSlice,
}
