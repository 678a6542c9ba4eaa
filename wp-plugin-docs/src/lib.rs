//! # Plugin Documentation
//!
//! Generates markdown reference documentation from a plugin's clap
//! [`Command`]: a synopsis, every visible option, sub-commands, and a table of
//! the `PLUGIN_*` settings users put in their pipeline configuration.

use clap::{Arg, ArgAction, Command};
use serde::Serialize;
use thiserror::Error;
use wp_plugin_core::StringSlice;
use wp_plugin_core::template::load_tera;

const MARKDOWN_TEMPLATE: &str = include_str!("../templates/markdown.md.tera");
const MARKDOWN_TEMPLATE_NAME: &str = "markdown.md";

/// Prefix of the environment variables documented as plugin settings.
pub const PLUGIN_ENV_PREFIX: &str = "PLUGIN_";

#[derive(Debug, Error)]
pub enum DocsError {
  #[error("failed to render markdown: {0}")]
  Render(#[from] tera::Error),
}

/// Data handed to the markdown template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliTemplate {
  pub name: String,
  pub description: String,
  pub usage: String,
  pub usage_text: String,
  pub synopsis_args: Vec<String>,
  pub global_flags: Vec<String>,
  pub global_args: Vec<PluginArg>,
  pub commands: Vec<String>,
}

/// A setting configurable through a `PLUGIN_*` environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginArg {
  /// Variable name without the prefix, lower-cased
  pub name: String,
  pub description: String,
  pub default: String,
  /// `bool`, `list`, `number` or `string`
  #[serde(rename = "type")]
  pub type_: String,
  pub required: bool,
}

/// Render the markdown documentation for `command`.
pub fn to_markdown(command: &Command) -> Result<String, DocsError> {
  let mut tera = load_tera();
  tera.add_raw_template(MARKDOWN_TEMPLATE_NAME, MARKDOWN_TEMPLATE)?;

  let context = tera::Context::from_serialize(get_template_data(command))?;
  Ok(tera.render(MARKDOWN_TEMPLATE_NAME, &context)?)
}

pub fn get_template_data(command: &Command) -> CliTemplate {
  let about = styled_to_string(command.get_about());
  let description = command
    .get_long_about()
    .map(ToString::to_string)
    .unwrap_or_else(|| about.clone());
  let flags = visible_flags(command);

  CliTemplate {
    name: command.get_name().to_string(),
    description: prepare_multiline_string(&description),
    usage: prepare_multiline_string(&about),
    usage_text: styled_to_string(command.get_after_help()),
    synopsis_args: prepare_args_synopsis(&flags),
    global_flags: prepare_args_with_values(&flags),
    global_args: prepare_plugin_args(&flags),
    commands: prepare_commands(command, 0),
  }
}

/// Collapse `s` onto one line and drop trailing punctuation and whitespace.
///
/// ```
/// use wp_plugin_docs::prepare_multiline_string;
///
/// assert_eq!(prepare_multiline_string("Deploys the\nsite.\n"), "Deploys the site");
/// ```
pub fn prepare_multiline_string(s: &str) -> String {
  s.replace('\n', " ")
    .trim()
    .trim_end_matches(['.', '\r', '\n', '\t'])
    .to_string()
}

/// Headings, usage and options for every visible sub-command of `command`,
/// depth first. `level` 0 renders `##` headings.
pub fn prepare_commands(command: &Command, level: usize) -> Vec<String> {
  let mut commands = Vec::new();

  for sub in command.get_subcommands().filter(|sub| !sub.is_hide_set()) {
    let usage_text = prepare_usage_text(sub);
    let usage = prepare_usage(sub, &usage_text);

    let mut names = vec![sub.get_name()];
    names.extend(sub.get_visible_aliases());

    let mut prepared = format!(
      "{} {}\n\n{}{}",
      "#".repeat(level + 2),
      names.join(", "),
      usage,
      usage_text
    );

    let flags = prepare_args_with_values(&visible_flags(sub));
    if !flags.is_empty() {
      prepared.push('\n');
      prepared.push_str(&flags.join("\n"));
    }

    commands.push(prepared);
    commands.extend(prepare_commands(sub, level + 1));
  }

  commands
}

/// The command's after-help text, as a 4-space indented code block when it
/// spans several lines or as a `>` note otherwise.
pub fn prepare_usage_text(command: &Command) -> String {
  let text = styled_to_string(command.get_after_help());
  let text = text.trim_matches('\n');
  if text.is_empty() {
    return String::new();
  }

  if text.contains('\n') {
    return text.lines().map(|line| format!("    {line}\n")).collect();
  }

  format!(">{text}\n")
}

/// The command's about text, followed by a blank line when `usage_text`
/// comes after it.
pub fn prepare_usage(command: &Command, usage_text: &str) -> String {
  let about = styled_to_string(command.get_about());
  if about.is_empty() {
    return String::new();
  }

  let mut usage = format!("{about}\n");
  if !usage_text.is_empty() {
    usage.push('\n');
  }
  usage
}

/// `**--long, -s**="": help (default: value)` for each flag, sorted.
pub fn prepare_args_with_values(flags: &[&Arg]) -> Vec<String> {
  prepare_flags(flags, ", ", "**", "**", "\"\"", true)
}

/// `[--long|-s]=[value]` for each flag, sorted.
pub fn prepare_args_synopsis(flags: &[&Arg]) -> Vec<String> {
  prepare_flags(flags, "|", "[", "]", "[value]", false)
}

pub fn prepare_flags(
  flags: &[&Arg],
  sep: &str,
  opener: &str,
  closer: &str,
  value: &str,
  add_details: bool,
) -> Vec<String> {
  let mut args: Vec<String> = flags
    .iter()
    .map(|flag| {
      let names: Vec<String> = flag_names(flag)
        .iter()
        .map(|name| {
          let name = name.trim();
          if name.chars().count() > 1 {
            format!("--{name}")
          } else {
            format!("-{name}")
          }
        })
        .collect();

      let mut arg = format!("{opener}{}{closer}", names.join(sep));
      if takes_value(flag) {
        arg.push('=');
        arg.push_str(value);
      }
      if add_details {
        arg.push_str(&flag_details(flag));
      }
      arg.push('\n');
      arg
    })
    .collect();

  args.sort();
  args
}

/// `: help` plus ` (default: value)` for value-taking flags with a default.
pub fn flag_details(flag: &Arg) -> String {
  let mut description = styled_to_string(flag.get_help());

  if takes_value(flag) {
    let default = default_text(flag, &arg_type(flag));
    if !default.is_empty() {
      description.push_str(&format!(" (default: {default})"));
    }
  }

  format!(": {description}")
}

/// One entry per visible flag bound to a `PLUGIN_*` variable, sorted by name.
pub fn prepare_plugin_args(flags: &[&Arg]) -> Vec<PluginArg> {
  let mut args: Vec<PluginArg> = flags
    .iter()
    .filter_map(|flag| {
      let env = flag.get_env()?.to_str()?;
      let name = env.strip_prefix(PLUGIN_ENV_PREFIX)?;
      let type_ = arg_type(flag);

      Some(PluginArg {
        name: name.to_lowercase(),
        description: styled_to_string(flag.get_help()),
        default: default_text(flag, &type_),
        type_,
        required: flag.is_required_set(),
      })
    })
    .collect();

  args.sort_by(|a, b| a.name.cmp(&b.name));
  args
}

/// Named, non-hidden arguments. Positionals have no flag form and are left
/// out.
fn visible_flags(command: &Command) -> Vec<&Arg> {
  command
    .get_arguments()
    .filter(|arg| !arg.is_hide_set() && !arg.is_positional())
    .collect()
}

fn flag_names(flag: &Arg) -> Vec<String> {
  let mut names = Vec::new();

  if let Some(long) = flag.get_long() {
    names.push(long.to_string());
  }
  if let Some(aliases) = flag.get_visible_aliases() {
    names.extend(aliases.into_iter().map(str::to_string));
  }
  if let Some(short) = flag.get_short() {
    names.push(short.to_string());
  }
  if let Some(aliases) = flag.get_visible_short_aliases() {
    names.extend(aliases.into_iter().map(|c| c.to_string()));
  }

  names
}

fn takes_value(flag: &Arg) -> bool {
  flag.get_action().takes_values()
}

/// Value names act as type hints for values clap sees as plain strings:
/// `NUMBER` marks integers and `LIST` delimited lists.
fn arg_type(flag: &Arg) -> String {
  let value_name = flag
    .get_value_names()
    .and_then(|names| names.first())
    .map(|name| name.as_str().to_string())
    .unwrap_or_default();
  let multiple_values = flag.get_num_args().is_some_and(|range| range.max_values() > 1);

  let kind = match flag.get_action() {
    ArgAction::SetTrue | ArgAction::SetFalse => "bool",
    ArgAction::Append => "list",
    _ if multiple_values || flag.get_value_delimiter().is_some() || value_name == "LIST" => "list",
    _ if value_name == "NUMBER" => "number",
    _ => "string",
  };

  kind.to_string()
}

fn default_text(flag: &Arg, type_: &str) -> String {
  if flag.is_hide_default_value_set() {
    return String::new();
  }

  let values: Vec<String> = flag
    .get_default_values()
    .iter()
    .map(|value| value.to_string_lossy().into_owned())
    .filter(|value| !value.is_empty())
    .collect();

  match type_ {
    "string" if !values.is_empty() => format!("{:?}", values.join(",")),
    "list" => StringSlice::default_text(&values, ","),
    _ => values.join(","),
  }
}

fn styled_to_string(text: Option<&clap::builder::StyledStr>) -> String {
  text.map(ToString::to_string).unwrap_or_default()
}
