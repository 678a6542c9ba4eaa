use clap::Args;
use clap::builder::FalseyValueParser;
use serde::Serialize;

use crate::headings;

/// Repository flags.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::REPOSITORY)]
pub struct RepositoryArgs {
  /// repo name
  #[arg(id = "repo.name", long = "repo.name", env = "CI_REPO_NAME", default_value = "")]
  pub name: String,

  /// repo owner
  #[arg(id = "repo.owner", long = "repo.owner", env = "CI_REPO_OWNER", default_value = "")]
  pub owner: String,

  /// repo full name
  #[arg(id = "repo.slug", long = "repo.slug", env = "CI_REPO", default_value = "")]
  pub slug: String,

  /// repo link
  #[arg(id = "repo.link", long = "repo.link", env = "CI_REPO_LINK", default_value = "")]
  pub link: String,

  /// repo link reported by older agents
  #[arg(id = "repo.url", long = "repo.url", env = "CI_REPO_URL", default_value = "", hide = true)]
  pub url: String,

  /// repo clone url
  #[arg(id = "repo.clone-url", long = "repo.clone-url", env = "CI_REPO_CLONE_URL", default_value = "")]
  pub clone_url: String,

  /// repo private
  #[arg(
    id = "repo.private",
    long = "repo.private",
    env = "CI_REPO_PRIVATE",
    action = clap::ArgAction::SetTrue,
    value_parser = FalseyValueParser::new()
  )]
  pub private: bool,

  /// repo default branch
  #[arg(
    id = "repo.default-branch",
    long = "repo.default-branch",
    env = "CI_REPO_DEFAULT_BRANCH",
    default_value = ""
  )]
  pub default_branch: String,
}

/// Runtime metadata for a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Repository {
  #[serde(skip_serializing_if = "String::is_empty")]
  pub name: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub owner: String,
  /// `owner/name`
  #[serde(skip_serializing_if = "String::is_empty")]
  pub slug: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub link: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub clone_url: String,
  #[serde(skip_serializing_if = "is_false")]
  pub private: bool,
  #[serde(rename = "default_branch", skip_serializing_if = "String::is_empty")]
  pub branch: String,
}

fn is_false(value: &bool) -> bool {
  !value
}

impl From<RepositoryArgs> for Repository {
  fn from(args: RepositoryArgs) -> Self {
    let slug = if args.slug.is_empty() && !args.owner.is_empty() && !args.name.is_empty() {
      format!("{}/{}", args.owner, args.name)
    } else {
      args.slug
    };

    Self {
      name: args.name,
      owner: args.owner,
      slug,
      link: if args.link.is_empty() { args.url } else { args.link },
      clone_url: args.clone_url,
      private: args.private,
      branch: args.default_branch,
    }
  }
}
