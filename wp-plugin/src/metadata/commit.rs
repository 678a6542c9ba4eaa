use clap::Args;
use serde::Serialize;
use wp_plugin_core::parse_int;

use crate::headings;

/// Flags describing the commit that triggered the pipeline.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::COMMIT)]
pub struct CommitArgs {
  /// commit URL
  #[arg(id = "commit.url", long = "commit.url", env = "CI_COMMIT_URL", default_value = "")]
  pub url: String,

  /// commit SHA
  #[arg(id = "commit.sha", long = "commit.sha", env = "CI_COMMIT_SHA", default_value = "")]
  pub sha: String,

  /// commit ref
  #[arg(id = "commit.ref", long = "commit.ref", env = "CI_COMMIT_REF", default_value = "")]
  pub git_ref: String,

  /// commit refspec
  #[arg(id = "commit.refspec", long = "commit.refspec", env = "CI_COMMIT_REFSPEC", default_value = "")]
  pub refspec: String,

  /// commit pull request
  #[arg(
    id = "commit.pull-request",
    long = "commit.pull-request",
    env = "CI_COMMIT_PULL_REQUEST",
    value_parser = parse_int,
    value_name = "NUMBER",
    default_value = ""
  )]
  pub pull_request: i64,

  /// commit source branch
  #[arg(
    id = "commit.source-branch",
    long = "commit.source-branch",
    env = "CI_COMMIT_SOURCE_BRANCH",
    default_value = ""
  )]
  pub source_branch: String,

  /// commit target branch
  #[arg(
    id = "commit.target-branch",
    long = "commit.target-branch",
    env = "CI_COMMIT_TARGET_BRANCH",
    default_value = ""
  )]
  pub target_branch: String,

  /// commit branch
  #[arg(id = "commit.branch", long = "commit.branch", env = "CI_COMMIT_BRANCH", default_value = "")]
  pub branch: String,

  /// commit tag
  #[arg(id = "commit.tag", long = "commit.tag", env = "CI_COMMIT_TAG", default_value = "")]
  pub tag: String,

  /// commit message
  #[arg(id = "commit.message", long = "commit.message", env = "CI_COMMIT_MESSAGE", default_value = "")]
  pub message: String,

  /// commit author name
  #[arg(id = "commit.author.name", long = "commit.author.name", env = "CI_COMMIT_AUTHOR", default_value = "")]
  pub author_name: String,

  /// commit author email
  #[arg(
    id = "commit.author.email",
    long = "commit.author.email",
    env = "CI_COMMIT_AUTHOR_EMAIL",
    default_value = ""
  )]
  pub author_email: String,

  /// commit author avatar
  #[arg(
    id = "commit.author.avatar",
    long = "commit.author.avatar",
    env = "CI_COMMIT_AUTHOR_AVATAR",
    default_value = ""
  )]
  pub author_avatar: String,
}

/// Flags describing the commit of the previous pipeline.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::COMMIT)]
pub struct PrevCommitArgs {
  /// previous commit URL
  #[arg(id = "prev.commit.url", long = "prev.commit.url", env = "CI_PREV_COMMIT_URL", default_value = "")]
  pub url: String,

  /// previous commit SHA
  #[arg(id = "prev.commit.sha", long = "prev.commit.sha", env = "CI_PREV_COMMIT_SHA", default_value = "")]
  pub sha: String,

  /// previous commit ref
  #[arg(id = "prev.commit.ref", long = "prev.commit.ref", env = "CI_PREV_COMMIT_REF", default_value = "")]
  pub git_ref: String,

  /// previous commit refspec
  #[arg(
    id = "prev.commit.refspec",
    long = "prev.commit.refspec",
    env = "CI_PREV_COMMIT_REFSPEC",
    default_value = ""
  )]
  pub refspec: String,

  /// previous commit branch
  #[arg(
    id = "prev.commit.branch",
    long = "prev.commit.branch",
    env = "CI_PREV_COMMIT_BRANCH",
    default_value = ""
  )]
  pub branch: String,

  /// previous commit message
  #[arg(
    id = "prev.commit.message",
    long = "prev.commit.message",
    env = "CI_PREV_COMMIT_MESSAGE",
    default_value = ""
  )]
  pub message: String,

  /// previous commit author name
  #[arg(
    id = "prev.commit.author.name",
    long = "prev.commit.author.name",
    env = "CI_PREV_COMMIT_AUTHOR",
    default_value = ""
  )]
  pub author_name: String,

  /// previous commit author email
  #[arg(
    id = "prev.commit.author.email",
    long = "prev.commit.author.email",
    env = "CI_PREV_COMMIT_AUTHOR_EMAIL",
    default_value = ""
  )]
  pub author_email: String,

  /// previous commit author avatar
  #[arg(
    id = "prev.commit.author.avatar",
    long = "prev.commit.author.avatar",
    env = "CI_PREV_COMMIT_AUTHOR_AVATAR",
    default_value = ""
  )]
  pub author_avatar: String,
}

/// Runtime metadata for a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Commit {
  pub url: String,
  pub sha: String,
  #[serde(rename = "ref")]
  pub git_ref: String,
  pub refspec: String,
  pub pull_request: i64,
  pub source_branch: String,
  pub target_branch: String,
  pub branch: String,
  pub tag: String,
  pub message: String,
  /// First line of the message
  pub title: String,
  /// Everything after the first line
  pub description: String,
  pub author: Author,
}

/// Runtime metadata for a commit author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
  pub name: String,
  pub email: String,
  pub avatar: String,
}

impl From<CommitArgs> for Commit {
  fn from(args: CommitArgs) -> Self {
    let (title, description) = split_message(&args.message);

    Self {
      url: args.url,
      sha: args.sha,
      git_ref: args.git_ref,
      refspec: args.refspec,
      pull_request: args.pull_request,
      source_branch: args.source_branch,
      target_branch: args.target_branch,
      branch: args.branch,
      tag: args.tag,
      message: args.message,
      title,
      description,
      author: Author {
        name: args.author_name,
        email: args.author_email,
        avatar: args.author_avatar,
      },
    }
  }
}

impl From<PrevCommitArgs> for Commit {
  fn from(args: PrevCommitArgs) -> Self {
    let (title, description) = split_message(&args.message);

    Self {
      url: args.url,
      sha: args.sha,
      git_ref: args.git_ref,
      refspec: args.refspec,
      branch: args.branch,
      message: args.message,
      title,
      description,
      author: Author {
        name: args.author_name,
        email: args.author_email,
        avatar: args.author_avatar,
      },
      ..Default::default()
    }
  }
}

/// Split a commit message into its title (the first line) and description
/// (everything after the first newline).
pub fn split_message(message: &str) -> (String, String) {
  match message.split_once('\n') {
    Some((title, description)) => (title.to_string(), description.to_string()),
    None => (message.to_string(), String::new()),
  }
}
