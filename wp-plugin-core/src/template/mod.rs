//! # Templates
//!
//! Render user supplied templates against plugin data. A template argument can
//! be inline template text, an `http(s)://` URL that is downloaded first, or a
//! `file://` URL read from disk.

mod functions;

use std::path::PathBuf;

pub use functions::{load_tera, to_sentence};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

const INLINE_TEMPLATE: &str = "__inline__";

/// Errors raised while loading or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
  #[error("failed to fetch template from {url}: {source}")]
  Fetch {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("failed to read template {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to render template: {0}")]
  Render(#[from] tera::Error),
}

/// Render `template` with `payload` as the template context.
///
/// The payload must serialize to a map, its top-level keys become template
/// variables.
pub async fn render<T: Serialize>(client: &Client, template: &str, payload: &T) -> Result<String, TemplateError> {
  let source = load_source(client, template).await?;

  let mut tera = load_tera();
  tera.add_raw_template(INLINE_TEMPLATE, &source)?;
  let context = tera::Context::from_serialize(payload)?;

  Ok(tera.render(INLINE_TEMPLATE, &context)?)
}

/// [`render`] with leading and trailing spaces and newlines removed.
pub async fn render_trim<T: Serialize>(client: &Client, template: &str, payload: &T) -> Result<String, TemplateError> {
  let rendered = render(client, template, payload).await?;
  Ok(rendered.trim_matches([' ', '\n']).to_string())
}

/// Prefix `input` with `prefix` unless it is blank or already prefixed.
///
/// ```
/// use wp_plugin_core::add_prefix;
///
/// assert_eq!(add_prefix("pre", "-existing"), "pre-existing");
/// assert_eq!(add_prefix("pre", "pre-existing"), "pre-existing");
/// assert_eq!(add_prefix("pre", " "), " ");
/// ```
pub fn add_prefix(prefix: &str, input: &str) -> String {
  if input.trim().is_empty() || input.starts_with(prefix) {
    return input.to_string();
  }

  format!("{prefix}{input}")
}

async fn load_source(client: &Client, template: &str) -> Result<String, TemplateError> {
  let Ok(url) = Url::parse(template) else {
    return Ok(template.to_string());
  };

  match url.scheme() {
    "http" | "https" => {
      debug!(url = %url, "Fetching remote template");
      let fetch_error = |source| TemplateError::Fetch {
        url: url.to_string(),
        source,
      };

      let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?;
      response.text().await.map_err(fetch_error)
    }
    "file" => {
      let path = PathBuf::from(url.path());
      debug!(path = %path.display(), "Reading template file");
      std::fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
    }
    _ => Ok(template.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use serde_json::json;
  use tempfile::TempDir;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  #[tokio::test]
  async fn renders_inline_template() {
    let client = Client::new();
    let rendered = render(&client, "Hello {{ name }}!", &json!({"name": "world"}))
      .await
      .unwrap();
    assert_eq!(rendered, "Hello world!");
  }

  #[tokio::test]
  async fn renders_with_custom_filter() {
    let client = Client::new();
    let rendered = render(&client, "{{ status | to_sentence }}", &json!({"status": "pipeline succeeded"}))
      .await
      .unwrap();
    assert_eq!(rendered, "Pipeline succeeded.");
  }

  #[tokio::test]
  async fn renders_template_from_file_url() {
    let dir = TempDir::new().unwrap();
    let template_path = dir.path().join("message.tera");
    fs::write(&template_path, "Build {{ number }} finished").unwrap();

    let url = Url::from_file_path(&template_path).unwrap();
    let rendered = render(&Client::new(), url.as_str(), &json!({"number": 42}))
      .await
      .unwrap();
    assert_eq!(rendered, "Build 42 finished");
  }

  #[tokio::test]
  async fn missing_template_file_is_an_error() {
    let err = render(&Client::new(), "file:///does/not/exist.tera", &json!({}))
      .await
      .unwrap_err();
    assert!(matches!(err, TemplateError::Read { .. }));
  }

  #[tokio::test]
  async fn renders_template_from_http_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/template.tera"))
      .respond_with(ResponseTemplate::new(200).set_body_string("Deployed {{ version }}"))
      .mount(&server)
      .await;

    let url = format!("{}/template.tera", server.uri());
    let rendered = render(&Client::new(), &url, &json!({"version": "1.2.3"}))
      .await
      .unwrap();
    assert_eq!(rendered, "Deployed 1.2.3");
  }

  #[tokio::test]
  async fn http_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/missing.tera"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&server)
      .await;

    let url = format!("{}/missing.tera", server.uri());
    let err = render(&Client::new(), &url, &json!({})).await.unwrap_err();
    assert!(matches!(err, TemplateError::Fetch { .. }));
  }

  #[tokio::test]
  async fn invalid_template_is_a_render_error() {
    let err = render(&Client::new(), "{{ unclosed", &json!({})).await.unwrap_err();
    assert!(matches!(err, TemplateError::Render(_)));
  }

  #[tokio::test]
  async fn render_trim_strips_spaces_and_newlines() {
    let rendered = render_trim(&Client::new(), "\n  {{ word }}  \n\n", &json!({"word": "done"}))
      .await
      .unwrap();
    assert_eq!(rendered, "done");
  }

  #[test]
  fn add_prefix_cases() {
    assert_eq!(add_prefix("pre", ""), "");
    assert_eq!(add_prefix("pre", "pre-existing"), "pre-existing");
    assert_eq!(add_prefix("pre", "-existing"), "pre-existing");
  }
}
