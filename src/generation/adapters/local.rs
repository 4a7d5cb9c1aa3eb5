//! Single-page site generator writing to a local output directory.

use crate::generation::{
    domain::{GeneratedSite, GenerationRequest},
    ports::{GenerationError, SiteGenerator},
};
use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use minijinja::{Environment, context};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, instrument};

const PAGE_TEMPLATE_NAME: &str = "index.html";
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ task }}</title>
</head>
<body>
  <main>
    <h1>{{ task }}</h1>
    <p>{{ brief }}</p>
    {% if attachments %}
    <ul>
      {% for attachment in attachments %}<li>{{ attachment }}</li>
      {% endfor %}
    </ul>
    {% endif %}
  </main>
</body>
</html>
"#;
const FALLBACK_SLUG: &str = "task";

/// Renders `index.html` into `<output_root>/<task-slug>/`.
///
/// The commit identifier is the hex SHA-256 of the rendered page. Repository
/// and pages URLs are reported only when a public base URL is configured.
#[derive(Debug, Clone)]
pub struct LocalSiteGenerator {
    output_root: PathBuf,
    base_url: Option<String>,
}

impl LocalSiteGenerator {
    /// Creates a generator writing below `output_root`.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            base_url: None,
        }
    }

    /// Sets the public base URL the output root is served from.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        self.base_url = Some(raw.trim_end_matches('/').to_owned());
        self
    }
}

#[async_trait]
impl SiteGenerator for LocalSiteGenerator {
    #[instrument(skip(self, request), fields(task = request.task()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedSite, GenerationError> {
        let slug = slugify(request.task());
        let page = render_page(request)?;
        let commit_sha = hex_digest(page.as_bytes());

        let output_root = self.output_root.clone();
        let site_dir = slug.clone();
        tokio::task::spawn_blocking(move || write_page(&output_root, &site_dir, &page))
            .await
            .map_err(|err| GenerationError::Other(format!("generator task failed: {err}")))??;

        let local_path = self.output_root.join(&slug);
        debug!(path = %local_path.display(), commit = %commit_sha, "site rendered");

        let mut site = GeneratedSite::local(local_path).with_commit_sha(commit_sha);
        if let Some(base) = &self.base_url {
            site = site
                .with_repo_url(format!("{base}/{slug}"))
                .with_pages_url(format!("{base}/{slug}/"));
        }
        Ok(site)
    }
}

fn render_page(request: &GenerationRequest) -> Result<String, GenerationError> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
        .map_err(|err| GenerationError::Render(err.to_string()))?;
    let template = env
        .get_template(PAGE_TEMPLATE_NAME)
        .map_err(|err| GenerationError::Render(err.to_string()))?;
    let attachments: Vec<String> = request.attachments().iter().map(attachment_label).collect();
    template
        .render(context! {
            task => request.task(),
            brief => request.brief(),
            attachments => attachments,
        })
        .map_err(|err| GenerationError::Render(err.to_string()))
}

fn write_page(
    output_root: &std::path::Path,
    site_dir: &str,
    page: &str,
) -> Result<(), GenerationError> {
    Dir::create_ambient_dir_all(output_root, ambient_authority())?;
    let root = Dir::open_ambient_dir(output_root, ambient_authority())?;
    root.create_dir_all(site_dir)?;
    let site = root.open_dir(site_dir)?;
    site.write(PAGE_TEMPLATE_NAME, page)?;
    Ok(())
}

/// Human-readable label for an attachment reference.
fn attachment_label(attachment: &Value) -> String {
    match attachment {
        Value::String(text) => text.clone(),
        Value::Object(fields) => fields
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| attachment.to_string(), ToOwned::to_owned),
        other => other.to_string(),
    }
}

/// Lower-case ASCII alphanumerics; every other run of characters becomes a
/// single `-`.
pub(crate) fn slugify(task: &str) -> String {
    let mut slug = String::with_capacity(task.len());
    for ch in task.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _written = write!(hex, "{byte:02x}");
    }
    hex
}
