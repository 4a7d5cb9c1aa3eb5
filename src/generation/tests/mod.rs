//! Unit tests for the local site generator.

use crate::generation::{
    adapters::{LocalSiteGenerator, local_slugify},
    domain::{GenerationRequest, PushCredential},
    ports::SiteGenerator,
};
use rstest::rstest;
use serde_json::json;
use sha2::{Digest, Sha256};

#[rstest]
#[case("Landing Page", "landing-page")]
#[case("captcha-solver", "captcha-solver")]
#[case("  ../../etc/passwd ", "etc-passwd")]
#[case("Ünïcode Task!", "n-code-task")]
#[case("", "task")]
#[case("***", "task")]
fn slug_is_filesystem_safe(#[case] task: &str, #[case] expected: &str) {
    assert_eq!(local_slugify(task), expected);
}

#[rstest]
fn push_credential_debug_is_redacted() {
    let credential = PushCredential::new("ghp_secret").expect("non-empty token");
    assert_eq!(format!("{credential:?}"), "PushCredential(***)");
    assert_eq!(credential.expose(), "ghp_secret");
    assert!(PushCredential::new("").is_none());
}

#[rstest]
#[tokio::test]
async fn writes_index_page_and_reports_digest() {
    let output = tempfile::tempdir().expect("temp dir");
    let generator = LocalSiteGenerator::new(output.path());
    let request = GenerationRequest::new("Hello Site", "Say <b>hi</b>")
        .with_attachments(vec![json!({"name": "logo.png", "url": "data:,"}), json!("notes.txt")]);

    let site = generator.generate(&request).await.expect("generation");

    let page_path = output.path().join("hello-site").join("index.html");
    let page = std::fs::read_to_string(&page_path).expect("page should exist");
    assert_eq!(site.local_path(), output.path().join("hello-site"));
    assert!(page.contains("<h1>Hello Site</h1>"));
    assert!(page.contains("Say &lt;b&gt;hi&lt;/b&gt;"));
    assert!(page.contains("<li>logo.png</li>"));
    assert!(page.contains("<li>notes.txt</li>"));

    let expected_digest: String = Sha256::digest(page.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    assert_eq!(site.commit_sha(), Some(expected_digest.as_str()));
}

#[rstest]
#[tokio::test]
async fn without_base_url_nothing_is_published() {
    let output = tempfile::tempdir().expect("temp dir");
    let generator = LocalSiteGenerator::new(output.path());

    let site = generator
        .generate(&GenerationRequest::new("t1", "brief"))
        .await
        .expect("generation");

    assert!(site.repo_url().is_none());
    assert!(site.pages_url().is_none());
}

#[rstest]
#[tokio::test]
async fn base_url_derives_repo_and_pages_urls() {
    let output = tempfile::tempdir().expect("temp dir");
    let generator =
        LocalSiteGenerator::new(output.path()).with_base_url("https://sites.example/");

    let site = generator
        .generate(&GenerationRequest::new("My Task", "brief"))
        .await
        .expect("generation");

    assert_eq!(site.repo_url(), Some("https://sites.example/my-task"));
    assert_eq!(site.pages_url(), Some("https://sites.example/my-task/"));
}

#[rstest]
#[tokio::test]
async fn regenerating_overwrites_previous_page() {
    let output = tempfile::tempdir().expect("temp dir");
    let generator = LocalSiteGenerator::new(output.path());

    let first = generator
        .generate(&GenerationRequest::new("t1", "first"))
        .await
        .expect("first generation");
    let second = generator
        .generate(&GenerationRequest::new("t1", "second"))
        .await
        .expect("second generation");

    let page = std::fs::read_to_string(output.path().join("t1").join("index.html"))
        .expect("page should exist");
    assert!(page.contains("second"));
    assert_ne!(first.commit_sha(), second.commit_sha());
}
