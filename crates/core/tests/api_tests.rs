//! Library API integration tests
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;

use precis_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn load_fixture(name: &str, url: &str) -> Document {
    let html = std::fs::read_to_string(get_fixture_path(name)).unwrap();
    Document::parse(&html).expect("should parse").with_url(url)
}

#[test]
fn test_blog_article() {
    let doc = load_fixture("blog_article.html", "https://crumb.example/sourdough-at-altitude");
    let text = extract_article_text(&doc, &ExtractConfig::default());

    assert!(text.starts_with("Baking Sourdough at Altitude Bakers who move to the mountains"));
    assert!(text.contains("add a little more water because flour dries out in thin mountain air."));
    assert!(text.contains("Finally, bake a few degrees hotter"));
    assert!(text.ends_with("Image Descriptions: • Open crumb of a finished loaf"));

    assert!(!text.contains("Subscribe to unlock"));
    assert!(!text.contains("Recipes"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("share icon"));
    assert!(!text.contains("analytics"));
}

#[test]
fn test_platform_story() {
    let doc = load_fixture("medium_story.html", "https://medium.com/@writer/notes-on-deliberate-practice-1a2b3c");
    let text = extract_article_text(&doc, &ExtractConfig::default());

    assert_eq!(
        text,
        "# Notes on Deliberate Practice \
         Deliberate practice is not the same as repetition. \
         It means working at the edge of your ability with fast feedback. \
         Most people stop improving once a skill becomes comfortable. \
         The cure is to keep choosing slightly harder problems. \
         Image Descriptions: • Writer avatar photo"
    );
}

#[test]
fn test_platform_story_on_other_host_uses_generic_cascade() {
    let doc = load_fixture("medium_story.html", "https://mirror.example/notes");
    let text = extract_article_text(&doc, &ExtractConfig::default());

    assert!(text.starts_with("Notes on Deliberate Practice Member-only story"));
}

#[test]
fn test_custom_platform_host() {
    let doc = load_fixture("medium_story.html", "https://mirror.example/notes");
    let config = ExtractConfig::builder().platform_host("mirror.example").build();
    let text = extract_article_text(&doc, &config);

    assert!(text.starts_with("# Notes on Deliberate Practice Deliberate practice"));
    assert!(!text.contains("Member-only"));
}

#[test]
fn test_paragraph_fallback() {
    let doc = load_fixture("paragraphs_only.html", "https://birds.example/field-notes");
    let text = extract_article_text(&doc, &ExtractConfig::default());

    assert_eq!(
        text,
        "Migrating warblers arrive in the valley during the second week of May. \
         They stay only long enough to feed before continuing north."
    );
}

#[test]
fn test_pdf_viewer() {
    let doc = load_fixture("pdf_viewer.html", "https://reports.example/viewer?file=annual-report");
    assert_eq!(classify(&doc).unwrap(), DocumentKind::Pdf);

    let text = extract_article_text(&doc, &ExtractConfig::default());
    assert_eq!(text, "Annual Report 2023 Revenue grew by twelve percent.");
}

#[test]
fn test_pdf_content_type_without_text() {
    let doc = Document::parse("")
        .unwrap()
        .with_url("https://reports.example/download")
        .with_content_type("application/pdf");
    assert_eq!(extract_article_text(&doc, &ExtractConfig::default()), PDF_SENTINEL);
}

#[test]
fn test_empty_content() {
    let doc = load_fixture("empty_content.html", "https://app.example/");
    assert_eq!(extract_article_text(&doc, &ExtractConfig::default()), NO_CONTENT_SENTINEL);
}

#[test]
fn test_output_is_normalized() {
    for name in ["blog_article.html", "medium_story.html", "paragraphs_only.html", "pdf_viewer.html"] {
        let doc = load_fixture(name, "https://medium.com/@a/b");
        let text = extract_article_text(&doc, &ExtractConfig::default());
        assert_eq!(normalize(&text), text, "{}", name);
    }
}

#[test]
fn test_message_contract() {
    let doc = load_fixture("paragraphs_only.html", "https://birds.example/field-notes");

    let request: ExtractRequest = serde_json::from_str(r#"{"type":"GET_ARTICLE_TEXT"}"#).unwrap();
    let response = handle_request(&doc, &request, &ExtractConfig::default()).expect("should respond");
    assert!(response.text.starts_with("Migrating warblers"));

    let unknown: ExtractRequest = serde_json::from_str(r#"{"type":"SUMMARIZE"}"#).unwrap();
    assert!(handle_request(&doc, &unknown, &ExtractConfig::default()).is_none());
}

#[test]
fn test_broken_selector_config() {
    let doc = load_fixture("paragraphs_only.html", "https://birds.example/field-notes");
    let config = ExtractConfig::builder().content_selectors([".post-content", "div[", "main"]).build();
    assert_eq!(extract_article_text(&doc, &config), EXTRACTION_ERROR_SENTINEL);
}

#[test]
fn test_summary_prompt_from_extracted_text() {
    let doc = load_fixture("blog_article.html", "https://crumb.example/sourdough-at-altitude");
    let text = extract_article_text(&doc, &ExtractConfig::default());
    assert!(has_enough_text(&text));

    let config = SummaryConfig { max_text_length: 100, ..Default::default() };
    let prompt = build_prompt(&text, &SummaryType::Bullets, &config);
    assert!(prompt.starts_with("Summarize the following article in 5-7 key bullet points."));
    let head: String = text.chars().take(100).collect();
    assert!(prompt.ends_with(&format!("Article text:\n{}...", head)));
}

/// Read one HTTP request and return its request line.
fn read_request(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        request.extend_from_slice(&chunk[..n]);

        if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&request[..end]).to_string();
            let length = head
                .to_lowercase()
                .lines()
                .find_map(|line| line.strip_prefix("content-length:").map(|v| v.trim().to_string()))
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0);
            if n == 0 || request.len() >= end + 4 + length {
                return head.lines().next().unwrap_or_default().to_string();
            }
        } else if n == 0 {
            return String::new();
        }
    }
}

/// Answer one generateContent call with `body`; the request line is sent on the channel.
fn serve_once(body: String) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        tx.send(read_request(&mut stream)).unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (format!("http://{}", addr), rx)
}

#[tokio::test]
async fn test_summarize_extracted_article() {
    let doc = load_fixture("blog_article.html", "https://crumb.example/sourdough-at-altitude");
    let text = extract_article_text(&doc, &ExtractConfig::default());

    let body = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "Bakers at altitude need more water and a hotter oven. Itâ€™s all about pressure." }] } }]
    });
    let (endpoint, requests) = serve_once(body.to_string());
    let config = SummaryConfig { endpoint, timeout: 5, ..Default::default() };

    let summary = summarize(&text, &SummaryType::Brief, "AIzaIntegrationKey", &config).await.unwrap();
    assert_eq!(summary, "Bakers at altitude need more water and a hotter oven. It's all about pressure.");

    let request_line = requests.recv().unwrap();
    assert!(request_line.starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent?key=AIzaIntegrationKey"));
}

#[test]
fn test_client_keeps_configured_model() {
    let settings = Settings { model: Some("gemini-2.0-flash".to_string()), ..Default::default() };
    let client = GeminiClient::new(settings.apply(SummaryConfig::default())).unwrap();

    assert_eq!(client.config().model, "gemini-2.0-flash");
    assert_eq!(client.config().max_text_length, 20_000);
}

#[test]
fn test_restricted_urls() {
    assert!(is_restricted_url("chrome://extensions"));
    assert!(!is_restricted_url("https://crumb.example/"));
}

#[test]
fn test_settings_round_trip() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("precis").join("settings.json");

    let mut settings = Settings::default();
    settings.set_api_key("AIzaIntegrationKey").unwrap();
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.api_key(None).unwrap(), "AIzaIntegrationKey");
}

#[test]
fn test_markdown_export_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("summary.md");

    write_export(
        &path,
        "• Lower pressure speeds up rising",
        ExportFormat::from_path(&path),
        &SummaryType::KeyInsights,
        Some("https://crumb.example/sourdough-at-altitude"),
    )
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# AI Summary\n\n"));
    assert!(content.contains("**Summary type:** Key Insights\n"));
    assert!(content.contains("**Source:** https://crumb.example/sourdough-at-altitude\n\n---\n\n"));
}
