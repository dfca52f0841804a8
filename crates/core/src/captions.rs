use crate::config::ExtractConfig;
use crate::handle::{DocumentHandle, NodeHandle};
use crate::Result;

/// Alt texts containing these words describe chrome, not content.
const CAPTION_STOPWORDS: [&str; 2] = ["icon", "logo"];

const CAPTION_HEADER: &str = "Image Descriptions:";

/// Harvest meaningful image alt texts as a bulleted block.
///
/// Returns an empty string when no caption survives filtering. At most
/// `config.max_captions` captions are kept, in document order.
pub fn captions<D: DocumentHandle>(doc: &D, config: &ExtractConfig) -> Result<String> {
    let images = doc.query_all("img[alt]")?;

    let bullets: Vec<String> = images
        .iter()
        .filter_map(|image| image.attr("alt"))
        .map(|alt| alt.trim().to_string())
        .filter(|alt| is_meaningful(alt, config))
        .take(config.max_captions)
        .map(|alt| format!("• {}", alt))
        .collect();

    if bullets.is_empty() {
        return Ok(String::new());
    }

    Ok(format!("{}\n{}", CAPTION_HEADER, bullets.join("\n")))
}

fn is_meaningful(alt: &str, config: &ExtractConfig) -> bool {
    if alt.chars().count() <= config.min_caption_chars {
        return false;
    }

    let lowered = alt.to_lowercase();
    !CAPTION_STOPWORDS.iter().any(|word| lowered.contains(word))
}
