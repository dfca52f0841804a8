use crate::handle::NodeHandle;

/// Substrings of a class name or id that mark navigation, ads or social chrome.
pub const NOISE_KEYWORDS: [&str; 12] = [
    "nav",
    "menu",
    "sidebar",
    "footer",
    "header",
    "ad",
    "advertisement",
    "sponsor",
    "promo",
    "related",
    "share",
    "social",
];

/// Classify a node as page chrome from its own class name and id.
///
/// Ancestors are not consulted: a plain `<p>` inside `<nav>` is not noise.
pub fn is_noise<N: NodeHandle>(node: &N) -> bool {
    is_noise_hint(&node.class_name(), &node.id())
}

/// The string-level test behind [`is_noise`].
///
/// Matching is plain substring containment, so `"ad"` also matches
/// `"header"`, `"shadow"` or `"download"`.
pub fn is_noise_hint(class_name: &str, id: &str) -> bool {
    let class_name = class_name.to_lowercase();
    let id = id.to_lowercase();

    NOISE_KEYWORDS
        .iter()
        .any(|keyword| class_name.contains(keyword) || id.contains(keyword))
}
