/// Ordered category table. Declaration order is the match order, so broader
/// keywords must stay below more specific ones.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 10] = [
    (
        "pets",
        &["pet", "animal", "body", "head", "ear", "eye", "mouth", "tail"],
    ),
    (
        "furniture",
        &["furniture", "sofa", "chair", "table", "bed", "desk", "shelf", "cabinet"],
    ),
    (
        "food",
        &["food", "cake", "pizza", "burger", "drink", "meal", "snack"],
    ),
    (
        "clothing",
        &["shirt", "pants", "hat", "shoe", "dress", "costume", "accessory"],
    ),
    (
        "decorations",
        &["decoration", "picture", "frame", "rug", "curtain", "lamp"],
    ),
    ("plants", &["plant", "tree", "flower", "bush"]),
    ("toys", &["toy", "ball", "doll", "game"]),
    ("ui", &["button", "icon", "menu", "ui", "panel", "dialog"]),
    ("backgrounds", &["background", "room", "wall", "floor"]),
    ("effects", &["effect", "sparkle", "particle", "smoke"]),
];

pub const MISC_CATEGORY: &str = "misc";

/// Assign a category to an asset from its name alone.
///
/// The lower-cased name is scanned against the keyword table in declaration
/// order; the first category with a matching substring wins. Unmatched names
/// fall back to "ui" when the asset carries an images sub-folder (bitmap
/// exports are almost always interface art), otherwise "misc". Total: always
/// returns exactly one label.
pub fn categorize(asset_name: &str, has_images_subdir: bool) -> &'static str {
    let name_lower = asset_name.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| name_lower.contains(keyword)) {
            return category;
        }
    }

    if has_images_subdir {
        return "ui";
    }

    MISC_CATEGORY
}

/// All category labels, including the misc fallback.
pub fn category_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = CATEGORY_KEYWORDS.iter().map(|(label, _)| *label).collect();
    labels.push(MISC_CATEGORY);
    labels
}
