//! Cuisine keyword detection for dining listings.

use crate::model::Cuisine;

/// Keyword table. Checked in order; the first cuisine with a matching
/// keyword wins, so specific cuisines come before the generic ones.
const KEYWORDS: &[(Cuisine, &[&str])] = &[
    (Cuisine::Vietnamese, &["vietnamese", "pho", "banh mi", "bún"]),
    (Cuisine::Thai, &["thai", "tom yum", "pad see ew"]),
    (Cuisine::Japanese, &["japanese", "sushi", "ramen", "izakaya", "udon", "teriyaki"]),
    (Cuisine::Korean, &["korean", "bibimbap", "kimchi", "bulgogi"]),
    (Cuisine::Indian, &["indian", "tandoori", "biryani", "masala", "curry house"]),
    (Cuisine::Italian, &["italian", "pizza", "pizzeria", "pasta", "trattoria"]),
    (Cuisine::Mexican, &["mexican", "taco", "tacos", "burrito", "taqueria"]),
    (Cuisine::French, &["french", "bistro", "crêpe", "crepe", "brasserie"]),
    (
        Cuisine::MiddleEastern,
        &["middle eastern", "shawarma", "falafel", "lebanese", "persian", "kebab"],
    ),
    (
        Cuisine::Chinese,
        &[
            "chinese", "dim sum", "dumpling", "dumplings", "hot pot", "hotpot", "szechuan",
            "sichuan", "cantonese", "noodle", "noodles", "wonton",
        ],
    ),
    (Cuisine::Cafe, &["cafe", "café", "coffee", "bakery", "bubble tea"]),
];

/// Detect a cuisine from free text (title, description).
///
/// Keywords match as whole words, case-insensitively: "pho" does not
/// match "phone".
pub fn detect_cuisine(text: &str) -> Option<Cuisine> {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_word(&lower, w)))
        .map(|(cuisine, _)| *cuisine)
}

/// `needle` occurs in `haystack` with non-alphanumeric characters (or the
/// string boundary) on both sides.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
