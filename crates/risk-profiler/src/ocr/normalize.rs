//! Cleanup pass applied to raw OCR output before parsing.

use std::sync::LazyLock;

use regex::Regex;

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).expect("correction pattern compiles")
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));

/// Character and label fixes, applied in order after whitespace is flattened.
static CORRECTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Character misreads scanners commonly produce.
        (pattern(r"\|(\s|$)"), "I${1}"),
        (pattern(r"(^|\s)[0O](\s|$)"), "${1}O${2}"),
        (pattern(r"(^|\s)[1l](\s|$)"), "${1}I${2}"),
        (pattern(r"(^|\s)rn(\s|$)"), "${1}m${2}"),
        (pattern(r"(^|\s)vv(\s|$)"), "${1}w${2}"),
        // Normalize the field labels survey forms use.
        (pattern(r"\b[Aa]ge[:\s]*(\d+)"), "Age: ${1}"),
        (pattern(r"\b[Ss]mok(?:er?|ing)[:\s]*"), "Smoker: "),
        (pattern(r"\b[Ee]xercise[:\s]*"), "Exercise: "),
        (pattern(r"\b[Dd]iet[:\s]*"), "Diet: "),
        (pattern(r"\b[Aa]lcohol[:\s]*"), "Alcohol: "),
        (pattern(r"\b[Ss]leep[:\s]*"), "Sleep: "),
        (pattern(r"\b[Ss]tress[:\s]*"), "Stress: "),
        (pattern(r"\b[Ww]eight[:\s]*"), "Weight: "),
        (pattern(r"\b[Hh]eight[:\s]*"), "Height: "),
        // Uniform spacing around colons.
        (pattern(r"(\w)\s*:\s*"), "${1}: "),
    ]
});

/// Flattens whitespace, repairs common character misreads, and normalizes
/// survey field labels so the text parser sees consistent input.
pub(crate) fn post_process_text(text: &str) -> String {
    let mut processed = WHITESPACE.replace_all(text, " ").into_owned();
    for (correction, replacement) in CORRECTIONS.iter() {
        processed = correction.replace_all(&processed, *replacement).into_owned();
    }
    processed.trim().to_string()
}
