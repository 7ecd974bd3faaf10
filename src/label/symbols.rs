// ============================================================================
// Iconographic symbol resolution — cost/ability glyphs the host renders as
// sprite tags ("{G}", "{2}", "{W/U}") spoken as words.
// ============================================================================

const SYMBOL_WORDS: &[(&str, &str)] = &[
    ("W", "white"),
    ("U", "blue"),
    ("B", "black"),
    ("R", "red"),
    ("G", "green"),
    ("C", "colorless"),
    ("S", "snow"),
    ("P", "phyrexian"),
    ("T", "tap"),
    ("Q", "untap"),
    ("E", "energy"),
    ("X", "x"),
];

/// Replace every `{..}` icon code in the text with its spoken form.
/// Unknown codes pass through bare, so the output never re-resolves:
/// calling this twice yields the same string.
pub fn resolve_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(&symbol_word(&after[..close]));
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated brace, keep literally
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Spoken form of a single icon code.
///
/// Collision policy for ambiguous two-letter codes (hybrids like "WU" or
/// "W/U"): both readings are spoken as "x or y", sorted smallest-first, so
/// the phrasing is stable regardless of how the host ordered the letters.
fn symbol_word(code: &str) -> String {
    let code = code.trim();

    if code.chars().all(|c| c.is_ascii_digit()) && !code.is_empty() {
        return code.to_string();
    }

    if let Some(word) = lookup(code) {
        return word.to_string();
    }

    // Hybrid forms: "W/U" or bare two-letter "WU"
    let parts: Vec<&str> = if code.contains('/') {
        code.split('/').collect()
    } else if code.len() == 2 {
        code.split("").filter(|s| !s.is_empty()).collect()
    } else {
        vec![]
    };

    if parts.len() == 2 {
        if let (Some(a), Some(b)) = (lookup(parts[0]), lookup(parts[1])) {
            let mut words = [a, b];
            words.sort();
            return format!("{} or {}", words[0], words[1]);
        }
    }

    code.to_string()
}

fn lookup(code: &str) -> Option<&'static str> {
    SYMBOL_WORDS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, w)| *w)
}
