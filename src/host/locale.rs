/// Display-string provider. Returns the key itself when no translation
/// exists; never fails, never blocks.
pub trait Localization {
    fn resolve(&self, key: &str) -> String;
}

/// Built-in English table for the fixed phrases the engine speaks.
pub struct StaticLocale;

const PHRASES: &[(&str, &str)] = &[
    ("phrase.end_of_list", "End of list"),
    ("phrase.start_of_list", "Start of list"),
    ("phrase.no_effect", "No effect"),
    ("phrase.unknown_element", "unknown element"),
    ("phrase.back", "Back"),
    ("phrase.target_mode", "Choose a target"),
    ("phrase.target_cancelled", "Target selection cancelled"),
    ("phrase.spell_resolved", "Spell resolved"),
    ("phrase.nothing_playable", "Nothing playable"),
    ("phrase.no_targets", "No valid targets"),
];

impl Localization for StaticLocale {
    fn resolve(&self, key: &str) -> String {
        PHRASES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

/// Echoes keys back unchanged. Used in tests that assert on keys directly.
pub struct KeyEcho;

impl Localization for KeyEcho {
    fn resolve(&self, key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_locale_falls_back_to_key() {
        let locale = StaticLocale;
        assert_eq!(locale.resolve("phrase.end_of_list"), "End of list");
        assert_eq!(locale.resolve("phrase.does_not_exist"), "phrase.does_not_exist");
    }
}
