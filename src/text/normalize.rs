// Fragment normalization.
//
// Turns a raw fragment into a whitespace-tokenizable lowercase string:
// tabs and line breaks become spaces, punctuation is deleted outright (so
// "mundo,hola" collapses into one word, same as the old scripts did), and by
// default anything that is not a letter goes too.

/// Typographic marks deleted on top of ASCII punctuation.
///
/// These show up constantly in Spanish-language PDFs: inverted question and
/// exclamation marks, curly double quotes, bullets and the acute accent used
/// as an apostrophe. A bare carriage return is dropped rather than spaced.
pub const EXTRA_PUNCTUATION: &[char] = &['¡', '¿', '”', '“', '•', '´', '\r'];

/// Fragment normalizer.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    /// Drop every character that is neither a letter nor whitespace
    /// (digits, symbols, stray glyphs from the PDF layer). Default: true.
    pub letters_only: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { letters_only: true }
    }
}

impl Normalizer {
    /// Normalize one piece of text. Empty input yields empty output.
    ///
    /// Idempotent: running the output through again changes nothing.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if is_punctuation(c) {
                continue;
            }
            if c.is_whitespace() {
                out.push(' ');
                continue;
            }
            // Filter after folding so multi-char lowercase expansions can't
            // leave a non-letter behind for a second pass to remove.
            for lower in c.to_lowercase() {
                if !self.letters_only || lower.is_alphabetic() {
                    out.push(lower);
                }
            }
        }
        out
    }

    /// Normalize a fragment and split it into words.
    pub fn words(&self, text: &str) -> Vec<String> {
        tokenize(&self.normalize(text))
    }
}

/// True for ASCII punctuation and the extra typographic marks.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

/// Split normalized text on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_folds_case() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("¡Hola, Mundo!"), "hola mundo");
        assert_eq!(n.normalize("“Paz” • ¿Sí?"), "paz  sí");
    }

    #[test]
    fn test_tabs_and_newlines_become_spaces() {
        let n = Normalizer::default();
        assert_eq!(n.words("uno\tdos\ntres\r\ncuatro"), vec!["uno", "dos", "tres", "cuatro"]);
    }

    #[test]
    fn test_letters_only_drops_digits() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("Artículo 22 bis"), "artículo  bis");

        let keep = Normalizer { letters_only: false };
        assert_eq!(keep.normalize("Artículo 22 bis"), "artículo 22 bis");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Normalizer::default().normalize(""), "");
        assert!(Normalizer::default().words("  ,.;  ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::default();
        for s in ["Hola Mundo", "ÑANDÚ, pingüino!", "a-b-c 123 ¿qué?", "İstanbul"] {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
