//! Validated text primitives shared across the trip search crates.
//!
//! - [`NonEmptyText`] guards record fields that must carry content (for example a trip title).
//! - [`Keyword`] is a single whitespace-free search token, already case-folded for matching.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A keyword contained whitespace and would have been split into several tokens
    #[error("Keyword cannot contain whitespace: {0:?}")]
    ContainsWhitespace(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// One whitespace-delimited unit of a raw search term.
///
/// Keeps the token as typed alongside a lower-cased copy used for case-insensitive
/// substring comparison. The token is matched literally: characters such as `.`, `*` or `|`
/// carry no pattern meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    raw: String,
    folded: String,
}

impl Keyword {
    /// Creates a keyword from a single token.
    ///
    /// # Errors
    /// - [`TextError::Empty`] if the token is empty.
    /// - [`TextError::ContainsWhitespace`] if the token would split into more than one keyword.
    pub fn new(token: impl AsRef<str>) -> Result<Self, TextError> {
        let token = token.as_ref();
        if token.is_empty() {
            return Err(TextError::Empty);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(TextError::ContainsWhitespace(token.to_owned()));
        }
        Ok(Self {
            raw: token.to_owned(),
            folded: fold_case(token),
        })
    }

    /// Splits a raw search term on whitespace, discarding empty tokens.
    ///
    /// Duplicates are kept; they cannot change an OR match.
    pub fn split(term: &str) -> Vec<Keyword> {
        term.split_whitespace()
            .filter_map(|token| Keyword::new(token).ok())
            .collect()
    }

    /// The token as the user typed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-folded form used for comparison, see [`fold_case`].
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-insensitive substring test against `haystack`.
    pub fn is_found_in(&self, haystack: &str) -> bool {
        fold_case(haystack).contains(&self.folded)
    }
}

/// Lower-cases `text` one character at a time.
///
/// `str::to_lowercase` is context sensitive (a word-final `Σ` becomes `ς`, elsewhere `σ`), so a
/// token folded on its own could differ from the same letters folded inside a longer field.
/// Folding per character gives both sides the same mapping.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Beach Trip \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "Beach Trip");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert_eq!(NonEmptyText::new(" \t ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank_string() {
        let err = serde_json::from_str::<NonEmptyText>("\"   \"").expect_err("blank should fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn split_discards_empty_tokens() {
        let keywords = Keyword::split("  sun \t\n sand   ");
        let raw: Vec<&str> = keywords.iter().map(Keyword::as_str).collect();
        assert_eq!(raw, vec!["sun", "sand"]);
    }

    #[test]
    fn split_of_blank_term_is_empty() {
        assert!(Keyword::split("").is_empty());
        assert!(Keyword::split("   ").is_empty());
    }

    #[test]
    fn keyword_rejects_embedded_whitespace() {
        assert_eq!(
            Keyword::new("sun sand").unwrap_err(),
            TextError::ContainsWhitespace("sun sand".into())
        );
        assert_eq!(Keyword::new("").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn keyword_matches_substring_ignoring_case() {
        let keyword = Keyword::new("VAN").unwrap();
        assert_eq!(keyword.folded(), "van");
        assert!(keyword.is_found_in("Caravan park"));
        assert!(!keyword.is_found_in("Camping"));
    }

    #[test]
    fn keyword_treats_pattern_characters_literally() {
        let keyword = Keyword::new(".*").unwrap();
        assert!(!keyword.is_found_in("anything at all"));
        assert!(keyword.is_found_in("literally .* here"));
    }

    #[test]
    fn fold_case_ignores_word_position() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("Σ"), "σ");
    }

    #[test]
    fn keyword_matches_final_sigma() {
        assert!(Keyword::new("Σ").unwrap().is_found_in("ΟΔΟΣ"));
        assert!(Keyword::new("ΟΔΟΣ").unwrap().is_found_in("ΟΔΟΣΑ"));
    }

    #[test]
    fn keyword_matches_non_ascii_text() {
        let keyword = Keyword::new("ทะเล").unwrap();
        assert!(keyword.is_found_in("เที่ยวทะเลใต้"));
    }
}
