use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum InvalidTagName {
    #[error("tag name is empty")]
    Empty,
    #[error("tag name {0:?} contains characters outside letters, digits, '-' and '_'")]
    BadCharacters(String),
}

/// A block's tag name, restricted to the characters valid in the markup
/// tag grammar (`[A-Za-z0-9_-]+`).
///
/// Validation happens here, at construction, so every `TagName` in the
/// system satisfies the same grammar the importer matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

fn tag_grammar() -> &'static Regex {
    static TAG_GRAMMAR: OnceLock<Regex> = OnceLock::new();
    TAG_GRAMMAR.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid tag grammar regex"))
}

impl TagName {
    pub fn new(name: &str) -> Result<Self, InvalidTagName> {
        if name.is_empty() {
            return Err(InvalidTagName::Empty);
        }
        if !tag_grammar().is_match(name) {
            return Err(InvalidTagName::BadCharacters(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive prefix test used for autocomplete candidate filtering.
    /// Tag names are ASCII by construction, so byte slicing is safe here.
    pub fn starts_with_ignore_case(&self, fragment: &str) -> bool {
        self.0.len() >= fragment.len() && self.0[..fragment.len()].eq_ignore_ascii_case(fragment)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TagName {
    type Error = InvalidTagName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TagName> for String {
    fn from(tag: TagName) -> Self {
        tag.0
    }
}
