//! Author summary shown on question and answer cards.

use serde::{Deserialize, Serialize};

/// Display information about whoever wrote a question or answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    /// Professional title ("Water Systems Engineer").
    #[serde(default)]
    pub title: String,

    /// Areas of expertise; the first one is shown as a badge.
    #[serde(default)]
    pub expertise: Vec<String>,

    /// Community reputation points, shown on answers.
    #[serde(default)]
    pub reputation: Option<u32>,
}

impl Author {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            expertise: Vec::new(),
            reputation: None,
        }
    }

    pub fn with_expertise(mut self, expertise: Vec<String>) -> Self {
        self.expertise = expertise;
        self
    }

    pub fn with_reputation(mut self, reputation: u32) -> Self {
        self.reputation = Some(reputation);
        self
    }

    /// Avatar initials: first letter of the first two name words that
    /// start with a letter, skipping honorifics such as "Dr." or "Prof.".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter(|word| !word.ends_with('.'))
            .filter_map(|word| word.chars().find(|c| c.is_alphabetic()))
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    /// The badge shown next to the name, if any.
    pub fn headline_expertise(&self) -> Option<&str> {
        self.expertise.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(Author::new("Mike Thompson", "").initials(), "MT");
    }

    #[test]
    fn initials_skip_honorifics() {
        assert_eq!(Author::new("Dr. Sarah Chen", "").initials(), "SC");
        assert_eq!(Author::new("Prof. Elena Rodriguez", "").initials(), "ER");
    }

    #[test]
    fn initials_of_single_word_handle() {
        assert_eq!(Author::new("EcoEngineer", "").initials(), "E");
    }

    #[test]
    fn headline_expertise_is_first_entry() {
        let author = Author::new("Mike Thompson", "Project Manager")
            .with_expertise(vec!["Greywater".into(), "Economics".into()]);
        assert_eq!(author.headline_expertise(), Some("Greywater"));
        assert_eq!(Author::new("x", "y").headline_expertise(), None);
    }
}
