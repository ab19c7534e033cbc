//! Ordered answer storage shared by the steps of a wizard run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A collected value. Text prompts and single-select pickers produce
/// [`Answer::Text`]; multi-select pickers produce [`Answer::List`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(value) => Some(value),
            Answer::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Answer::Text(_) => None,
            Answer::List(values) => Some(values),
        }
    }

    /// Whether `value` is this answer (text) or one of its entries (list).
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Answer::Text(text) => text == value,
            Answer::List(values) => values.iter().any(|candidate| candidate == value),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(text) => text.is_empty(),
            Answer::List(values) => values.is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => write!(f, "{text}"),
            Answer::List(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::List(values)
    }
}

/// Insertion-ordered map from step key to answer.
///
/// Re-inserting an existing key replaces its value in place, so iteration
/// order is the order in which keys were first answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord<K> {
    entries: Vec<(K, Answer)>,
}

impl<K> Default for AnswerRecord<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> AnswerRecord<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    pub fn get_text(&self, key: &K) -> Option<&str> {
        self.get(key).and_then(Answer::as_text)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: K, value: impl Into<Answer>) -> Option<Answer> {
        let value = value.into();
        match self.entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<Answer> {
        let position = self.entries.iter().position(|(candidate, _)| candidate == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Keeps only the entries for which `keep` returns `true`, in order.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &Answer) -> bool) {
        self.entries.retain(|(key, value)| keep(key, value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Answer)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Copies every entry of `other` into this record, overwriting keys
    /// that already exist.
    pub fn extend(&mut self, other: &AnswerRecord<K>) {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn into_entries(self) -> Vec<(K, Answer)> {
        self.entries
    }
}

impl<K: PartialEq + Clone> FromIterator<(K, Answer)> for AnswerRecord<K> {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        let mut record = AnswerRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinserting_keeps_first_position() {
        let mut record = AnswerRecord::new();
        record.insert("type", "feat");
        record.insert("scope", "core");
        let previous = record.insert("type", "fix");

        assert_eq!(previous, Some(Answer::from("feat")));
        let keys: Vec<_> = record.keys().copied().collect();
        assert_eq!(keys, vec!["type", "scope"]);
        assert_eq!(record.get_text(&"type"), Some("fix"));
    }

    #[test]
    fn extend_overwrites_and_appends() {
        let mut parent: AnswerRecord<&str> = [("a", Answer::from("1"))].into_iter().collect();
        let child: AnswerRecord<&str> = [("b", Answer::from("2")), ("a", Answer::from("3"))]
            .into_iter()
            .collect();

        parent.extend(&child);

        assert_eq!(parent.len(), 2);
        assert_eq!(parent.get_text(&"a"), Some("3"));
        assert_eq!(parent.get_text(&"b"), Some("2"));
    }

    #[test]
    fn list_answers_match_members() {
        let answer = Answer::from(vec!["a".to_string(), "b".to_string()]);
        assert!(answer.matches("b"));
        assert!(!answer.matches("c"));
        assert_eq!(answer.to_string(), "a, b");
        assert!(answer.as_text().is_none());
    }

    #[test]
    fn remove_drops_entry() {
        let mut record = AnswerRecord::new();
        record.insert("type", "feat");
        assert_eq!(record.remove(&"type"), Some(Answer::from("feat")));
        assert!(record.is_empty());
        assert!(record.remove(&"type").is_none());
    }

    #[test]
    fn retain_keeps_order_of_survivors() {
        let mut record: AnswerRecord<&str> = [
            ("a", Answer::from("1")),
            ("b", Answer::from("2")),
            ("c", Answer::from("3")),
        ]
        .into_iter()
        .collect();

        record.retain(|key, _| *key != "b");

        let keys: Vec<_> = record.keys().copied().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn entries_come_out_in_answer_order() {
        let record: AnswerRecord<&str> = [("b", Answer::from("2")), ("a", Answer::from("1"))]
            .into_iter()
            .collect();
        let keys: Vec<_> = record.into_entries().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
