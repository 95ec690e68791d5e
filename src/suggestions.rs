//! Course-title suggestion list.
//!
//! Holds the rendered items as plain text. Incoming batches are
//! deduplicated against themselves and against what is already shown, so
//! re-delivering a batch never duplicates an item.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|item| item == text)
    }

    /// Append the incoming suggestions that are not shown yet, in first-seen
    /// order. Returns the items that were appended.
    pub fn merge<I, S>(&mut self, incoming: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added: Vec<String> = unique_in_order(incoming)
            .into_iter()
            .filter(|suggestion| !self.contains(suggestion))
            .collect();
        self.items.extend(added.iter().cloned());
        added
    }

    /// Click on the item at `index`: returns its text and empties the list.
    /// Out-of-range indices leave the list untouched.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let text = self.items.get(index).cloned()?;
        self.items.clear();
        Some(text)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Drop repeated strings, keeping the first occurrence of each.
pub fn unique_in_order<I, S>(incoming: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    incoming
        .into_iter()
        .map(Into::into)
        .filter(|s: &String| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_incoming_items_render_once_in_order() {
        let mut list = SuggestionList::new();
        let added = list.merge(["Algebra", "Algebra", "Calculus"]);
        assert_eq!(added, vec!["Algebra", "Calculus"]);
        assert_eq!(list.items(), ["Algebra", "Calculus"]);
    }

    #[test]
    fn redelivery_is_idempotent() {
        let mut list = SuggestionList::new();
        list.merge(["Data Structures", "Database Systems"]);
        let added = list.merge(["Data Structures", "Database Systems"]);
        assert!(added.is_empty());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn only_new_items_are_appended() {
        let mut list = SuggestionList::new();
        list.merge(["Data Mining"]);
        let added = list.merge(["Data Science", "Data Mining", "Data Science", "Big Data"]);
        assert_eq!(added, vec!["Data Science", "Big Data"]);
        assert_eq!(list.items(), ["Data Mining", "Data Science", "Big Data"]);
    }

    #[test]
    fn matching_is_exact_text() {
        let mut list = SuggestionList::new();
        list.merge(["Algebra"]);
        list.merge(["algebra", "Algebra "]);
        assert_eq!(list.items(), ["Algebra", "algebra", "Algebra "]);
    }

    #[test]
    fn select_returns_text_and_clears_everything() {
        let mut list = SuggestionList::new();
        list.merge(["Algebra", "Calculus", "Geometry"]);
        assert_eq!(list.select(1).as_deref(), Some("Calculus"));
        assert!(list.is_empty());
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut list = SuggestionList::new();
        list.merge(["Algebra"]);
        assert_eq!(list.select(3), None);
        assert_eq!(list.len(), 1);
    }
}
