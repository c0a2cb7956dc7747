use crate::model::Question;

/// A named, ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardSet {
    name: String,
    questions: Vec<Question>,
}

impl FlashcardSet {
    #[must_use]
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// All sets offered by the data source, in the order it listed them.
///
/// Set names are unique; a later set with a name already present replaces
/// the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCatalog {
    sets: Vec<FlashcardSet>,
}

impl SetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, set: FlashcardSet) {
        match self.sets.iter_mut().find(|existing| existing.name == set.name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlashcardSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlashcardSet> {
        self.sets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl FromIterator<FlashcardSet> for SetCatalog {
    fn from_iter<I: IntoIterator<Item = FlashcardSet>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for set in iter {
            catalog.insert(set);
        }
        catalog
    }
}
