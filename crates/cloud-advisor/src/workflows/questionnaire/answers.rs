use super::domain::{AnswerValue, Cardinality, Question};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Session answers keyed by question id. Holds at most one answer per question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous answer for `question_id`. Recording an empty value clears it.
    pub fn record(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        let question_id = question_id.into();
        let value = value.into().normalized();

        if value.is_empty() {
            self.answers.remove(&question_id);
        } else {
            self.answers.insert(question_id, value);
        }
    }

    /// Stored answer, or an empty answer of the requested cardinality.
    pub fn get(&self, question_id: &str, cardinality: Cardinality) -> AnswerValue {
        self.answers
            .get(question_id)
            .cloned()
            .unwrap_or_else(|| AnswerValue::empty(cardinality))
    }

    pub fn raw(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Single-choice answer, or `""` when absent or stored as a set.
    pub fn single(&self, question_id: &str) -> &str {
        self.answers
            .get(question_id)
            .and_then(AnswerValue::as_single)
            .unwrap_or("")
    }

    /// Multiple-choice answer, or an empty slice when absent or stored as a scalar.
    pub fn multiple(&self, question_id: &str) -> &[String] {
        self.answers
            .get(question_id)
            .and_then(AnswerValue::as_multiple)
            .unwrap_or(&[])
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers
            .iter()
            .map(|(question_id, value)| (question_id.as_str(), value))
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Copy of the store restricted to the given questions. Answers to questions outside the
    /// list stay in `self` untouched.
    pub fn restricted_to<'a, I>(&self, questions: I) -> AnswerStore
    where
        I: IntoIterator<Item = &'a Question>,
    {
        let answers = questions
            .into_iter()
            .filter_map(|question| {
                self.answers
                    .get(question.id)
                    .map(|value| (question.id.to_string(), value.clone()))
            })
            .collect();

        AnswerStore { answers }
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerStore
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut store = AnswerStore::new();
        for (question_id, value) in iter {
            store.record(question_id, value);
        }
        store
    }
}

impl<'de> Deserialize<'de> for AnswerStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, AnswerValue>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Whether `question` has an answer that allows moving past it.
pub fn can_advance(question: &Question, answers: &AnswerStore) -> bool {
    match answers.raw(question.id) {
        Some(value) => value.cardinality() == question.cardinality && !value.is_empty(),
        None => false,
    }
}
