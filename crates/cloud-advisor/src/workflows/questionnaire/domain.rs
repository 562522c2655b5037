use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiers of questions whose answers other components read directly.
pub mod question_ids {
    pub const WORKLOAD_TYPE: &str = "workload_type";
    pub const SERVICES: &str = "services";
    pub const PROVIDERS: &str = "providers";
    pub const COMPUTE_WORKLOAD: &str = "compute_workload";
    pub const COMPUTE_TRAFFIC: &str = "compute_traffic";
    pub const COMPUTE_GPU: &str = "compute_gpu";
}

/// Option id on the provider question meaning "no preference".
pub const ALL_PROVIDERS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Multiple,
}

impl Cardinality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single choice",
            Self::Multiple => "multiple choice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub cardinality: Cardinality,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Answer payload: a single option id, or an ordered set of option ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    pub fn empty(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::Single => Self::Single(String::new()),
            Cardinality::Multiple => Self::Multiple(Vec::new()),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::Single(_) => Cardinality::Single,
            Self::Multiple(_) => Cardinality::Multiple,
        }
    }

    /// Empty strings and empty sets represent "not yet answered".
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.trim().is_empty(),
            Self::Multiple(values) => values.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(values) => Some(values.as_slice()),
        }
    }

    pub fn option_ids(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Trim whitespace and drop repeated selections, keeping first-selection order.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Single(value) => Self::Single(value.trim().to_string()),
            Self::Multiple(values) => {
                let mut seen: Vec<String> = Vec::with_capacity(values.len());
                for value in values {
                    let value = value.trim().to_string();
                    if !value.is_empty() && !seen.contains(&value) {
                        seen.push(value);
                    }
                }
                Self::Multiple(seen)
            }
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Multiple(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("question '{0}' is not part of the current questionnaire")]
    UnknownQuestion(String),
    #[error("question '{question_id}' expects a {} answer", expected.label())]
    CardinalityMismatch {
        question_id: String,
        expected: Cardinality,
    },
    #[error("'{option_id}' is not an option of question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },
}
