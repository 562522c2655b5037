use super::answers::AnswerStore;
use super::domain::{
    question_ids, AnswerValue, Cardinality, Question, QuestionOption, QuestionnaireError,
};
use crate::workflows::catalog::ServiceCategory;
use std::collections::HashMap;

/// Static question graph: a fixed base sequence plus one follow-up sequence per category.
#[derive(Debug, Clone)]
pub struct QuestionnaireBlueprint {
    base: Vec<Question>,
    follow_ups: HashMap<ServiceCategory, Vec<Question>>,
}

impl QuestionnaireBlueprint {
    pub fn standard() -> Self {
        let follow_ups = ServiceCategory::ordered()
            .into_iter()
            .map(|category| (category, standard_follow_ups(category)))
            .collect();

        Self {
            base: standard_base_questions(),
            follow_ups,
        }
    }

    pub fn base_questions(&self) -> &[Question] {
        &self.base
    }

    pub fn follow_ups(&self, category: ServiceCategory) -> &[Question] {
        self.follow_ups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every question the blueprint can ever ask, base first, then categories in
    /// declaration order.
    pub fn all_questions(&self) -> impl Iterator<Item = &Question> {
        self.base.iter().chain(
            ServiceCategory::ordered()
                .into_iter()
                .flat_map(move |category| self.follow_ups(category).iter()),
        )
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.all_questions()
            .find(|question| question.id == question_id)
    }

    /// Categories chosen on the services question, in selection order, without repeats.
    pub fn selected_categories(&self, answers: &AnswerStore) -> Vec<ServiceCategory> {
        let mut categories = Vec::new();
        for raw in answers.multiple(question_ids::SERVICES) {
            if let Some(category) = ServiceCategory::parse(raw) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
        categories
    }

    /// Ordered questions to ask for the current answers. Recomputed from scratch each call.
    pub fn resolve(&self, answers: &AnswerStore) -> Vec<&Question> {
        let mut sequence: Vec<&Question> = self.base.iter().collect();
        for category in self.selected_categories(answers) {
            sequence.extend(self.follow_ups(category));
        }
        sequence
    }

    /// Bring externally supplied answers in line with each question's cardinality.
    ///
    /// A bare option id given for a multiple-choice question becomes a one-element set. A set
    /// given for a single-choice question is rejected. Ids the blueprint does not know are kept
    /// as-is; they never resolve, so they are never scored.
    pub fn conform(&self, answers: &AnswerStore) -> Result<AnswerStore, QuestionnaireError> {
        let mut conformed = AnswerStore::new();
        for (question_id, value) in answers.iter() {
            let value = match (self.question(question_id), value) {
                (Some(question), AnswerValue::Single(option_id))
                    if question.cardinality == Cardinality::Multiple =>
                {
                    AnswerValue::Multiple(vec![option_id.clone()])
                }
                (Some(question), AnswerValue::Multiple(_))
                    if question.cardinality == Cardinality::Single =>
                {
                    return Err(QuestionnaireError::CardinalityMismatch {
                        question_id: question.id.to_string(),
                        expected: Cardinality::Single,
                    });
                }
                _ => value.clone(),
            };
            conformed.record(question_id, value);
        }
        Ok(conformed)
    }

    /// Answers to questions in the resolved sequence; orphaned follow-up answers are left out.
    pub fn active_answers(&self, answers: &AnswerStore) -> AnswerStore {
        answers.restricted_to(self.resolve(answers))
    }
}

fn option(id: &'static str, label: &'static str, description: &'static str) -> QuestionOption {
    QuestionOption {
        id,
        label,
        description,
    }
}

fn standard_base_questions() -> Vec<Question> {
    vec![
        Question {
            id: question_ids::WORKLOAD_TYPE,
            prompt: "What type of workload will you be running?",
            cardinality: Cardinality::Single,
            options: vec![
                option("web", "Web Application", "Frontend/backend web services"),
                option("ml", "Machine Learning", "AI/ML training and inference"),
                option("batch", "Batch Processing", "Data processing jobs"),
                option(
                    "microservices",
                    "Microservices",
                    "Distributed application architecture",
                ),
                option(
                    "enterprise",
                    "Enterprise Application",
                    "Large-scale business applications",
                ),
            ],
        },
        Question {
            id: question_ids::SERVICES,
            prompt: "Which cloud services do you need?",
            cardinality: Cardinality::Multiple,
            options: vec![
                option("compute", "Compute", "Virtual machines and containers"),
                option("storage", "Storage", "Data storage solutions"),
                option("database", "Database", "Managed database services"),
                option("networking", "Networking", "CDN and load balancing"),
                option("security", "Security", "Identity and access management"),
                option("monitoring", "Monitoring", "Performance and logging"),
            ],
        },
        Question {
            id: question_ids::PROVIDERS,
            prompt: "Which cloud providers do you prefer?",
            cardinality: Cardinality::Multiple,
            options: vec![
                option(
                    "aws",
                    "Amazon Web Services",
                    "Most comprehensive service offering",
                ),
                option(
                    "azure",
                    "Microsoft Azure",
                    "Best integration with Microsoft tools",
                ),
                option(
                    "gcp",
                    "Google Cloud Platform",
                    "Strong in AI/ML and data analytics",
                ),
                option(
                    "all",
                    "No Preference",
                    "Show me the best options from all providers",
                ),
            ],
        },
    ]
}

fn standard_follow_ups(category: ServiceCategory) -> Vec<Question> {
    match category {
        ServiceCategory::Compute => vec![
            Question {
                id: question_ids::COMPUTE_WORKLOAD,
                prompt: "What type of compute workload?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("web", "Web/API Server", "HTTP/REST API services"),
                    option("ml", "ML Training", "Machine learning model training"),
                    option("batch", "Batch Processing", "Scheduled data processing"),
                ],
            },
            Question {
                id: question_ids::COMPUTE_TRAFFIC,
                prompt: "Expected traffic load?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("low", "Low", "< 1000 requests/day"),
                    option("medium", "Medium", "1K - 100K requests/day"),
                    option("high", "High", "> 100K requests/day"),
                ],
            },
            Question {
                id: question_ids::COMPUTE_GPU,
                prompt: "Do you need GPU acceleration?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("yes", "Yes", "GPU-intensive workloads"),
                    option("no", "No", "CPU-only workloads"),
                ],
            },
        ],
        ServiceCategory::Storage => vec![
            Question {
                id: "storage_access",
                prompt: "How often will you access the data?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("hot", "Hot", "Frequent access (daily)"),
                    option("warm", "Warm", "Occasional access (weekly)"),
                    option("cold", "Cold", "Rare access (monthly)"),
                ],
            },
            Question {
                id: "storage_size",
                prompt: "How much storage do you need?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("small", "< 100 GB", "Small datasets"),
                    option("medium", "100 GB - 10 TB", "Medium datasets"),
                    option("large", "> 10 TB", "Large datasets"),
                ],
            },
        ],
        ServiceCategory::Database => vec![
            Question {
                id: "db_type",
                prompt: "Which type of database?",
                cardinality: Cardinality::Single,
                options: vec![
                    option(
                        "sql",
                        "SQL Database",
                        "Relational database (MySQL, PostgreSQL)",
                    ),
                    option(
                        "nosql",
                        "NoSQL Database",
                        "Document/Key-value store (MongoDB, DynamoDB)",
                    ),
                ],
            },
            Question {
                id: "db_workload",
                prompt: "Database workload type?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("oltp", "OLTP", "Online transaction processing"),
                    option("olap", "OLAP", "Online analytical processing"),
                ],
            },
        ],
        ServiceCategory::Networking => vec![
            Question {
                id: "network_latency",
                prompt: "Latency sensitivity?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("low", "Low Sensitivity", "Can tolerate higher latency"),
                    option(
                        "medium",
                        "Medium Sensitivity",
                        "Moderate latency requirements",
                    ),
                    option("high", "High Sensitivity", "Ultra-low latency required"),
                ],
            },
            Question {
                id: "network_cdn",
                prompt: "Need Content Delivery Network?",
                cardinality: Cardinality::Single,
                options: vec![
                    option("yes", "Yes", "Global content distribution"),
                    option("no", "No", "Single region deployment"),
                ],
            },
        ],
        ServiceCategory::Security => vec![Question {
            id: "security_compliance",
            prompt: "Compliance requirements?",
            cardinality: Cardinality::Multiple,
            options: vec![
                option("hipaa", "HIPAA", "Healthcare data protection"),
                option("gdpr", "GDPR", "EU data protection regulation"),
                option("soc2", "SOC 2", "Security and availability standards"),
                option("none", "None", "No specific compliance needed"),
            ],
        }],
        ServiceCategory::Monitoring => vec![Question {
            id: "monitoring_metrics",
            prompt: "What metrics do you want to track?",
            cardinality: Cardinality::Multiple,
            options: vec![
                option("performance", "Performance", "CPU, memory, disk I/O"),
                option("availability", "Availability", "Uptime and health checks"),
                option("costs", "Costs", "Spending and budget alerts"),
                option("security", "Security", "Security events and threats"),
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(sequence: &[&Question]) -> Vec<&'static str> {
        sequence.iter().map(|question| question.id).collect()
    }

    fn with_services(services: Vec<&str>) -> AnswerStore {
        let mut answers = AnswerStore::new();
        answers.record(question_ids::SERVICES, services);
        answers
    }

    #[test]
    fn question_ids_are_unique_across_the_whole_graph() {
        let blueprint = QuestionnaireBlueprint::standard();
        let mut seen = HashSet::new();

        for question in blueprint.all_questions() {
            assert!(seen.insert(question.id), "duplicate id {}", question.id);
        }
        assert_eq!(seen.len(), 14);
    }

    #[test]
    fn unanswered_questionnaire_resolves_to_base_sequence() {
        let blueprint = QuestionnaireBlueprint::standard();

        let sequence = blueprint.resolve(&AnswerStore::new());

        assert_eq!(
            ids(&sequence),
            vec![
                question_ids::WORKLOAD_TYPE,
                question_ids::SERVICES,
                question_ids::PROVIDERS
            ]
        );
    }

    #[test]
    fn follow_ups_follow_selection_order_without_duplicates() {
        let blueprint = QuestionnaireBlueprint::standard();
        let answers = with_services(vec!["storage", "compute", "storage", "quantum"]);

        let sequence = blueprint.resolve(&answers);

        assert_eq!(
            ids(&sequence)[3..],
            [
                "storage_access",
                "storage_size",
                question_ids::COMPUTE_WORKLOAD,
                question_ids::COMPUTE_TRAFFIC,
                question_ids::COMPUTE_GPU,
            ]
        );
    }

    #[test]
    fn resolution_is_independent_of_answer_history() {
        let blueprint = QuestionnaireBlueprint::standard();
        let mut changed = with_services(vec!["database"]);
        changed.record("db_type", "sql");
        changed.record(question_ids::SERVICES, vec!["monitoring", "security"]);
        let fresh = with_services(vec!["monitoring", "security"]);

        assert_eq!(
            ids(&blueprint.resolve(&changed)),
            ids(&blueprint.resolve(&fresh))
        );
    }

    #[test]
    fn extending_the_selection_keeps_earlier_follow_ups_in_order() {
        let blueprint = QuestionnaireBlueprint::standard();
        let smaller = ids(&blueprint.resolve(&with_services(vec!["compute"])));
        let larger = ids(&blueprint.resolve(&with_services(vec!["compute", "networking"])));

        let dynamic_smaller = &smaller[3..];
        let dynamic_larger = &larger[3..];
        let mut cursor = dynamic_larger.iter();
        for id in dynamic_smaller {
            assert!(cursor.any(|candidate| candidate == id), "{id} missing");
        }
    }

    #[test]
    fn scalar_answers_to_multiple_choice_questions_become_sets() {
        let blueprint = QuestionnaireBlueprint::standard();
        let raw: AnswerStore = serde_json::from_str(
            r#"{"workload_type":"web","services":"compute","providers":"aws","legacy":"x"}"#,
        )
        .expect("answers parse");

        let conformed = blueprint.conform(&raw).expect("scalars are coerced");

        assert_eq!(conformed.multiple(question_ids::SERVICES), ["compute".to_string()]);
        assert_eq!(conformed.multiple(question_ids::PROVIDERS), ["aws".to_string()]);
        assert_eq!(conformed.single(question_ids::WORKLOAD_TYPE), "web");
        assert!(conformed.contains("legacy"));
        assert_eq!(blueprint.resolve(&conformed).len(), 6);
    }

    #[test]
    fn sets_for_single_choice_questions_are_rejected() {
        let blueprint = QuestionnaireBlueprint::standard();
        let mut raw = AnswerStore::new();
        raw.record(question_ids::WORKLOAD_TYPE, vec!["web", "ml"]);

        let err = blueprint.conform(&raw).expect_err("cardinality mismatch");

        assert_eq!(
            err,
            QuestionnaireError::CardinalityMismatch {
                question_id: question_ids::WORKLOAD_TYPE.to_string(),
                expected: Cardinality::Single,
            }
        );
    }

    #[test]
    fn deselected_category_answers_are_inactive_but_retained() {
        let blueprint = QuestionnaireBlueprint::standard();
        let mut answers = with_services(vec!["compute"]);
        answers.record(question_ids::COMPUTE_GPU, "yes");
        answers.record(question_ids::SERVICES, vec!["storage"]);

        let active = blueprint.active_answers(&answers);

        assert!(answers.contains(question_ids::COMPUTE_GPU));
        assert!(!active.contains(question_ids::COMPUTE_GPU));
        assert!(active.contains(question_ids::SERVICES));
    }
}
