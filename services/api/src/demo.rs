use crate::infra::{load_answers, parse_provider_filter, AdvisorCatalog, CatalogArgs};
use chrono::{DateTime, Local};
use clap::{Args, ValueEnum};
use cloud_advisor::config::AppConfig;
use cloud_advisor::error::AppError;
use cloud_advisor::workflows::questionnaire::{
    question_ids, AnswerStore, AnswerValue, Cardinality, Question, QuestionnaireBlueprint,
    QuestionnaireSession, StepOutcome,
};
use cloud_advisor::workflows::recommendation::{
    ProviderFilter, RecommendationService, RecommendationSummary,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Answers collected so far (JSON object keyed by question id)
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Zero-based step to display as current
    #[arg(long, default_value_t = 0)]
    pub(crate) step: usize,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Completed answers (JSON object keyed by question id)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Only display one provider: all, aws, gcp or azure
    #[arg(long, value_parser = parse_provider_filter, default_value = "all")]
    pub(crate) provider: ProviderFilter,
    /// Emit the recommendation summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Scripted answer set to walk through
    #[arg(long, value_enum, default_value_t = Scenario::MlTraining)]
    pub(crate) scenario: Scenario,
    /// Only display one provider: all, aws, gcp or azure
    #[arg(long, value_parser = parse_provider_filter, default_value = "all")]
    pub(crate) provider: ProviderFilter,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scenario {
    /// GPU training cluster with bulk storage
    MlTraining,
    /// Customer-facing web tier behind a CDN
    WebApp,
    /// Nightly batch jobs feeding an analytics database
    DataPlatform,
}

impl Scenario {
    fn label(self) -> &'static str {
        match self {
            Self::MlTraining => "ML training cluster",
            Self::WebApp => "Customer-facing web application",
            Self::DataPlatform => "Batch data platform",
        }
    }

    fn script(self) -> Vec<(&'static str, AnswerValue)> {
        match self {
            Self::MlTraining => vec![
                (question_ids::WORKLOAD_TYPE, "ml".into()),
                (question_ids::SERVICES, vec!["compute", "storage"].into()),
                (question_ids::PROVIDERS, vec!["all"].into()),
                (question_ids::COMPUTE_WORKLOAD, "ml".into()),
                (question_ids::COMPUTE_TRAFFIC, "medium".into()),
                (question_ids::COMPUTE_GPU, "yes".into()),
                ("storage_access", "hot".into()),
                ("storage_size", "large".into()),
            ],
            Self::WebApp => vec![
                (question_ids::WORKLOAD_TYPE, "web".into()),
                (
                    question_ids::SERVICES,
                    vec!["compute", "networking", "security"].into(),
                ),
                (question_ids::PROVIDERS, vec!["aws", "gcp"].into()),
                (question_ids::COMPUTE_WORKLOAD, "web".into()),
                (question_ids::COMPUTE_TRAFFIC, "high".into()),
                (question_ids::COMPUTE_GPU, "no".into()),
                ("network_latency", "high".into()),
                ("network_cdn", "yes".into()),
                ("security_compliance", vec!["soc2", "gdpr"].into()),
            ],
            Self::DataPlatform => vec![
                (question_ids::WORKLOAD_TYPE, "batch".into()),
                (
                    question_ids::SERVICES,
                    vec!["compute", "database", "monitoring"].into(),
                ),
                (question_ids::PROVIDERS, vec!["azure"].into()),
                (question_ids::COMPUTE_WORKLOAD, "batch".into()),
                (question_ids::COMPUTE_TRAFFIC, "low".into()),
                (question_ids::COMPUTE_GPU, "no".into()),
                ("db_type", "sql".into()),
                ("db_workload", "olap".into()),
                ("monitoring_metrics", vec!["performance", "costs"].into()),
            ],
        }
    }
}

#[derive(Serialize)]
struct RecommendationOutput<'a> {
    generated_at: DateTime<Local>,
    catalog: &'static str,
    #[serde(flatten)]
    summary: &'a RecommendationSummary,
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let answers = match args.answers {
        Some(path) => load_answers(&path)?,
        None => AnswerStore::new(),
    };

    let session = QuestionnaireSession::resume(QuestionnaireBlueprint::standard(), answers, args.step);
    for line in render_questionnaire(&session) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        answers,
        provider,
        json,
        catalog,
    } = args;

    let answers = load_answers(&answers)?;
    let catalog = AdvisorCatalog::from_config(&catalog.resolve(AppConfig::load()?.catalog));
    let source = catalog.source_label();
    let service = RecommendationService::new(Arc::new(catalog));

    let report = service.recommend(&answers).await?;
    let summary = report.summary(provider);

    if json {
        let output = RecommendationOutput {
            generated_at: Local::now(),
            catalog: source,
            summary: &summary,
        };
        let rendered = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        for line in render_summary(&summary, source, Local::now()) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        scenario,
        provider,
        catalog,
    } = args;

    println!("Cloud advisor demo: {}", scenario.label());

    let (session, transcript) = scripted_walk(scenario)?;
    for line in transcript {
        println!("{line}");
    }

    let catalog = AdvisorCatalog::from_config(&catalog.resolve(AppConfig::load()?.catalog));
    let source = catalog.source_label();
    let service = RecommendationService::new(Arc::new(catalog));
    let report = service.recommend(session.answers()).await?;

    println!();
    for line in render_summary(&report.summary(provider), source, Local::now()) {
        println!("{line}");
    }

    Ok(())
}

/// Answers every question the session presents, using the scenario's script and falling back
/// to each question's first option. Returns the completed session and a printable transcript.
pub(crate) fn scripted_walk(
    scenario: Scenario,
) -> Result<(QuestionnaireSession, Vec<String>), AppError> {
    let script = scenario.script();
    let mut session = QuestionnaireSession::default();
    let mut transcript = Vec::new();

    loop {
        let question = session.current_question().clone();
        let value = script
            .iter()
            .find(|(question_id, _)| *question_id == question.id)
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| first_option(&question));

        transcript.push(format!(
            "\nStep {} of {} ({:.0}% complete)",
            session.step_index() + 1,
            session.total_steps(),
            session.progress_fraction() * 100.0
        ));
        transcript.push(format!(
            "{} [{}]",
            question.prompt,
            question.cardinality.label()
        ));
        for option in &question.options {
            transcript.push(format!(
                "  - {}: {} ({})",
                option.id, option.label, option.description
            ));
        }

        session.record(question.id, value.clone())?;
        transcript.push(format!("> {}", answer_labels(&question, &value)));

        match session.advance() {
            StepOutcome::Moved { .. } => continue,
            StepOutcome::Completed => break,
            StepOutcome::Blocked { question_id } => {
                transcript.push(format!("Stopped: '{question_id}' still needs an answer"));
                break;
            }
            StepOutcome::Exited => break,
        }
    }

    Ok((session, transcript))
}

fn first_option(question: &Question) -> AnswerValue {
    let first = question
        .options
        .first()
        .map(|option| option.id)
        .unwrap_or_default();
    match question.cardinality {
        Cardinality::Single => AnswerValue::from(first),
        Cardinality::Multiple => AnswerValue::from(vec![first]),
    }
}

fn answer_labels(question: &Question, value: &AnswerValue) -> String {
    let labels: Vec<&str> = value
        .option_ids()
        .into_iter()
        .map(|option_id| {
            question
                .option(option_id)
                .map(|option| option.label)
                .unwrap_or(option_id)
        })
        .collect();

    if labels.is_empty() {
        "unanswered".to_string()
    } else {
        labels.join(", ")
    }
}

pub(crate) fn render_questionnaire(session: &QuestionnaireSession) -> Vec<String> {
    let snapshot = session.snapshot();
    let mut lines = vec![format!(
        "Questionnaire: {} questions, step {} of {} ({:.0}% complete)",
        snapshot.total_steps,
        snapshot.step + 1,
        snapshot.total_steps,
        snapshot.progress * 100.0
    )];

    for (index, question) in snapshot.questions.iter().enumerate() {
        let answer = session.answers().get(question.id, question.cardinality);
        let marker = if index == snapshot.step {
            ">"
        } else if answer.is_empty() {
            " "
        } else {
            "x"
        };
        lines.push(format!(
            "[{marker}] {}. {} ({}): {}",
            index + 1,
            question.prompt,
            question.id,
            answer_labels(question, &answer)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Options for '{}'", snapshot.current_question.id));
    for option in &snapshot.current_question.options {
        lines.push(format!(
            "  - {}: {} ({})",
            option.id, option.label, option.description
        ));
    }
    if snapshot.is_last_step && snapshot.can_advance {
        lines.push("Answers complete; run `recommend` to score the catalog.".to_string());
    }

    lines
}

pub(crate) fn render_summary(
    summary: &RecommendationSummary,
    source: &str,
    generated_at: DateTime<Local>,
) -> Vec<String> {
    let mut lines = vec![
        "Cloud recommendations".to_string(),
        format!(
            "Generated {} from the {}",
            generated_at.format("%Y-%m-%d %H:%M"),
            source
        ),
        format!("Provider filter: {}", summary.provider_filter),
    ];

    if summary.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("No recommendations match the current answers and filter.".to_string());
        return lines;
    }

    for view in &summary.recommendations {
        lines.push(String::new());
        lines.push(format!(
            "#{} {} {} ({})",
            view.rank,
            view.provider.label(),
            view.instance_type,
            view.instance_id
        ));
        lines.push(format!(
            "   Score {} | {}/month",
            view.score, view.monthly_cost
        ));
        lines.push(format!(
            "   {} vCPU | {} RAM | GPU {} | Network {} | {}",
            view.cpu, view.ram, view.gpu, view.network, view.use_case
        ));
        lines.push(format!("   Why: {}", view.justification));
        if !view.compliance.is_empty() {
            lines.push(format!("   Compliance: {}", view.compliance.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Detailed comparison".to_string());
    lines.push(format!(
        "{:<5} {:<9} {:<20} {:>5} {:>7} {:<12} {:>10} {:>6}",
        "Rank", "Provider", "Instance", "vCPU", "RAM", "GPU", "Monthly", "Score"
    ));
    for row in &summary.comparison {
        lines.push(format!(
            "{:<5} {:<9} {:<20} {:>5} {:>7} {:<12} {:>10} {:>6}",
            format!("#{}", row.rank),
            row.provider.label(),
            row.instance_type,
            row.cpu,
            row.ram,
            row.gpu,
            row.monthly_cost,
            row.score
        ));
    }

    let cost = &summary.cost_analysis;
    lines.push(String::new());
    lines.push("Cost analysis".to_string());
    for entry in &cost.breakdown {
        lines.push(format!(
            "  #{} {} {}: {} per month",
            entry.rank,
            entry.provider.label(),
            entry.instance_type,
            entry.monthly_cost
        ));
    }
    lines.push(format!(
        "  If you scale {}x: {} per month with horizontal scaling",
        cost.scale_factor, cost.scaled_monthly_cost
    ));
    lines.push(format!("  Tip: {}", cost.optimization_tip));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cloud_advisor::workflows::catalog::StaticCatalog;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn every_scenario_walks_to_completion() {
        for scenario in [Scenario::MlTraining, Scenario::WebApp, Scenario::DataPlatform] {
            let (session, transcript) = scripted_walk(scenario).expect("script is valid");

            assert!(session.is_last_step(), "{scenario:?} stopped early");
            assert!(session.can_advance());
            assert!(!transcript.iter().any(|line| line.starts_with("Stopped")));
            for question in session.questions() {
                assert!(
                    session.answers().contains(question.id),
                    "{scenario:?} left {} unanswered",
                    question.id
                );
            }
        }
    }

    #[test]
    fn ml_scenario_visits_compute_then_storage_follow_ups() {
        let (session, transcript) = scripted_walk(Scenario::MlTraining).expect("script is valid");

        let ids: Vec<&str> = session.questions().iter().map(|question| question.id).collect();
        assert_eq!(
            ids,
            vec![
                "workload_type",
                "services",
                "providers",
                "compute_workload",
                "compute_traffic",
                "compute_gpu",
                "storage_access",
                "storage_size",
            ]
        );
        assert!(transcript.contains(&"> Machine Learning".to_string()));
        assert!(transcript.contains(&"> Compute, Storage".to_string()));
    }

    #[test]
    fn questionnaire_rendering_marks_the_current_step() {
        let mut answers = AnswerStore::new();
        answers.record(question_ids::WORKLOAD_TYPE, "web");
        let session =
            QuestionnaireSession::resume(QuestionnaireBlueprint::standard(), answers, 1);

        let lines = render_questionnaire(&session);

        assert_eq!(
            lines[0],
            "Questionnaire: 3 questions, step 2 of 3 (67% complete)"
        );
        assert!(lines[1].starts_with("[x] 1."));
        assert!(lines[1].ends_with(": Web Application"));
        assert!(lines[2].starts_with("[>] 2."));
        assert!(lines[2].ends_with(": unanswered"));
        assert!(lines.contains(&"Options for 'services'".to_string()));
    }

    #[tokio::test]
    async fn summary_rendering_includes_comparison_and_costs() {
        let service = RecommendationService::new(Arc::new(StaticCatalog::reference()));
        let mut answers = AnswerStore::new();
        answers.record(question_ids::WORKLOAD_TYPE, "web");
        answers.record(question_ids::SERVICES, vec!["storage"]);
        answers.record(question_ids::PROVIDERS, vec!["aws"]);

        let report = service.recommend(&answers).await.expect("recommendations");
        let lines = render_summary(
            &report.summary(ProviderFilter::All),
            "built-in reference catalog",
            fixed_time(),
        );

        assert_eq!(
            lines[1],
            "Generated 2026-03-02 09:30 from the built-in reference catalog"
        );
        assert!(lines.contains(&"#1 AWS t3.medium (aws-t3-medium)".to_string()));
        assert!(lines.contains(&"   Score 65 | $29.95/month".to_string()));
        assert!(lines.contains(&"  If you scale 2x: $59.90 per month with horizontal scaling".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("#1    AWS")));
    }

    #[test]
    fn empty_summaries_say_so() {
        let lines = render_summary(
            &cloud_advisor::workflows::recommendation::RecommendationReport::default()
                .summary(ProviderFilter::All),
            "CSV catalog exports",
            fixed_time(),
        );

        assert_eq!(
            lines.last().map(String::as_str),
            Some("No recommendations match the current answers and filter.")
        );
    }
}
