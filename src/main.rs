use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use project_eval::config::{AppConfig, BackendConfig};
use project_eval::error::AppError;
use project_eval::evaluation::{
    EvaluationBundle, MetricResult, ProjectEvaluator, PromptCatalog, PromptLanguage,
};
use project_eval::intake::{FormSubmission, QuestionAnswers};
use project_eval::sources::{read_json, HistoricalSources};
use project_eval::telemetry;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "project-eval",
    about = "Score project proposals against the impact, effort and risk rubric",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one project from an answers file
    Evaluate(EvaluateArgs),
    /// List the metrics and submetrics of a prompt catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Intake answers: a form submission or a flat question -> answer object
    #[arg(long)]
    answers: PathBuf,
    /// Past decision-report evaluations
    #[arg(long)]
    evaluations: Option<PathBuf>,
    /// Past intake-form answers
    #[arg(long)]
    intake: Option<PathBuf>,
    /// Current staff roster
    #[arg(long)]
    staff: Option<PathBuf>,
    /// Override the project name taken from the answers
    #[arg(long)]
    project_name: Option<String>,
    /// Use the deterministic offline backend
    #[arg(long)]
    stub: bool,
    /// Where to write the JSON results (defaults to a timestamped file)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Catalog language (en or tr); defaults to the configured language
    #[arg(long, value_parser = parse_language)]
    language: Option<PromptLanguage>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    project_name: String,
    evaluated_at: DateTime<Local>,
    backend: &'static str,
    #[serde(flatten)]
    bundle: EvaluationBundle,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Evaluate(args) => {
            telemetry::init(&config.telemetry)?;
            run_evaluation(args, config).await
        }
        Command::Catalog(args) => {
            let language = args.language.unwrap_or(config.evaluation.language);
            render_catalog(&PromptCatalog::standard(language));
            Ok(())
        }
    }
}

fn parse_language(raw: &str) -> Result<PromptLanguage, String> {
    PromptLanguage::parse(raw).ok_or_else(|| format!("unsupported language '{raw}' (use en or tr)"))
}

async fn run_evaluation(args: EvaluateArgs, config: AppConfig) -> Result<(), AppError> {
    let EvaluateArgs {
        answers,
        evaluations,
        intake,
        staff,
        project_name,
        stub,
        output,
    } = args;

    let answers = answers_from_value(read_json(&answers)?)?;
    let sources = HistoricalSources::from_values(
        read_optional(evaluations.as_deref())?,
        read_optional(intake.as_deref())?,
        read_optional(staff.as_deref())?,
    );

    let backend = if stub {
        BackendConfig::stub()
    } else {
        config.backend
    };
    let evaluator = ProjectEvaluator::from_config(&backend, config.evaluation);
    let context = answers.to_context(project_name.as_deref(), sources);

    info!(
        project = %context.project_name,
        backend = evaluator.backend_name(),
        "evaluating project"
    );
    let bundle = evaluator.evaluate(&context).await;

    let evaluated_at = Local::now();
    let report = EvaluationReport {
        project_name: context.project_name,
        evaluated_at,
        backend: evaluator.backend_name(),
        bundle,
    };
    render_report(&report);

    let output = output.unwrap_or_else(|| default_output_path(evaluated_at));
    fs::write(&output, serde_json::to_string_pretty(&report)?)?;
    println!("\nResults written to {}", output.display());
    Ok(())
}

/// Accepts a full form submission, a `question_answer_dict` wrapper, or a
/// flat question -> answer object.
fn answers_from_value(value: Value) -> Result<QuestionAnswers, AppError> {
    let Value::Object(mut map) = value else {
        return Err(AppError::InvalidRequest(
            "answers file must contain a JSON object".to_string(),
        ));
    };

    if let Some(Value::Object(answers)) = map.remove("question_answer_dict") {
        return Ok(QuestionAnswers::from_raw(answers));
    }
    if map.get("answers").is_some_and(Value::is_object) {
        let submission: FormSubmission = serde_json::from_value(Value::Object(map))?;
        return Ok(submission.question_answers());
    }
    Ok(QuestionAnswers::from_bilingual(map))
}

fn read_optional(path: Option<&Path>) -> Result<Value, AppError> {
    match path {
        Some(path) => Ok(read_json(path)?),
        None => Ok(Value::Null),
    }
}

fn default_output_path(evaluated_at: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "evaluation_results_{}.json",
        evaluated_at.format("%Y%m%d_%H%M%S")
    ))
}

fn render_report(report: &EvaluationReport) {
    println!("Project evaluation: {}", report.project_name);
    println!("Backend: {}", report.backend);

    for metric in report.bundle.metrics() {
        render_metric(metric);
    }
}

fn render_metric(metric: &MetricResult) {
    println!(
        "\n{}: {:.2} ({})",
        metric.metric.label(),
        metric.overall_score,
        metric.band.label()
    );
    println!("  {}", metric.overall_reason);
    for submetric in &metric.submetrics {
        println!(
            "  - {}: {:.2} | {}",
            submetric.name, submetric.score, submetric.reason
        );
    }
}

fn render_catalog(catalog: &PromptCatalog) {
    println!("Prompt catalog ({})", catalog.language().code());
    for metric in project_eval::evaluation::MetricId::ALL {
        println!("\n{} [{}]", metric.label(), metric);
        for entry in catalog.prompts_for(metric) {
            println!("  - {} ({}): {}", entry.label, entry.prompt.key, entry.prompt.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn flat_answers_are_reduced_to_english_labels() {
        let answers = answers_from_value(json!({"Project - Proje": "Atlas", "Company": "Acme"}))
            .expect("flat answers parse");
        assert_eq!(answers.get("Project"), Some("Atlas"));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn form_submissions_and_api_responses_are_recognised() {
        let submission = answers_from_value(json!({
            "form_id": "f-1",
            "answers": {"Project-Proje": "Atlas"}
        }))
        .expect("submission parses");
        assert_eq!(submission.project_name(), "Atlas");

        let response = answers_from_value(json!({
            "question_answer_dict": {"Project": "Beacon"}
        }))
        .expect("api response parses");
        assert_eq!(response.project_name(), "Beacon");
    }

    #[test]
    fn non_object_answers_are_rejected() {
        let err = answers_from_value(json!(["Atlas"])).expect_err("list rejected");
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn default_output_is_timestamped() {
        let at = Local
            .with_ymd_and_hms(2025, 10, 15, 6, 52, 22)
            .single()
            .expect("unambiguous local time");
        assert_eq!(
            default_output_path(at),
            PathBuf::from("evaluation_results_20251015_065222.json")
        );
    }

    #[test]
    fn cli_parses_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "project-eval",
            "evaluate",
            "--answers",
            "answers.json",
            "--stub",
            "--output",
            "out.json",
        ])
        .expect("evaluate parses");
        match cli.command {
            Command::Evaluate(args) => {
                assert!(args.stub);
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert!(args.evaluations.is_none());
            }
            Command::Catalog(_) => panic!("evaluate expected"),
        }

        let cli = Cli::try_parse_from(["project-eval", "catalog", "--language", "tr"])
            .expect("catalog parses");
        match cli.command {
            Command::Catalog(args) => assert_eq!(args.language, Some(PromptLanguage::Turkish)),
            Command::Evaluate(_) => panic!("catalog expected"),
        }
    }
}
