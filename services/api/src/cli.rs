use crate::demo::{run_demo, run_questions, run_recommend, DemoArgs, QuestionsArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cloud_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Cloud Advisor",
    about = "Answer a short questionnaire and get ranked cloud instance recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show the question sequence implied by a set of answers
    Questions(QuestionsArgs),
    /// Score the catalog against an answers file and print the ranking
    Recommend(RecommendArgs),
    /// Walk through a scripted questionnaire and print the resulting recommendations
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions(args) => run_questions(args),
        Command::Recommend(args) => run_recommend(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
