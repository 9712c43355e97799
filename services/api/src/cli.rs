use crate::demo::{run_demo, run_rule_sets, run_score, DemoArgs, RuleSetsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use org_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Organization Scoring Service",
    about = "Serve and inspect completeness scores for directory organizations",
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
    /// Score an organization snapshot read from a JSON file
    Score(ScoreArgs),
    /// List registered categories or dump one rule set
    RuleSets(RuleSetsArgs),
    /// Score the bundled demo organizations and print their breakdowns
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
        Command::Score(args) => run_score(args),
        Command::RuleSets(args) => run_rule_sets(args),
        Command::Demo(args) => run_demo(args),
    }
}
