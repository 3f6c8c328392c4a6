use crate::batch::{run_aml_triage, run_risk_score, AmlTriageArgs, RiskScoreArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use decision_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Decision Engine",
    about = "Score credit applications, triage AML alerts, and serve credit decisions",
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
    /// Batch credit risk scoring
    Risk {
        #[command(subcommand)]
        command: RiskCommand,
    },
    /// Batch AML alert generation and triage
    Aml {
        #[command(subcommand)]
        command: AmlCommand,
    },
    /// Run an end-to-end demo over bundled sample data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RiskCommand {
    /// Score a JSON array of loan applications
    Score(RiskScoreArgs),
}

#[derive(Subcommand, Debug)]
enum AmlCommand {
    /// Generate and prioritise alerts for a transaction CSV
    Triage(AmlTriageArgs),
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
        Command::Risk {
            command: RiskCommand::Score(args),
        } => run_risk_score(args),
        Command::Aml {
            command: AmlCommand::Triage(args),
        } => run_aml_triage(args),
        Command::Demo(args) => run_demo(args),
    }
}
