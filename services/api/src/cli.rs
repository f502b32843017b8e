use clap::{Args, Parser, Subcommand};
use risk_profiler::error::AppError;

use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Health Risk Profiler",
    about = "Run and exercise the health risk profiler from the command line",
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
    /// Score a survey capture from a file and print the report
    Assess(AssessArgs),
    /// Run an end-to-end demo covering intake, scoring, and recommendations
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
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
