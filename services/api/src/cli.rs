use crate::demo::{
    run_guidance, run_history, run_inquiry, run_match, run_simulation, GuidanceArgs, HistoryArgs,
    InquiryArgs, MatchArgs, SimulateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shelter_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shelter Match",
    about = "Score, rank, and track animal adoptions from the command line",
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
    /// Rank animals for an adopter, or analyse one pairing in detail
    Match(MatchArgs),
    /// Run a full adoption inquiry and record it in the session store
    Inquiry(InquiryArgs),
    /// Run inquiries for several adopters and print a summary
    Simulate(SimulateArgs),
    /// Show match history and statistics from the session store
    History(HistoryArgs),
    /// Print post-adoption guidance or training tips
    Guidance(GuidanceArgs),
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
        Command::Match(args) => run_match(args),
        Command::Inquiry(args) => run_inquiry(args),
        Command::Simulate(args) => run_simulation(args),
        Command::History(args) => run_history(args),
        Command::Guidance(args) => run_guidance(args),
    }
}
