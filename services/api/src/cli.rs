use crate::inspect::{
    run_areas, run_check_id, run_check_mobile, run_normalize_address, run_resolve, ResolveArgs,
    TextArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recall_atlas::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recall Atlas",
    about = "Serve and inspect recall constituency data from the command line",
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
    /// Resolve a municipality, district or ward to its recall constituency
    Resolve(ResolveArgs),
    /// List recall efforts grouped by municipality
    Areas,
    /// Check a national identification number
    CheckId(TextArgs),
    /// Check a mobile phone number
    CheckMobile(TextArgs),
    /// Rewrite section and floor numbers in an address
    NormalizeAddress(TextArgs),
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
        Command::Resolve(args) => run_resolve(args),
        Command::Areas => run_areas(),
        Command::CheckId(args) => {
            run_check_id(args);
            Ok(())
        }
        Command::CheckMobile(args) => {
            run_check_mobile(args);
            Ok(())
        }
        Command::NormalizeAddress(args) => {
            run_normalize_address(args);
            Ok(())
        }
    }
}
