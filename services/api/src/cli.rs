use crate::listing::{run_catalog, run_list, CatalogArgs, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use document_requests::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Outstanding Document Requests",
    about = "Serve and inspect the document requests applicants still have to answer",
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
    /// Inspect outstanding document requests from the command line
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RequestsCommand {
    /// List the outstanding requests of a resident's latest application
    List(ListArgs),
    /// Print the document type catalog
    Catalog(CatalogArgs),
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
        Command::Requests {
            command: RequestsCommand::List(args),
        } => run_list(args).await,
        Command::Requests {
            command: RequestsCommand::Catalog(args),
        } => run_catalog(args),
    }
}
