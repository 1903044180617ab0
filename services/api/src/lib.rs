mod cli;
mod infra;
mod listing;
mod routes;
mod server;

use document_requests::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
