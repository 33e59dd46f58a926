mod cli;
mod report;
mod server;

use loan_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
