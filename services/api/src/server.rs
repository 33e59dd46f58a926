use crate::cli::StubArgs;
use loan_advisor::config::AppConfig;
use loan_advisor::error::AppError;
use loan_advisor::evaluation::stub::EVALUATE_CASE_PATH;
use loan_advisor::evaluation::{demo_response, stub_router};
use loan_advisor::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: StubArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.stub.host = host;
    }
    if let Some(port) = args.port.take() {
        config.stub.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let app = stub_router(demo_response());

    let addr = config.stub.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    warn!("stub answers every case with the same canned evaluation");
    info!(?config.environment, %addr, path = EVALUATE_CASE_PATH, "demo evaluation stub ready");

    axum::serve(listener, app).await?;
    Ok(())
}
