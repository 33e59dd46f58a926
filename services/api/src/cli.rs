use crate::report::format_regions;
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_advisor::config::{parse_endpoint, timeout_from_secs, AppConfig};
use loan_advisor::error::AppError;
use loan_advisor::evaluation::{
    build_payload, evaluate_and_render, FormState, HttpEvaluationClient, MemoryTargets,
    PayloadFormat, ResultRenderer,
};
use loan_advisor::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Case Evaluator",
    about = "Submit loan evaluation forms to the evaluation service and show the outcome",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a filled-in form and print the rendered evaluation
    Evaluate(EvaluateArgs),
    /// Print the JSON payload a form would submit, without sending it
    Payload(FormArgs),
    /// Serve the demo evaluation stub that answers every case with a canned result
    Stub(StubArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct FormArgs {
    /// JSON file holding the form's field values
    #[arg(long)]
    pub(crate) form: Option<PathBuf>,
    /// Single field value, applied after --form (repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub(crate) fields: Vec<String>,
    /// Build the flat single-applicant payload instead of the canonical one
    #[arg(long)]
    pub(crate) legacy: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    #[command(flatten)]
    pub(crate) form: FormArgs,
    /// Override the configured evaluation endpoint
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Abort the request after this many seconds
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
    /// Retry transport failures this many times
    #[arg(long)]
    pub(crate) retries: Option<u32>,
    /// Print the display regions as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StubArgs {
    /// Override the configured host for the stub server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the stub server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Payload(args) => run_payload(args),
        Command::Stub(args) => server::run(args).await,
    }
}

async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(endpoint) = args.endpoint.as_deref() {
        config.evaluation.endpoint = parse_endpoint(endpoint)?;
    }
    if let Some(secs) = args.timeout_secs {
        config.evaluation.timeout = Some(timeout_from_secs(secs)?);
    }
    if let Some(retries) = args.retries {
        config.evaluation.retry.max_retries = retries;
    }
    config.evaluation.payload = payload_format(config.evaluation.payload, &args.form);

    telemetry::init(&config.telemetry)?;

    let form = load_form(&args.form)?;
    let client = HttpEvaluationClient::new(&config.evaluation)?;
    info!(
        endpoint = %client.endpoint(),
        payload = config.evaluation.payload.label(),
        "submitting form"
    );

    let mut renderer = ResultRenderer::new(MemoryTargets::default());
    evaluate_and_render(&client, &form, config.evaluation.payload, &mut renderer).await;
    let targets = renderer.into_targets();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        print!("{}", format_regions(&targets));
    }
    Ok(())
}

fn run_payload(args: FormArgs) -> Result<(), AppError> {
    println!("{}", payload_json(&args)?);
    Ok(())
}

/// The payload `evaluate` would send for these arguments, pretty-printed.
pub(crate) fn payload_json(args: &FormArgs) -> Result<String, AppError> {
    let config = AppConfig::load()?;
    let form = load_form(args)?;
    let format = payload_format(config.evaluation.payload, args);
    Ok(serde_json::to_string_pretty(&build_payload(&form, format))?)
}

/// `--legacy` wins over the configured payload format.
fn payload_format(configured: PayloadFormat, args: &FormArgs) -> PayloadFormat {
    if args.legacy {
        PayloadFormat::Legacy
    } else {
        configured
    }
}

pub(crate) fn load_form(args: &FormArgs) -> Result<FormState, AppError> {
    let mut form = match &args.form {
        Some(path) => FormState::from_json(&std::fs::read_to_string(path)?)?,
        None => FormState::new(),
    };
    form.apply_pairs(&args.fields)?;
    Ok(form)
}
