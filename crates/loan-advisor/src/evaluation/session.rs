use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, info_span, warn, Instrument};

use super::client::{EvaluationClient, NetworkFailure};
use super::domain::EvaluationResult;
use super::form::FormState;
use super::render::{RenderState, RenderTargets, ResultRenderer, UNKNOWN_ERROR};
use super::request::{build_payload, PayloadFormat};

/// Runs one submission to completion: build the payload, show the loading state, call the
/// service, render whatever came back.
pub async fn evaluate_and_render<C, T>(
    client: &C,
    form: &FormState,
    format: PayloadFormat,
    renderer: &mut ResultRenderer<T>,
) -> RenderState
where
    C: EvaluationClient,
    T: RenderTargets,
{
    let payload = build_payload(form, format);
    renderer.begin();
    let outcome = client.evaluate(&payload).await;
    log_outcome(&outcome);
    renderer.render(&outcome)
}

struct Display<T> {
    renderer: ResultRenderer<T>,
    latest: u64,
}

/// Long-lived submission handler for an interactive form.
///
/// Each submit cancels the one still in flight, and only the most recent submission may
/// write to the display regions.
pub struct EvaluationSession<C, T> {
    client: Arc<C>,
    display: Arc<Mutex<Display<T>>>,
    format: PayloadFormat,
    submitted: u64,
    in_flight: Option<AbortHandle>,
}

impl<C, T> EvaluationSession<C, T>
where
    C: EvaluationClient + 'static,
    T: RenderTargets + Send + 'static,
{
    pub fn new(client: C, targets: T, format: PayloadFormat) -> Self {
        Self {
            client: Arc::new(client),
            display: Arc::new(Mutex::new(Display {
                renderer: ResultRenderer::new(targets),
                latest: 0,
            })),
            format,
            submitted: 0,
            in_flight: None,
        }
    }

    /// Starts evaluating the form as it stands now. The returned task resolves to the
    /// rendered state, or `None` when a newer submission took over the display first.
    ///
    /// Must be called from within a Tokio runtime; the evaluation runs on a spawned task.
    pub fn submit(&mut self, form: &FormState) -> JoinHandle<Option<RenderState>> {
        let payload = build_payload(form, self.format);

        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                previous.abort();
                info!("cancelled superseded submission");
            }
        }

        self.submitted += 1;
        let submission = self.submitted;
        {
            let mut display = lock(&self.display);
            display.latest = submission;
            display.renderer.begin();
        }

        let client = Arc::clone(&self.client);
        let display = Arc::clone(&self.display);
        let task = tokio::spawn(
            async move {
                let outcome = client.evaluate(&payload).await;
                log_outcome(&outcome);

                let mut display = lock(&display);
                if display.latest != submission {
                    debug!("newer submission owns the display, dropping outcome");
                    return None;
                }
                Some(display.renderer.render(&outcome))
            }
            .instrument(info_span!("submission", id = submission)),
        );

        self.in_flight = Some(task.abort_handle());
        task
    }

    pub fn state(&self) -> RenderState {
        lock(&self.display).renderer.state()
    }

    /// Reads the display regions under the session lock.
    pub fn with_targets<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(lock(&self.display).renderer.targets())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn log_outcome(outcome: &Result<EvaluationResult, NetworkFailure>) {
    match outcome {
        Ok(EvaluationResult::Success(report)) => info!(
            risk_flags = report.risk_flags.len(),
            suggestions = report.suggestions.len(),
            banks = report.bank_chances.len(),
            "evaluation completed"
        ),
        Ok(EvaluationResult::Failure { message }) => warn!(
            message = message.as_deref().unwrap_or(UNKNOWN_ERROR),
            "evaluation service reported a failure"
        ),
        Err(failure) => warn!(error = %failure, "evaluation request did not complete"),
    }
}
