use super::{
    fsm::{RequestEvent, RequestStateMachine, RequestStatus},
    input::FormInput,
    outcome::{ResultState, SubmissionOutcome},
};
use crate::analysis::{AnalysisClient, AnalysisRequest, Document};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// A submission that has left `Idle` and owns its snapshot of the form.
#[derive(Debug)]
#[must_use = "a started submission leaves the form pending until it is finished"]
pub struct SubmissionTicket {
    id: Uuid,
    request: AnalysisRequest,
}

impl SubmissionTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSubmission {
    pub id: Uuid,
    pub outcome: SubmissionOutcome,
}

pub struct SubmissionController {
    client: Arc<dyn AnalysisClient>,
    input: FormInput,
    fsm: RequestStateMachine,
    result: Option<ResultState>,
    in_flight: Option<Uuid>,
}

impl SubmissionController {
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        Self {
            client,
            input: FormInput::default(),
            fsm: RequestStateMachine::new(),
            result: None,
            in_flight: None,
        }
    }

    pub fn client(&self) -> Arc<dyn AnalysisClient> {
        Arc::clone(&self.client)
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn status(&self) -> RequestStatus {
        self.fsm.current_state()
    }

    pub fn is_pending(&self) -> bool {
        self.fsm.is_pending()
    }

    pub fn result(&self) -> Option<&ResultState> {
        self.result.as_ref()
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result.as_ref().map(ResultState::text)
    }

    /// Replaces the selected file. Leaves any displayed answer alone.
    pub fn select_file(&mut self, document: Document) -> bool {
        if self.is_pending() {
            debug!("Ignoring file selection while a request is pending");
            return false;
        }
        debug!(
            "Selected file {} ({} bytes)",
            document.file_name,
            document.len()
        );
        self.input.file.select(document);
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        if self.is_pending() {
            debug!("Ignoring query edit while a request is pending");
            return false;
        }
        self.input.query = query.into();
        true
    }

    /// Clears the form and the result. Refused while pending.
    pub fn reset(&mut self) -> bool {
        if self.is_pending() {
            debug!("Ignoring reset while a request is pending");
            return false;
        }
        self.input.clear();
        self.result = None;
        debug!("Form reset");
        true
    }

    /// Moves to `Pending` and snapshots the inputs. Returns `None`, changing
    /// nothing, when a request is already pending or an input is missing.
    pub fn begin_submit(&mut self) -> Option<SubmissionTicket> {
        if self.is_pending() {
            debug!("Ignoring submit while a request is pending");
            return None;
        }

        let request = match self.input.snapshot() {
            Some(request) => request,
            None => {
                debug!(
                    "Submit skipped: file selected = {}, query empty = {}",
                    self.input.file.is_selected(),
                    self.input.query.is_empty()
                );
                return None;
            }
        };

        if let Err(e) = self.fsm.transition(RequestEvent::Submit) {
            warn!("Could not start submission: {}", e);
            return None;
        }

        let id = Uuid::new_v4();
        self.result = None;
        self.in_flight = Some(id);
        info!(submission_id = %id, "Submitting {} for analysis", request.document.file_name);

        Some(SubmissionTicket { id, request })
    }

    /// Sends the ticket's request and reconciles whatever comes back into an
    /// outcome. Never fails: errors become [`SubmissionOutcome::Failure`].
    pub async fn execute(
        client: Arc<dyn AnalysisClient>,
        ticket: SubmissionTicket,
    ) -> CompletedSubmission {
        let SubmissionTicket { id, request } = ticket;
        let span = info_span!("submission", submission_id = %id);

        let result = client.analyze(request).instrument(span).await;
        if let Err(e) = &result {
            if e.is_transport() {
                error!(submission_id = %id, "Analysis request failed: {}", e);
            } else {
                error!(submission_id = %id, "Analysis response could not be used: {}", e);
            }
        }

        CompletedSubmission {
            id,
            outcome: SubmissionOutcome::reconcile(result),
        }
    }

    /// Publishes the outcome and returns to `Idle`. A completion that does not
    /// belong to the in-flight submission is dropped.
    pub fn finish(&mut self, completed: CompletedSubmission) -> bool {
        if self.in_flight != Some(completed.id) {
            warn!(
                submission_id = %completed.id,
                "Dropping result of a submission that is not in flight"
            );
            return false;
        }

        if let Err(e) = self.fsm.transition(RequestEvent::Settle) {
            warn!("Could not settle submission {}: {}", completed.id, e);
            return false;
        }

        info!(
            submission_id = %completed.id,
            failed = completed.outcome.is_failure(),
            "Submission settled"
        );
        self.in_flight = None;
        self.result = Some(ResultState::new(completed.outcome));
        true
    }

    /// Runs one whole submission cycle. `None` means nothing was sent.
    pub async fn submit(&mut self) -> Option<SubmissionOutcome> {
        let ticket = self.begin_submit()?;
        let completed = Self::execute(self.client(), ticket).await;
        let outcome = completed.outcome.clone();
        self.finish(completed);
        Some(outcome)
    }
}
