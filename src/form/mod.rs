mod controller;
pub mod fsm;
mod input;
mod outcome;

pub use controller::{CompletedSubmission, SubmissionController, SubmissionTicket};
pub use fsm::{RequestEvent, RequestStateMachine, RequestStatus};
pub use input::{FileSelection, FormInput};
pub use outcome::{FAILURE_MESSAGE, NO_ANSWER_MESSAGE, ResultState, SubmissionOutcome};
