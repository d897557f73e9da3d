//! Owner-profile stage of the pet enrollment flow: form gating, snapshot assembly and
//! the submit-and-transition protocol around the remote registration call.

use async_trait::async_trait;
use shared::{
    domain::LoadingHandle,
    enrollment::EnrollmentRequest,
    protocol::{EnrollmentResult, RemoteOutcome},
};

pub mod bridge;
pub mod config;
pub mod coordinator;
pub mod events;
pub mod form;
pub mod http;
pub mod validator;

pub use coordinator::{SubmissionCoordinator, SubmissionPhase};
pub use events::{EnrollmentFailure, FailureCategory, UiEvent};
pub use form::{FormEvent, FormState, OwnerField};
pub use http::HttpEnrollmentClient;

/// Remote registration service. Every call resolves exactly once.
#[async_trait]
pub trait RemoteEnrollmentClient: Send + Sync {
    async fn submit(&self, request: EnrollmentRequest) -> RemoteOutcome;
}

/// Presentation and navigation requests issued by the coordinator. All calls arrive on
/// the interaction thread that owns the coordinator.
pub trait EnrollmentPresenter {
    fn submit_enabled_changed(&mut self, enabled: bool);
    fn present_loading(&mut self, dog_name: Option<&str>) -> LoadingHandle;
    fn dismiss_loading(&mut self, handle: LoadingHandle);
    fn navigate_to_result(&mut self, result: EnrollmentResult);
    fn show_error(&mut self, failure: &EnrollmentFailure);
}
