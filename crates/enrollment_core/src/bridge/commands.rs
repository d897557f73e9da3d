//! Backend commands queued from the interaction thread to the backend worker.

use shared::{domain::SubmissionId, enrollment::EnrollmentRequest};

pub enum BackendCommand {
    SubmitEnrollment {
        submission_id: SubmissionId,
        request: Box<EnrollmentRequest>,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitEnrollment { .. } => "submit_enrollment",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
