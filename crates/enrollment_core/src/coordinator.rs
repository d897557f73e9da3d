//! Submit orchestration for the owner-profile screen.
//!
//! The coordinator lives on the interaction thread. It gates the submit action on the
//! form, attaches the owner to the hand-off snapshot, asks the presenter for a loading
//! overlay, and queues the remote call on the backend worker. Completions come back
//! through [`UiEvent`]s that are only drained by [`SubmissionCoordinator::process_ui_events`]
//! or [`SubmissionCoordinator::wait_for_ui_event`], so dismissal and navigation always
//! run on the same thread that presented the overlay.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use shared::{
    domain::{LoadingHandle, SubmissionId},
    enrollment::EnrollmentSnapshot,
    protocol::RemoteOutcome,
};
use tracing::{debug, error, info, warn};

use crate::bridge::{commands::BackendCommand, orchestration::dispatch_backend_command};
use crate::events::{EnrollmentFailure, UiEvent};
use crate::form::{FormEvent, FormState, OwnerField};
use crate::EnrollmentPresenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validated,
    LoadingPresented,
    AwaitingRemote,
    ResultReady,
    Failed,
}

pub struct SubmissionCoordinator<P: EnrollmentPresenter> {
    presenter: P,
    form: FormState,
    snapshot: EnrollmentSnapshot,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    phase: SubmissionPhase,
    loading: Option<LoadingHandle>,
    in_flight: Option<SubmissionId>,
    next_submission_id: u64,
    last_outcome: Option<RemoteOutcome>,
    #[cfg(test)]
    transitions: Vec<SubmissionPhase>,
}

impl<P: EnrollmentPresenter> SubmissionCoordinator<P> {
    /// `handoff` is the snapshot produced by the pet and photo screens.
    pub fn new(
        mut presenter: P,
        handoff: EnrollmentSnapshot,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let form = FormState::new();
        presenter.submit_enabled_changed(form.can_submit());
        Self {
            presenter,
            form,
            snapshot: handoff,
            cmd_tx,
            ui_rx,
            phase: SubmissionPhase::Idle,
            loading: None,
            in_flight: None,
            next_submission_id: 1,
            last_outcome: None,
            #[cfg(test)]
            transitions: Vec::new(),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn snapshot(&self) -> &EnrollmentSnapshot {
        &self.snapshot
    }

    pub fn last_outcome(&self) -> Option<&RemoteOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn handle_form_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::FieldCommitted { field, value } => self.commit_field(field, value),
            FormEvent::FieldReturned { field, value } => self.advance_focus(field, value),
            FormEvent::SubmitRequested => {
                self.submit();
            }
        }
    }

    pub fn commit_field(&mut self, field: OwnerField, value: Option<String>) {
        let enabled = self.form.commit_field(field, value);
        debug!(field = field.label(), enabled, "owner field committed");
        self.presenter.submit_enabled_changed(enabled);
    }

    pub fn advance_focus(&mut self, field: OwnerField, value: Option<String>) {
        let enabled = self.form.advance_focus(field, value);
        debug!(
            field = field.label(),
            next = ?self.form.focus(),
            enabled,
            "owner field returned"
        );
        self.presenter.submit_enabled_changed(enabled);
    }

    /// Returns false when the request was ignored: a submission is already in flight,
    /// the form gate is closed, or the hand-off snapshot is incomplete.
    pub fn submit(&mut self) -> bool {
        if self.phase != SubmissionPhase::Idle {
            debug!(phase = ?self.phase, "submit ignored; enrollment already in flight");
            return false;
        }

        let Some(owner) = self.form.owner() else {
            debug!("submit ignored; owner fields incomplete");
            return false;
        };

        let snapshot = self.snapshot.with_owner(owner);
        let request = match snapshot.to_request() {
            Ok(request) => request,
            Err(err) => {
                debug!(%err, "submit ignored");
                return false;
            }
        };
        self.snapshot = snapshot;
        self.transition(SubmissionPhase::Validated);

        let handle = self.presenter.present_loading(self.snapshot.dog_name());
        self.loading = Some(handle);
        self.transition(SubmissionPhase::LoadingPresented);

        let submission_id = SubmissionId(self.next_submission_id);
        self.next_submission_id += 1;

        let cmd = BackendCommand::SubmitEnrollment {
            submission_id,
            request: Box::new(request),
        };
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => {
                self.in_flight = Some(submission_id);
                self.transition(SubmissionPhase::AwaitingRemote);
                info!(submission_id = submission_id.0, "enrollment dispatched");
            }
            Err(failure) => self.fail(failure),
        }
        true
    }

    /// Drains every pending backend event without blocking. Returns how many were handled.
    pub fn process_ui_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_ui_event(event);
            handled += 1;
        }
        handled
    }

    /// Blocks the interaction thread for at most `timeout` waiting for one backend event.
    pub fn wait_for_ui_event(&mut self, timeout: Duration) -> bool {
        match self.ui_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_ui_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                if self.in_flight.is_some() {
                    self.fail(EnrollmentFailure::BackendUnavailable(
                        "backend event channel closed".to_string(),
                    ));
                }
                false
            }
        }
    }

    /// Stops waiting on the in-flight submission: the overlay is dismissed and `failure` is
    /// shown. A completion that arrives later is dropped as stale. Returns false when
    /// nothing was in flight.
    pub fn abandon(&mut self, failure: EnrollmentFailure) -> bool {
        let Some(submission_id) = self.in_flight else {
            return false;
        };
        warn!(submission_id = submission_id.0, %failure, "abandoning enrollment");
        self.fail(failure);
        true
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => info!("{message}"),
            UiEvent::EnrollmentCompleted {
                submission_id,
                outcome,
            } => {
                if self.in_flight != Some(submission_id) {
                    warn!(
                        submission_id = submission_id.0,
                        outcome = outcome.label(),
                        "ignoring stale enrollment outcome"
                    );
                    return;
                }
                self.complete(outcome);
            }
            UiEvent::BackendFailed(message) => {
                error!("{message}");
                if self.in_flight.is_some() {
                    self.fail(EnrollmentFailure::BackendUnavailable(message));
                }
            }
        }
    }

    fn complete(&mut self, outcome: RemoteOutcome) {
        self.dismiss_loading();
        match &outcome {
            RemoteOutcome::Success(result) => {
                self.transition(SubmissionPhase::ResultReady);
                info!(enrollment_id = %result.id, "enrollment registered");
                self.presenter.navigate_to_result(result.clone());
            }
            other => {
                if let Some(failure) = EnrollmentFailure::from_outcome(other) {
                    warn!(outcome = other.label(), %failure, "enrollment failed");
                    self.transition(SubmissionPhase::Failed);
                    self.presenter.show_error(&failure);
                }
            }
        }
        self.last_outcome = Some(outcome);
        self.in_flight = None;
        self.transition(SubmissionPhase::Idle);
    }

    fn fail(&mut self, failure: EnrollmentFailure) {
        self.dismiss_loading();
        self.transition(SubmissionPhase::Failed);
        self.presenter.show_error(&failure);
        self.in_flight = None;
        self.transition(SubmissionPhase::Idle);
    }

    fn dismiss_loading(&mut self) {
        if let Some(handle) = self.loading.take() {
            self.presenter.dismiss_loading(handle);
        }
    }

    fn transition(&mut self, next: SubmissionPhase) {
        debug!(from = ?self.phase, to = ?next, "submission phase");
        #[cfg(test)]
        self.transitions.push(next);
        self.phase = next;
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
