use enrollment_core::{EnrollmentFailure, EnrollmentPresenter};
use shared::{domain::LoadingHandle, protocol::EnrollmentResult};

/// Terminal stand-in for the owner-profile, loading and result screens.
#[derive(Default)]
pub struct ConsolePresenter {
    next_handle: u64,
    showing: Option<LoadingHandle>,
    submit_enabled: bool,
    result: Option<EnrollmentResult>,
    last_error: Option<String>,
}

impl ConsolePresenter {
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.showing.is_some()
    }

    pub fn result(&self) -> Option<&EnrollmentResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl EnrollmentPresenter for ConsolePresenter {
    fn submit_enabled_changed(&mut self, enabled: bool) {
        if enabled != self.submit_enabled {
            tracing::debug!(enabled, "enroll button toggled");
        }
        self.submit_enabled = enabled;
    }

    fn present_loading(&mut self, dog_name: Option<&str>) -> LoadingHandle {
        self.next_handle += 1;
        let handle = LoadingHandle(self.next_handle);
        self.showing = Some(handle);
        match dog_name {
            Some(name) => println!("Registering {name}..."),
            None => println!("Registering..."),
        }
        handle
    }

    fn dismiss_loading(&mut self, handle: LoadingHandle) {
        if self.showing == Some(handle) {
            self.showing = None;
        } else {
            tracing::warn!(handle = handle.0, "dismiss for a loading view that is not shown");
        }
    }

    fn navigate_to_result(&mut self, result: EnrollmentResult) {
        match &result.dog_name {
            Some(dog) => println!("Enrollment complete: {dog} registered as #{}", result.id),
            None => println!("Enrollment complete: registration #{}", result.id),
        }
        if let Some(at) = result.registered_at {
            println!("Registered at {}", at.to_rfc3339());
        }
        self.result = Some(result);
    }

    fn show_error(&mut self, failure: &EnrollmentFailure) {
        let message = failure.user_message();
        eprintln!("{}: {message}", failure.category().title());
        self.last_error = Some(message);
    }
}
