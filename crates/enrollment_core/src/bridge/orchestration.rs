//! Hands interaction-side commands to the backend queue without blocking.

use crossbeam_channel::{Sender, TrySendError};

use crate::bridge::commands::BackendCommand;
use crate::events::EnrollmentFailure;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), EnrollmentFailure> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err(EnrollmentFailure::BackendUnavailable(
                "command queue is full".to_string(),
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(EnrollmentFailure::BackendUnavailable(
                "command processor disconnected".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn reports_full_queue_and_disconnected_worker() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        dispatch_backend_command(&cmd_tx, BackendCommand::Shutdown).expect("first fits");

        let full = dispatch_backend_command(&cmd_tx, BackendCommand::Shutdown).expect_err("full");
        assert_eq!(
            full,
            EnrollmentFailure::BackendUnavailable("command queue is full".to_string())
        );

        drop(cmd_rx);
        let gone = dispatch_backend_command(&cmd_tx, BackendCommand::Shutdown)
            .expect_err("disconnected");
        assert!(gone.to_string().contains("disconnected"));
    }
}
