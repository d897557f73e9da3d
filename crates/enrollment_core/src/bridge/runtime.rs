//! Backend worker: a dedicated thread owning the tokio runtime that runs remote calls.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::bridge::commands::BackendCommand;
use crate::events::UiEvent;
use crate::RemoteEnrollmentClient;

pub fn spawn_backend_thread(
    client: Arc<dyn RemoteEnrollmentClient>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
            while let Ok(cmd) = cmd_rx.recv() {
                in_flight.retain(|task| !task.is_finished());
                match cmd {
                    BackendCommand::SubmitEnrollment {
                        submission_id,
                        request,
                    } => {
                        let client = Arc::clone(&client);
                        let ui_tx = ui_tx.clone();
                        in_flight.push(tokio::spawn(async move {
                            tracing::info!(
                                submission_id = submission_id.0,
                                dog = %request.dog.name,
                                "submitting enrollment"
                            );
                            let outcome = client.submit(*request).await;
                            tracing::info!(
                                submission_id = submission_id.0,
                                outcome = outcome.label(),
                                "enrollment call finished"
                            );
                            // The interaction queue is bounded; a full queue must not
                            // park a runtime worker.
                            let delivered = tokio::task::spawn_blocking(move || {
                                ui_tx
                                    .send(UiEvent::EnrollmentCompleted {
                                        submission_id,
                                        outcome,
                                    })
                                    .is_ok()
                            })
                            .await;
                            match delivered {
                                Ok(true) => {}
                                Ok(false) => tracing::warn!(
                                    submission_id = submission_id.0,
                                    "interaction side gone; dropping enrollment outcome"
                                ),
                                Err(err) => tracing::error!(
                                    submission_id = submission_id.0,
                                    "enrollment outcome delivery panicked: {err}"
                                ),
                            }
                        }));
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            for task in in_flight {
                if let Err(err) = task.await {
                    tracing::error!("enrollment task panicked: {err}");
                }
            }
            tracing::debug!("backend worker stopped");
        });
    })
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
