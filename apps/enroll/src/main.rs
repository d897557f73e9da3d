use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use enrollment_core::{
    bridge::{commands::BackendCommand, runtime::spawn_backend_thread},
    config::{load_settings, normalize_api_url},
    validator::is_present,
    EnrollmentFailure, FormEvent, HttpEnrollmentClient, OwnerField, SubmissionCoordinator,
};
use shared::error::MissingField;
use tracing_subscriber::EnvFilter;

mod handoff;
mod presenter;

use presenter::ConsolePresenter;

const UI_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Parser, Debug)]
#[command(name = "savepets-enroll", about = "Submit a SavePets dog enrollment")]
struct Args {
    /// Overrides the configured registration API base URL.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    owner_name: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// JSON dog profile produced by the pet registration step.
    #[arg(long)]
    dog_profile: PathBuf,
    /// Nose photos in capture order; exactly five.
    #[arg(long = "photo", required = true, num_args = 1..)]
    photos: Vec<PathBuf>,
    /// How long to wait for the registration service before giving up.
    #[arg(long, default_value_t = 120)]
    wait_secs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load enrollment settings")?;
    if let Some(server_url) = &args.server_url {
        settings.api_url = normalize_api_url(server_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();
    tracing::info!(api_url = %settings.api_url, "starting enrollment");

    let handoff = handoff::load_handoff(&args.dog_profile, &args.photos)?;
    let client = Arc::new(HttpEnrollmentClient::from_settings(&settings)?);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded(64);
    let worker = spawn_backend_thread(client, cmd_rx, ui_tx);

    let mut coordinator =
        SubmissionCoordinator::new(ConsolePresenter::default(), handoff, cmd_tx.clone(), ui_rx);

    for (field, value) in [
        (OwnerField::Name, args.owner_name),
        (OwnerField::Phone, args.phone_number),
        (OwnerField::Email, args.email),
    ] {
        coordinator.handle_form_event(FormEvent::FieldReturned { field, value });
    }

    if !coordinator.presenter().submit_enabled() {
        let missing: Vec<&str> = OwnerField::ALL
            .into_iter()
            .filter(|field| !is_present(coordinator.form().value(*field)))
            .map(OwnerField::label)
            .collect();
        bail!("owner details incomplete; missing {}", missing.join(", "));
    }

    if !coordinator.submit() {
        let missing: Vec<String> = coordinator
            .snapshot()
            .validate()
            .into_iter()
            .filter(|field| *field != MissingField::Owner)
            .map(|field| field.to_string())
            .collect();
        bail!("enrollment not submitted; missing {}", missing.join(", "));
    }

    let deadline = Instant::now() + Duration::from_secs(args.wait_secs);
    while coordinator.is_in_flight() && Instant::now() < deadline {
        coordinator.wait_for_ui_event(UI_POLL_INTERVAL);
    }

    let timed_out = coordinator.abandon(EnrollmentFailure::TimedOut {
        waited_secs: args.wait_secs,
    });
    if cmd_tx.send(BackendCommand::Shutdown).is_err() {
        tracing::debug!("backend worker already stopped");
    }
    if timed_out {
        bail!(
            "no response from the registration service after {}s",
            args.wait_secs
        );
    }
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }

    match coordinator.presenter().result() {
        Some(_) => Ok(()),
        None => bail!(
            "enrollment failed: {}",
            coordinator
                .presenter()
                .last_error()
                .unwrap_or("no result returned")
        ),
    }
}
