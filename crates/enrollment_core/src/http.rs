//! reqwest adapter for the registration service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    domain::ImagePayload,
    enrollment::EnrollmentRequest,
    protocol::{
        form_fields, EnrollmentResponse, EnrollmentResult, RemoteOutcome,
        APPLICATION_FAILURE_MARKER,
    },
};
use tracing::{debug, warn};

use crate::config::EnrollmentSettings;
use crate::RemoteEnrollmentClient;

pub struct HttpEnrollmentClient {
    http: Client,
    api_url: String,
}

impl HttpEnrollmentClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build enrollment http client")?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn from_settings(settings: &EnrollmentSettings) -> Result<Self> {
        Self::new(settings.api_url.clone(), settings.request_timeout())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/enrollments", self.api_url)
    }
}

#[async_trait]
impl RemoteEnrollmentClient for HttpEnrollmentClient {
    async fn submit(&self, request: EnrollmentRequest) -> RemoteOutcome {
        let form = match build_form(request) {
            Ok(form) => form,
            Err(err) => {
                warn!("failed to encode enrollment form: {err}");
                return RemoteOutcome::RequestError;
            }
        };

        let response = match self.http.post(self.endpoint()).multipart(form).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %self.endpoint(), "enrollment request failed: {err}");
                return RemoteOutcome::NetworkFailure;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(status = status.as_u16(), "failed to read enrollment response: {err}");
                return RemoteOutcome::NetworkFailure;
            }
        };

        let outcome = classify_response(status, &body);
        debug!(
            status = status.as_u16(),
            outcome = outcome.label(),
            "enrollment response classified"
        );
        outcome
    }
}

fn build_form(request: EnrollmentRequest) -> Result<Form> {
    let EnrollmentRequest { owner, dog, photos } = request;

    let mut form = Form::new()
        .text(form_fields::OWNER_NAME, owner.name)
        .text(form_fields::PHONE_NUMBER, owner.phone_number)
        .text(form_fields::EMAIL, owner.email)
        .text(form_fields::DOG_NAME, dog.name)
        .text(form_fields::DOG_BREED, dog.breed)
        .text(form_fields::DOG_BIRTH_YEAR, dog.birth_year.to_string())
        .text(form_fields::DOG_SEX, dog.sex.as_str())
        .part(form_fields::DOG_PROFILE_IMAGE, image_part(dog.profile_image)?);

    for (slot, image) in photos.into_images() {
        form = form.part(slot.form_field(), image_part(image)?);
    }
    Ok(form)
}

fn image_part(image: ImagePayload) -> Result<Part> {
    let part = Part::bytes(image.bytes).file_name(image.filename);
    match image.mime_type {
        Some(mime) => part
            .mime_str(&mime)
            .with_context(|| format!("invalid image mime type '{mime}'")),
        None => Ok(part),
    }
}

/// Maps a registration response onto the outcome taxonomy.
pub fn classify_response(status: StatusCode, body: &[u8]) -> RemoteOutcome {
    if status == StatusCode::NOT_FOUND {
        return RemoteOutcome::PathError;
    }
    if status.is_client_error() {
        return RemoteOutcome::RequestError;
    }
    if status.is_server_error() {
        return RemoteOutcome::ServerError;
    }
    if !status.is_success() {
        return RemoteOutcome::NetworkFailure;
    }

    let envelope: EnrollmentResponse = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("undecodable enrollment response: {err}");
            return RemoteOutcome::PathError;
        }
    };

    if envelope.is_application_failure() {
        return RemoteOutcome::ApplicationFailure(
            envelope
                .message
                .unwrap_or_else(|| APPLICATION_FAILURE_MARKER.to_string()),
        );
    }

    match envelope.data.map(serde_json::from_value::<EnrollmentResult>) {
        Some(Ok(result)) => RemoteOutcome::Success(result),
        Some(Err(err)) => {
            warn!("enrollment result payload did not match: {err}");
            RemoteOutcome::PathError
        }
        None => {
            warn!("enrollment response carried no result payload");
            RemoteOutcome::PathError
        }
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
