use super::*;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::post,
    Router,
};
use shared::{
    domain::{DogSex, PhotoSlot},
    enrollment::{Dog, EnrollmentSnapshot, Owner},
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<ReceivedField>>>,
}

async fn enroll(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.received.lock().await.push(ReceivedField {
            name,
            file_name,
            data,
        });
    }
    (state.status, state.body.to_string())
}

async fn spawn_server(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<ReceivedField>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/enrollments", post(enroll))
        .with_state(ServerState {
            status,
            body,
            received: Arc::clone(&received),
        });
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), received)
}

fn request() -> EnrollmentRequest {
    let dog = Dog {
        name: "Rex".to_string(),
        breed: "Jindo".to_string(),
        birth_year: 2019,
        sex: DogSex::Male,
        profile_image: ImagePayload::new("rex.jpg", vec![9, 9]).with_mime_type("image/jpeg"),
    };
    PhotoSlot::ALL
        .into_iter()
        .fold(
            EnrollmentSnapshot::new()
                .with_dog(dog)
                .with_owner(Owner::new("Jane Doe", "555-0100", "jane@example.com")),
            |snapshot, slot| {
                let name = format!("nose-{}.jpg", slot.index() + 1);
                snapshot.with_photo(slot, ImagePayload::new(name, vec![slot.index() as u8]))
            },
        )
        .to_request()
        .expect("complete request")
}

fn client(api_url: String) -> HttpEnrollmentClient {
    HttpEnrollmentClient::new(api_url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn posts_every_field_and_decodes_success() {
    let (url, received) = spawn_server(
        StatusCode::OK,
        r#"{"success":true,"data":{"id":"42","dog_name":"Rex"}}"#,
    )
    .await;

    let outcome = client(url).submit(request()).await;

    let mut expected = EnrollmentResult::new("42");
    expected.dog_name = Some("Rex".to_string());
    assert_eq!(outcome, RemoteOutcome::Success(expected));

    let received = received.lock().await;
    let names: Vec<&str> = received.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ownerName",
            "phoneNumber",
            "email",
            "dogName",
            "dogBreed",
            "dogBirthYear",
            "dogSex",
            "dogProfileImage",
            "firstDogNoseImage",
            "secondDogNoseImage",
            "thirdDogNoseImage",
            "fourthDogNoseImage",
            "fifthDogNoseImage",
        ]
    );
    assert_eq!(received[0].data, b"Jane Doe".to_vec());
    assert_eq!(received[5].data, b"2019".to_vec());
    assert_eq!(received[6].data, b"male".to_vec());
    assert_eq!(received[7].file_name.as_deref(), Some("rex.jpg"));
    assert_eq!(received[11].file_name.as_deref(), Some("nose-4.jpg"));
    assert_eq!(received[11].data, vec![3]);
}

#[tokio::test]
async fn fail_marker_becomes_application_failure() {
    let (url, _) = spawn_server(StatusCode::OK, r#"{"success":true,"message":"fail"}"#).await;
    assert_eq!(
        client(url).submit(request()).await,
        RemoteOutcome::ApplicationFailure("fail".to_string())
    );
}

#[tokio::test]
async fn fail_as_result_payload_becomes_application_failure() {
    let (url, _) = spawn_server(StatusCode::OK, r#"{"success":true,"data":"fail"}"#).await;
    assert_eq!(
        client(url).submit(request()).await,
        RemoteOutcome::ApplicationFailure("fail".to_string())
    );
}

#[tokio::test]
async fn server_error_status_maps_to_server_error() {
    let (url, _) = spawn_server(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    assert_eq!(client(url).submit(request()).await, RemoteOutcome::ServerError);
}

#[tokio::test]
async fn unknown_route_maps_to_path_error() {
    let (url, _) = spawn_server(StatusCode::OK, "{}").await;
    let outcome = client(format!("{url}/v2")).submit(request()).await;
    assert_eq!(outcome, RemoteOutcome::PathError);
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let outcome = client(format!("http://{addr}")).submit(request()).await;
    assert_eq!(outcome, RemoteOutcome::NetworkFailure);
}

#[test]
fn classifies_statuses_and_bodies() {
    assert_eq!(
        classify_response(StatusCode::BAD_REQUEST, b""),
        RemoteOutcome::RequestError
    );
    assert_eq!(
        classify_response(StatusCode::UNPROCESSABLE_ENTITY, b"{}"),
        RemoteOutcome::RequestError
    );
    assert_eq!(
        classify_response(StatusCode::NOT_FOUND, b""),
        RemoteOutcome::PathError
    );
    assert_eq!(
        classify_response(StatusCode::BAD_GATEWAY, b""),
        RemoteOutcome::ServerError
    );
    assert_eq!(
        classify_response(StatusCode::PERMANENT_REDIRECT, b""),
        RemoteOutcome::NetworkFailure
    );
    assert_eq!(
        classify_response(StatusCode::OK, b"not json"),
        RemoteOutcome::PathError
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"success":true}"#),
        RemoteOutcome::PathError
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"success":true,"data":{"name":"x"}}"#),
        RemoteOutcome::PathError
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"success":false,"message":"duplicate nose print"}"#),
        RemoteOutcome::ApplicationFailure("duplicate nose print".to_string())
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"success":false}"#),
        RemoteOutcome::ApplicationFailure("fail".to_string())
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"success":true,"data":"fail"}"#),
        RemoteOutcome::ApplicationFailure("fail".to_string())
    );
    assert_eq!(
        classify_response(StatusCode::OK, br#"{"data":"ok"}"#),
        RemoteOutcome::PathError
    );
    assert_eq!(
        classify_response(
            StatusCode::CREATED,
            br#"{"data":{"id":"42","registered_at":"2024-05-04T09:00:00Z"}}"#
        ),
        RemoteOutcome::Success(EnrollmentResult {
            id: "42".to_string(),
            dog_name: None,
            registered_at: Some("2024-05-04T09:00:00Z".parse().expect("timestamp")),
        })
    );
}
