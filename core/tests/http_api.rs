//! HttpCameraApi against an in-process fake camera server

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use picam_core::api::{CameraApi, DeleteIndex, HttpCameraApi, PictureIndex, PictureQuery};
use picam_core::controller::{Controller, NullView};
use picam_core::error::{ApiError, Error};
use picam_core::{Paginator, ResolvedCameraConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const BAD_REQUEST_MSG: &str = "Could not process request";
const NOT_FOUND_MSG: &str = "File not found";

#[derive(Clone, Default)]
struct FakeCamera {
    pictures: Arc<Mutex<Vec<u32>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeCamera {
    fn log(&self, line: String) {
        self.requests.lock().unwrap().push(line);
    }

    fn last_index(&self) -> u32 {
        self.pictures.lock().unwrap().iter().copied().max().unwrap_or(0)
    }
}

fn file_name(index: u32) -> String {
    format!("Picamip_{:04}.jpg", index)
}

async fn post_picture(State(camera): State<FakeCamera>) -> Response {
    camera.log("POST /picture".to_string());
    let next = camera.last_index() + 1;
    camera.pictures.lock().unwrap().push(next);
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

async fn get_picture(
    State(camera): State<FakeCamera>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    camera.log(format!("GET /picture {:?}", params.get("index")));
    let raw = params.get("index").cloned().unwrap_or_default();
    let index = if raw == "-1" {
        camera.last_index()
    } else {
        match raw.parse::<u32>() {
            Ok(index) => index,
            Err(_) => return (StatusCode::BAD_REQUEST, BAD_REQUEST_MSG).into_response(),
        }
    };
    if !camera.pictures.lock().unwrap().contains(&index) {
        return (StatusCode::NOT_FOUND, NOT_FOUND_MSG).into_response();
    }

    let download = params
        .get("download")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false);
    let body = vec![0xff, 0xd8, index as u8];
    if download {
        let disposition = format!("attachment; filename={}", file_name(index));
        (
            [
                (header::CONTENT_TYPE, "image/jpeg".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response()
    } else {
        ([(header::CONTENT_TYPE, "image/jpeg")], body).into_response()
    }
}

async fn delete_index(
    State(camera): State<FakeCamera>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let raw = params.get("index").cloned().unwrap_or_default();
    camera.log(format!("DELETE /delete index={}", raw));
    match raw.parse::<u32>() {
        Ok(index) => {
            camera.pictures.lock().unwrap().retain(|i| *i != index);
            StatusCode::OK.into_response()
        }
        Err(_) => (StatusCode::BAD_REQUEST, BAD_REQUEST_MSG).into_response(),
    }
}

async fn delete_all(State(camera): State<FakeCamera>) -> StatusCode {
    camera.log("DELETE /deleteAll".to_string());
    camera.pictures.lock().unwrap().clear();
    StatusCode::OK
}

async fn files(State(camera): State<FakeCamera>) -> Json<Vec<(u32, String)>> {
    camera.log("GET /files".to_string());
    let mut pictures = camera.pictures.lock().unwrap().clone();
    pictures.sort_unstable();
    Json(pictures.into_iter().map(|i| (i, file_name(i))).collect())
}

async fn download_all(State(camera): State<FakeCamera>) -> Response {
    camera.log("GET /downloadAll".to_string());
    (
        [(header::CONTENT_DISPOSITION, "attachment; filename=Picamip_.zip")],
        b"PK\x03\x04".to_vec(),
    )
        .into_response()
}

fn router(camera: FakeCamera) -> Router {
    Router::new()
        .route("/picture", get(get_picture).post(post_picture))
        .route("/delete", delete(delete_index))
        .route("/deleteAll", delete(delete_all))
        .route("/files", get(files))
        .route("/downloadAll", get(download_all))
        .with_state(camera)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start() -> (FakeCamera, HttpCameraApi) {
    let camera = FakeCamera::default();
    let base_url = serve(router(camera.clone())).await;
    let config = ResolvedCameraConfig::new(base_url, PathBuf::from("/tmp"));
    (camera, HttpCameraApi::new(&config).unwrap())
}

#[tokio::test]
async fn test_capture_then_download_latest() {
    let (camera, api) = start().await;

    api.capture().await.unwrap();
    api.capture().await.unwrap();
    let file = api
        .fetch_picture(PictureQuery::latest_download())
        .await
        .unwrap();

    assert_eq!(file.name, "Picamip_0002.jpg");
    assert_eq!(file.bytes.to_vec(), vec![0xff, 0xd8, 2]);
    assert_eq!(file.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(camera.requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_inline_picture_uses_fallback_name() {
    let (_camera, api) = start().await;
    api.capture().await.unwrap();

    let file = api
        .fetch_picture(PictureQuery::new(PictureIndex::At(1), false))
        .await
        .unwrap();
    assert_eq!(file.name, "picam_0001.jpg");
}

#[tokio::test]
async fn test_missing_picture_is_not_found() {
    let (_camera, api) = start().await;

    let err = api
        .fetch_picture(PictureQuery::new(PictureIndex::At(9), true))
        .await
        .unwrap_err();
    match err {
        Error::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, NOT_FOUND_MSG);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_sentinel_rejected_by_server() {
    let (camera, api) = start().await;

    let err = api.delete(DeleteIndex::Unset).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Status { status: 400, .. })));
    assert_eq!(
        camera.requests.lock().unwrap().as_slice(),
        &["DELETE /delete index=NaN".to_string()]
    );
}

#[tokio::test]
async fn test_delete_and_list() {
    let (_camera, api) = start().await;
    for _ in 0..3 {
        api.capture().await.unwrap();
    }

    api.delete(DeleteIndex::Row(2)).await.unwrap();
    let files = api.list_files().await.unwrap();
    let indices: Vec<_> = files.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![1, 3]);
    assert_eq!(files[1].name, "Picamip_0003.jpg");

    api.delete_all().await.unwrap();
    assert!(api.list_files().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_download_all_archive() {
    let (_camera, api) = start().await;
    let archive = api.download_all().await.unwrap();
    assert_eq!(archive.name, "Picamip_.zip");
    assert!(archive.bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_redirected_download_is_rejected() {
    let app = Router::new().route(
        "/downloadAll",
        get(|| async { axum::response::Redirect::to("/login") }),
    );
    let base_url = serve(app).await;
    let api = HttpCameraApi::new(&ResolvedCameraConfig::new(base_url, PathBuf::from("/tmp")))
        .unwrap();

    let err = api.download_all().await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Status { status: 303, .. })));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let camera = FakeCamera::default();
    let base_url = serve(Router::new().nest("/cam", router(camera.clone()))).await;
    let config = ResolvedCameraConfig::new(format!("{}/cam", base_url), PathBuf::from("/tmp"));
    let api = HttpCameraApi::new(&config).unwrap();

    api.capture().await.unwrap();
    assert_eq!(api.list_files().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_camera_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ResolvedCameraConfig::new(format!("http://{}", addr), PathBuf::from("/tmp"));
    let api = HttpCameraApi::new(&config).unwrap();

    let err = api.delete_all().await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Network { .. })));
}

#[tokio::test]
async fn test_controller_over_http() {
    let (camera, api) = start().await;
    for _ in 0..12 {
        api.capture().await.unwrap();
    }

    let mut controller = Controller::new(Box::new(api), Box::new(NullView), Paginator::default());
    let pagination = controller.setup().await.unwrap();
    assert_eq!(pagination.page_count(), 2);
    assert_eq!(pagination.rows()[0].index, 12);

    controller.prepare_delete(12).await.unwrap();
    controller.confirm_delete().await.unwrap();
    assert_eq!(controller.pagination().unwrap().row_count(), 11);
    assert!(!camera.pictures.lock().unwrap().contains(&12));
}
