use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use annotator_library::annotator::class_registry::{ClassRegistry, JsonClassStore, MemoryClassStore};
use annotator_library::annotator::file_manager::FileManager;
use annotator_library::utils::config::{Config, ConfigFile};
use annotator_library::web::api::configure;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const BOUNDARY: &str = "----annotator-test-boundary";

macro_rules! test_app {
    ($temp_dir:expr) => {
        test_app!($temp_dir, ClassRegistry::new(JsonClassStore::new($temp_dir.path().join("classes.json"))))
    };
    ($temp_dir:expr, $class_registry:expr) => {{
        let file_manager = FileManager::new($temp_dir.path().join("uploads"), $temp_dir.path().join("annotations"));
        file_manager.initialize().await;
        test::init_service(
            App::new()
                .app_data(web::Data::new(file_manager))
                .app_data(web::Data::new($class_registry))
                .app_data(web::Data::new(ConfigFile::new($temp_dir.path().join("annotator.toml"))))
                .configure(configure),
        ).await
    }};
}

fn multipart_body(field_name: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(field_name: &str, file_name: &str, data: &[u8]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
        .set_payload(multipart_body(field_name, file_name, data))
}

fn annotation_request(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/annotations").set_json(body)
}

fn add_class_request(class_name: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/classes").set_json(json!({ "className": class_name }))
}

#[actix_web::test]
async fn upload_then_annotate_dog() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, upload_request("image", "dog.png", b"\x89PNG fake bytes").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": true, "filename": "dog.png" }));
    assert_eq!(fs::read(temp_dir.path().join("uploads").join("dog.png")).unwrap(), b"\x89PNG fake bytes");

    let request = annotation_request(json!({
        "filename": "dog.png",
        "boxes": [{ "x": 10, "y": 10, "width": 20, "height": 20, "classId": 1 }],
        "imageWidth": 100,
        "imageHeight": 100
    }));
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": true, "message": "Annotations saved." }));
    let annotation = fs::read_to_string(temp_dir.path().join("annotations").join("dog.txt")).unwrap();
    assert_eq!(annotation, "1 0.2 0.2 0.2 0.2\n");
}

#[actix_web::test]
async fn upload_sanitizes_and_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, upload_request("image", "../../my photo.jpg", b"first").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["filename"], "my_photo.jpg");

    test::call_service(&app, upload_request("image", "my photo.jpg", b"second").to_request()).await;
    assert_eq!(fs::read(temp_dir.path().join("uploads").join("my_photo.jpg")).unwrap(), b"second");
    assert!(!temp_dir.path().join("my_photo.jpg").exists());
}

#[actix_web::test]
async fn upload_without_image_field_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, upload_request("file", "dog.png", b"data").to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = test::TestRequest::post().uri("/upload").set_payload("plain body");
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn upload_with_unusable_name_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, upload_request("image", "...", b"data").to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fs::read_dir(temp_dir.path().join("uploads")).unwrap().count(), 0);
}

#[actix_web::test]
async fn annotations_are_replaced_not_appended() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let first = json!({
        "filename": "street.jpg",
        "boxes": [
            { "x": 0, "y": 0, "width": 50, "height": 50, "classId": 0 },
            { "x": 50, "y": 50, "width": 50, "height": 50, "classId": 1 }
        ],
        "imageWidth": 100,
        "imageHeight": 100
    });
    let second = json!({
        "filename": "street.jpg",
        "boxes": [{ "x": 0, "y": 0, "width": 100, "height": 100 }],
        "imageWidth": 100,
        "imageHeight": 100
    });
    test::call_service(&app, annotation_request(first).to_request()).await;
    let response = test::call_service(&app, annotation_request(second).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let annotation = fs::read_to_string(temp_dir.path().join("annotations").join("street.txt")).unwrap();
    assert_eq!(annotation, "0 0.5 0.5 1.0 1.0\n");
}

#[actix_web::test]
async fn annotation_lines_follow_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let request = annotation_request(json!({
        "filename": "pair.png",
        "boxes": [
            { "x": 0, "y": 0, "width": 40, "height": 20, "classId": 3 },
            { "x": 100, "y": 50, "width": 100, "height": 50, "classId": 2 }
        ],
        "imageWidth": 200,
        "imageHeight": 100
    }));
    test::call_service(&app, request.to_request()).await;
    let annotation = fs::read_to_string(temp_dir.path().join("annotations").join("pair.txt")).unwrap();
    assert_eq!(annotation, "3 0.1 0.1 0.2 0.2\n2 0.75 0.75 0.5 0.5\n");
}

#[actix_web::test]
async fn zero_image_dimension_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let request = annotation_request(json!({
        "filename": "broken.png",
        "boxes": [{ "x": 1, "y": 1, "width": 1, "height": 1 }],
        "imageWidth": 0,
        "imageHeight": 100
    }));
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!temp_dir.path().join("annotations").join("broken.txt").exists());
}

#[actix_web::test]
async fn malformed_annotation_payload_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let request = annotation_request(json!({ "filename": "dog.png", "boxes": [] }));
    let response = test::call_service(&app, request.to_request()).await;
    assert!(response.status().is_client_error());
}

#[actix_web::test]
async fn classes_start_empty() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, test::TestRequest::get().uri("/classes").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!([]));
    assert!(!temp_dir.path().join("classes.json").exists());
}

#[actix_web::test]
async fn add_class_trims_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, add_class_request("  cat ").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": true, "classes": ["cat"] }));

    let response = test::call_service(&app, add_class_request("dog").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["classes"], json!(["cat", "dog"]));

    let stored = fs::read_to_string(temp_dir.path().join("classes.json")).unwrap();
    assert_eq!(stored, "[\n  \"cat\",\n  \"dog\"\n]");

    let response = test::call_service(&app, test::TestRequest::get().uri("/classes").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!(["cat", "dog"]));
}

#[actix_web::test]
async fn duplicate_and_empty_classes_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    test::call_service(&app, add_class_request("cat").to_request()).await;

    let response = test::call_service(&app, add_class_request("cat").to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": false, "message": "Class already exists" }));

    let response = test::call_service(&app, add_class_request("   ").to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "success": false, "message": "Class name is empty" }));

    let request = test::TestRequest::post().uri("/classes").set_json(json!({}));
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn corrupt_registry_lists_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("classes.json"), "{\"not\": \"a list\"}").unwrap();
    let app = test_app!(temp_dir);

    let response = test::call_service(&app, test::TestRequest::get().uri("/classes").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn memory_backed_registry() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ClassRegistry::new(MemoryClassStore::new(vec!["person".to_string()]));
    let app = test_app!(temp_dir, registry);

    let response = test::call_service(&app, add_class_request("bicycle").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["classes"], json!(["person", "bicycle"]));
    assert!(!temp_dir.path().join("classes.json").exists());
}

#[actix_web::test]
async fn system_log_is_exposed() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);

    test::call_service(&app, add_class_request("tree").to_request()).await;
    let response = test::call_service(&app, test::TestRequest::get().uri("/log/system_log").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<String> = test::read_body_json(response).await;
    assert!(body.iter().any(|line| line.contains("Class tree added")));

    let request = test::TestRequest::get().uri("/log/system_log/since/yesterday");
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn config_update_is_written_back() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app!(temp_dir);
    let config_path = temp_dir.path().join("annotator.toml");

    let response = test::call_service(&app, test::TestRequest::get().uri("/config/get").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut config: Value = test::read_body_json(response).await;
    assert!(config["http_server_bind_port"].is_u64());

    config["http_server_bind_port"] = json!(0);
    let request = test::TestRequest::post().uri("/config/update").set_json(&config);
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!config_path.exists());

    config["http_server_bind_port"] = json!(5123);
    config["classes_file"] = json!("labels.json");
    let request = test::TestRequest::post().uri("/config/update").set_json(&config);
    let response = test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = Config::parse(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(stored.http_server_bind_port, 5123);
    assert_eq!(stored.classes_file, "labels.json");

    let response = test::call_service(&app, test::TestRequest::get().uri("/config/get").to_request()).await;
    let config: Value = test::read_body_json(response).await;
    assert_eq!(config["http_server_bind_port"], 5123);
}
