use crate::annotator::file_manager::FileManager;
use crate::annotator::utils::bounding_box::{BoundingBox, ImageSize};
use crate::utils::logging::*;
use crate::web::utils::response::OperationStatus;
use actix_web::{post, web, HttpResponse, Responder, Scope};
use serde::Deserialize;
use std::path::PathBuf;

pub fn initialize() -> Scope {
    web::scope("/annotations")
        .service(save_annotations)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRequest {
    pub filename: String,
    pub boxes: Vec<BoundingBox>,
    pub image_width: f64,
    pub image_height: f64,
}

#[post("")]
async fn save_annotations(file_manager: web::Data<FileManager>, request: web::Json<AnnotationRequest>) -> impl Responder {
    let request = request.into_inner();
    match write_annotations(&file_manager, &request).await {
        Ok(annotation_path) => {
            logging_information!(AnnotationEntry::AnnotationsSaved(annotation_path.display().to_string(), request.boxes.len()));
            HttpResponse::Ok().json(OperationStatus::success("Annotations saved."))
        }
        Err(entry) => {
            let message = format!("{entry}.");
            let client_error = entry.is_client_error();
            logging_error!(entry, format!("Filename: {:?}", request.filename));
            if client_error {
                HttpResponse::BadRequest().body(message)
            } else {
                HttpResponse::InternalServerError().body(message)
            }
        }
    }
}

/// Nothing is written unless every box normalizes.
async fn write_annotations(file_manager: &FileManager, request: &AnnotationRequest) -> Result<PathBuf, AnnotationEntry> {
    let image_size = ImageSize::new(request.image_width, request.image_height);
    let records = request.boxes.iter()
        .map(|bounding_box| bounding_box.normalize(&image_size))
        .collect::<Result<Vec<_>, _>>()?;
    file_manager.save_annotations(&request.filename, &records).await
}
