use crate::annotator::file_manager::FileManager;
use crate::annotator::utils::secure_filename::secure_filename;
use crate::utils::logging::*;
use crate::web::utils::response::UploadStatus;
use actix_multipart::Multipart;
use actix_web::http::header::ContentDisposition;
use actix_web::{post, web, HttpResponse, Responder, Scope};
use futures::TryStreamExt;

pub fn initialize() -> Scope {
    web::scope("/upload")
        .service(upload_image)
}

#[post("")]
async fn upload_image(file_manager: web::Data<FileManager>, mut payload: Multipart) -> impl Responder {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = match field.content_disposition() {
            Some(content_disposition) => content_disposition.clone(),
            None => continue,
        };
        if get_field_name(&content_disposition).as_deref() != Some("image") {
            continue;
        }
        let client_name = get_file_name(&content_disposition).unwrap_or_default();
        let file_name = secure_filename(&client_name);
        if file_name.is_empty() {
            logging_warning!(AnnotationEntry::InvalidFileName, format!("Name: {client_name:?}"));
            return HttpResponse::BadRequest().body("Invalid filename.");
        }
        return match file_manager.save_image(&file_name, &mut field).await {
            Ok(_) => {
                logging_information!(AnnotationEntry::ImageSaved(file_name.clone()));
                HttpResponse::Ok().json(UploadStatus::new(file_name))
            }
            Err(entry) => {
                let message = entry.to_string();
                logging_error!(entry);
                HttpResponse::InternalServerError().body(message)
            }
        };
    }
    logging_warning!(AnnotationEntry::MissingImageField);
    HttpResponse::BadRequest().body("Missing image field.")
}

fn get_field_name(content_disposition: &ContentDisposition) -> Option<String> {
    content_disposition.get_name().map(str::to_string)
}

fn get_file_name(content_disposition: &ContentDisposition) -> Option<String> {
    content_disposition.get_filename().map(str::to_string)
}
