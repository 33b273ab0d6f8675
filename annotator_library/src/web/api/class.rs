use crate::annotator::class_registry::ClassRegistry;
use crate::utils::logging::*;
use crate::web::utils::response::{ClassesStatus, OperationStatus};
use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use serde::Deserialize;

pub fn initialize() -> Scope {
    web::scope("/classes")
        .service(list_classes)
        .service(add_class)
}

#[derive(Deserialize, Debug)]
pub struct AddClassRequest {
    #[serde(rename = "className", default)]
    pub class_name: String,
}

#[get("")]
async fn list_classes(class_registry: web::Data<ClassRegistry>) -> impl Responder {
    HttpResponse::Ok().json(class_registry.list().await)
}

#[post("")]
async fn add_class(class_registry: web::Data<ClassRegistry>, request: web::Json<AddClassRequest>) -> impl Responder {
    match class_registry.add(&request.class_name).await {
        Ok(classes) => {
            logging_information!(AnnotationEntry::ClassAdded(request.class_name.trim().to_string()));
            HttpResponse::Ok().json(ClassesStatus::new(classes))
        }
        Err(entry) if entry.is_client_error() => HttpResponse::BadRequest().json(OperationStatus::failure(entry)),
        Err(entry) => {
            let message = entry.to_string();
            logging_error!(entry);
            HttpResponse::InternalServerError().json(OperationStatus::failure(message))
        }
    }
}
