use crate::utils::config::{Config, ConfigFile};
use crate::utils::logging::*;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};

pub fn initialize() -> Scope {
    web::scope("/config")
        .service(get_config)
        .service(update_config)
}

#[get("/get")]
async fn get_config() -> impl Responder {
    web::Json(Config::now().await)
}

/// Writes the config back to its file. Port and storage paths take effect on the next start.
#[post("/update")]
async fn update_config(config_file: web::Data<ConfigFile>, config: web::Json<Config>) -> impl Responder {
    let config = config.into_inner();
    if !Config::validate(&config) {
        logging_warning!(SystemEntry::InvalidConfig);
        return HttpResponse::BadRequest().body("Invalid configuration.");
    }
    if let Err(err) = config_file.save(&config).await {
        logging_error!(err.clone());
        return HttpResponse::InternalServerError().body(err);
    }
    Config::update(config).await;
    logging_notice!(SystemEntry::ConfigUpdated, format!("Path: {}", config_file.path().display()));
    HttpResponse::Ok().finish()
}
