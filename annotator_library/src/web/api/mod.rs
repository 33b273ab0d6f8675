use actix_web::web::ServiceConfig;

pub mod annotation;
pub mod class;
pub mod config;
pub mod log;
pub mod upload;

/// Registers every API scope; shared state is expected as app data.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg
        .service(upload::initialize())
        .service(annotation::initialize())
        .service(class::initialize())
        .service(config::initialize())
        .service(log::initialize());
}
