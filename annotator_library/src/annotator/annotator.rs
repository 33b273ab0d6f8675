use crate::annotator::class_registry::{ClassRegistry, JsonClassStore};
use crate::annotator::file_manager::FileManager;
use crate::utils::config::{Config, ConfigFile};
use crate::utils::logging::*;
use crate::web::api;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::time::Duration;
use tokio::time::sleep;

pub struct Annotator;

impl Annotator {
    pub async fn run() {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        let file_manager = FileManager::from_config(&config);
        file_manager.initialize().await;
        let file_manager = web::Data::new(file_manager);
        let class_registry = web::Data::new(ClassRegistry::new(JsonClassStore::new(&config.classes_file)));
        let config_file = web::Data::new(ConfigFile::default());
        let http_server = loop {
            let config = Config::now().await;
            let file_manager = file_manager.clone();
            let class_registry = class_registry.clone();
            let config_file = config_file.clone();
            let http_server = HttpServer::new(move || {
                let cors = Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                App::new()
                    .wrap(cors)
                    .app_data(file_manager.clone())
                    .app_data(class_registry.clone())
                    .app_data(config_file.clone())
                    .configure(api::configure)
            })
            .bind(("0.0.0.0", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(NetworkEntry::BindPortError(err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::InitializeComplete);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        logging_information!(SystemEntry::TerminateComplete);
    }
}
