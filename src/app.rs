use crate::{
    config::Config,
    error::Result,
    routes::{api_routes, not_found},
    services::{DestinationService, PathService, PreferencesService, SearchHistoryService},
    store::{DestinationStore, PathStore, SeedFile, UserStore},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;
use std::sync::Arc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Initialize stores and load seed data
        let destinations = Arc::new(DestinationStore::new());
        let paths = Arc::new(PathStore::new());
        let users = Arc::new(UserStore::new());

        if let Some(seed_path) = &self.config.seed_path {
            SeedFile::load(seed_path)?.apply(&destinations, &paths, &users)?;
        } else {
            info!("No SEED_PATH configured, starting with empty stores");
        }

        let timeout = self.config.store_timeout;
        let destination_service = web::Data::new(DestinationService::new(destinations, timeout));
        let path_service = web::Data::new(PathService::new(paths, timeout));
        let search_history_service =
            web::Data::new(SearchHistoryService::new(Arc::clone(&users), timeout));
        let preferences_service = web::Data::new(PreferencesService::new(users, timeout));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(destination_service.clone())
                .app_data(path_service.clone())
                .app_data(search_history_service.clone())
                .app_data(preferences_service.clone())
                .service(api_routes())
                .default_service(web::route().to(not_found))
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
