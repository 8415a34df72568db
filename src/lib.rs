#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query_builder;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::db::{establish_connection_pool, run_migrations};
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::admin::{dashboard_stats, overview};
    use crate::routes::health;
    use crate::routes::leads::{contact, list_leads, update_lead_status};
    use crate::routes::products::{
        create_product, delete_product, featured_products, list_products, show_product,
        update_product,
    };

    /// Registers the `/api` scope.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/api")
                .service(health)
                // `featured` must be registered before `{id}`.
                .service(featured_products)
                .service(list_products)
                .service(show_product)
                .service(create_product)
                .service(update_product)
                .service(delete_product)
                .service(contact)
                .service(list_leads)
                .service(update_lead_status)
                .service(dashboard_stats)
                .service(overview),
        );
    }

    fn cors(allowed_origins: &[String]) -> Cors {
        if allowed_origins.is_empty() {
            return Cors::permissive();
        }
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        run_migrations(&pool)
            .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

        let repo = DieselRepository::new(pool);
        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(cors(&server_config.allowed_origins))
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .app_data(web::Data::new(repo.clone()))
                .configure(configure)
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
