use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{configuration::Settings, database::{get_connection_pool, run_migrations, DbPool}, models::{Customer, Employee, Part, PartLineItem, Service, ServiceLineItem, Vehicle, WorkOrder}, routes::{collection, health_check, index, json_config}};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    /// Opens (or creates) the database file, applies the schema and binds
    /// the listener. Port 0 picks a free port, reported back in `port`.
    pub fn build(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;
        run_migrations(&pool)?;

        let listener = TcpListener::bind((
            settings.application.host.as_str(),
            settings.application.port
        ))?;
        let port = listener.local_addr()?.port();

        tracing::info!(host = %settings.application.host, port, "starting workshop api");
        let server = run(listener, pool)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

pub fn run(listener: TcpListener, pool: DbPool) -> Result<Server, std::io::Error>{
    let pool = web::Data::new(pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(json_config())
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .service(collection::<Customer>())
            .service(collection::<Employee>())
            .service(collection::<Vehicle>())
            .service(collection::<Part>())
            .service(collection::<Service>())
            .service(collection::<WorkOrder>())
            .service(collection::<PartLineItem>())
            .service(collection::<ServiceLineItem>())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
