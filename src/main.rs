use actix_web::{App, HttpServer, middleware, web};

use slidedeck::config::Config;
use slidedeck::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    log::info!("Loaded configuration (max {} DB connections)", config.max_connections);

    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;

    let (host, port) = config.bind_addr();
    log::info!("Starting RPC server at http://{host}:{port}/trpc");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::rpc::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({
                    "error": { "code": "NOT_FOUND", "message": "Not Found" }
                }))
            }))
    })
    .bind((host, port))?
    .run()
    .await
}
