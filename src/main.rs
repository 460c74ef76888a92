use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod routes;
mod store;

use store::UserStore;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = web::Data::new(UserStore::new());

    tracing::info!("Server starting on port {}", args.port);
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .bind(("127.0.0.1", args.port))?
    .run()
    .await
}
