use log::{error, info};
use murmur::{config::Config, model::AppState, routes};
use std::{net::SocketAddr, process, sync::Arc};

#[tokio::main]
async fn main() {
    murmur::logger::init();

    let config = Config::load();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // No store, no server.
    let state = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            error!("Failed to open the data store: {err}");
            process::exit(1);
        }
    };

    info!("Starting murmur server at {addr}");

    let app = routes::router(state);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        error!("Server exited with an error: {err}");
        process::exit(1);
    }
}
