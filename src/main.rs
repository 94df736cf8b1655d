#![warn(clippy::all)]

use tracing_subscriber::fmt::format::FmtSpan;

mod config;
mod routes;
mod store;
mod types;

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = config::Config::new()?;
    let addr = config.socket_addr()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        // record an event when each span closes, used by the route spans
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = store::Store::new(config.answer_lock);

    tracing::info!(%addr, answer_lock = ?config.answer_lock, "Q&A board starting");
    warp::serve(routes::routes(store)).run(addr).await;

    Ok(())
}
