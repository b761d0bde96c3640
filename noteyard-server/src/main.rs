use noteyard::NoteService;
use noteyard_server::configuration::get_configuration;
use noteyard_server::startup::run;
use noteyard_server::telemetry::{get_subscriber, init_tracing};
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let configuration = get_configuration().expect("Failed to read configuration.");
    let subscriber =
        get_subscriber(&configuration).with(tracing_subscriber::fmt::Layer::default());
    init_tracing(subscriber);

    let service = NoteService::new(configuration.get_note_store().await);
    let listener = TcpListener::bind(configuration.address())?;
    info!("Listening on {}", listener.local_addr()?);
    run(listener, service)?.await
}
