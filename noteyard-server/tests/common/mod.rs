use lazy_static::lazy_static;
use noteyard::NoteService;
use noteyard_server::configuration::Settings;
use noteyard_server::startup::run;
use noteyard_server::telemetry::{get_subscriber, init_tracing};
use std::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;

lazy_static! {
    static ref TRACING: () = {
        let subscriber = get_subscriber(&test_settings())
            .with(tracing_subscriber::fmt::Layer::default().with_test_writer());
        init_tracing(subscriber);
    };
}

/// Settings of a test app: an ephemeral port and no connection string, so
/// every test runs against its own empty in-memory store.
fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_owned(),
        port: 0,
        debug: false,
        databaseurl: None,
    }
}

pub struct TestApp {
    pub address: String,
}

pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    lazy_static::initialize(&TRACING);

    let service = NoteService::new(test_settings().get_note_store().await);
    let server = run(listener, service).expect("Failed to bind address");
    let _ = tokio::spawn(server);
    TestApp { address }
}
