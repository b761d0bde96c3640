use crate::routes::*;
use actix_web::dev::Server;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use noteyard::NoteService;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Assemble the HTTP server on an already-bound listener.
///
/// Awaiting the returned [`Server`] installs the default actix signal
/// handling: SIGINT and SIGTERM stop the listener and in-flight requests are
/// drained before the future resolves.
pub fn run(listener: TcpListener, service: NoteService) -> Result<Server, std::io::Error> {
    let service: Data<NoteService> = Data::new(service);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(TracingLogger::default())
            .service(web::scope("/api/v1").configure(api_v1_config))
            .configure(index_config)
            .app_data(service.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
