use actix_web::{get, web, HttpResponse, Responder};

#[get("/")]
#[instrument]
async fn index() -> impl Responder {
    "Noteyard".to_owned()
}

#[get("/health_check")]
#[instrument]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(health_check);
}
