use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use noteyard::errors::NoteStoreError;
use noteyard::{NoteDraft, NoteId, NotePatch, NoteService};
use serde::Deserialize;

const INTERNAL_SERVER_ERROR: &str = "internal server error";
const INVALID_NOTE: &str = "invalid note";
const NOTE_NOT_FOUND: &str = "note not found";
const PATTERN_EMPTY: &str = "pattern cannot be empty";

fn notestore_error_handler(e: &NoteStoreError) -> HttpResponse {
    match e {
        NoteStoreError::NoteNotExist(_) => {
            HttpResponse::NotFound().body(format!("{}: {}", NOTE_NOT_FOUND, e))
        }
        NoteStoreError::EmptyUpdate(_) => {
            error!("Note store internal error {:?}", e);
            HttpResponse::InternalServerError().body(format!("{}: {}", INTERNAL_SERVER_ERROR, e))
        }
        NoteStoreError::Timeout(_) => {
            error!("Note store internal error {:?}", e);
            HttpResponse::InternalServerError().body(format!("{}: {}", INTERNAL_SERVER_ERROR, e))
        }
        NoteStoreError::PostgreSQLError(_) => {
            error!("Note store internal error {:?}", e);
            HttpResponse::InternalServerError().body(format!("{}: {}", INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Body of create and update requests.
///
/// A missing field deserializes to the empty string: absent and empty are
/// the same thing on this wire, and both fail validation.
#[derive(Deserialize)]
struct NoteData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

impl TryFrom<NoteData> for NoteDraft {
    type Error = String;

    fn try_from(note: NoteData) -> Result<Self, Self::Error> {
        if note.title.is_empty() {
            return Err("title must not be empty".to_owned());
        }
        if note.content.is_empty() {
            return Err("content must not be empty".to_owned());
        }
        Ok(NoteDraft::new(note.title, note.content))
    }
}

#[post("/note")]
#[instrument(skip(service, note))]
async fn new_note(
    service: web::Data<NoteService>,
    note: web::Json<NoteData>,
) -> impl Responder {
    let draft: Result<NoteDraft, String> = note.into_inner().try_into();
    if let Err(e) = draft {
        return HttpResponse::BadRequest().body(format!("{}: {}", INVALID_NOTE, e));
    }
    let draft = draft.unwrap();
    let res = service.create_note(draft.clone()).await;
    match res {
        Ok(id) => HttpResponse::Ok().json(draft.into_note(id)),
        Err(e) => notestore_error_handler(&e),
    }
}

#[get("/note/{note_id}")]
#[instrument(
    skip(service, params),
    fields(
        note_id = %params.0
    )
)]
async fn get_note(
    service: web::Data<NoteService>,
    params: web::Path<(NoteId,)>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    let res = service.get_note(note_id).await;
    match res {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => notestore_error_handler(&e),
    }
}

#[put("/note/{note_id}")]
#[instrument(
    skip(service, params, note),
    fields(
        note_id = %params.0
    )
)]
async fn update_note(
    service: web::Data<NoteService>,
    params: web::Path<(NoteId,)>,
    note: web::Json<NoteData>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    // Updates are validated like creations: both fields must be present.
    // The merge semantics of the patch still hold underneath, but they are
    // not reachable through this surface.
    let draft: Result<NoteDraft, String> = note.into_inner().try_into();
    if let Err(e) = draft {
        return HttpResponse::BadRequest().body(format!("{}: {}", INVALID_NOTE, e));
    }
    let draft = draft.unwrap();
    let res = service
        .update_note(
            note_id,
            NotePatch::new(Some(draft.title), Some(draft.content)),
        )
        .await;
    match res {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

#[delete("/note/{note_id}")]
#[instrument(
    skip(service, params),
    fields(
        note_id = %params.0
    )
)]
async fn delete_note(
    service: web::Data<NoteService>,
    params: web::Path<(NoteId,)>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    let res = service.delete_note(note_id).await;
    match res {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

#[derive(Deserialize, Debug)]
struct SearchQuery {
    pattern: Option<String>,
}

#[get("/note")]
#[instrument(skip(service, search))]
async fn search(
    service: web::Data<NoteService>,
    search: web::Query<SearchQuery>,
) -> impl Responder {
    let search = search.into_inner();
    let pattern = search.pattern.unwrap_or_default();
    if pattern.is_empty() {
        return HttpResponse::BadRequest().body(PATTERN_EMPTY);
    }
    let res = service.find_like(&pattern).await;
    match res {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => notestore_error_handler(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_note)
        .service(new_note)
        .service(delete_note)
        .service(update_note)
        .service(search);
}
