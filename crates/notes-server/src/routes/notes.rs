//! Note routes.
//!
//! - GET /notes?sid= - List every stored note
//! - POST /notes - Create a note
//! - DELETE /notes - Delete a note by id (JSON body)
//!
//! Notes are global: the sid is never linked to the notes it touches.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use notes_core::{Note, NoteId};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, SidQuery};
use crate::routes::auth::MessageResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub sid: String,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    pub id: NoteId,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNoteRequest {
    #[serde(default)]
    pub sid: String,
    pub id: NoteId,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notes?sid=
///
/// - 200 OK: `{ "notes": [...] }`
/// - 400 Bad Request: sid missing or empty
/// - 401 Unauthorized: sid invalid (signed mode)
pub(crate) async fn list_notes(
    State(state): State<AppState>,
    SidQuery(sid): SidQuery,
) -> ApiResult<Json<ListNotesResponse>> {
    if sid.is_empty() {
        return Err(ApiError::BadRequest("Missing session ID".to_string()));
    }

    let caller = state.sessions().verify(&sid)?;
    let notes = state.notes().list_notes()?;

    tracing::info!(
        caller = caller.map(|id| id.get()),
        count = notes.len(),
        "Listed notes"
    );

    Ok(Json(ListNotesResponse { notes }))
}

/// POST /notes
///
/// - 200 OK: `{ "id": 1 }`
/// - 400 Bad Request: malformed body
/// - 401 Unauthorized: sid invalid (signed mode)
pub(crate) async fn create_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> ApiResult<Json<CreateNoteResponse>> {
    let caller = state.sessions().verify(&request.sid)?;
    let note = state.notes().create_note(request.note)?;

    tracing::info!(
        caller = caller.map(|id| id.get()),
        note_id = %note.id,
        "Note created"
    );

    Ok(Json(CreateNoteResponse { id: note.id }))
}

/// DELETE /notes
///
/// - 200 OK: `{ "message": "Note deleted successfully" }`
/// - 400 Bad Request: malformed body or unknown note id
/// - 401 Unauthorized: sid invalid (signed mode)
pub(crate) async fn delete_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DeleteNoteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let caller = state.sessions().verify(&request.sid)?;
    state.notes().delete_note(request.id)?;

    tracing::info!(
        caller = caller.map(|id| id.get()),
        note_id = %request.id,
        "Note deleted"
    );

    Ok(Json(MessageResponse::new("Note deleted successfully")))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/notes",
        get(list_notes).post(create_note).delete(delete_note),
    )
}

// ============================================================================
// Tests
// ============================================================================
