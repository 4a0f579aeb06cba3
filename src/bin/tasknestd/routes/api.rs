use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use rocket::{catch, catchers, delete, get, post, put, routes, Catcher, Route, State};
use rand::rngs::StdRng;
use time::OffsetDateTime;
use uuid::Uuid;

use tasknest::data::{NewNote, NewTodo, NotePatch, TodoPatch};
use tasknest::rng::SyncRng;
use tasknest::storage::DocumentStorage;
use tasknest::username_string::UsernameString;

use crate::access_granter::AccessGranter;
use crate::routes::api::authentication_guard::Authenticated;
use crate::routes::api::errors::ApiError;
use crate::routes::api::model::*;

pub mod authentication_guard;
pub mod errors;
pub mod model;

type JsonBody<'r, T> = Result<Json<T>, json::Error<'r>>;

/// Unwraps a JSON body, turning deserialization failures into a uniform
/// 400 instead of rocket's default 422.
fn parse_body<T>(body: JsonBody<'_, T>) -> Result<T, ApiError> {
    body.map(Json::into_inner).map_err(|_| ApiError::MalformedBody)
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    username: UsernameString,
    password: String,
}

#[get("/health")]
fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[post("/login", format = "json", data = "<request>")]
async fn login(
    request: JsonBody<'_, LoginRequest>,
    granter: &State<AccessGranter>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = parse_body(request)?;
    let session = granter
        .login_user(&request.username, &request.password)
        .await?;
    Ok(
        Json(
            LoginResponse {
                token: session.token,
                expires_at: session.expires_at,
            }
        )
    )
}

#[post("/logout")]
async fn logout(
    auth: Authenticated,
    granter: &State<AccessGranter>,
) -> Result<Json<MessageResponse>, ApiError> {
    granter.logout_user(auth.0.token).await?;
    Ok(Json(MessageResponse { message: "Logged out successfully" }))
}

#[get("/todos?<params..>")]
async fn list_todos(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    params: TodoListParams,
) -> Result<Json<TodoListResponse>, ApiError> {
    let query = match params.parse() {
        Some(query) => query,
        None => return Ok(Json(TodoListResponse { todos: Vec::new() })),
    };
    let todos = storage.list_todos(&auth.0.username).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    Ok(Json(TodoListResponse { todos: query.filter_list(todos) }))
}

#[post("/todos", format = "json", data = "<request>")]
async fn create_todo(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    rng: &State<SyncRng<StdRng>>,
    request: JsonBody<'_, NewTodo>,
) -> Result<Created<Json<TodoResponse>>, ApiError> {
    let request = parse_body(request)?;
    let todo = request.into_todo(rng.make_uuid(), OffsetDateTime::now_utc())?;
    storage.write_todo(&auth.0.username, &todo).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    let location = format!("/api/todos/{}", todo.id);
    Ok(Created::new(location).body(Json(TodoResponse { todo })))
}

#[get("/todos/<id>")]
async fn get_todo(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = storage.read_todo(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    Ok(Json(TodoResponse { todo }))
}

#[put("/todos/<id>", format = "json", data = "<request>")]
async fn update_todo(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
    request: JsonBody<'_, TodoPatch>,
) -> Result<Json<TodoResponse>, ApiError> {
    let patch = parse_body(request)?;
    let mut todo = storage.read_todo(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    patch.validate()?;
    patch.apply_to(&mut todo, OffsetDateTime::now_utc());
    storage.write_todo(&auth.0.username, &todo).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    Ok(Json(TodoResponse { todo }))
}

#[delete("/todos/<id>")]
async fn delete_todo(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
) -> Result<Json<MessageResponse>, ApiError> {
    storage.delete_todo(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Todo"))?;
    Ok(Json(MessageResponse { message: "Todo deleted successfully" }))
}

#[get("/notes?<params..>")]
async fn list_notes(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    params: NoteListParams,
) -> Result<Json<NoteListResponse>, ApiError> {
    let query = match params.parse() {
        Some(query) => query,
        None => return Ok(Json(NoteListResponse { notes: Vec::new() })),
    };
    let notes = storage.list_notes(&auth.0.username).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    Ok(Json(NoteListResponse { notes: query.filter_list(notes) }))
}

#[post("/notes", format = "json", data = "<request>")]
async fn create_note(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    rng: &State<SyncRng<StdRng>>,
    request: JsonBody<'_, NewNote>,
) -> Result<Created<Json<NoteResponse>>, ApiError> {
    let request = parse_body(request)?;
    let note = request.into_note(rng.make_uuid(), OffsetDateTime::now_utc())?;
    storage.write_note(&auth.0.username, &note).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    let location = format!("/api/notes/{}", note.id);
    Ok(Created::new(location).body(Json(NoteResponse { note })))
}

#[get("/notes/<id>")]
async fn get_note(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = storage.read_note(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    Ok(Json(NoteResponse { note }))
}

#[put("/notes/<id>", format = "json", data = "<request>")]
async fn update_note(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
    request: JsonBody<'_, NotePatch>,
) -> Result<Json<NoteResponse>, ApiError> {
    let patch = parse_body(request)?;
    let mut note = storage.read_note(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    patch.validate()?;
    patch.apply_to(&mut note, OffsetDateTime::now_utc());
    storage.write_note(&auth.0.username, &note).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    Ok(Json(NoteResponse { note }))
}

#[delete("/notes/<id>")]
async fn delete_note(
    auth: Authenticated,
    storage: &State<DocumentStorage>,
    id: Uuid,
) -> Result<Json<MessageResponse>, ApiError> {
    storage.delete_note(&auth.0.username, id).await
        .map_err(|e| ApiError::from_storage(e, "Note"))?;
    Ok(Json(MessageResponse { message: "Note deleted successfully" }))
}

pub fn api_routes() -> Vec<Route> {
    routes![
        health,
        login,
        logout,
        list_todos,
        create_todo,
        get_todo,
        update_todo,
        delete_todo,
        list_notes,
        create_note,
        get_note,
        update_note,
        delete_note,
    ]
}

// Guard failures bypass route responders, so the uniform `{"error"}` body
// for those comes from catchers.
#[catch(401)]
fn unauthorized_catcher() -> rocket::response::content::RawJson<String> {
    rocket::response::content::RawJson(
        errors::error_body("Authentication required")
    )
}

#[catch(404)]
fn not_found_catcher() -> rocket::response::content::RawJson<String> {
    rocket::response::content::RawJson(errors::error_body("Not found"))
}

#[catch(500)]
fn internal_catcher() -> rocket::response::content::RawJson<String> {
    rocket::response::content::RawJson(
        errors::error_body("Internal server error")
    )
}

pub fn api_catchers() -> Vec<Catcher> {
    catchers![
        unauthorized_catcher,
        not_found_catcher,
        internal_catcher,
    ]
}
