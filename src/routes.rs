use std::sync::Arc;

use axum::{extract::{Path, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::{json, Value};

use crate::{cqrs::{ClickControlCommand, CommandHandler, CreateSessionCommand, DeleteSessionCommand, GetSessionQuery, QueryHandler}, dtos::ApiError, errors::{HandlerError, WidgetError}, state::AppState, widget::ControlId};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session_by_id).delete(delete_session))
        .route("/sessions/{id}/controls/{control}/click", post(click_control))
        .with_state(state)
}

fn error_response(e: HandlerError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        HandlerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        HandlerError::UnknownControlName(_) => StatusCode::NOT_FOUND,
        HandlerError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        HandlerError::Widget(WidgetError::UnknownControl(_)) => StatusCode::NOT_FOUND,
        HandlerError::Widget(WidgetError::NoOrder) => StatusCode::CONFLICT,
        HandlerError::Widget(WidgetError::NotAnOrderTrigger(_)) => StatusCode::CONFLICT,
        HandlerError::Widget(WidgetError::Api(_)) => StatusCode::BAD_GATEWAY,
    };

    (status, Json(json!(ApiError{error: e.to_string()})))
}

pub async fn index() -> &'static str {
    "Order widget is up"
}

pub async fn create_session(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.create_session_command_handler.handle(&CreateSessionCommand{}).await {
        Ok(response) => (StatusCode::CREATED, Json(json!(response))),
        Err(e) => error_response(e)
    }
}

pub async fn get_session_by_id(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let input = GetSessionQuery {
        id: id
    };

    match state.get_session_query_handler.handle(&input).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => error_response(e)
    }
}

pub async fn delete_session(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let input = DeleteSessionCommand {
        session_id: id
    };

    match state.delete_session_command_handler.handle(&input).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => error_response(e)
    }
}

pub async fn click_control(Path((id, control_name)): Path<(String, String)>, State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let control = match control_name.parse::<ControlId>() {
        Ok(control) => control,
        Err(name) => return error_response(HandlerError::UnknownControlName(name))
    };

    let input = ClickControlCommand {
        session_id: id,
        control: control,
    };

    match state.click_control_command_handler.handle(&input).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => error_response(e)
    }
}
