use std::sync::Arc;

use crate::{cart_api::CartApi, cqrs::{ClickControlCommandHandler, CreateSessionCommandHandler, DeleteSessionCommandHandler, GetSessionQueryHandler}, sessions::InMemoryWidgetSessionRepository};

#[derive(Clone)]
pub struct AppState {
    pub create_session_command_handler: Arc<CreateSessionCommandHandler<InMemoryWidgetSessionRepository>>,
    pub click_control_command_handler: Arc<ClickControlCommandHandler<InMemoryWidgetSessionRepository>>,
    pub delete_session_command_handler: Arc<DeleteSessionCommandHandler<InMemoryWidgetSessionRepository>>,
    pub get_session_query_handler: Arc<GetSessionQueryHandler<InMemoryWidgetSessionRepository>>,
}

impl AppState {
    pub fn new(cart_api: Arc<dyn CartApi + Send + Sync>) -> Self {
        let sessions = Arc::new(InMemoryWidgetSessionRepository::new());

        AppState {
            create_session_command_handler: Arc::new(CreateSessionCommandHandler::new(sessions.clone(), cart_api)),
            click_control_command_handler: Arc::new(ClickControlCommandHandler::new(sessions.clone())),
            delete_session_command_handler: Arc::new(DeleteSessionCommandHandler::new(sessions.clone())),
            get_session_query_handler: Arc::new(GetSessionQueryHandler::new(sessions)),
        }
    }
}
