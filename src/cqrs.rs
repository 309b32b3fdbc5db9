use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::{
    cart_api::CartApi,
    dtos::{ClickControlResponse, CreateSessionResponse, DeleteSessionResponse, GetSessionResponse, Response},
    errors::HandlerError,
    sessions::{SharedWidget, WidgetSessionRepository},
    widget::{ControlId, OrderWidget},
};

// traits
pub trait Command{}
pub trait Query{}

pub trait CommandHandler<C: Command, R: Response>{
    async fn handle(&self, input: &C) -> Result<R, HandlerError>;
}

pub trait QueryHandler<Q: Query, R: Response>{
    async fn handle(&self, input: &Q) -> Result<R, HandlerError>;
}

#[derive(Serialize, Deserialize, Default)]
pub struct CreateSessionCommand{
}
impl Command for CreateSessionCommand{}

#[derive(Serialize, Deserialize)]
pub struct ClickControlCommand {
    pub session_id: String,
    pub control: ControlId,
}
impl Command for ClickControlCommand{}

#[derive(Serialize, Deserialize)]
pub struct DeleteSessionCommand {
    pub session_id: String,
}
impl Command for DeleteSessionCommand{}

#[derive(Serialize, Deserialize)]
pub struct GetSessionQuery {
    pub id: String
}
impl Query for GetSessionQuery{}

async fn find_session<T: WidgetSessionRepository>(sessions: &T, id: &str) -> Result<SharedWidget, HandlerError> {
    match sessions.read(id).await {
        Ok(widget) => Ok(widget),
        Err(e) => {
            event!(Level::WARN, "Error occurred while finding session: {}", e);
            Err(HandlerError::SessionNotFound(id.to_string()))
        }
    }
}

pub struct CreateSessionCommandHandler<T: WidgetSessionRepository>{
    sessions: Arc<T>,
    cart_api: Arc<dyn CartApi + Send + Sync>,
}

impl<T: WidgetSessionRepository> CreateSessionCommandHandler<T>{
    pub fn new(sessions: Arc<T>, cart_api: Arc<dyn CartApi + Send + Sync>) -> Self{
        CreateSessionCommandHandler {
            sessions: sessions,
            cart_api: cart_api,
        }
    }
}

impl<T: WidgetSessionRepository> CommandHandler<CreateSessionCommand, CreateSessionResponse> for CreateSessionCommandHandler<T>{
    async fn handle(&self, _input: &CreateSessionCommand) -> Result<CreateSessionResponse, HandlerError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let widget = OrderWidget::new(self.cart_api.clone());
        let view = widget.view();

        match self.sessions.create(session_id.clone(), widget).await {
            Ok(_) => {
                event!(Level::INFO, "session {} opened", session_id);
                Ok(CreateSessionResponse {
                    session_id: session_id,
                    widget: view,
                })
            },
            Err(e) => {
                event!(Level::WARN, "Error occurred while creating session: {}", e);
                Err(HandlerError::Session(e))
            }
        }
    }
}

pub struct ClickControlCommandHandler<T: WidgetSessionRepository> {
    sessions: Arc<T>
}

impl<T: WidgetSessionRepository> ClickControlCommandHandler<T>{
    pub fn new(sessions: Arc<T>) -> Self {
        ClickControlCommandHandler{
            sessions: sessions
        }
    }
}

impl<T: WidgetSessionRepository> CommandHandler<ClickControlCommand, ClickControlResponse> for ClickControlCommandHandler<T>{
    async fn handle(&self, input: &ClickControlCommand) -> Result<ClickControlResponse, HandlerError> {
        let shared = find_session(self.sessions.as_ref(), &input.session_id).await?;

        // held across the remote call so clicks on one page run one at a time
        let mut widget = shared.lock().await;

        event!(Level::DEBUG, "session {} clicked {:?}", input.session_id, input.control);
        let outcome = widget.click(input.control).await?;

        Ok(ClickControlResponse {
            outcome: outcome,
            widget: widget.view(),
        })
    }
}

pub struct DeleteSessionCommandHandler<T: WidgetSessionRepository> {
    sessions: Arc<T>
}

impl<T: WidgetSessionRepository> DeleteSessionCommandHandler<T>{
    pub fn new(sessions: Arc<T>) -> Self {
        DeleteSessionCommandHandler{
            sessions: sessions
        }
    }
}

impl<T: WidgetSessionRepository> CommandHandler<DeleteSessionCommand, DeleteSessionResponse> for DeleteSessionCommandHandler<T>{
    async fn handle(&self, input: &DeleteSessionCommand) -> Result<DeleteSessionResponse, HandlerError> {
        match self.sessions.delete(&input.session_id).await {
            Ok(()) => {
                event!(Level::INFO, "session {} closed", input.session_id);
                Ok(DeleteSessionResponse {
                    session_id: input.session_id.clone()
                })
            },
            Err(e) => {
                event!(Level::WARN, "Error occurred while deleting session: {}", e);
                Err(HandlerError::SessionNotFound(input.session_id.clone()))
            }
        }
    }
}

pub struct GetSessionQueryHandler<T: WidgetSessionRepository> {
    sessions: Arc<T>
}

impl<T: WidgetSessionRepository> GetSessionQueryHandler<T> {
    pub fn new(sessions: Arc<T>) -> Self {
        GetSessionQueryHandler {
            sessions: sessions
        }
    }
}

impl<T: WidgetSessionRepository> QueryHandler<GetSessionQuery, GetSessionResponse> for GetSessionQueryHandler<T> {
    async fn handle(&self, input: &GetSessionQuery) -> Result<GetSessionResponse, HandlerError> {
        let shared = find_session(self.sessions.as_ref(), &input.id).await?;
        let widget = shared.lock().await;

        Ok(GetSessionResponse {
            widget: widget.view()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{
        cart_api::ReqwestCartApi,
        domain::{CartRequest, OrderId},
        dtos::{CreateCartResponse, StatusResponse},
        errors::{CartApiError, WidgetError},
        sessions::InMemoryWidgetSessionRepository,
        widget::{ClickOutcome, ORDER_CREATED_LABEL},
    };

    /// Hands out sequential order ids and echoes them back as status text.
    #[derive(Default)]
    struct CountingCartApi {
        created: AtomicU32,
    }

    #[async_trait]
    impl CartApi for CountingCartApi {
        async fn create_cart(&self, _request: &CartRequest) -> Result<CreateCartResponse, CartApiError> {
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(CreateCartResponse { order_id: OrderId::new(format!("order-{}", n)) })
        }

        async fn order_status(&self, order_id: &OrderId) -> Result<StatusResponse, CartApiError> {
            Ok(StatusResponse { text: format!("Order status: {}", order_id) })
        }
    }

    struct Handlers {
        create: CreateSessionCommandHandler<InMemoryWidgetSessionRepository>,
        click: ClickControlCommandHandler<InMemoryWidgetSessionRepository>,
        delete: DeleteSessionCommandHandler<InMemoryWidgetSessionRepository>,
        get: GetSessionQueryHandler<InMemoryWidgetSessionRepository>,
    }

    fn handlers_with(api: Arc<dyn CartApi + Send + Sync>) -> Handlers {
        let sessions = Arc::new(InMemoryWidgetSessionRepository::new());

        Handlers {
            create: CreateSessionCommandHandler::new(sessions.clone(), api),
            click: ClickControlCommandHandler::new(sessions.clone()),
            delete: DeleteSessionCommandHandler::new(sessions.clone()),
            get: GetSessionQueryHandler::new(sessions),
        }
    }

    fn handlers() -> Handlers {
        handlers_with(Arc::new(CountingCartApi::default()))
    }

    fn click(session_id: &str, control: ControlId) -> ClickControlCommand {
        ClickControlCommand { session_id: session_id.to_string(), control: control }
    }

    #[tokio::test]
    async fn sessions_keep_independent_order_ids() {
        let h = handlers();
        let first = h.create.handle(&CreateSessionCommand::default()).await.unwrap();
        let second = h.create.handle(&CreateSessionCommand::default()).await.unwrap();
        assert_ne!(first.session_id, second.session_id);

        h.click.handle(&click(&first.session_id, ControlId::OrderButton)).await.unwrap();
        h.click.handle(&click(&second.session_id, ControlId::OrderButton)).await.unwrap();

        let first_view = h.get.handle(&GetSessionQuery { id: first.session_id.clone() }).await.unwrap();
        let second_view = h.get.handle(&GetSessionQuery { id: second.session_id.clone() }).await.unwrap();

        assert_eq!(first_view.widget.order_id, Some(OrderId::new("order-1")));
        assert_eq!(second_view.widget.order_id, Some(OrderId::new("order-2")));
        assert_eq!(first_view.widget.order_button.label, ORDER_CREATED_LABEL);
    }

    #[tokio::test]
    async fn refresh_click_reports_status_on_order_button() {
        let h = handlers();
        let session = h.create.handle(&CreateSessionCommand::default()).await.unwrap();

        h.click.handle(&click(&session.session_id, ControlId::OrderButton)).await.unwrap();
        let response = h.click.handle(&click(&session.session_id, ControlId::RefreshButton)).await.unwrap();

        assert_eq!(
            response.outcome,
            ClickOutcome::StatusRefreshed { text: String::from("Order status: order-1") }
        );
        assert_eq!(response.widget.order_button.label, "Order status: order-1");
    }

    #[tokio::test]
    async fn unknown_session_and_control_are_reported() {
        let h = handlers();

        let err = h.get.handle(&GetSessionQuery { id: String::from("missing") }).await.err().unwrap();
        assert!(matches!(err, HandlerError::SessionNotFound(id) if id == "missing"));

        let session = h.create.handle(&CreateSessionCommand::default()).await.unwrap();
        let err = h.click.handle(&click(&session.session_id, ControlId::RefreshButton)).await.err().unwrap();
        assert!(matches!(err, HandlerError::Widget(WidgetError::UnknownControl(ControlId::RefreshButton))));
    }

    #[tokio::test]
    async fn deleted_session_is_no_longer_found() {
        let h = handlers();
        let session = h.create.handle(&CreateSessionCommand::default()).await.unwrap();

        let deleted = h.delete.handle(&DeleteSessionCommand { session_id: session.session_id.clone() }).await.unwrap();
        assert_eq!(deleted.session_id, session.session_id);

        let err = h.get.handle(&GetSessionQuery { id: session.session_id.clone() }).await.err().unwrap();
        assert!(matches!(err, HandlerError::SessionNotFound(_)));

        let err = h.delete.handle(&DeleteSessionCommand { session_id: session.session_id.clone() }).await.err().unwrap();
        assert!(matches!(err, HandlerError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_order_clicks_on_one_session_create_one_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cart"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"order_id": "abc123"}))
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let h = handlers_with(Arc::new(ReqwestCartApi::new(server.uri())));
        let session = h.create.handle(&CreateSessionCommand::default()).await.unwrap();
        let first_click = click(&session.session_id, ControlId::OrderButton);
        let second_click = click(&session.session_id, ControlId::OrderButton);

        let (first, second) = tokio::join!(h.click.handle(&first_click), h.click.handle(&second_click));
        let mut outcomes = vec![first.unwrap().outcome, second.unwrap().outcome];
        outcomes.sort_by_key(|o| matches!(o, ClickOutcome::Ignored));

        assert_eq!(
            outcomes,
            vec![ClickOutcome::OrderCreated { order_id: OrderId::new("abc123") }, ClickOutcome::Ignored]
        );

        let view = h.get.handle(&GetSessionQuery { id: session.session_id.clone() }).await.unwrap();
        assert_eq!(view.widget.update_container.controls.len(), 1);
        server.verify().await;
    }
}
