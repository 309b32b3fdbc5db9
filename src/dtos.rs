use serde::{Deserialize, Serialize};

use crate::{
    domain::OrderId,
    widget::{ClickOutcome, Container, Control},
};

pub trait Response{}

// remote cart service payloads
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCartResponse {
    pub order_id: OrderId
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub text: String
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub order_button: Control,
    pub update_container: Container,
    pub order_id: Option<OrderId>,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub widget: WidgetView,
}
impl Response for CreateSessionResponse{}

#[derive(Serialize)]
pub struct GetSessionResponse {
    pub widget: WidgetView,
}
impl Response for GetSessionResponse{}

#[derive(Serialize)]
pub struct ClickControlResponse {
    pub outcome: ClickOutcome,
    pub widget: WidgetView,
}
impl Response for ClickControlResponse{}

#[derive(Serialize)]
pub struct DeleteSessionResponse {
    pub session_id: String,
}
impl Response for DeleteSessionResponse{}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String
}
impl Response for ApiError{}
