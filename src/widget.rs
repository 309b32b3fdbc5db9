use std::{str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::{
    cart_api::CartApi,
    domain::{CartRequest, OrderId},
    dtos::WidgetView,
    errors::WidgetError,
};

pub const ORDER_BUTTON_LABEL: &str = "Place order";
pub const ORDER_CREATED_LABEL: &str = "Order created";
pub const REFRESH_BUTTON_LABEL: &str = "Refresh";
pub const REFRESH_BUTTON_CLASS: &str = "update-btn";
pub const UPDATE_CONTAINER_ID: &str = "update-button-container";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    OrderButton,
    RefreshButton,
}

impl FromStr for ControlId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order_button" => Ok(ControlId::OrderButton),
            "refresh_button" => Ok(ControlId::RefreshButton),
            other => Err(other.to_string()),
        }
    }
}

/// What a control does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SubmitOrder,
    CheckStatus { target: ControlId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub id: ControlId,
    pub label: String,
    pub class: Option<String>,
    pub disabled: bool,
    pub on_click: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub id: String,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickOutcome {
    OrderCreated { order_id: OrderId },
    StatusRefreshed { text: String },
    Ignored,
}

/// Per-widget state that lives as long as the page does.
#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    order_id: Option<OrderId>,
}

impl OrderSession {
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    fn record(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
    }
}

pub struct OrderWidget {
    api: Arc<dyn CartApi + Send + Sync>,
    session: OrderSession,
    order_button: Control,
    update_container: Container,
    refresh_wired: bool,
}

impl OrderWidget {
    pub fn new(api: Arc<dyn CartApi + Send + Sync>) -> Self {
        OrderWidget {
            api: api,
            session: OrderSession::default(),
            order_button: Control {
                id: ControlId::OrderButton,
                label: String::from(ORDER_BUTTON_LABEL),
                class: None,
                disabled: false,
                on_click: Action::SubmitOrder,
            },
            update_container: Container {
                id: String::from(UPDATE_CONTAINER_ID),
                controls: Vec::new(),
            },
            refresh_wired: false,
        }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    pub fn order_button(&self) -> &Control {
        &self.order_button
    }

    pub fn update_container(&self) -> &Container {
        &self.update_container
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        if id == ControlId::OrderButton {
            return Some(&self.order_button);
        }

        self.update_container.controls.iter().find(|c| c.id == id)
    }

    fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        if id == ControlId::OrderButton {
            return Some(&mut self.order_button);
        }

        self.update_container.controls.iter_mut().find(|c| c.id == id)
    }

    pub fn view(&self) -> WidgetView {
        WidgetView {
            order_button: self.order_button().clone(),
            update_container: self.update_container().clone(),
            order_id: self.session().order_id().cloned(),
        }
    }

    /// Creates the fixed one-item cart. On success the identifier is stored, the trigger
    /// is relabelled and disabled, and the refresh control is wired once. On failure the
    /// widget is left exactly as it was.
    pub async fn submit_order(&mut self, trigger: ControlId) -> Result<OrderId, WidgetError> {
        match self.control(trigger) {
            Some(c) if c.on_click == Action::SubmitOrder => {}
            Some(_) => return Err(WidgetError::NotAnOrderTrigger(trigger)),
            None => return Err(WidgetError::UnknownControl(trigger)),
        }

        let request = CartRequest::single_item();
        let created = match self.api.create_cart(&request).await {
            Ok(created) => created,
            Err(e) => {
                event!(Level::ERROR, "failed to create cart: {}", e);
                return Err(e.into());
            }
        };

        event!(Level::INFO, "order {} created", created.order_id);
        self.session.record(created.order_id.clone());

        if let Some(button) = self.control_mut(trigger) {
            button.label = String::from(ORDER_CREATED_LABEL);
            button.disabled = true;
        }

        self.wire_refresh_control(trigger);

        Ok(created.order_id)
    }

    /// Fetches the latest status of the stored order and writes it onto `target`.
    pub async fn check_status(&mut self, target: ControlId) -> Result<String, WidgetError> {
        if self.control(target).is_none() {
            return Err(WidgetError::UnknownControl(target));
        }

        let order_id = match self.session.order_id() {
            Some(id) => id.clone(),
            None => {
                event!(Level::WARN, "status requested before any order was created");
                return Err(WidgetError::NoOrder);
            }
        };

        let status = match self.api.order_status(&order_id).await {
            Ok(status) => status,
            Err(e) => {
                event!(Level::ERROR, "failed to fetch status of order {}: {}", order_id, e);
                return Err(e.into());
            }
        };

        if let Some(control) = self.control_mut(target) {
            control.label = status.text.clone();
        }

        Ok(status.text)
    }

    pub async fn click(&mut self, id: ControlId) -> Result<ClickOutcome, WidgetError> {
        let (disabled, action) = match self.control(id) {
            Some(c) => (c.disabled, c.on_click),
            None => return Err(WidgetError::UnknownControl(id)),
        };

        if disabled {
            event!(Level::DEBUG, "ignoring click on disabled control {:?}", id);
            return Ok(ClickOutcome::Ignored);
        }

        match action {
            Action::SubmitOrder => {
                let order_id = self.submit_order(id).await?;
                Ok(ClickOutcome::OrderCreated { order_id })
            }
            Action::CheckStatus { target } => {
                let text = self.check_status(target).await?;
                Ok(ClickOutcome::StatusRefreshed { text })
            }
        }
    }

    fn wire_refresh_control(&mut self, target: ControlId) {
        if self.refresh_wired {
            return;
        }

        self.update_container.controls.push(Control {
            id: ControlId::RefreshButton,
            label: String::from(REFRESH_BUTTON_LABEL),
            class: Some(String::from(REFRESH_BUTTON_CLASS)),
            disabled: false,
            on_click: Action::CheckStatus { target },
        });
        self.refresh_wired = true;
    }
}
