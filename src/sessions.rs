use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::widget::OrderWidget;

pub type SharedWidget = Arc<Mutex<OrderWidget>>;

pub trait WidgetSessionRepository {
    async fn create(&self, id: String, widget: OrderWidget) -> Result<SharedWidget, String>;
    async fn read<'a>(&self, id: &'a str) -> Result<SharedWidget, String>;
    async fn delete(&self, id: &str) -> Result<(), String>;
}

#[derive(Clone)]
pub struct InMemoryWidgetSessionRepository {
    widgets: Arc<Mutex<HashMap<String, SharedWidget>>>,
}

impl InMemoryWidgetSessionRepository {
    pub fn new() -> Self {
        InMemoryWidgetSessionRepository {
            widgets: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl WidgetSessionRepository for InMemoryWidgetSessionRepository {
    async fn create(&self, id: String, widget: OrderWidget) -> Result<SharedWidget, String> {
        let mut lock = self.widgets.lock().await;
        if lock.contains_key(&id) {
            return Err(format!("Session with id {} already exists", id));
        }

        let shared = Arc::new(Mutex::new(widget));
        lock.insert(id, shared.clone());
        Ok(shared)
    }

    async fn read<'a>(&self, id: &'a str) -> Result<SharedWidget, String> {
        let lock = self.widgets.lock().await;
        match lock.get(id) {
            Some(x) => Ok(x.clone()),
            None => Err(format!("Session with id {} did not exist", id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), String> {
        let mut lock = self.widgets.lock().await;
        match lock.remove_entry(id) {
            Some(_) => Ok(()),
            None => Err(format!("Session with id {} did not exist", id)),
        }
    }
}
