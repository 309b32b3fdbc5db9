use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{event, Level};

use crate::{
    domain::{CartRequest, OrderId},
    dtos::{CreateCartResponse, StatusResponse},
    errors::CartApiError,
};

/// The remote cart service the widget talks to.
#[async_trait]
pub trait CartApi {
    async fn create_cart(&self, request: &CartRequest) -> Result<CreateCartResponse, CartApiError>;
    async fn order_status(&self, order_id: &OrderId) -> Result<StatusResponse, CartApiError>;
}

#[derive(Clone)]
pub struct ReqwestCartApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestCartApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        ReqwestCartApi {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn cart_url(&self) -> String {
        format!("{}/api/cart", self.base_url)
    }

    fn status_url(&self) -> String {
        format!("{}/api/cart/status", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(url: String, response: reqwest::Response) -> Result<T, CartApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CartApiError::Status { url, status });
    }

    match response.json::<T>().await {
        Ok(body) => Ok(body),
        Err(e) => Err(CartApiError::Decode { url, source: e }),
    }
}

#[async_trait]
impl CartApi for ReqwestCartApi {
    async fn create_cart(&self, request: &CartRequest) -> Result<CreateCartResponse, CartApiError> {
        let url = self.cart_url();
        event!(Level::DEBUG, "POST {}", url);

        let response = match self.client.post(&url).json(request).send().await {
            Ok(r) => r,
            Err(e) => return Err(CartApiError::Transport { url, source: e }),
        };

        let created: CreateCartResponse = decode(url, response).await?;
        event!(Level::DEBUG, "cart created: {:?}", created);

        Ok(created)
    }

    async fn order_status(&self, order_id: &OrderId) -> Result<StatusResponse, CartApiError> {
        let url = self.status_url();
        event!(Level::DEBUG, "GET {} for order {}", url, order_id);

        let response = match self
            .client
            .get(&url)
            .query(&[("order_id", order_id.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Err(CartApiError::Transport { url, source: e }),
        };

        decode(url, response).await
    }
}
