use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PRODUCT_ID: &str = "product1";
pub const DEFAULT_PRODUCT_PRICE: f64 = 5.0;

/// Opaque order identifier handed out by the cart service. Accepted as a JSON string or
/// number and kept as its text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrderId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawOrderId::deserialize(deserializer)? {
            RawOrderId::Text(id) => Ok(OrderId(id)),
            RawOrderId::Number(n) => Ok(OrderId(n.to_string())),
        }
    }
}

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRequest {
    pub items: Vec<CartItem>,
}

impl CartRequest {
    /// The fixed one-item cart the order button submits. Built fresh on every call.
    pub fn single_item() -> Self {
        CartRequest {
            items: vec![CartItem {
                product_id: String::from(DEFAULT_PRODUCT_ID),
                price: DEFAULT_PRODUCT_PRICE,
                quantity: 1,
            }],
        }
    }
}
