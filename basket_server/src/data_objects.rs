use std::fmt::Display;

use basket_engine::{BasketView, DesiredLine, FailedKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBasketRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The full desired basket state. Pairings absent from the list are removed from the basket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasketRequest {
    pub order_products: Vec<DesiredLine>,
}

/// Reconciliation response: the (possibly partially) updated view, plus the keys that could not be applied so the
/// client can retry just those.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    #[serde(flatten)]
    pub basket: BasketView,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failed_keys: Vec<FailedKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}
