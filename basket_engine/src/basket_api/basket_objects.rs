use bg_common::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db_types::{BasketId, LineKey, OrderLine};

//--------------------------------------     DesiredLine      ---------------------------------------------------------
/// One entry of a client-submitted desired basket state. Quantity 0 means "this pairing should be absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredLine {
    pub product_id: String,
    pub product_variant_id: String,
    pub qty: i64,
}

impl DesiredLine {
    pub fn new<P: Into<String>, V: Into<String>>(product_id: P, variant_id: V, qty: i64) -> Self {
        Self { product_id: product_id.into(), product_variant_id: variant_id.into(), qty }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.as_str(), self.product_variant_id.as_str())
    }
}

//--------------------------------------      LineView        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// An order line enriched with live catalog details. The price fields always come from the stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub id: i64,
    pub product_id: String,
    pub product_variant_id: String,
    pub qty: i64,
    pub product_price: Cents,
    pub line_total: Cents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

impl LineView {
    pub fn from_line(line: OrderLine, product: Option<ProductSummary>) -> Self {
        Self {
            id: line.id,
            line_total: line.line_total(),
            product_id: line.product_id,
            product_variant_id: line.product_variant_id,
            qty: line.qty,
            product_price: line.product_price,
            product,
        }
    }
}

//--------------------------------------      BasketView      ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketView {
    pub id: BasketId,
    pub user_id: Option<String>,
    pub order_products: Vec<LineView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_id: Option<i64>,
    /// Always recomputed from the line snapshots at read time, never stored.
    pub total_amount: Cents,
    /// Product ids the catalog could not be reached for. Their lines are present but unenriched.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unavailable_products: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      FailedKey       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOp {
    Add,
    Update,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Another write holds this key. Re-running the reconciliation will converge.
    Conflict,
    /// The catalog collaborator could not be reached, even after a retry.
    UpstreamUnavailable,
    /// The referenced product or variant does not exist in the catalog.
    NotFound,
    /// The store rejected the write.
    Store,
}

/// One key a reconciliation could not bring into the desired state. The rest of the basket is unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedKey {
    #[serde(flatten)]
    pub key: LineKey,
    pub op: LineOp,
    pub reason: FailureReason,
    pub detail: String,
}

impl FailedKey {
    pub fn new(key: LineKey, op: LineOp, reason: FailureReason, detail: String) -> Self {
        Self { key, op, reason, detail }
    }
}

//--------------------------------------   ReconcileOutcome   ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub view: BasketView,
    pub failed: Vec<FailedKey>,
}

impl ReconcileOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
