use std::{fmt::Display, str::FromStr};

use bg_common::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

//--------------------------------------      BasketId        ---------------------------------------------------------
/// An opaque basket identifier. Clients hold on to these across requests, so they are random rather than sequential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct BasketId(pub String);

impl BasketId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BasketId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for BasketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for BasketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------       LineKey        ---------------------------------------------------------
/// The reconciliation identity of an order line. Clients never see server-assigned line ids, so a desired basket
/// state is keyed by the (product, variant) pair instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: String,
    pub product_variant_id: String,
}

impl LineKey {
    pub fn new<P: Into<String>, V: Into<String>>(product_id: P, variant_id: V) -> Self {
        Self { product_id: product_id.into(), product_variant_id: variant_id.into() }
    }
}

impl Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.product_id, self.product_variant_id)
    }
}

//--------------------------------------       Basket         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Basket {
    pub id: BasketId,
    /// Anonymous baskets carry no user id until the client logs in.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBasket {
    pub user_id: Option<String>,
}

//--------------------------------------      OrderLine       ---------------------------------------------------------
/// One (product, variant) pairing in a basket. `product_price` is the unit price snapshotted when the line was
/// created; it never tracks later catalog price changes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub basket_id: BasketId,
    pub product_id: String,
    pub product_variant_id: String,
    pub qty: i64,
    pub product_price: Cents,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderLine {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.as_str(), self.product_variant_id.as_str())
    }

    pub fn line_total(&self) -> Cents {
        self.product_price * self.qty
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderLine {
    pub basket_id: BasketId,
    pub product_id: String,
    pub product_variant_id: String,
    pub qty: i64,
    pub product_price: Cents,
}

//--------------------------------------        Role          ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Error)]
#[error("{0} is not a valid role")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

//--------------------------------------      UserAuth        ---------------------------------------------------------
/// The authorization context resolved by the Users collaborator. Only basket deletion consults it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAuth {
    pub id: String,
    pub role: Role,
}

impl UserAuth {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bg_common::Cents;

    #[test]
    fn line_total_uses_the_snapshot() {
        let line = OrderLine {
            id: 1,
            basket_id: BasketId::from("b1".to_string()),
            product_id: "p1".to_string(),
            product_variant_id: "v1".to_string(),
            qty: 3,
            product_price: Cents::from(100),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(line.line_total(), Cents::from(300));
        assert_eq!(line.key(), LineKey::new("p1", "v1"));
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }
}
