//! The pure planning half of basket reconciliation.
//!
//! Given the persisted lines and the client's desired state, [`ReconcilePlan::build`] computes the three-way split
//! into removals, in-place quantity updates and additions. No I/O happens here; [`crate::BasketApi`] applies the
//! plan against the store.
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{
    basket_api::basket_objects::DesiredLine,
    db_types::{LineKey, OrderLine},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Order line quantity may not be negative: {key} was submitted with qty {qty}")]
    NegativeQuantity { key: LineKey, qty: i64 },
    #[error("Order line is missing a product or variant id")]
    MissingIds,
}

/// An in-place quantity change for an existing line. The line id and price snapshot survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtyChange {
    pub line_id: i64,
    pub key: LineKey,
    pub qty: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    pub to_remove: Vec<OrderLine>,
    pub to_update: Vec<QtyChange>,
    pub to_add: Vec<DesiredLine>,
}

impl ReconcilePlan {
    /// Diffs `desired` against `current`, keyed strictly by (product, variant).
    ///
    /// * A key in `current` but not in `desired` (or desired with qty 0) is removed.
    /// * A key in both with a different quantity is updated in place.
    /// * A key only in `desired` is added.
    /// * A key in both with the same quantity produces no operation at all.
    ///
    /// If the same key appears more than once in `desired`, the last occurrence wins.
    pub fn build(current: &[OrderLine], desired: &[DesiredLine]) -> Result<Self, PlanError> {
        let mut desired_qty = HashMap::with_capacity(desired.len());
        for want in desired {
            if want.product_id.is_empty() || want.product_variant_id.is_empty() {
                return Err(PlanError::MissingIds);
            }
            if want.qty < 0 {
                return Err(PlanError::NegativeQuantity { key: want.key(), qty: want.qty });
            }
            desired_qty.insert(want.key(), want.qty);
        }

        let mut plan = Self::default();
        let mut current_keys = HashSet::with_capacity(current.len());
        for line in current {
            let key = line.key();
            match desired_qty.get(&key) {
                // qty 0 is equivalent to omitting the pairing
                None | Some(0) => plan.to_remove.push(line.clone()),
                Some(&qty) if qty != line.qty => {
                    plan.to_update.push(QtyChange { line_id: line.id, key: key.clone(), qty })
                },
                Some(_) => {},
            }
            current_keys.insert(key);
        }
        for (key, qty) in desired_qty {
            if qty > 0 && !current_keys.contains(&key) {
                plan.to_add.push(DesiredLine { product_id: key.product_id, product_variant_id: key.product_variant_id, qty });
            }
        }
        Ok(plan)
    }

    /// True when the basket already matches the desired state and no write is needed.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_update.is_empty() && self.to_add.is_empty()
    }

    pub fn operation_count(&self) -> usize {
        self.to_remove.len() + self.to_update.len() + self.to_add.len()
    }
}
