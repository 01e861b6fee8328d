use std::{collections::HashMap, fmt::Debug, time::Duration};

use bg_common::Cents;
use futures_util::stream::{self, StreamExt};
use log::*;

use crate::{
    basket_api::{
        basket_objects::{
            BasketView, DesiredLine, FailedKey, FailureReason, LineOp, LineView, ProductSummary, ReconcileOutcome,
        },
        errors::BasketApiError,
        reconcile::{QtyChange, ReconcilePlan},
    },
    db_types::{Basket, BasketId, NewBasket, NewOrderLine, OrderLine, UserAuth},
    traits::{BasketStore, CatalogError, InsertLineResult, ProductCatalog, ProductInfo},
};

/// Upper bound on in-flight store/catalog calls within one reconciliation phase.
const MAX_CONCURRENT_OPS: usize = 8;
/// Backoff before the single retry against an unreachable catalog.
const UPSTREAM_RETRY_DELAY: Duration = Duration::from_millis(250);

pub struct BasketApi<B, C> {
    db: B,
    catalog: C,
}

impl<B, C> Debug for BasketApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BasketApi")
    }
}

impl<B, C> BasketApi<B, C> {
    pub fn new(db: B, catalog: C) -> Self {
        Self { db, catalog }
    }
}

impl<B, C> BasketApi<B, C>
where
    B: BasketStore,
    C: ProductCatalog,
{
    /// Creates an empty basket, optionally owned by a user, and returns its view.
    pub async fn create_basket(&self, user_id: Option<String>) -> Result<BasketView, BasketApiError<B>> {
        let basket = self.db.insert_basket(NewBasket { user_id }).await.map_err(BasketApiError::Database)?;
        debug!("🧺️ New basket {} created", basket.id);
        self.basket_view(&basket.id).await
    }

    /// Brings the basket's persisted lines into the client-submitted desired state with the minimum set of writes.
    ///
    /// The desired list is keyed by (product, variant); unchanged pairings produce no write at all, quantity changes
    /// are applied in place (line ids and price snapshots survive), and only brand-new pairings get a price lookup
    /// against the catalog. Removals run first so that the unique-key backstop stays quiet, then updates, then
    /// additions; operations within a phase run concurrently since their keys are disjoint.
    ///
    /// Individual keys that cannot be applied (catalog unreachable, constraint race) are reported in the outcome's
    /// `failed` list; the rest of the basket still converges, and the returned view reflects whatever succeeded.
    pub async fn reconcile(
        &self,
        basket_id: &BasketId,
        desired: Vec<DesiredLine>,
    ) -> Result<ReconcileOutcome, BasketApiError<B>> {
        self.require_basket(basket_id).await?;
        let current = self.db.fetch_lines(basket_id).await.map_err(BasketApiError::Database)?;
        let plan = ReconcilePlan::build(&current, &desired)?;
        let mut failed = Vec::new();
        if plan.is_empty() {
            trace!("🧺️ Basket {basket_id} already matches the desired state. No writes issued");
        } else {
            debug!(
                "🧺️ Reconciling basket {basket_id}: {} removals, {} updates, {} additions",
                plan.to_remove.len(),
                plan.to_update.len(),
                plan.to_add.len()
            );
            self.apply_removals(&plan.to_remove, &mut failed).await;
            self.apply_updates(&plan.to_update, &mut failed).await;
            self.apply_additions(basket_id, &plan.to_add, &mut failed).await;
        }
        let view = self.basket_view(basket_id).await?;
        Ok(ReconcileOutcome { view, failed })
    }

    /// Assembles the read view of a basket: lines enriched with live catalog details plus the recomputed total.
    ///
    /// The catalog is queried once per distinct product id, however many variants of it the basket holds. A product
    /// the catalog cannot serve leaves its lines unenriched and is listed in `unavailable_products`; the stored
    /// price snapshots are unaffected either way.
    pub async fn basket_view(&self, basket_id: &BasketId) -> Result<BasketView, BasketApiError<B>> {
        let basket = self.require_basket(basket_id).await?;
        let lines = self.db.fetch_lines(basket_id).await.map_err(BasketApiError::Database)?;
        let checkout_id = self.db.fetch_checkout_id(basket_id).await.map_err(BasketApiError::Database)?;

        let mut product_ids: Vec<&str> = lines.iter().map(|l| l.product_id.as_str()).collect();
        product_ids.sort_unstable();
        product_ids.dedup();
        let fetched = stream::iter(product_ids)
            .map(|pid| async move { (pid, self.fetch_product(pid).await) })
            .buffer_unordered(MAX_CONCURRENT_OPS)
            .collect::<Vec<_>>()
            .await;
        let mut products = HashMap::new();
        let mut unavailable_products = Vec::new();
        for (pid, result) in fetched {
            match result {
                Ok(p) => {
                    products.insert(pid.to_string(), ProductSummary { name: p.name, images: p.images });
                },
                Err(e) => {
                    warn!("🧺️ Catalog enrichment failed for product {pid}: {e}");
                    unavailable_products.push(pid.to_string());
                },
            }
        }
        unavailable_products.sort_unstable();

        let total_amount: Cents = lines.iter().map(OrderLine::line_total).sum();
        let order_products = lines
            .into_iter()
            .map(|line| {
                let product = products.get(&line.product_id).cloned();
                LineView::from_line(line, product)
            })
            .collect();
        Ok(BasketView {
            id: basket.id,
            user_id: basket.user_id,
            order_products,
            checkout_id,
            total_amount,
            unavailable_products,
            created_at: basket.created_at,
            updated_at: basket.updated_at,
        })
    }

    /// Bulk-deletes every line. No reconciliation; the emptied view always has a zero total.
    pub async fn clear_basket(&self, basket_id: &BasketId) -> Result<BasketView, BasketApiError<B>> {
        self.require_basket(basket_id).await?;
        let removed = self.db.clear_basket(basket_id).await.map_err(BasketApiError::Database)?;
        debug!("🧺️ Cleared {removed} lines from basket {basket_id}");
        self.basket_view(basket_id).await
    }

    /// Deletes the basket and all its lines. Only the owning user or an admin may do this; anonymous baskets have
    /// no owner to match, so they can only be deleted by admins.
    pub async fn delete_basket(&self, basket_id: &BasketId, user: &UserAuth) -> Result<(), BasketApiError<B>> {
        let basket = self.require_basket(basket_id).await?;
        check_basket_owner(&basket, user)?;
        let deleted = self.db.delete_basket(basket_id).await.map_err(BasketApiError::Database)?;
        if !deleted {
            // Raced with another delete
            return Err(BasketApiError::BasketNotFound(basket_id.clone()));
        }
        debug!("🧺️ Basket {basket_id} deleted by user {}", user.id);
        Ok(())
    }

    async fn require_basket(&self, basket_id: &BasketId) -> Result<Basket, BasketApiError<B>> {
        self.db
            .fetch_basket(basket_id)
            .await
            .map_err(BasketApiError::Database)?
            .ok_or_else(|| BasketApiError::BasketNotFound(basket_id.clone()))
    }

    async fn apply_removals(&self, lines: &[OrderLine], failed: &mut Vec<FailedKey>) {
        let results = stream::iter(lines)
            .map(|line| async move { (line, self.db.delete_line(line.id).await) })
            .buffer_unordered(MAX_CONCURRENT_OPS)
            .collect::<Vec<_>>()
            .await;
        for (line, result) in results {
            if let Err(e) = result {
                warn!("🧺️ Could not remove line {} from basket {}: {e}", line.key(), line.basket_id);
                failed.push(FailedKey::new(line.key(), LineOp::Remove, FailureReason::Store, e.to_string()));
            }
        }
    }

    async fn apply_updates(&self, changes: &[QtyChange], failed: &mut Vec<FailedKey>) {
        let results = stream::iter(changes)
            .map(|change| async move { (change, self.db.update_line_qty(change.line_id, change.qty).await) })
            .buffer_unordered(MAX_CONCURRENT_OPS)
            .collect::<Vec<_>>()
            .await;
        for (change, result) in results {
            match result {
                Ok(line) => trace!("🧺️ Line {} now has qty {}", line.key(), line.qty),
                Err(e) => {
                    warn!("🧺️ Could not update qty for line {}: {e}", change.key);
                    failed.push(FailedKey::new(change.key.clone(), LineOp::Update, FailureReason::Store, e.to_string()));
                },
            }
        }
    }

    async fn apply_additions(&self, basket_id: &BasketId, additions: &[DesiredLine], failed: &mut Vec<FailedKey>) {
        let results = stream::iter(additions)
            .map(|want| async move { self.add_line(basket_id, want).await })
            .buffer_unordered(MAX_CONCURRENT_OPS)
            .collect::<Vec<_>>()
            .await;
        for result in results {
            if let Err(failure) = result {
                warn!("🧺️ Could not add line {} to basket {basket_id}: {}", failure.key, failure.detail);
                failed.push(failure);
            }
        }
    }

    async fn add_line(&self, basket_id: &BasketId, want: &DesiredLine) -> Result<(), FailedKey> {
        let price = self.resolve_price(&want.product_id, &want.product_variant_id).await.map_err(
            |(reason, detail)| FailedKey::new(want.key(), LineOp::Add, reason, detail),
        )?;
        let line = NewOrderLine {
            basket_id: basket_id.clone(),
            product_id: want.product_id.clone(),
            product_variant_id: want.product_variant_id.clone(),
            qty: want.qty,
            product_price: price,
        };
        match self.db.insert_line(line).await {
            Ok(InsertLineResult::Inserted(line)) => {
                trace!("🧺️ Line {} added to basket {basket_id} at {price} each", line.key());
                Ok(())
            },
            Ok(InsertLineResult::Duplicate) => Err(FailedKey::new(
                want.key(),
                LineOp::Add,
                FailureReason::Conflict,
                "another write holds this (product, variant) key".to_string(),
            )),
            Err(e) => Err(FailedKey::new(want.key(), LineOp::Add, FailureReason::Store, e.to_string())),
        }
    }

    /// Snapshots the unit price for a new line from the live catalog.
    async fn resolve_price(&self, product_id: &str, variant_id: &str) -> Result<Cents, (FailureReason, String)> {
        let product = self.fetch_product(product_id).await.map_err(|e| match e {
            CatalogError::NotFound(id) => (FailureReason::NotFound, format!("product {id} is not in the catalog")),
            CatalogError::Unavailable(detail) => (FailureReason::UpstreamUnavailable, detail),
        })?;
        product
            .variant_price(variant_id)
            .ok_or_else(|| (FailureReason::NotFound, format!("product {product_id} has no variant {variant_id}")))
    }

    /// One catalog lookup with a single retry after a short backoff when the collaborator is unreachable.
    async fn fetch_product(&self, product_id: &str) -> Result<ProductInfo, CatalogError> {
        match self.catalog.product(product_id).await {
            Err(CatalogError::Unavailable(e)) => {
                warn!("🛒️ Catalog unreachable for product {product_id} ({e}). Retrying once");
                tokio::time::sleep(UPSTREAM_RETRY_DELAY).await;
                self.catalog.product(product_id).await
            },
            other => other,
        }
    }
}

fn check_basket_owner<B: BasketStore>(basket: &Basket, user: &UserAuth) -> Result<(), BasketApiError<B>> {
    if user.is_admin() {
        return Ok(());
    }
    match &basket.user_id {
        Some(owner) if *owner == user.id => Ok(()),
        _ => Err(BasketApiError::Forbidden),
    }
}
