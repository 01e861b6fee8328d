//! Basket Gateway engine
//!
//! This library holds the core logic of the basket gateway: reconciling a client-submitted desired basket state
//! against the persisted order lines, and assembling basket views for presentation. It is provider-agnostic.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@traits`] and the sqlite backend). Backends implement [`BasketStore`],
//!    a plain CRUD boundary; all diffing intelligence stays out of the store. You should never need to access the
//!    database directly; use the public API instead. The exception is the data types in [`mod@db_types`], which
//!    are public.
//! 2. Collaborator contracts ([`ProductCatalog`]): the engine looks up live product and price data through this
//!    trait when it creates lines and enriches views. Stored price snapshots are never overwritten by it.
//! 3. The public API ([`BasketApi`]): basket lifecycle, the reconciliation algorithm and the read aggregator.
mod basket_api;
pub mod db_types;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use basket_api::{
    api::BasketApi,
    basket_objects::{
        BasketView, DesiredLine, FailedKey, FailureReason, LineOp, LineView, ProductSummary, ReconcileOutcome,
    },
    errors::BasketApiError,
    reconcile::{PlanError, QtyChange, ReconcilePlan},
};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use traits::{BasketStore, CatalogError, InsertLineResult, ProductCatalog, ProductInfo, VariantInfo};
