use thiserror::Error;

use crate::{basket_api::reconcile::PlanError, db_types::BasketId, traits::BasketStore};

#[derive(Error)]
pub enum BasketApiError<B: BasketStore> {
    #[error("Database error: {0}")]
    Database(B::Error),
    #[error("Basket {0} does not exist")]
    BasketNotFound(BasketId),
    #[error("Invalid basket payload: {0}")]
    Validation(#[from] PlanError),
    #[error("Only the basket owner or an admin may do this")]
    Forbidden,
}

// Manual impl so that backends (and test mocks) don't have to be Debug themselves.
impl<B: BasketStore> std::fmt::Debug for BasketApiError<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BasketApiError: {self}")
    }
}
