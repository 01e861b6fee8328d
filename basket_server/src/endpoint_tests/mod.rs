mod baskets;
mod helpers;
mod mocks;
