//! Stores
//!
//! Narrow collaborator interfaces the calculator reads rebates and products
//! through, and writes successful calculations to.

use std::sync::Arc;

use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{products::Product, rebates::Rebate};

pub mod memory;

pub use memory::{InMemoryProductStore, InMemoryRebateStore, StoredCalculation};

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Lookup of rebates by identifier.
#[automock]
pub trait RebateLookup: Send + Sync {
    /// Retrieve a rebate. Returns `Ok(None)` when no rebate has the identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store itself fails.
    fn get_rebate(&self, identifier: &str) -> Result<Option<Rebate>, StoreError>;
}

/// Lookup of products by identifier.
#[automock]
pub trait ProductLookup: Send + Sync {
    /// Retrieve a product. Returns `Ok(None)` when no product has the identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store itself fails.
    fn get_product(&self, identifier: &str) -> Result<Option<Product>, StoreError>;
}

/// Destination for successful rebate calculations.
#[automock]
pub trait ResultStore: Send + Sync {
    /// Record the amount calculated for a rebate.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the result could not be recorded.
    fn store_calculation_result(&self, rebate: &Rebate, amount: Decimal)
    -> Result<(), StoreError>;
}

impl<T: RebateLookup + ?Sized> RebateLookup for &T {
    fn get_rebate(&self, identifier: &str) -> Result<Option<Rebate>, StoreError> {
        (**self).get_rebate(identifier)
    }
}

impl<T: RebateLookup + ?Sized> RebateLookup for Arc<T> {
    fn get_rebate(&self, identifier: &str) -> Result<Option<Rebate>, StoreError> {
        (**self).get_rebate(identifier)
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn get_product(&self, identifier: &str) -> Result<Option<Product>, StoreError> {
        (**self).get_product(identifier)
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for Arc<T> {
    fn get_product(&self, identifier: &str) -> Result<Option<Product>, StoreError> {
        (**self).get_product(identifier)
    }
}

impl<T: ResultStore + ?Sized> ResultStore for &T {
    fn store_calculation_result(
        &self,
        rebate: &Rebate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        (**self).store_calculation_result(rebate, amount)
    }
}

impl<T: ResultStore + ?Sized> ResultStore for Arc<T> {
    fn store_calculation_result(
        &self,
        rebate: &Rebate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        (**self).store_calculation_result(rebate, amount)
    }
}
