//! In-memory stores

use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    products::Product,
    rebates::Rebate,
    stores::{ProductLookup, RebateLookup, ResultStore, StoreError},
};

/// A calculation recorded by [`InMemoryRebateStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCalculation {
    /// Identifier of the rebate the amount was calculated for
    pub rebate_identifier: String,

    /// Calculated rebate amount
    pub amount: Decimal,
}

/// Rebates held in memory, keyed by identifier, with a log of stored calculations.
#[derive(Debug, Default)]
pub struct InMemoryRebateStore {
    rebates: FxHashMap<String, Rebate>,
    calculations: Mutex<Vec<StoredCalculation>>,
}

impl InMemoryRebateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given rebates.
    pub fn with_rebates(rebates: impl IntoIterator<Item = Rebate>) -> Self {
        let mut store = Self::new();

        for rebate in rebates {
            store.insert(rebate);
        }

        store
    }

    /// Insert a rebate, replacing any rebate with the same identifier.
    pub fn insert(&mut self, rebate: Rebate) -> Option<Rebate> {
        self.rebates.insert(rebate.identifier.clone(), rebate)
    }

    /// Number of rebates held.
    pub fn len(&self) -> usize {
        self.rebates.len()
    }

    /// Whether the store holds no rebates.
    pub fn is_empty(&self) -> bool {
        self.rebates.is_empty()
    }

    /// Calculations stored so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked while holding the log.
    pub fn stored_calculations(&self) -> Result<Vec<StoredCalculation>, StoreError> {
        let calculations = self.calculations.lock().map_err(poisoned)?;

        Ok(calculations.clone())
    }
}

impl RebateLookup for InMemoryRebateStore {
    fn get_rebate(&self, identifier: &str) -> Result<Option<Rebate>, StoreError> {
        Ok(self.rebates.get(identifier).cloned())
    }
}

impl ResultStore for InMemoryRebateStore {
    fn store_calculation_result(
        &self,
        rebate: &Rebate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        let mut calculations = self.calculations.lock().map_err(poisoned)?;

        calculations.push(StoredCalculation {
            rebate_identifier: rebate.identifier.clone(),
            amount,
        });

        debug!(
            rebate_identifier = %rebate.identifier,
            %amount,
            stored = calculations.len(),
            "stored rebate calculation"
        );

        Ok(())
    }
}

/// Products held in memory, keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: FxHashMap<String, Product>,
}

impl InMemoryProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut store = Self::new();

        for product in products {
            store.insert(product);
        }

        store
    }

    /// Insert a product, replacing any product with the same identifier.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.identifier.clone(), product)
    }

    /// Number of products held.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for InMemoryProductStore {
    fn get_product(&self, identifier: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.products.get(identifier).cloned())
    }
}

fn poisoned<T>(_error: PoisonError<T>) -> StoreError {
    StoreError::Poisoned
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::incentives::IncentiveType;

    use super::*;

    #[test]
    fn rebate_lookup_returns_clone_or_none() -> TestResult {
        let rebate = Rebate::new("r1", IncentiveType::FixedCashAmount).with_amount(Decimal::from(5));
        let store = InMemoryRebateStore::with_rebates([rebate.clone()]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_rebate("r1")?, Some(rebate));
        assert_eq!(store.get_rebate("missing")?, None);

        Ok(())
    }

    #[test]
    fn insert_replaces_existing_rebate() {
        let mut store = InMemoryRebateStore::new();

        assert!(store.is_empty());
        assert!(
            store
                .insert(Rebate::new("r1", IncentiveType::FixedCashAmount))
                .is_none()
        );

        let replaced = store.insert(Rebate::new("r1", IncentiveType::AmountPerUom));

        assert_eq!(
            replaced.map(|r| r.incentive),
            Some(IncentiveType::FixedCashAmount)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stored_calculations_are_kept_in_order() -> TestResult {
        let store = InMemoryRebateStore::new();
        let first = Rebate::new("first", IncentiveType::FixedCashAmount);
        let second = Rebate::new("second", IncentiveType::AmountPerUom);

        store.store_calculation_result(&first, Decimal::new(15, 1))?;
        store.store_calculation_result(&second, Decimal::from(20))?;

        assert_eq!(
            store.stored_calculations()?,
            vec![
                StoredCalculation {
                    rebate_identifier: "first".to_string(),
                    amount: Decimal::new(15, 1),
                },
                StoredCalculation {
                    rebate_identifier: "second".to_string(),
                    amount: Decimal::from(20),
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn product_lookup_returns_clone_or_none() -> TestResult {
        let product = Product::new("p1", IncentiveType::FixedRateRebate).with_price(Decimal::new(999, 2));
        let store = InMemoryProductStore::with_products([product.clone()]);

        assert!(!store.is_empty());
        assert_eq!(store.get_product("p1")?, Some(product));
        assert_eq!(store.get_product("p2")?, None);

        Ok(())
    }
}
