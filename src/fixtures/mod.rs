//! Fixtures
//!
//! YAML fixture sets describing rebates, products and calculation requests,
//! laid out as `{base}/rebates/{name}.yml`, `{base}/products/{name}.yml` and
//! `{base}/requests/{name}.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    calculator::CalculateRebateRequest,
    fixtures::{products::ProductsFixture, rebates::RebatesFixture, requests::RequestsFixture},
    products::Product,
    rebates::Rebate,
    stores::{InMemoryProductStore, InMemoryRebateStore},
};

pub mod products;
pub mod rebates;
pub mod requests;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid decimal value
    #[error("Invalid decimal for {field}: {value}")]
    InvalidDecimal {
        /// Fixture field holding the value
        field: &'static str,
        /// Value as written in the fixture
        value: String,
    },

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    rebates: Vec<Rebate>,
    products: Vec<Product>,
    requests: Vec<CalculateRebateRequest>,

    /// Currency shared by every product in the set
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            rebates: Vec::new(),
            products: Vec::new(),
            requests: Vec::new(),
            currency: None,
        }
    }

    /// Load rebates from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a decimal
    /// value is malformed.
    pub fn load_rebates(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.file_path("rebates", name))?;
        let fixture: RebatesFixture = serde_norway::from_str(&contents)?;

        for (identifier, rebate_fixture) in fixture.rebates {
            self.rebates.push(rebate_fixture.into_rebate(identifier)?);
        }

        debug!(fixture = name, rebates = self.rebates.len(), "loaded rebates");

        Ok(self)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices are
    /// malformed or use different currencies.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.file_path("products", name))?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (identifier, product_fixture) in fixture.products {
            let (price, currency) = products::parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.products.push(Product {
                identifier,
                supported_incentives: product_fixture.supported_incentives,
                price,
            });
        }

        debug!(fixture = name, products = self.products.len(), "loaded products");

        Ok(self)
    }

    /// Load calculation requests from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a volume is
    /// malformed.
    pub fn load_requests(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.file_path("requests", name))?;
        let fixture: RequestsFixture = serde_norway::from_str(&contents)?;

        for request_fixture in fixture.requests {
            self.requests.push(request_fixture.try_into()?);
        }

        debug!(fixture = name, requests = self.requests.len(), "loaded requests");

        Ok(self)
    }

    /// Load a complete fixture set (rebates, products and requests with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_rebates(name)?
            .load_products(name)?
            .load_requests(name)?;

        Ok(fixture)
    }

    /// Base path fixture files are read from
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loaded rebates
    pub fn rebates(&self) -> &[Rebate] {
        &self.rebates
    }

    /// Loaded products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Loaded requests, in fixture order
    pub fn requests(&self) -> &[CalculateRebateRequest] {
        &self.requests
    }

    /// In-memory rebate store holding the loaded rebates
    pub fn rebate_store(&self) -> InMemoryRebateStore {
        InMemoryRebateStore::with_rebates(self.rebates.iter().cloned())
    }

    /// In-memory product store holding the loaded products
    pub fn product_store(&self) -> InMemoryProductStore {
        InMemoryProductStore::with_products(self.products.iter().cloned())
    }

    /// Currency of the loaded products
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products have been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn file_path(&self, kind: &str, name: &str) -> PathBuf {
        self.base_path.join(kind).join(format!("{name}.yml"))
    }
}

/// Parse an optional decimal fixture value, defaulting to zero.
pub(crate) fn parse_decimal(
    field: &'static str,
    value: Option<&str>,
) -> Result<Decimal, FixtureError> {
    let Some(value) = value else {
        return Ok(Decimal::ZERO);
    };

    Decimal::from_str(value.trim()).map_err(|_err| FixtureError::InvalidDecimal {
        field,
        value: value.to_string(),
    })
}
