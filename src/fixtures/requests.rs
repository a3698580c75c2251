//! Request Fixtures

use serde::Deserialize;

use crate::{
    calculator::CalculateRebateRequest,
    fixtures::{FixtureError, parse_decimal},
};

/// Wrapper for requests in YAML
#[derive(Debug, Deserialize)]
pub struct RequestsFixture {
    /// Requests, calculated in order
    pub requests: Vec<RequestFixture>,
}

/// Request Fixture
#[derive(Debug, Deserialize)]
pub struct RequestFixture {
    /// Rebate identifier
    pub rebate: String,

    /// Product identifier
    pub product: String,

    /// Volume (e.g., "12.5"), zero when omitted
    pub volume: Option<String>,
}

impl TryFrom<RequestFixture> for CalculateRebateRequest {
    type Error = FixtureError;

    fn try_from(fixture: RequestFixture) -> Result<Self, Self::Error> {
        Ok(CalculateRebateRequest {
            rebate_identifier: fixture.rebate,
            product_identifier: fixture.product,
            volume: parse_decimal("volume", fixture.volume.as_deref())?,
        })
    }
}
