//! Rebates
//!
//! Rebate calculation for products: a rebate's incentive kind selects one of
//! three calculation rules, validated against the incentives the product
//! supports, and successful calculations are recorded in a result store.

pub mod calculator;
pub mod fixtures;
pub mod incentives;
pub mod prelude;
pub mod products;
pub mod rebates;
pub mod report;
pub mod rules;
pub mod stores;
pub mod utils;
