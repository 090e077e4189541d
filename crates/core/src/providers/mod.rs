pub mod registry;
pub mod traits;

// External data source implementations
pub mod alphavantage;
pub mod newsapi;
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
