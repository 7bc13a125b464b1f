//! # Converter Hex
//!
//! Application service layer and terminal adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `store` - Rate store: fetch lifecycle for the selected base currency
//! - `session` - Conversion session (the single state container)
//! - `inbound/` - Line-oriented terminal adapter that drives the session
//!
//! Everything is generic over `P: RateProvider`, so the HTTP adapter can be
//! swapped for an in-memory provider in tests.

pub mod inbound;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;



pub use session::ConverterSession;
pub use store::RateStore;
