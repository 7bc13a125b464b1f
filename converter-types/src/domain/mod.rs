//! Domain models for the converter.

pub mod conversion;
pub mod snapshot;
pub mod state;

pub use conversion::ConversionInput;
pub use snapshot::RateSnapshot;
pub use state::{ErrorDetail, FetchState, StatusIndicator};
