//! Estate Domain
//!
//! Models the deceased's estate before it is divided among heirs and performs
//! the deductions that precede inheritance:
//!
//! ```text
//! gross assets
//!   - funeral cost
//!   - debts
//!   = after liabilities
//!   - wasiyyah (at most one third of the above, unless all heirs consent)
//!   = distributable estate
//! ```

pub mod snapshot;
pub mod preprocessor;
pub mod error;

pub use snapshot::{AssetItem, AssetKind, EstateSnapshot};
pub use preprocessor::{preprocess, preprocess_with, NetEstate, PreprocessOptions};
pub use error::EstateError;
