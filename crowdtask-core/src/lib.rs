//! Typed task templates and answer decoding for crowd-labor marketplaces.
//!
//! Declare a [`TaskTemplate`] to upload HITs and an [`AnswerSchema`] to read
//! worker submissions back as typed values. Remote calls go through a
//! [`MarketplaceRequester`] implementation such as the one in `crowdtask-sdk`.

pub mod domain;
pub mod error;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use traits::*;
