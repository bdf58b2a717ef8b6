pub mod ids;
pub mod answer;
pub mod schema;
pub mod assignment;
pub mod task;
pub mod batch;
pub mod hit;

pub use ids::*;
pub use answer::*;
pub use schema::*;
pub use assignment::*;
pub use task::*;
pub use batch::*;
pub use hit::{transform_raw_hits, Hit, RawHit};
