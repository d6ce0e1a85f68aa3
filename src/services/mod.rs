pub mod transform;

pub use transform::{TransformError, TransformOutcome, TransformService};
