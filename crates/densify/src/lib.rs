#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use densify_dataset as dataset;

#[doc(inline)]
pub use densify_pipeline as pipeline;

#[doc(inline)]
pub use densify_trajectory as trajectory;
