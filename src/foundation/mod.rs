pub(crate) mod depth;
pub mod error;
pub(crate) mod math;
