pub mod weight_mapping;
pub use weight_mapping::*;
