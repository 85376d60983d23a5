pub mod surface_weights;
pub use surface_weights::*;

#[cfg(test)]
mod tests;
