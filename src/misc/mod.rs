pub mod floating_point;
pub mod transpose;

pub use floating_point::*;
pub use transpose::*;
