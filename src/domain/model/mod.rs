pub mod build;
pub mod release;

pub use build::*;
pub use release::*;
