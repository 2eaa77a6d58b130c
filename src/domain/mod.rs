pub mod building;
pub mod catalog;
pub mod types;

pub use building::*;
pub use catalog::*;
pub use types::*;
