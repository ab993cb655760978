pub mod basket;
pub mod cell;
pub mod notice;
pub mod summary;

pub use basket::*;
pub use notice::*;
pub use summary::*;
