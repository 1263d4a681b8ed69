pub mod cart;
mod category;
mod geo;
pub mod order;
mod product;
mod user;

pub use cart::*;
pub use category::*;
pub use geo::*;
pub use order::*;
pub use product::*;
pub use user::*;
