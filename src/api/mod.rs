pub mod ors;
pub mod overpass;

pub use ors::OrsResponse;
pub use overpass::{Element, OverpassResponse};
