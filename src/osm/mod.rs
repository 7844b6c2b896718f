pub mod parser;

pub use parser::{parse_ors_pois, parse_overpass_pois};
