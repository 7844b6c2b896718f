pub mod category;
pub mod poi;

pub use category::{Category, Labels};
pub use poi::{ClassifiedPoi, ProviderPoi};

use std::collections::HashMap;

/// All OSM tags attached to one map feature.
pub type TagSet = HashMap<String, String>;
