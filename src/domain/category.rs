use serde::{Deserialize, Serialize};
use std::fmt;

/// Neighborhood-character categories assigned to POIs.
///
/// The serialized form is the human-facing label ("Cafe street",
/// "Elite r.e.", ...), both in the rules file and in the JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Nature,
    Ethnic,
    Tourist,
    #[serde(rename = "Cafe street")]
    CafeStreet,
    Nightlife,
    #[serde(rename = "Elite r.e.")]
    EliteRealEstate,
    #[serde(rename = "Lower r.e.")]
    LowerRealEstate,
    University,
    #[serde(rename = "Business center")]
    BusinessCenter,
    #[serde(rename = "Upper r.e.")]
    UpperRealEstate,
    #[serde(rename = "Middle r.e.")]
    MiddleRealEstate,
    #[serde(rename = "cottage settlement")]
    CottageSettlement,
    Downtown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nature => "Nature",
            Category::Ethnic => "Ethnic",
            Category::Tourist => "Tourist",
            Category::CafeStreet => "Cafe street",
            Category::Nightlife => "Nightlife",
            Category::EliteRealEstate => "Elite r.e.",
            Category::LowerRealEstate => "Lower r.e.",
            Category::University => "University",
            Category::BusinessCenter => "Business center",
            Category::UpperRealEstate => "Upper r.e.",
            Category::MiddleRealEstate => "Middle r.e.",
            Category::CottageSettlement => "cottage settlement",
            Category::Downtown => "Downtown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One label or several, as a rules entry declares it.
///
/// Deserializes from either a bare string ("Nature") or an array
/// (["Nature", "Tourist"]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Labels {
    One(Category),
    Many(Vec<Category>),
}

impl Labels {
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        match self {
            Labels::One(category) => std::slice::from_ref(category).iter().copied(),
            Labels::Many(categories) => categories.iter().copied(),
        }
    }
}
