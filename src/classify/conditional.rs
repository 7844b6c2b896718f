use crate::domain::{Category, TagSet};

/// A refinement rule for a `building` value that the static table leaves
/// undecided. The predicate inspects secondary attributes of the full tag set.
pub struct ConditionalRule {
    pub value: &'static str,
    pub label: Category,
    predicate: fn(&TagSet) -> bool,
}

impl ConditionalRule {
    pub fn matches(&self, tags: &TagSet) -> bool {
        (self.predicate)(tags)
    }
}

const GLASS_MATERIALS: [&str; 2] = ["glass", "mirrored-glass"];

const BUILDING_RULES: [ConditionalRule; 2] = [
    ConditionalRule {
        value: "office",
        label: Category::BusinessCenter,
        predicate: towering_office,
    },
    ConditionalRule {
        value: "hotel",
        label: Category::EliteRealEstate,
        predicate: towering_hotel,
    },
];

/// Refine a `building` tag value via the conditional rules.
///
/// Returns None when no rule is declared for the value or its predicate does
/// not hold.
pub fn refine_building(value: &str, tags: &TagSet) -> Option<Category> {
    BUILDING_RULES
        .iter()
        .find(|rule| rule.value == value && rule.matches(tags))
        .map(|rule| rule.label)
}

fn towering_office(tags: &TagSet) -> bool {
    has_glass_facade(tags) && numeric_tag(tags, "height") > 20.0
}

fn towering_hotel(tags: &TagSet) -> bool {
    has_glass_facade(tags) && (numeric_tag(tags, "levels") > 20.0 || numeric_tag(tags, "height") > 60.0)
}

fn has_glass_facade(tags: &TagSet) -> bool {
    tags.get("building:material").is_some_and(|material| {
        GLASS_MATERIALS
            .iter()
            .any(|glass| material.eq_ignore_ascii_case(glass))
    })
}

/// Numeric tag value with absent or malformed strings treated as 0.
fn numeric_tag(tags: &TagSet, key: &str) -> f64 {
    tags.get(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> TagSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_office_needs_glass_and_height() {
        let t = tags(&[("building:material", "glass"), ("height", "25")]);
        assert_eq!(refine_building("office", &t), Some(Category::BusinessCenter));

        let too_short = tags(&[("building:material", "glass"), ("height", "10")]);
        assert_eq!(refine_building("office", &too_short), None);

        let wrong_material = tags(&[("building:material", "brick"), ("height", "25")]);
        assert_eq!(refine_building("office", &wrong_material), None);
    }

    #[test]
    fn test_hotel_levels_or_height() {
        let by_levels = tags(&[("building:material", "Mirrored-Glass"), ("levels", "21")]);
        assert_eq!(
            refine_building("hotel", &by_levels),
            Some(Category::EliteRealEstate)
        );

        let by_height = tags(&[("building:material", "glass"), ("height", "61")]);
        assert_eq!(
            refine_building("hotel", &by_height),
            Some(Category::EliteRealEstate)
        );

        let neither = tags(&[("building:material", "glass"), ("height", "59")]);
        assert_eq!(refine_building("hotel", &neither), None);
    }

    #[test]
    fn test_malformed_numbers_count_as_zero() {
        let t = tags(&[("building:material", "glass"), ("height", "tall")]);
        assert_eq!(refine_building("office", &t), None);

        let missing = tags(&[("building:material", "glass")]);
        assert_eq!(refine_building("hotel", &missing), None);
    }

    #[test]
    fn test_unknown_value_has_no_rule() {
        let t = tags(&[("building:material", "glass"), ("height", "100")]);
        assert_eq!(refine_building("warehouse", &t), None);
    }
}
