/// Map a free-text category onto a bundled thumbnail slug. Unmatched
/// categories land on the generic placeholder.
pub fn thumbnail_slug(category: &str) -> &'static str {
    let lower = category.trim().to_lowercase();
    if lower.is_empty() {
        return "place";
    }

    const BUCKETS: &[(&[&str], &str)] = &[
        (&["temple", "religious", "shrine", "gurudwara"], "temple"),
        (&["church"], "church"),
        (&["mosque"], "mosque"),
        (&["fort"], "fort"),
        (&["palace"], "palace"),
        (&["monument", "memorial", "mausoleum", "tomb"], "monument"),
        (&["beach"], "beach"),
        (&["lake", "waterfall"], "lake"),
        (&["park", "garden", "botanical"], "park"),
        (&["museum", "gallery"], "museum"),
        (&["market", "bazaar", "shopping", "mall"], "market"),
        (&["wildlife", "sanctuary", "zoo"], "wildlife"),
        (&["cave"], "cave"),
        (&["hill", "mountain"], "hill"),
        (&["promenade"], "promenade"),
        (&["restaurant", "dining", "cafe"], "dining"),
        (&["historical", "historic", "heritage"], "historical"),
    ];

    for (needles, slug) in BUCKETS {
        if needles.iter().any(|needle| lower.contains(needle)) {
            return slug;
        }
    }

    "place"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_categories() {
        assert_eq!(thumbnail_slug("Fort"), "fort");
        assert_eq!(thumbnail_slug("Botanical Garden"), "park");
        assert_eq!(thumbnail_slug("Religious Site"), "temple");
        assert_eq!(thumbnail_slug("Underwater Lab"), "place");
        assert_eq!(thumbnail_slug(""), "place");
    }
}
