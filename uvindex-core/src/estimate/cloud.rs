//! Cloud dampening: how much of the clear-sky UV makes it through the
//! observed cloud deck.

/// Keyword rules refining the cover-based damping, evaluated in priority
/// order against the lower-cased description; first match wins.
const DESCRIPTION_RULES: &[(&[&str], f64)] = &[
    (&["rain", "shower", "thunderstorm", "storm"], 0.5),
    (&["overcast", "fog", "mist"], 0.7),
    (&["partly cloudy", "scattered clouds"], 0.9),
];

/// Multiplicative factor in [0.1, 1.0] for the given cloud cover
/// percentage and optional weather description.
///
/// Light cloud barely reduces UV; heavy cloud cuts it sharply. The floor
/// keeps cloud alone from zeroing the index — only the sun being below
/// the horizon does that.
pub(crate) fn cloud_factor(cloud_cover_pct: f64, description: Option<&str>) -> f64 {
    let cover = cloud_cover_pct / 100.0;
    let base = 1.0 - cover.powf(0.6);

    let type_multiplier = description.map_or(1.0, |text| {
        let lowered = text.to_lowercase();
        DESCRIPTION_RULES
            .iter()
            .find(|(terms, _)| terms.iter().any(|term| lowered.contains(term)))
            .map_or(1.0, |(_, multiplier)| *multiplier)
    });

    (base * type_multiplier).clamp(0.1, 1.0)
}

/// Whether the description names storm-class weather. Shared with the
/// engine's monthly-average fallback, which damps harder when it rains.
pub(crate) fn suggests_rain(description: &str) -> bool {
    let lowered = description.to_lowercase();
    DESCRIPTION_RULES[0].0.iter().any(|term| lowered.contains(term))
}
