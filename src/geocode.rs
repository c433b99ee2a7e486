use crate::data::CityRecord;
use crate::geo::GeoPoint;

/// Resolves a free-text query to a location. A miss returns `None`, which
/// leaves the current observer untouched and triggers no redraw.
pub trait Geocoder {
    fn resolve(&self, query: &str) -> Option<GeoPoint>;
}

/// Geocoder over the loaded city table: case-insensitive exact match first,
/// then a prefix match if it is unambiguous.
pub struct Gazetteer<'a> {
    cities: &'a [CityRecord],
}

impl<'a> Gazetteer<'a> {
    pub fn new(cities: &'a [CityRecord]) -> Self {
        Self { cities }
    }
}

impl Geocoder for Gazetteer<'_> {
    fn resolve(&self, query: &str) -> Option<GeoPoint> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        for city in self.cities {
            if city.label.to_lowercase() == needle {
                log::debug!("geocoded {query:?} to {}", city.label);
                return Some(city.point());
            }
        }

        let mut hit: Option<&CityRecord> = None;
        for city in self.cities {
            if city.label.to_lowercase().starts_with(&needle) {
                if hit.is_some() {
                    // Ambiguous prefix
                    return None;
                }
                hit = Some(city);
            }
        }

        hit.map(|city| {
            log::debug!("geocoded {query:?} to {}", city.label);
            city.point()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<CityRecord> {
        [
            ("Beijing", 39.91, 116.39),
            ("Berlin", 52.52, 13.40),
            ("London", 51.51, -0.13),
            ("Londrina", -23.31, -51.16),
        ]
        .into_iter()
        .map(|(label, latitude, longitude)| CityRecord {
            label: label.to_string(),
            latitude,
            longitude,
        })
        .collect()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let cities = cities();
        let g = Gazetteer::new(&cities);
        let p = g.resolve("london").unwrap();
        assert!((p.lat - 51.51).abs() < 1e-9);
    }

    #[test]
    fn test_exact_match_beats_prefix_ambiguity() {
        let cities = cities();
        let g = Gazetteer::new(&cities);
        // "london" prefixes both London and Londrina, but matches London
        // exactly
        assert!(g.resolve("London").is_some());
    }

    #[test]
    fn test_unique_prefix_match() {
        let cities = cities();
        let g = Gazetteer::new(&cities);
        let p = g.resolve("beij").unwrap();
        assert!((p.lng - 116.39).abs() < 1e-9);
    }

    #[test]
    fn test_ambiguous_prefix_misses() {
        let cities = cities();
        let g = Gazetteer::new(&cities);
        // Be... matches Beijing and Berlin
        assert!(g.resolve("be").is_none());
    }

    #[test]
    fn test_unknown_and_empty_queries_miss() {
        let cities = cities();
        let g = Gazetteer::new(&cities);
        assert!(g.resolve("Atlantis").is_none());
        assert!(g.resolve("").is_none());
        assert!(g.resolve("   ").is_none());
    }
}
