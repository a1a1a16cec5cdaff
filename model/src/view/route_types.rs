use std::collections::BTreeMap;

use colorous::Color;

use super::colors::route_type_color;

#[derive(Clone, Debug, PartialEq)]
pub struct RouteTypeShare {
    pub route_type: String,
    pub count: usize,
    /// From 0 to 100
    pub percentage: f64,
    pub color: Color,
}

/// Largest share first, ties broken by name. Empty if nothing departs.
pub fn route_type_shares(counts: &BTreeMap<String, usize>) -> Vec<RouteTypeShare> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<RouteTypeShare> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(route_type, count)| RouteTypeShare {
            route_type: route_type.clone(),
            count: *count,
            percentage: 100.0 * (*count as f64) / (total as f64),
            color: route_type_color(route_type),
        })
        .collect();
    // BTreeMap iteration already sorts by name, and the sort is stable
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::view::DEFAULT_ROUTE_TYPE_COLOR;

    fn counts(pairs: Vec<(&str, usize)>) -> BTreeMap<String, usize> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn shares_sorted_by_size() {
        let shares = route_type_shares(&counts(vec![("Bus", 3), ("Bahn", 1)]));
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].route_type, "Bus");
        assert_relative_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].route_type, "Bahn");
        assert_relative_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn ties_and_unknown_types() {
        let shares = route_type_shares(&counts(vec![("Seilbahn", 2), ("Fähre", 2), ("Bus", 0)]));
        let names: Vec<&str> = shares.iter().map(|s| s.route_type.as_str()).collect();
        assert_eq!(names, vec!["Fähre", "Seilbahn"]);
        assert_eq!(shares[1].color, DEFAULT_ROUTE_TYPE_COLOR);
        assert_ne!(shares[0].color, DEFAULT_ROUTE_TYPE_COLOR);
    }

    #[test]
    fn nothing_departs() {
        assert!(route_type_shares(&counts(vec![("Bus", 0)])).is_empty());
        assert!(route_type_shares(&BTreeMap::new()).is_empty());
    }
}
