// Sorting for the country table
//
// The sort selector exposes three keys. Comparison is case-insensitive on
// the selected field, which stands in for the browser's locale-aware
// comparison without pulling in a full collation library. Countries with
// no capital compare as the empty string and therefore sort first.

use crate::countries::Country;

/// Field the table is ordered by
///
/// The string forms ("regiao", "nome", "capital") are the selector option
/// values carried over from the original UI and used in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Region,
    Name,
    #[default]
    Capital,
}

impl SortKey {
    /// All keys, in selector order
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Region, SortKey::Name, SortKey::Capital]
    }

    /// Parse a selector option value; unknown values yield None
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "regiao" => Some(SortKey::Region),
            "nome" => Some(SortKey::Name),
            "capital" => Some(SortKey::Capital),
            _ => None,
        }
    }

    /// The selector option value (config file form)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Region => "regiao",
            SortKey::Name => "nome",
            SortKey::Capital => "capital",
        }
    }

    /// Display name for the title bar
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Region => "Region",
            SortKey::Name => "Name",
            SortKey::Capital => "Capital",
        }
    }

    /// Next key in the cycle (Tab / s)
    pub fn next(self) -> Self {
        let keys = Self::all();
        let current = keys.iter().position(|&k| k == self).unwrap_or(0);
        keys[(current + 1) % keys.len()]
    }
}

/// Sort the country list in place by the given key
///
/// `None` means "no recognized key": the sequence is returned untouched in
/// both content and order. Records themselves are never modified.
pub fn sort_countries(countries: &mut [Country], key: Option<SortKey>) {
    let Some(key) = key else {
        return;
    };

    match key {
        SortKey::Region => countries.sort_by_cached_key(|c| c.region.to_lowercase()),
        SortKey::Name => countries.sort_by_cached_key(|c| c.name.official.to_lowercase()),
        SortKey::Capital => countries.sort_by_cached_key(|c| c.first_capital().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::{Country, CountryName};

    fn country(official: &str, region: &str, capitals: &[&str]) -> Country {
        Country {
            name: CountryName {
                official: official.to_string(),
            },
            region: region.to_string(),
            capital: capitals.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn sorts_by_capital_with_empty_capitals_first() {
        let mut countries = vec![
            country("Croatia", "Europe", &["Zagreb"]),
            country("Brazil", "Americas", &["Brasília"]),
            country("Antarctica", "Antarctic", &[]),
        ];

        sort_countries(&mut countries, Some(SortKey::Capital));

        let order: Vec<&str> = countries.iter().map(|c| c.first_capital()).collect();
        assert_eq!(order, vec!["", "Brasília", "Zagreb"]);
    }

    #[test]
    fn sorts_by_name_case_insensitively() {
        let mut countries = vec![
            country("zimbabwe", "Africa", &["Harare"]),
            country("Albania", "Europe", &["Tirana"]),
            country("MEXICO", "Americas", &["Mexico City"]),
        ];

        sort_countries(&mut countries, Some(SortKey::Name));

        let order: Vec<&str> = countries.iter().map(|c| c.name.official.as_str()).collect();
        assert_eq!(order, vec!["Albania", "MEXICO", "zimbabwe"]);
    }

    #[test]
    fn sort_is_a_permutation() {
        let mut countries = vec![
            country("B", "Europe", &["b"]),
            country("A", "Asia", &["a"]),
            country("C", "Africa", &["c"]),
        ];

        sort_countries(&mut countries, Some(SortKey::Region));

        assert_eq!(countries.len(), 3);
        let regions: Vec<&str> = countries.iter().map(|c| c.region.as_str()).collect();
        assert_eq!(regions, vec!["Africa", "Asia", "Europe"]);
        // Non-decreasing comparator order on the chosen field
        for pair in regions.windows(2) {
            assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
        }
    }

    #[test]
    fn no_key_returns_input_unchanged() {
        let mut countries = vec![
            country("Zebra", "Z", &["z"]),
            country("Apple", "A", &["a"]),
        ];

        sort_countries(&mut countries, None);

        let order: Vec<&str> = countries.iter().map(|c| c.name.official.as_str()).collect();
        assert_eq!(order, vec!["Zebra", "Apple"]);
    }

    #[test]
    fn parse_accepts_selector_values_only() {
        assert_eq!(SortKey::parse("regiao"), Some(SortKey::Region));
        assert_eq!(SortKey::parse("nome"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("capital"), Some(SortKey::Capital));
        assert_eq!(SortKey::parse("population"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn default_key_is_capital() {
        assert_eq!(SortKey::default(), SortKey::Capital);
    }

    #[test]
    fn cycle_covers_all_keys() {
        let mut key = SortKey::default();
        let mut seen = Vec::new();
        for _ in 0..SortKey::all().len() {
            key = key.next();
            seen.push(key);
        }
        assert!(seen.contains(&SortKey::Region));
        assert!(seen.contains(&SortKey::Name));
        assert!(seen.contains(&SortKey::Capital));
    }
}
