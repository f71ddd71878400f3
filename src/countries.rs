// Country data model and fetcher
//
// The REST Countries API returns one large JSON array of country objects.
// We only deserialize the fields the UI reads; everything else is ignored.
// Individual records can be sparse (no capital, no subregion), so every
// field defaults instead of failing the whole parse.

use anyhow::{Context, Result};
use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

/// Nested `name` object - only the official name is displayed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryName {
    #[serde(default)]
    pub official: String,
}

/// Nested `flags` object - the SVG URL shown in the detail overlay
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub svg: String,
}

/// One country record as returned by the API
///
/// Records are read-only once fetched: the sorter reorders the sequence
/// but never modifies a record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    /// Capital cities - an array in the API, absent for some territories
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flags: Flags,
    /// Unicode flag emoji (e.g. "🇧🇷") - the terminal-friendly flag rendering
    #[serde(default)]
    pub flag: String,
}

impl Country {
    /// Capital column text: entries joined with "," and an empty string
    /// when no capital exists. Matches how the raw field has always been
    /// displayed, including the multi-capital comma form.
    pub fn capital_display(&self) -> String {
        self.capital.join(",")
    }

    /// First capital entry, or "" when absent - the sort key for Capital
    pub fn first_capital(&self) -> &str {
        self.capital.first().map(String::as_str).unwrap_or("")
    }

    /// Accessible label for the flag image, derived from the official name
    pub fn flag_alt(&self) -> String {
        format!("Flag of {}", self.name.official)
    }
}

/// Fetch the full country list
///
/// One GET, no retry, no timeout, no pagination - the endpoint returns the
/// entire set in a single response. Fails on network errors, non-success
/// status codes, and unparseable bodies; the caller decides what to do.
pub async fn fetch_countries(client: &reqwest::Client, api_url: &str) -> Result<Vec<Country>> {
    let response = client
        .get(api_url)
        .send()
        .await
        .context("country list request failed")?
        .error_for_status()
        .context("country list request was rejected")?;

    let countries: Vec<Country> = response
        .json()
        .await
        .context("could not parse country list response")?;

    Ok(countries)
}

/// Render the country list as a plain-text table (headless mode)
///
/// Column widths use display width, not byte length, so names with
/// non-ASCII characters still line up.
pub fn plain_table(countries: &[Country]) -> String {
    let name_width = countries
        .iter()
        .map(|c| c.name.official.width())
        .chain(std::iter::once("Name".width()))
        .max()
        .unwrap_or(4);
    let region_width = countries
        .iter()
        .map(|c| c.region.width())
        .chain(std::iter::once("Region".width()))
        .max()
        .unwrap_or(6);

    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}  Capital\n",
        pad("Name", name_width),
        pad("Region", region_width)
    ));

    for country in countries {
        out.push_str(&format!(
            "{}  {}  {}\n",
            pad(&country.name.official, name_width),
            pad(&country.region, region_width),
            country.capital_display()
        ));
    }

    out
}

/// Pad a string to the given display width with trailing spaces
fn pad(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brazil_json() -> &'static str {
        r#"{
            "name": {"official": "Federative Republic of Brazil", "common": "Brazil"},
            "region": "Americas",
            "subregion": "South America",
            "capital": ["Brasília"],
            "population": 212559409,
            "area": 8515767.0,
            "flags": {"svg": "https://flagcdn.com/br.svg", "png": "https://flagcdn.com/w320/br.png"},
            "flag": "🇧🇷"
        }"#
    }

    #[test]
    fn parses_full_record() {
        let country: Country = serde_json::from_str(brazil_json()).unwrap();
        assert_eq!(country.name.official, "Federative Republic of Brazil");
        assert_eq!(country.region, "Americas");
        assert_eq!(country.subregion, "South America");
        assert_eq!(country.capital, vec!["Brasília"]);
        assert_eq!(country.population, 212559409);
        assert_eq!(country.area, 8515767.0);
        assert_eq!(country.flags.svg, "https://flagcdn.com/br.svg");
        assert_eq!(country.flag, "🇧🇷");
    }

    #[test]
    fn sparse_record_defaults_instead_of_failing() {
        // Some territories (e.g. Antarctica) have no capital or subregion
        let country: Country =
            serde_json::from_str(r#"{"name": {"official": "Antarctica"}, "region": "Antarctic"}"#)
                .unwrap();
        assert_eq!(country.capital, Vec::<String>::new());
        assert_eq!(country.subregion, "");
        assert_eq!(country.population, 0);
        assert_eq!(country.first_capital(), "");
    }

    #[test]
    fn capital_display_keeps_raw_field_shape() {
        let mut country = Country::default();
        assert_eq!(country.capital_display(), "");

        country.capital = vec!["Pretoria".into(), "Bloemfontein".into(), "Cape Town".into()];
        // Multi-capital entries join with a bare comma - a preserved quirk
        assert_eq!(
            country.capital_display(),
            "Pretoria,Bloemfontein,Cape Town"
        );
    }

    #[test]
    fn flag_alt_derives_from_official_name() {
        let country: Country = serde_json::from_str(brazil_json()).unwrap();
        assert_eq!(country.flag_alt(), "Flag of Federative Republic of Brazil");
    }

    #[tokio::test]
    async fn fetch_fails_against_unreachable_endpoint() {
        // Port 9 (discard) refuses the connection immediately
        let client = reqwest::Client::new();
        let err = fetch_countries(&client, "http://127.0.0.1:9/all")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("country list request failed"));
    }

    #[test]
    fn plain_table_has_one_line_per_country_plus_header() {
        let countries: Vec<Country> = serde_json::from_str(&format!(
            "[{}, {}]",
            brazil_json(),
            r#"{"name": {"official": "Japan"}, "region": "Asia", "capital": ["Tokyo"]}"#
        ))
        .unwrap();

        let table = plain_table(&countries);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].contains("Federative Republic of Brazil"));
        assert!(lines[2].contains("Tokyo"));
    }
}
