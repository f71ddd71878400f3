// Demo mode - embedded sample dataset
//
// A small fixed country list so the TUI can be showcased (and tested)
// without network access. Enabled with COUNTRYSCOPE_DEMO=1.

use crate::countries::{Country, CountryName, Flags};

fn country(
    official: &str,
    region: &str,
    subregion: &str,
    capitals: &[&str],
    population: u64,
    area: f64,
    flag: &str,
    svg: &str,
) -> Country {
    Country {
        name: CountryName {
            official: official.to_string(),
        },
        region: region.to_string(),
        subregion: subregion.to_string(),
        capital: capitals.iter().map(|s| s.to_string()).collect(),
        population,
        area,
        flags: Flags {
            svg: svg.to_string(),
        },
        flag: flag.to_string(),
    }
}

/// Sample countries covering the interesting shapes: multiple capitals,
/// no capital at all, and names/capitals with non-ASCII characters.
pub fn sample_countries() -> Vec<Country> {
    vec![
        country(
            "Federative Republic of Brazil",
            "Americas",
            "South America",
            &["Brasília"],
            212_559_409,
            8_515_767.0,
            "🇧🇷",
            "https://flagcdn.com/br.svg",
        ),
        country(
            "Republic of Croatia",
            "Europe",
            "Southeast Europe",
            &["Zagreb"],
            4_047_200,
            56_594.0,
            "🇭🇷",
            "https://flagcdn.com/hr.svg",
        ),
        country(
            "Japan",
            "Asia",
            "Eastern Asia",
            &["Tokyo"],
            125_836_021,
            377_930.0,
            "🇯🇵",
            "https://flagcdn.com/jp.svg",
        ),
        country(
            "Republic of South Africa",
            "Africa",
            "Southern Africa",
            &["Pretoria", "Bloemfontein", "Cape Town"],
            59_308_690,
            1_221_037.0,
            "🇿🇦",
            "https://flagcdn.com/za.svg",
        ),
        country(
            "Antarctica",
            "Antarctic",
            "",
            &[],
            1_000,
            14_000_000.0,
            "🇦🇶",
            "https://flagcdn.com/aq.svg",
        ),
        country(
            "Republic of Iceland",
            "Europe",
            "Northern Europe",
            &["Reykjavík"],
            366_425,
            103_000.0,
            "🇮🇸",
            "https://flagcdn.com/is.svg",
        ),
        country(
            "Commonwealth of Australia",
            "Oceania",
            "Australia and New Zealand",
            &["Canberra"],
            25_687_041,
            7_692_024.0,
            "🇦🇺",
            "https://flagcdn.com/au.svg",
        ),
        country(
            "Federal Republic of Germany",
            "Europe",
            "Western Europe",
            &["Berlin"],
            83_240_525,
            357_114.0,
            "🇩🇪",
            "https://flagcdn.com/de.svg",
        ),
    ]
}
