//! Country code to continent lookup.
//!
//! A handful of countries span continents or are commonly filed under an
//! unhelpful region ("Americas", "Eurasia"); those are forced first. The
//! rest come from a static ISO 3166-1 alpha-2 table.

const FORCED: &[(&str, &str)] = &[
    ("US", "North America"),
    ("RU", "Europe, Asia"),
    ("NL", "Europe"),
    ("TR", "Europe, Asia"),
];

const AFRICA: &str = "Africa";
const ASIA: &str = "Asia";
const EUROPE: &str = "Europe";
const NORTH_AMERICA: &str = "North America";
const OCEANIA: &str = "Oceania";
const SOUTH_AMERICA: &str = "South America";

const TABLE: &[(&str, &str)] = &[
    // Africa
    ("DZ", AFRICA),
    ("EG", AFRICA),
    ("ET", AFRICA),
    ("GH", AFRICA),
    ("KE", AFRICA),
    ("MA", AFRICA),
    ("NG", AFRICA),
    ("RW", AFRICA),
    ("SN", AFRICA),
    ("TN", AFRICA),
    ("TZ", AFRICA),
    ("UG", AFRICA),
    ("ZA", AFRICA),
    // Asia
    ("AE", ASIA),
    ("BD", ASIA),
    ("CN", ASIA),
    ("HK", ASIA),
    ("ID", ASIA),
    ("IL", ASIA),
    ("IN", ASIA),
    ("IR", ASIA),
    ("JP", ASIA),
    ("KR", ASIA),
    ("KZ", ASIA),
    ("MY", ASIA),
    ("NP", ASIA),
    ("PH", ASIA),
    ("PK", ASIA),
    ("SA", ASIA),
    ("SG", ASIA),
    ("TH", ASIA),
    ("TW", ASIA),
    ("VN", ASIA),
    // Europe
    ("AT", EUROPE),
    ("BE", EUROPE),
    ("BG", EUROPE),
    ("BY", EUROPE),
    ("CH", EUROPE),
    ("CZ", EUROPE),
    ("DE", EUROPE),
    ("DK", EUROPE),
    ("EE", EUROPE),
    ("ES", EUROPE),
    ("FI", EUROPE),
    ("FR", EUROPE),
    ("GB", EUROPE),
    ("GR", EUROPE),
    ("HR", EUROPE),
    ("HU", EUROPE),
    ("IE", EUROPE),
    ("IS", EUROPE),
    ("IT", EUROPE),
    ("LT", EUROPE),
    ("LU", EUROPE),
    ("LV", EUROPE),
    ("NO", EUROPE),
    ("PL", EUROPE),
    ("PT", EUROPE),
    ("RO", EUROPE),
    ("RS", EUROPE),
    ("SE", EUROPE),
    ("SI", EUROPE),
    ("SK", EUROPE),
    ("UA", EUROPE),
    // North America
    ("CA", NORTH_AMERICA),
    ("CR", NORTH_AMERICA),
    ("CU", NORTH_AMERICA),
    ("DO", NORTH_AMERICA),
    ("GT", NORTH_AMERICA),
    ("MX", NORTH_AMERICA),
    ("PA", NORTH_AMERICA),
    ("PR", NORTH_AMERICA),
    // Oceania
    ("AU", OCEANIA),
    ("FJ", OCEANIA),
    ("NZ", OCEANIA),
    // South America
    ("AR", SOUTH_AMERICA),
    ("BO", SOUTH_AMERICA),
    ("BR", SOUTH_AMERICA),
    ("CL", SOUTH_AMERICA),
    ("CO", SOUTH_AMERICA),
    ("EC", SOUTH_AMERICA),
    ("PE", SOUTH_AMERICA),
    ("PY", SOUTH_AMERICA),
    ("UY", SOUTH_AMERICA),
    ("VE", SOUTH_AMERICA),
];

/// Continent name for an ISO 3166-1 alpha-2 country code, if known.
///
/// The lookup ignores case and surrounding whitespace.
#[must_use]
pub fn continent_for(country_code: &str) -> Option<&'static str> {
    let code = country_code.trim();
    FORCED
        .iter()
        .chain(TABLE)
        .find(|(cc, _)| cc.eq_ignore_ascii_case(code))
        .map(|(_, continent)| *continent)
}
