//! Address → city / province extraction.
//!
//! Plain substring checks against fixed tables. Province names match
//! case-insensitively anywhere; two-letter codes only as whole uppercase
//! tokens (so "on" in a street description is not Ontario). The longest
//! matching city wins, and a city implies its province when the address
//! names none.

/// Location parts found in an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// City name in canonical spelling.
    pub city: Option<&'static str>,
    /// Two-letter province code.
    pub province: Option<&'static str>,
}

/// (full name, code)
const PROVINCES: &[(&str, &str)] = &[
    ("british columbia", "BC"),
    ("alberta", "AB"),
    ("saskatchewan", "SK"),
    ("manitoba", "MB"),
    ("ontario", "ON"),
    ("quebec", "QC"),
    ("québec", "QC"),
    ("new brunswick", "NB"),
    ("nova scotia", "NS"),
    ("prince edward island", "PE"),
    ("newfoundland and labrador", "NL"),
    ("newfoundland", "NL"),
    ("yukon", "YT"),
    ("northwest territories", "NT"),
    ("nunavut", "NU"),
];

/// (city, province code)
const CITIES: &[(&str, &str)] = &[
    ("Vancouver", "BC"),
    ("North Vancouver", "BC"),
    ("West Vancouver", "BC"),
    ("Burnaby", "BC"),
    ("Richmond", "BC"),
    ("Surrey", "BC"),
    ("Coquitlam", "BC"),
    ("Victoria", "BC"),
    ("Kelowna", "BC"),
    ("Calgary", "AB"),
    ("Edmonton", "AB"),
    ("Saskatoon", "SK"),
    ("Regina", "SK"),
    ("Winnipeg", "MB"),
    ("Toronto", "ON"),
    ("North York", "ON"),
    ("Scarborough", "ON"),
    ("Markham", "ON"),
    ("Richmond Hill", "ON"),
    ("Mississauga", "ON"),
    ("Ottawa", "ON"),
    ("Waterloo", "ON"),
    ("Hamilton", "ON"),
    ("London", "ON"),
    ("Montreal", "QC"),
    ("Montréal", "QC"),
    ("Quebec City", "QC"),
    ("Halifax", "NS"),
    ("Fredericton", "NB"),
    ("Charlottetown", "PE"),
    ("St. John's", "NL"),
];

/// Extract city and province from a free-form address.
pub fn extract_location(address: &str) -> Location {
    let province = find_province(address);
    let city = find_city(address, province);
    Location {
        city: city.map(|(name, _)| name),
        province: province.or(city.map(|(_, code)| code)),
    }
}

/// Canonical two-letter code for a province name or code.
pub fn normalize_province(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if let Some((_, code)) = PROVINCES
        .iter()
        .find(|(_, code)| code.eq_ignore_ascii_case(trimmed))
    {
        return Some(code);
    }
    let lower = trimmed.to_lowercase();
    PROVINCES
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
}

fn find_province(address: &str) -> Option<&'static str> {
    let lower = address.to_lowercase();
    let by_name = PROVINCES
        .iter()
        .filter(|(name, _)| lower.contains(name))
        .max_by_key(|(name, _)| name.len())
        .map(|(_, code)| *code);
    if by_name.is_some() {
        return by_name;
    }

    address
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() == 2)
        .find_map(|token| {
            PROVINCES
                .iter()
                .find(|(_, code)| *code == token)
                .map(|(_, code)| *code)
        })
}

fn find_city(
    address: &str,
    province: Option<&'static str>,
) -> Option<(&'static str, &'static str)> {
    let lower = address.to_lowercase();
    CITIES
        .iter()
        .filter(|(city, code)| {
            lower.contains(&city.to_lowercase()) && province.map_or(true, |p| p == *code)
        })
        .max_by_key(|(city, _)| city.len())
        .copied()
}
