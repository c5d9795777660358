//! Psiphon exit country allow-list

/// ISO 3166-1 alpha-2 codes accepted for `-country`, sorted.
pub const COUNTRY_CODES: [&str; 30] = [
    "AT", "BE", "BG", "BR", "CA", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "HU",
    "IE", "IN", "IT", "JP", "LV", "NL", "NO", "PL", "RO", "RS", "SE", "SG", "SK", "UA", "US",
];

/// Case-sensitive membership test
pub fn is_supported(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}
