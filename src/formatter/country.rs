//! Country phone profiles.
//!
//! A static table of the countries the fleet operates in, with the dial code
//! and the number of national digits a complete phone number carries.

use serde::Serialize;

/// Phone numbering profile for a single country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CountryPhoneProfile {
    /// Country display name
    pub name: &'static str,

    /// ISO 3166-1 alpha-2 code
    pub iso_code: &'static str,

    /// Flag emoji shown next to the dial code in pickers
    pub flag: &'static str,

    /// International dial code including the leading '+'
    pub dial_code: &'static str,

    /// Exact number of national digits in a complete number
    pub national_digit_limit: usize,
}

macro_rules! profile {
    ($name:expr, $iso:expr, $flag:expr, $dial:expr, $limit:expr) => {
        CountryPhoneProfile {
            name: $name,
            iso_code: $iso,
            flag: $flag,
            dial_code: $dial,
            national_digit_limit: $limit,
        }
    };
}

/// All supported profiles, in picker order.
pub static COUNTRY_PROFILES: &[CountryPhoneProfile] = &[
    profile!("India", "IN", "🇮🇳", "+91", 10),
    profile!("United Arab Emirates", "AE", "🇦🇪", "+971", 9),
    profile!("Saudi Arabia", "SA", "🇸🇦", "+966", 9),
    profile!("Qatar", "QA", "🇶🇦", "+974", 8),
    profile!("Kuwait", "KW", "🇰🇼", "+965", 8),
    profile!("Oman", "OM", "🇴🇲", "+968", 8),
    profile!("Bahrain", "BH", "🇧🇭", "+973", 8),
    profile!("Nepal", "NP", "🇳🇵", "+977", 10),
    profile!("Bangladesh", "BD", "🇧🇩", "+880", 10),
    profile!("Sri Lanka", "LK", "🇱🇰", "+94", 9),
    profile!("Singapore", "SG", "🇸🇬", "+65", 8),
    profile!("United Kingdom", "GB", "🇬🇧", "+44", 10),
    profile!("United States", "US", "🇺🇸", "+1", 10),
    profile!("Canada", "CA", "🇨🇦", "+1", 10),
    profile!("Australia", "AU", "🇦🇺", "+61", 9),
    profile!("Germany", "DE", "🇩🇪", "+49", 11),
];

/// Look up a profile by ISO code, ignoring case and surrounding whitespace.
pub fn find_profile(iso_code: &str) -> Option<&'static CountryPhoneProfile> {
    let code = iso_code.trim();
    COUNTRY_PROFILES
        .iter()
        .find(|p| p.iso_code.eq_ignore_ascii_case(code))
}

/// The profile used when a form has not picked one yet.
pub fn default_profile() -> &'static CountryPhoneProfile {
    &COUNTRY_PROFILES[0]
}
