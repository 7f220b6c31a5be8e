//! Field kinds selecting a masking rule set.

use super::country::CountryPhoneProfile;
use std::fmt;

/// Which masking and validation rules apply to a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Vehicle registration plate, `LL-DD-L{1,2}DDDD`
    VehicleRegistration,

    /// Driver license number, `LL-` followed by 13 digits
    DriverLicense,

    /// National phone number bounded by a country profile
    PhoneNumber(&'static CountryPhoneProfile),

    /// Inventory part number, up to 20 uppercase alphanumerics
    PartNumber,

    /// Non-negative decimal amount, up to 8 digits
    CurrencyAmount,
}

impl FieldKind {
    /// Parse a kind from its snake_case name.
    ///
    /// `phone_number` needs a profile; without one this returns `None`,
    /// as it does for unknown names.
    pub fn from_name(name: &str, profile: Option<&'static CountryPhoneProfile>) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "vehicle_registration" | "registration" => Some(Self::VehicleRegistration),
            "driver_license" | "license" => Some(Self::DriverLicense),
            "phone_number" | "phone" => profile.map(Self::PhoneNumber),
            "part_number" => Some(Self::PartNumber),
            "currency_amount" | "currency" | "amount" => Some(Self::CurrencyAmount),
            _ => None,
        }
    }

    /// The snake_case name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::VehicleRegistration => "vehicle_registration",
            Self::DriverLicense => "driver_license",
            Self::PhoneNumber(_) => "phone_number",
            Self::PartNumber => "part_number",
            Self::CurrencyAmount => "currency_amount",
        }
    }

    /// Whether the mask inserts hyphens between groups.
    pub(crate) fn is_hyphenated(&self) -> bool {
        matches!(self, Self::VehicleRegistration | Self::DriverLicense)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhoneNumber(profile) => write!(f, "phone_number({})", profile.iso_code),
            other => write!(f, "{}", other.name()),
        }
    }
}
