//! International calling-code table.

use serde::Serialize;

/// One country's dialing prefix.
///
/// A calling code may be shared by several countries ("+1"); the entry with
/// the lowest `priority` answers reverse lookups, ties going to the earlier
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallingCodeEntry {
    /// ISO 3166-1 alpha-2
    pub country: &'static str,
    /// Always starts with `+`
    pub calling_code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub priority: u8,
}

const fn entry(
    country: &'static str,
    calling_code: &'static str,
    name: &'static str,
    flag: &'static str,
) -> CallingCodeEntry {
    CallingCodeEntry {
        country,
        calling_code,
        name,
        flag,
        priority: 0,
    }
}

const fn secondary(
    country: &'static str,
    calling_code: &'static str,
    name: &'static str,
    flag: &'static str,
) -> CallingCodeEntry {
    CallingCodeEntry {
        country,
        calling_code,
        name,
        flag,
        priority: 1,
    }
}

pub const CALLING_CODES: &[CallingCodeEntry] = &[
    // West Africa
    entry("CI", "+225", "Côte d'Ivoire", "🇨🇮"),
    entry("SN", "+221", "Senegal", "🇸🇳"),
    entry("ML", "+223", "Mali", "🇲🇱"),
    entry("BF", "+226", "Burkina Faso", "🇧🇫"),
    entry("NE", "+227", "Niger", "🇳🇪"),
    entry("TG", "+228", "Togo", "🇹🇬"),
    entry("BJ", "+229", "Benin", "🇧🇯"),
    entry("MR", "+222", "Mauritania", "🇲🇷"),
    entry("GN", "+224", "Guinea", "🇬🇳"),
    entry("GW", "+245", "Guinea-Bissau", "🇬🇼"),
    entry("SL", "+232", "Sierra Leone", "🇸🇱"),
    entry("LR", "+231", "Liberia", "🇱🇷"),
    entry("GH", "+233", "Ghana", "🇬🇭"),
    entry("NG", "+234", "Nigeria", "🇳🇬"),
    entry("CM", "+237", "Cameroon", "🇨🇲"),
    entry("TD", "+235", "Chad", "🇹🇩"),
    entry("CF", "+236", "Central African Republic", "🇨🇫"),
    entry("GA", "+241", "Gabon", "🇬🇦"),
    entry("CG", "+242", "Congo", "🇨🇬"),
    entry("CD", "+243", "DR Congo", "🇨🇩"),
    entry("AO", "+244", "Angola", "🇦🇴"),
    entry("GQ", "+240", "Equatorial Guinea", "🇬🇶"),
    entry("ST", "+239", "São Tomé and Príncipe", "🇸🇹"),
    // East Africa
    entry("ET", "+251", "Ethiopia", "🇪🇹"),
    entry("KE", "+254", "Kenya", "🇰🇪"),
    entry("UG", "+256", "Uganda", "🇺🇬"),
    entry("TZ", "+255", "Tanzania", "🇹🇿"),
    entry("RW", "+250", "Rwanda", "🇷🇼"),
    entry("BI", "+257", "Burundi", "🇧🇮"),
    entry("DJ", "+253", "Djibouti", "🇩🇯"),
    entry("SO", "+252", "Somalia", "🇸🇴"),
    entry("ER", "+291", "Eritrea", "🇪🇷"),
    // North Africa
    entry("MA", "+212", "Morocco", "🇲🇦"),
    entry("DZ", "+213", "Algeria", "🇩🇿"),
    entry("TN", "+216", "Tunisia", "🇹🇳"),
    entry("LY", "+218", "Libya", "🇱🇾"),
    entry("EG", "+20", "Egypt", "🇪🇬"),
    entry("SD", "+249", "Sudan", "🇸🇩"),
    // Southern Africa
    entry("ZA", "+27", "South Africa", "🇿🇦"),
    entry("ZW", "+263", "Zimbabwe", "🇿🇼"),
    entry("BW", "+267", "Botswana", "🇧🇼"),
    entry("NA", "+264", "Namibia", "🇳🇦"),
    entry("SZ", "+268", "Eswatini", "🇸🇿"),
    entry("LS", "+266", "Lesotho", "🇱🇸"),
    entry("MZ", "+258", "Mozambique", "🇲🇿"),
    entry("MG", "+261", "Madagascar", "🇲🇬"),
    entry("MU", "+230", "Mauritius", "🇲🇺"),
    entry("SC", "+248", "Seychelles", "🇸🇨"),
    entry("KM", "+269", "Comoros", "🇰🇲"),
    // Rest of the world
    entry("FR", "+33", "France", "🇫🇷"),
    entry("US", "+1", "United States", "🇺🇸"),
    entry("GB", "+44", "United Kingdom", "🇬🇧"),
    entry("BE", "+32", "Belgium", "🇧🇪"),
    entry("CH", "+41", "Switzerland", "🇨🇭"),
    secondary("CA", "+1", "Canada", "🇨🇦"),
    entry("DE", "+49", "Germany", "🇩🇪"),
    entry("IT", "+39", "Italy", "🇮🇹"),
    entry("ES", "+34", "Spain", "🇪🇸"),
    entry("PT", "+351", "Portugal", "🇵🇹"),
    entry("BR", "+55", "Brazil", "🇧🇷"),
    entry("IN", "+91", "India", "🇮🇳"),
    entry("CN", "+86", "China", "🇨🇳"),
    entry("JP", "+81", "Japan", "🇯🇵"),
    entry("AE", "+971", "United Arab Emirates", "🇦🇪"),
    entry("SA", "+966", "Saudi Arabia", "🇸🇦"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_well_formed() {
        for e in CALLING_CODES {
            assert!(e.calling_code.starts_with('+'), "{}", e.country);
            assert!(e.calling_code[1..].chars().all(|c| c.is_ascii_digit()));
            assert_eq!(e.country.len(), 2);
        }
    }

    #[test]
    fn test_countries_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for e in CALLING_CODES {
            assert!(seen.insert(e.country), "duplicate country {}", e.country);
        }
    }

    #[test]
    fn test_shared_codes_have_a_single_preferred_entry() {
        let mut preferred = std::collections::HashMap::new();
        for e in CALLING_CODES.iter().filter(|e| e.priority == 0) {
            assert!(
                preferred.insert(e.calling_code, e.country).is_none(),
                "two preferred entries for {}",
                e.calling_code
            );
        }
    }
}
