//! Bangladesh district table
//!
//! Location choices offered to the farmer, with English and Bengali names.
//! The weather provider is queried with the English name.

use serde::Serialize;

/// Location used when the caller supplies none
pub const DEFAULT_LOCATION: &str = "Dhaka";

/// Administrative division a district belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Division {
    Barishal,
    Chattogram,
    Dhaka,
    Khulna,
    Mymensingh,
    Rajshahi,
    Rangpur,
    Sylhet,
}

#[derive(Debug, Clone, Serialize)]
pub struct District {
    /// Lowercase key (e.g., "coxsbazar")
    pub value: &'static str,
    /// English display name
    pub en: &'static str,
    /// Bengali display name
    pub bn: &'static str,
    pub division: Division,
}

// ============================================================================
// EMBEDDED DISTRICT TABLE (grouped by division)
// ============================================================================

pub static DISTRICTS: &[District] = &[
    // Barishal
    District { value: "barguna", en: "Barguna", bn: "বরগুনা", division: Division::Barishal },
    District { value: "barishal", en: "Barishal", bn: "বরিশাল", division: Division::Barishal },
    District { value: "bhola", en: "Bhola", bn: "ভোলা", division: Division::Barishal },
    District { value: "jhalokati", en: "Jhalokati", bn: "ঝালকাঠি", division: Division::Barishal },
    District { value: "patuakhali", en: "Patuakhali", bn: "পটুয়াখালী", division: Division::Barishal },
    District { value: "pirojpur", en: "Pirojpur", bn: "পিরোজপুর", division: Division::Barishal },

    // Chattogram
    District { value: "bandarban", en: "Bandarban", bn: "বান্দরবান", division: Division::Chattogram },
    District { value: "brahmanbaria", en: "Brahmanbaria", bn: "ব্রাহ্মণবাড়িয়া", division: Division::Chattogram },
    District { value: "chandpur", en: "Chandpur", bn: "চাঁদপুর", division: Division::Chattogram },
    District { value: "chattogram", en: "Chattogram", bn: "চট্টগ্রাম", division: Division::Chattogram },
    District { value: "comilla", en: "Comilla", bn: "কুমিল্লা", division: Division::Chattogram },
    District { value: "coxsbazar", en: "Cox's Bazar", bn: "কক্সবাজার", division: Division::Chattogram },
    District { value: "feni", en: "Feni", bn: "ফেনী", division: Division::Chattogram },
    District { value: "khagrachhari", en: "Khagrachhari", bn: "খাগড়াছড়ি", division: Division::Chattogram },
    District { value: "lakshmipur", en: "Lakshmipur", bn: "লক্ষ্মীপুর", division: Division::Chattogram },
    District { value: "noakhali", en: "Noakhali", bn: "নোয়াখালী", division: Division::Chattogram },
    District { value: "rangamati", en: "Rangamati", bn: "রাঙামাটি", division: Division::Chattogram },

    // Dhaka
    District { value: "dhaka", en: "Dhaka", bn: "ঢাকা", division: Division::Dhaka },
    District { value: "faridpur", en: "Faridpur", bn: "ফরিদপুর", division: Division::Dhaka },
    District { value: "gazipur", en: "Gazipur", bn: "গাজীপুর", division: Division::Dhaka },
    District { value: "gopalganj", en: "Gopalganj", bn: "গোপালগঞ্জ", division: Division::Dhaka },
    District { value: "kishoreganj", en: "Kishoreganj", bn: "কিশোরগঞ্জ", division: Division::Dhaka },
    District { value: "madaripur", en: "Madaripur", bn: "মাদারীপুর", division: Division::Dhaka },
    District { value: "manikganj", en: "Manikganj", bn: "মানিকগঞ্জ", division: Division::Dhaka },
    District { value: "munshiganj", en: "Munshiganj", bn: "মুন্সীগঞ্জ", division: Division::Dhaka },
    District { value: "narayanganj", en: "Narayanganj", bn: "নারায়ণগঞ্জ", division: Division::Dhaka },
    District { value: "narsingdi", en: "Narsingdi", bn: "নরসিংদী", division: Division::Dhaka },
    District { value: "rajbari", en: "Rajbari", bn: "রাজবাড়ী", division: Division::Dhaka },
    District { value: "shariatpur", en: "Shariatpur", bn: "শরীয়তপুর", division: Division::Dhaka },
    District { value: "tangail", en: "Tangail", bn: "টাঙ্গাইল", division: Division::Dhaka },

    // Khulna
    District { value: "bagerhat", en: "Bagerhat", bn: "বাগেরহাট", division: Division::Khulna },
    District { value: "chuadanga", en: "Chuadanga", bn: "চুয়াডাঙ্গা", division: Division::Khulna },
    District { value: "jessore", en: "Jessore", bn: "যশোর", division: Division::Khulna },
    District { value: "jhenaidah", en: "Jhenaidah", bn: "ঝিনাইদহ", division: Division::Khulna },
    District { value: "khulna", en: "Khulna", bn: "খুলনা", division: Division::Khulna },
    District { value: "kushtia", en: "Kushtia", bn: "কুষ্টিয়া", division: Division::Khulna },
    District { value: "magura", en: "Magura", bn: "মাগুরা", division: Division::Khulna },
    District { value: "meherpur", en: "Meherpur", bn: "মেহেরপুর", division: Division::Khulna },
    District { value: "narail", en: "Narail", bn: "নড়াইল", division: Division::Khulna },
    District { value: "satkhira", en: "Satkhira", bn: "সাতক্ষীরা", division: Division::Khulna },

    // Mymensingh
    District { value: "jamalpur", en: "Jamalpur", bn: "জামালপুর", division: Division::Mymensingh },
    District { value: "mymensingh", en: "Mymensingh", bn: "ময়মনসিংহ", division: Division::Mymensingh },
    District { value: "netrokona", en: "Netrokona", bn: "নেত্রকোণা", division: Division::Mymensingh },
    District { value: "sherpur", en: "Sherpur", bn: "শেরপুর", division: Division::Mymensingh },

    // Rajshahi
    District { value: "bogura", en: "Bogura", bn: "বগুড়া", division: Division::Rajshahi },
    District { value: "chapainawabganj", en: "Chapainawabganj", bn: "চাঁপাইনবাবগঞ্জ", division: Division::Rajshahi },
    District { value: "joypurhat", en: "Joypurhat", bn: "জয়পুরহাট", division: Division::Rajshahi },
    District { value: "naogaon", en: "Naogaon", bn: "নওগাঁ", division: Division::Rajshahi },
    District { value: "natore", en: "Natore", bn: "নাটোর", division: Division::Rajshahi },
    District { value: "nawabganj", en: "Nawabganj", bn: "নবাবগঞ্জ", division: Division::Rajshahi },
    District { value: "pabna", en: "Pabna", bn: "পাবনা", division: Division::Rajshahi },
    District { value: "rajshahi", en: "Rajshahi", bn: "রাজশাহী", division: Division::Rajshahi },
    District { value: "sirajganj", en: "Sirajganj", bn: "সিরাজগঞ্জ", division: Division::Rajshahi },

    // Rangpur
    District { value: "dinajpur", en: "Dinajpur", bn: "দিনাজপুর", division: Division::Rangpur },
    District { value: "gaibandha", en: "Gaibandha", bn: "গাইবান্ধা", division: Division::Rangpur },
    District { value: "kurigram", en: "Kurigram", bn: "কুড়িগ্রাম", division: Division::Rangpur },
    District { value: "lalmonirhat", en: "Lalmonirhat", bn: "লালমনিরহাট", division: Division::Rangpur },
    District { value: "nilphamari", en: "Nilphamari", bn: "নীলফামারী", division: Division::Rangpur },
    District { value: "panchagarh", en: "Panchagarh", bn: "পঞ্চগড়", division: Division::Rangpur },
    District { value: "rangpur", en: "Rangpur", bn: "রংপুর", division: Division::Rangpur },
    District { value: "thakurgaon", en: "Thakurgaon", bn: "ঠাকুরগাঁও", division: Division::Rangpur },

    // Sylhet
    District { value: "habiganj", en: "Habiganj", bn: "হবিগঞ্জ", division: Division::Sylhet },
    District { value: "moulvibazar", en: "Moulvibazar", bn: "মৌলভীবাজার", division: Division::Sylhet },
    District { value: "sunamganj", en: "Sunamganj", bn: "সুনামগঞ্জ", division: Division::Sylhet },
    District { value: "sylhet", en: "Sylhet", bn: "সিলেট", division: Division::Sylhet },
];

/// Find a district by key or English name (case-insensitive, surrounding whitespace ignored)
pub fn find_district(query: &str) -> Option<&'static District> {
    let needle = query.trim();
    DISTRICTS
        .iter()
        .find(|d| d.value.eq_ignore_ascii_case(needle) || d.en.eq_ignore_ascii_case(needle))
}

/// Resolve free-text input to the name sent to the weather provider.
///
/// Known districts map to their English name; anything else passes through
/// trimmed; blank input becomes the default location.
pub fn resolve_location(query: &str) -> String {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return DEFAULT_LOCATION.to_string();
    }
    match find_district(trimmed) {
        Some(district) => district.en.to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_value_and_name() {
        assert_eq!(find_district("coxsbazar").unwrap().en, "Cox's Bazar");
        assert_eq!(find_district("Cox's Bazar").unwrap().value, "coxsbazar");
        assert_eq!(find_district("  SYLHET ").unwrap().division, Division::Sylhet);
        assert!(find_district("Kolkata").is_none());
    }

    #[test]
    fn test_resolve_location() {
        assert_eq!(resolve_location(""), "Dhaka");
        assert_eq!(resolve_location("   "), "Dhaka");
        assert_eq!(resolve_location("bogura"), "Bogura");
        assert_eq!(resolve_location(" Kolkata "), "Kolkata");
    }

    #[test]
    fn test_every_division_is_represented() {
        for division in [
            Division::Barishal,
            Division::Chattogram,
            Division::Dhaka,
            Division::Khulna,
            Division::Mymensingh,
            Division::Rajshahi,
            Division::Rangpur,
            Division::Sylhet,
        ] {
            assert!(DISTRICTS.iter().any(|d| d.division == division));
        }
    }
}
