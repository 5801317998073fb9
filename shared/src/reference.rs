//! Static reference data offered by the form pickers
//!
//! These are the labels the prediction service's encoders were fitted on,
//! so matching is exact.

/// Countries recognized by the prediction service
pub const COUNTRIES: &[&str] = &[
    "Albania",
    "Algeria",
    "Angola",
    "Argentina",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahamas",
    "Bahrain",
    "Bangladesh",
    "Belarus",
    "Belgium",
    "Botswana",
    "Brazil",
    "Bulgaria",
    "Burkina Faso",
    "Burundi",
    "Cameroon",
    "Canada",
    "Central African Republic",
    "Chile",
    "Colombia",
    "Croatia",
    "Denmark",
    "Dominican Republic",
    "Ecuador",
    "Egypt",
    "El Salvador",
    "Eritrea",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Ghana",
    "Greece",
    "Guatemala",
    "Guinea",
    "Guyana",
    "Haiti",
    "Honduras",
    "Hungary",
    "India",
    "Indonesia",
    "Iraq",
    "Ireland",
    "Italy",
    "Jamaica",
    "Japan",
    "Kazakhstan",
    "Kenya",
    "Latvia",
    "Lebanon",
    "Lesotho",
    "Libya",
    "Lithuania",
    "Madagascar",
    "Malawi",
    "Malaysia",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Mexico",
    "Montenegro",
    "Morocco",
    "Mozambique",
    "Namibia",
    "Nepal",
    "Netherlands",
    "New Zealand",
    "Nicaragua",
    "Niger",
    "Norway",
    "Pakistan",
    "Papua New Guinea",
    "Peru",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Rwanda",
    "Saudi Arabia",
    "Senegal",
    "Slovenia",
    "South Africa",
    "Spain",
    "Sri Lanka",
    "Sudan",
    "Suriname",
    "Sweden",
    "Switzerland",
    "Tajikistan",
    "Thailand",
    "Tunisia",
    "Turkey",
    "Uganda",
    "Ukraine",
    "United Kingdom",
    "Uruguay",
    "Zambia",
    "Zimbabwe",
];

/// Crop types recognized by the prediction service
pub const CROP_TYPES: &[&str] = &[
    "Cassava",
    "Maize",
    "Plantains and others",
    "Potatoes",
    "Rice, paddy",
    "Sorghum",
    "Soybeans",
    "Sweet potatoes",
    "Wheat",
    "Yams",
];

pub fn is_known_country(name: &str) -> bool {
    COUNTRIES.contains(&name)
}

pub fn is_known_crop_type(name: &str) -> bool {
    CROP_TYPES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_lists_are_sorted_and_unique() {
        for list in [COUNTRIES, CROP_TYPES] {
            for pair in list.windows(2) {
                assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_form_defaults_are_known() {
        // Both platforms' default picks must be selectable
        assert!(is_known_country("India"));
        assert!(is_known_country("Albania"));
        assert!(is_known_crop_type("Wheat"));
        assert!(is_known_crop_type("Maize"));
    }

    #[test]
    fn test_matching_is_exact() {
        assert!(!is_known_country("india"));
        assert!(!is_known_country(" India"));
        assert!(!is_known_crop_type("wheat"));
        assert!(!is_known_country(""));
    }
}
