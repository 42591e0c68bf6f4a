//! Emergency-care directory.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Whether a doctor can take a patient right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    Busy,
    EmergencyOnly,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available Now",
            Availability::Busy => "Busy",
            Availability::EmergencyOnly => "Emergency Only",
        }
    }
}

/// An emergency-care contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub specialty: Cow<'static, str>,
    pub hospital: Cow<'static, str>,
    /// Distance from the user, in kilometres.
    pub distance: f64,
    pub rating: f64,
    pub availability: Availability,
    pub phone: Cow<'static, str>,
    pub address: Cow<'static, str>,
    /// Travel time label; the backend may omit it.
    #[serde(default)]
    pub estimated_time: Cow<'static, str>,
}

impl Doctor {
    /// Case-insensitive match against name, specialty or hospital.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.specialty, &self.hospital]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

macro_rules! doctor {
    ($id:literal, $name:literal, $specialty:literal, $hospital:literal, $distance:literal,
     $rating:literal, $availability:expr, $phone:literal, $address:literal, $eta:literal) => {
        Doctor {
            id: Cow::Borrowed($id),
            name: Cow::Borrowed($name),
            specialty: Cow::Borrowed($specialty),
            hospital: Cow::Borrowed($hospital),
            distance: $distance,
            rating: $rating,
            availability: $availability,
            phone: Cow::Borrowed($phone),
            address: Cow::Borrowed($address),
            estimated_time: Cow::Borrowed($eta),
        }
    };
}

static DIRECTORY: [Doctor; 3] = [
    doctor!(
        "1",
        "Dr. Sarah Johnson",
        "Cardiology",
        "City Medical Center",
        0.8,
        4.9,
        Availability::Available,
        "+1 (555) 123-4567",
        "123 Medical Drive, Downtown",
        "5 min"
    ),
    doctor!(
        "2",
        "Dr. Michael Chen",
        "Emergency Medicine",
        "General Hospital",
        1.2,
        4.8,
        Availability::Available,
        "+1 (555) 987-6543",
        "456 Health Street, Midtown",
        "8 min"
    ),
    doctor!(
        "3",
        "Dr. Emily Rodriguez",
        "Internal Medicine",
        "Regional Medical",
        2.1,
        4.7,
        Availability::EmergencyOnly,
        "+1 (555) 456-7890",
        "789 Care Avenue, Uptown",
        "12 min"
    ),
];

/// The built-in directory.
pub fn emergency_doctors() -> &'static [Doctor] {
    &DIRECTORY
}

/// Filter `doctors` by a free-text query, nearest first.
///
/// An empty (or whitespace-only) query matches everyone.
pub fn filter_doctors<'a>(doctors: &'a [Doctor], query: &str) -> Vec<&'a Doctor> {
    let query = query.trim();
    let mut found: Vec<&Doctor> = doctors
        .iter()
        .filter(|d| query.is_empty() || d.matches(query))
        .collect();
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}

/// Search the built-in directory.
pub fn search_doctors(query: &str) -> Vec<&'static Doctor> {
    filter_doctors(emergency_doctors(), query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_all_by_distance() {
        let all = search_doctors("");
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(search_doctors("   ").len(), 3);
    }

    #[test]
    fn test_search_fields_case_insensitive() {
        let by_name = search_doctors("chen");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Dr. Michael Chen");

        assert_eq!(search_doctors("CARDIO")[0].id, "1");
        assert_eq!(search_doctors("regional")[0].id, "3");
        assert_eq!(search_doctors("medicine").len(), 2);
        assert!(search_doctors("dentist").is_empty());
    }

    #[test]
    fn test_address_is_not_searched() {
        assert!(search_doctors("downtown").is_empty());
    }

    #[test]
    fn test_backend_wire_format() {
        let json = r#"{
            "id": "7",
            "name": "Dr. Ada Park",
            "specialty": "Pulmonology",
            "hospital": "Bayside Clinic",
            "distance": 3.4,
            "rating": 4.5,
            "availability": "emergency-only",
            "phone": "+1 (555) 000-1111",
            "address": "1 Harbor Road"
        }"#;
        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.availability, Availability::EmergencyOnly);
        assert!(doctor.estimated_time.is_empty());
        assert_eq!(doctor.availability.label(), "Emergency Only");
    }
}
