//! Static hospital department catalog.
//!
//! # Responsibility
//! - Describe every department a patient can be routed to: location,
//!   specialty, typical presenting complaints and urgency class.
//! - Carry the mock waiting-room and wayfinding data served to the
//!   conversational agent.
//!
//! # Invariants
//! - `CATALOG` order matches `DepartmentKey` discriminants.
//! - Common symptoms are stored lowercase.

use serde::{Deserialize, Serialize};

/// Urgency class attached to a department, not to a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Emergency,
    Urgent,
    Routine,
}

/// Stable identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepartmentKey {
    Emergency,
    Cardiology,
    Orthopedics,
    Neurology,
    Pediatrics,
    Oncology,
    GeneralMedicine,
    Radiology,
    Laboratory,
    Pharmacy,
}

impl DepartmentKey {
    pub fn info(self) -> &'static DepartmentInfo {
        &CATALOG[self as usize]
    }
}

/// Current queue snapshot for a department waiting room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingRoom {
    pub current_wait: &'static str,
    pub patients_waiting: u32,
}

/// One catalog entry.
#[derive(Debug, PartialEq, Eq)]
pub struct DepartmentInfo {
    pub key: DepartmentKey,
    pub name: &'static str,
    pub floor: &'static str,
    pub description: &'static str,
    pub common_symptoms: &'static [&'static str],
    pub urgency: UrgencyLevel,
    pub waiting_room: WaitingRoom,
    /// Route from the main entrance.
    pub directions: &'static str,
}

static CATALOG: [DepartmentInfo; 10] = [
    DepartmentInfo {
        key: DepartmentKey::Emergency,
        name: "Emergency Department",
        floor: "Ground Floor",
        description: "For immediate, life-threatening conditions requiring urgent medical attention",
        common_symptoms: &[
            "severe chest pain",
            "difficulty breathing",
            "unconsciousness",
            "severe bleeding",
            "heart attack symptoms",
            "stroke symptoms",
            "severe allergic reaction",
            "severe burns",
            "major trauma",
            "poisoning",
        ],
        urgency: UrgencyLevel::Emergency,
        waiting_room: WaitingRoom {
            current_wait: "5-10 minutes",
            patients_waiting: 3,
        },
        directions: "From main entrance: Go straight ahead, Emergency is directly in front of you.",
    },
    DepartmentInfo {
        key: DepartmentKey::Cardiology,
        name: "Cardiology Department",
        floor: "Third Floor",
        description: "Specializes in heart and cardiovascular conditions",
        common_symptoms: &[
            "chest pain",
            "heart palpitations",
            "shortness of breath",
            "irregular heartbeat",
            "high blood pressure",
            "chest tightness",
            "heart murmur",
            "swollen ankles",
            "fatigue with exertion",
            "dizziness",
        ],
        urgency: UrgencyLevel::Urgent,
        waiting_room: WaitingRoom {
            current_wait: "15-20 minutes",
            patients_waiting: 8,
        },
        directions: "From main entrance: Take elevator to 3rd floor, turn right, follow signs.",
    },
    DepartmentInfo {
        key: DepartmentKey::Orthopedics,
        name: "Orthopedics Department",
        floor: "Second Floor",
        description: "Treats bone, joint, and muscle conditions",
        common_symptoms: &[
            "joint pain",
            "back pain",
            "broken bone",
            "muscle pain",
            "arthritis",
            "sports injury",
            "knee pain",
            "shoulder pain",
            "hip pain",
            "neck pain",
            "sprain",
            "fracture",
            "mobility issues",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "25-30 minutes",
            patients_waiting: 12,
        },
        directions: "From main entrance: Take elevator to 2nd floor, turn left down the main corridor.",
    },
    DepartmentInfo {
        key: DepartmentKey::Neurology,
        name: "Neurology Department",
        floor: "Fourth Floor",
        description: "Specializes in brain, spine, and nervous system disorders",
        common_symptoms: &[
            "headache",
            "migraine",
            "seizure",
            "memory loss",
            "confusion",
            "numbness",
            "tingling",
            "weakness",
            "tremor",
            "balance problems",
            "speech difficulties",
            "vision problems",
        ],
        urgency: UrgencyLevel::Urgent,
        waiting_room: WaitingRoom {
            current_wait: "20-25 minutes",
            patients_waiting: 6,
        },
        directions: "From main entrance: Take elevator to 4th floor, follow the blue line on the floor.",
    },
    DepartmentInfo {
        key: DepartmentKey::Pediatrics,
        name: "Pediatrics Department",
        floor: "Fifth Floor",
        description: "Specialized care for infants, children, and adolescents",
        common_symptoms: &[
            "fever in child",
            "child not eating",
            "developmental concerns",
            "vaccination",
            "growth problems",
            "behavioral issues",
            "school problems",
            "child injury",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "10-15 minutes",
            patients_waiting: 4,
        },
        directions: "From main entrance: Take elevator to 5th floor, colorful signs will guide you.",
    },
    DepartmentInfo {
        key: DepartmentKey::Oncology,
        name: "Oncology Department",
        floor: "Sixth Floor",
        description: "Cancer diagnosis, treatment, and care",
        common_symptoms: &[
            "unexplained weight loss",
            "persistent fatigue",
            "unusual lumps",
            "changes in moles",
            "persistent cough",
            "blood in stool",
            "night sweats",
            "cancer screening",
            "family history of cancer",
        ],
        urgency: UrgencyLevel::Urgent,
        waiting_room: WaitingRoom {
            current_wait: "30-35 minutes",
            patients_waiting: 10,
        },
        directions: "From main entrance: Take elevator to 6th floor, turn right at the nurses station.",
    },
    DepartmentInfo {
        key: DepartmentKey::GeneralMedicine,
        name: "General Medicine Department",
        floor: "First Floor",
        description: "Primary care for general health concerns and routine check-ups",
        common_symptoms: &[
            "general checkup",
            "cold symptoms",
            "flu symptoms",
            "minor fever",
            "routine physical",
            "health screening",
            "minor aches",
            "general wellness",
            "prescription refill",
            "health questions",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "15-20 minutes",
            patients_waiting: 7,
        },
        directions: "From main entrance: Take elevator to 1st floor or use the stairs, turn left.",
    },
    DepartmentInfo {
        key: DepartmentKey::Radiology,
        name: "Radiology Department",
        floor: "Basement Level",
        description: "Medical imaging services including X-rays, CT scans, and MRIs",
        common_symptoms: &[
            "need imaging",
            "x-ray needed",
            "ct scan",
            "mri scan",
            "ultrasound",
            "medical imaging",
            "scan appointment",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "45-60 minutes",
            patients_waiting: 15,
        },
        directions: "From main entrance: Take elevator to basement level, follow yellow signs.",
    },
    DepartmentInfo {
        key: DepartmentKey::Laboratory,
        name: "Laboratory Services",
        floor: "Basement Level",
        description: "Blood tests, lab work, and diagnostic testing",
        common_symptoms: &[
            "blood test",
            "lab work",
            "urine test",
            "diagnostic testing",
            "blood work needed",
            "lab results",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "5-10 minutes",
            patients_waiting: 2,
        },
        directions: "From main entrance: Take elevator to basement level, turn right.",
    },
    DepartmentInfo {
        key: DepartmentKey::Pharmacy,
        name: "Pharmacy",
        floor: "Ground Floor",
        description: "Medication dispensing and pharmaceutical consultation",
        common_symptoms: &[
            "medication questions",
            "prescription pickup",
            "drug interactions",
            "medication side effects",
            "pharmacy consultation",
        ],
        urgency: UrgencyLevel::Routine,
        waiting_room: WaitingRoom {
            current_wait: "5-10 minutes",
            patients_waiting: 3,
        },
        directions: "From main entrance: Turn right, pharmacy is next to the gift shop.",
    },
];

/// All departments, emergency first.
pub fn catalog() -> &'static [DepartmentInfo] {
    &CATALOG
}

/// Case-insensitive partial match against display names.
///
/// Returns the first entry in catalog order whose name contains `query`.
/// A blank query matches nothing.
pub fn find_by_name(query: &str) -> Option<&'static DepartmentInfo> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    CATALOG
        .iter()
        .find(|info| info.name.to_lowercase().contains(needle.as_str()))
}

/// Exact display-name lookup.
pub fn find_by_exact_name(name: &str) -> Option<&'static DepartmentInfo> {
    CATALOG.iter().find(|info| info.name == name)
}

#[cfg(test)]
mod tests {
    use super::{catalog, find_by_exact_name, find_by_name, DepartmentKey, UrgencyLevel};

    #[test]
    fn catalog_order_matches_keys() {
        for (index, info) in catalog().iter().enumerate() {
            assert_eq!(info.key as usize, index, "{} is out of place", info.name);
            assert_eq!(info.key.info().name, info.name);
        }
    }

    #[test]
    fn common_symptoms_are_lowercase() {
        for info in catalog() {
            for symptom in info.common_symptoms {
                assert_eq!(*symptom, symptom.to_lowercase());
            }
        }
    }

    #[test]
    fn only_emergency_has_emergency_urgency() {
        let emergency: Vec<_> = catalog()
            .iter()
            .filter(|info| info.urgency == UrgencyLevel::Emergency)
            .collect();
        assert_eq!(emergency.len(), 1);
        assert_eq!(emergency[0].key, DepartmentKey::Emergency);
    }

    #[test]
    fn partial_name_lookup_is_case_insensitive() {
        let info = find_by_name("CARDIO").unwrap();
        assert_eq!(info.key, DepartmentKey::Cardiology);
        assert!(find_by_name("").is_none());
        assert!(find_by_name("dentistry").is_none());
    }

    #[test]
    fn exact_lookup_requires_full_name() {
        assert!(find_by_exact_name("Pharmacy").is_some());
        assert!(find_by_exact_name("Cardiology").is_none());
    }
}
