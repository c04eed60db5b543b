use serde::{Deserialize, Serialize};

/// The profile submitted by a caller. Carries no identity and is never stored.
///
/// Serialized field order is part of the prompt contract: the same profile
/// always produces the same compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub skills: Vec<String>,
    pub education: Education,
    pub career_goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub field: String,
    #[serde(default)]
    pub year_completed: i32,
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl UserProfile {
    /// Boundary check for required text fields.
    ///
    /// Presence of `skills`, `education` and `careerGoals` is already enforced
    /// by deserialization; this rejects required strings that are blank.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("education.degree", &self.education.degree),
            ("education.field", &self.education.field),
        ];

        let blank: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(format!("required fields are blank: {}", blank.join(", ")))
        }
    }
}
