use serde::{Deserialize, Serialize};

use crate::pii::Masked;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Masked::new(email.into()),
            phone: Masked::new(phone.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_masks_contact_details() {
        let profile = UserProfile::new("John Doe", "john.doe@example.com", "+1 (123) 456-7890");
        let debug = format!("{:?}", profile);

        assert!(debug.contains("John Doe"));
        assert!(!debug.contains("example.com"));
        assert!(!debug.contains("456"));
    }
}
