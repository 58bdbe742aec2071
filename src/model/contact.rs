use serde::{Deserialize, Serialize};

/// A contact record as stored under `contacts/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phonenumber: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phonenumber: impl Into<String>,
    ) -> Self {
        Contact {
            name: name.into(),
            email: email.into(),
            phonenumber: phonenumber.into(),
        }
    }

    /// First whitespace-separated word of the name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Initials: first letter of the first and last word, uppercased
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

/// Initials for any display name ("Anna Maria Meier" → "AM")
pub fn initials_of(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let mut out = String::new();
    if let Some(first) = words.first().and_then(|w| w.chars().next()) {
        out.extend(first.to_uppercase());
    }
    if words.len() > 1
        && let Some(last) = words.last().and_then(|w| w.chars().next())
    {
        out.extend(last.to_uppercase());
    }
    out
}

/// Number of distinct badge colors handed out to contacts
pub const CONTACT_PALETTE_SIZE: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(initials_of("Anna Maria Meier"), "AM");
        assert_eq!(initials_of("bob"), "B");
        assert_eq!(initials_of("  "), "");
        assert_eq!(initials_of("élodie durand"), "ÉD");
    }

    #[test]
    fn first_name_is_first_word() {
        let c = Contact::new("  Anna Meier", "a@example.com", "123");
        assert_eq!(c.first_name(), "Anna");
        assert_eq!(c.initials(), "AM");
    }

    #[test]
    fn contact_tolerates_missing_optional_fields() {
        let c: Contact = serde_json::from_str(r#"{"name":"Solo"}"#).unwrap();
        assert_eq!(c.email, "");
        assert_eq!(c.phonenumber, "");
    }
}
