use serde::{Deserialize, Serialize};

/// A registered user as stored under `users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(alias = "mail")]
    pub email: String,
    pub password: String,
}

/// Who is using the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    User,
}

/// Locally persisted login state (`userRole` / `userEmail`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Display name resolved at login, for the greeting and header badge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl Session {
    pub fn guest() -> Self {
        Session {
            user_role: UserRole::Guest,
            user_email: None,
            user_name: None,
        }
    }

    pub fn user(user: &User) -> Self {
        Session {
            user_role: UserRole::User,
            user_email: Some(user.email.clone()),
            user_name: Some(user.name.clone()),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.user_role == UserRole::Guest
    }

    /// Header badge: the user's initials, or `G` for guests
    pub fn badge(&self) -> String {
        match (&self.user_role, &self.user_name) {
            (UserRole::User, Some(name)) if !name.trim().is_empty() => {
                super::contact::initials_of(name)
            }
            _ => "G".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_mail_alias() {
        let u: User =
            serde_json::from_str(r#"{"name":"Ann","mail":"ann@x.io","password":"pw"}"#).unwrap();
        assert_eq!(u.email, "ann@x.io");
    }

    #[test]
    fn session_uses_camel_case_keys() {
        let s = Session::user(&User {
            name: "Ann Lee".into(),
            email: "ann@x.io".into(),
            password: "pw".into(),
        });
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["userRole"], "user");
        assert_eq!(v["userEmail"], "ann@x.io");
        assert_eq!(s.badge(), "AL");
    }

    #[test]
    fn guest_badge_is_g() {
        let s = Session::guest();
        assert!(s.is_guest());
        assert_eq!(s.badge(), "G");
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("userEmail").is_none());
    }
}
