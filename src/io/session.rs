use std::fs;
use std::path::Path;

use crate::model::user::Session;

const SESSION_FILE: &str = "session.json";

/// Read session.json from the data directory
pub fn read_session(dir: &Path) -> Option<Session> {
    let content = fs::read_to_string(dir.join(SESSION_FILE)).ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed session file");
            None
        }
    }
}

/// Write session.json to the data directory
pub fn write_session(dir: &Path, session: &Session) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)
}

/// Remove session.json (logout). A missing file is not an error.
pub fn clear_session(dir: &Path) -> Result<(), std::io::Error> {
    match fs::remove_file(dir.join(SESSION_FILE)) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{User, UserRole};
    use tempfile::TempDir;

    #[test]
    fn write_read_clear() {
        let dir = TempDir::new().unwrap();
        let session = Session::user(&User {
            name: "Ann Lee".into(),
            email: "ann@x.io".into(),
            password: "pw".into(),
        });
        write_session(dir.path(), &session).unwrap();
        let loaded = read_session(dir.path()).unwrap();
        assert_eq!(loaded.user_role, UserRole::User);
        assert_eq!(loaded.user_email.as_deref(), Some("ann@x.io"));

        clear_session(dir.path()).unwrap();
        assert!(read_session(dir.path()).is_none());
        // Clearing twice is fine
        clear_session(dir.path()).unwrap();
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_session(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session.json"), "not json {{{").unwrap();
        assert!(read_session(dir.path()).is_none());
    }

    #[test]
    fn guest_session_has_no_email() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), &Session::guest()).unwrap();
        let loaded = read_session(dir.path()).unwrap();
        assert!(loaded.is_guest());
        assert!(loaded.user_email.is_none());
    }
}
