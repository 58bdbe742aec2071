use crate::io::board_io::parse_collection;
use crate::io::store::{DocumentStore, StoreError};
use crate::model::user::User;

/// Error type for login and signup
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("an account with {0} already exists")]
    EmailTaken(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Find the user matching `email` (case-insensitive) and `password` (exact)
pub fn authenticate<'a>(users: &'a [User], email: &str, password: &str) -> Option<&'a User> {
    let email = email.trim().to_lowercase();
    users
        .iter()
        .find(|u| u.email.trim().to_lowercase() == email && u.password == password)
}

/// Read the registered users from the store
pub fn fetch_users(store: &dyn DocumentStore) -> Result<Vec<User>, StoreError> {
    let value = store.get("users")?;
    let (records, _) = parse_collection::<User>(&value, "");
    Ok(records.into_iter().map(|(_, u)| u).collect())
}

/// Log in against the users stored remotely, then the locally signed-up ones
pub fn login(
    store: &dyn DocumentStore,
    local_users: &[User],
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let remote = fetch_users(store)?;
    if let Some(user) = authenticate(&remote, email, password) {
        tracing::info!(email = %user.email, "login");
        return Ok(user.clone());
    }
    if let Some(user) = authenticate(local_users, email, password) {
        tracing::info!(email = %user.email, "login (local signup)");
        return Ok(user.clone());
    }
    tracing::debug!(%email, "login rejected");
    Err(AuthError::InvalidCredentials)
}

/// Register a user in the transient in-memory list. Nothing is persisted.
pub fn signup(users: &mut Vec<User>, user: User) -> Result<(), AuthError> {
    let email = user.email.trim().to_lowercase();
    if users.iter().any(|u| u.email.trim().to_lowercase() == email) {
        return Err(AuthError::EmailTaken(user.email));
    }
    tracing::info!(email = %user.email, "signed up (not persisted)");
    users.push(user);
    Ok(())
}
