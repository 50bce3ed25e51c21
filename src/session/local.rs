use super::{AuthError, AuthProvider, Identity};
use crate::favorites::StorageBackend;
use tracing::warn;

const LOGGED_IN_KEY: &str = "isLoggedIn";
const USER_KEY: &str = "user";

/// Device-local sign-in that remembers the user in a storage backend.
///
/// Credentials are only checked for shape: a plausible email address and a
/// non-empty password. The session survives restarts through the
/// `isLoggedIn` and `user` storage slots.
pub struct LocalAuthProvider<B> {
    storage: B,
}

impl<B: StorageBackend> LocalAuthProvider<B> {
    pub fn new(storage: B) -> Self {
        LocalAuthProvider { storage }
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.storage.remove(LOGGED_IN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }
}

fn validate(email: &str, password: &str) -> Result<(), AuthError> {
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };
    if !valid_email {
        return Err(AuthError::InvalidCredentials(
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidCredentials(
            "Please enter a password".to_string(),
        ));
    }
    Ok(())
}

impl<B: StorageBackend> AuthProvider for LocalAuthProvider<B> {
    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = email.trim();
        validate(email, password)?;

        let identity = Identity {
            email: email.to_string(),
        };
        self.storage
            .write(USER_KEY, &serde_json::to_string(&identity)?)?;
        self.storage.write(LOGGED_IN_KEY, "true")?;
        Ok(identity)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.clear()
    }

    fn restore(&self) -> Option<Identity> {
        let logged_in = match self.storage.read(LOGGED_IN_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Failed to read session flag");
                return None;
            }
        };
        if !logged_in {
            return None;
        }

        let user = match self.storage.read(USER_KEY) {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };
        match serde_json::from_str::<Identity>(&user) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Discarding invalid stored session");
                if let Err(e) = self.clear() {
                    warn!(error = %e, "Failed to clear invalid session");
                }
                None
            }
        }
    }
}
