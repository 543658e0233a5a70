//! Login session for one interactive run.

use tracing::info;

use crate::model::User;

/// The authenticated user of one CLI session.
///
/// Created empty, filled on login, cleared on logout, and passed by
/// reference to whatever needs to know who is acting. Deliberately not a
/// process-wide static: the session's lifetime is the loop that owns it.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the session for `user`.
    pub fn login(&mut self, user: User) {
        info!(user_id = %user.id, "Session opened");
        self.current = Some(user);
    }

    /// Closes the session if one is open.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, "Session closed");
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }
}
