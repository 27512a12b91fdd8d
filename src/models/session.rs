use log::info;

/// The logged-in user. Only `Database::authenticate` creates one, and
/// `logout` consumes it, so a session can't be reused after logging out.
#[derive(Debug, PartialEq, Eq)]
pub struct Session {
    user_id: i64,
    username: String,
}

impl Session {
    pub(crate) fn new(user_id: i64, username: String) -> Self {
        Self { user_id, username }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn logout(self) {
        info!("event=logout module=session status=ok user_id={}", self.user_id);
    }
}
