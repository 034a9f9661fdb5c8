use serde::Serialize;

/// One account record in the user directory.
///
/// `active` is the only field that changes after provisioning
/// (`user --lock` / `user --unlock`). The password is compared as a plain
/// case-sensitive string; there is no hashing anywhere in this tool.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,   // ⇔ users.username (TEXT UNIQUE)
    pub password: String,   // ⇔ users.password (TEXT, plaintext)
    pub email: String,      // ⇔ users.email (TEXT, default '')
    pub full_name: String,  // ⇔ users.full_name (TEXT, default '')
    pub active: bool,       // ⇔ users.active (INT 0/1)
    pub created_at: String, // ⇔ users.created_at (TEXT, ISO8601)
}

impl User {
    pub fn is_locked(&self) -> bool {
        !self.active
    }
}
