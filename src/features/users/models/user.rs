use sqlx::FromRow;

/// Database model for a user account
///
/// Columns are nullable in the schema, rows created through the API always fill them.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.unwrap_or(false)
    }

    pub fn display_name(&self) -> &str {
        self.fullname.as_deref().unwrap_or("")
    }

    pub fn email_address(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// Data for creating a new user
#[derive(Debug)]
pub struct CreateUser {
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
}

/// Row returned by the user search
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub fullname: Option<String>,
}
