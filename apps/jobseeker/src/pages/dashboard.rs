use std::fmt;

use crate::errors::ApiError;
use crate::models::User;
use crate::session::Session;

/// Landing page greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub greeting: String,
    pub subtitle: &'static str,
}

impl Dashboard {
    pub fn for_user(user: &User) -> Self {
        Self {
            greeting: format!("Hi, {}", user.display_name()),
            subtitle: "Welcome back, nice to see you again!",
        }
    }

    pub async fn load(session: &Session) -> Result<Self, ApiError> {
        Ok(Self::for_user(&session.current_user().await?))
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.greeting)?;
        write!(f, "{}", self.subtitle)
    }
}
