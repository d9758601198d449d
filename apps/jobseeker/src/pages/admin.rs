//! User management table.
//!
//! The backend only exposes `/users/me` to this client, so the listing has a
//! single row.

use std::fmt;

use crate::errors::ApiError;
use crate::models::User;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub full_name: String,
    pub is_you: bool,
    pub email: String,
    pub role: &'static str,
    pub status: &'static str,
}

impl MemberRow {
    pub fn new(user: &User, current_user_id: Option<i64>) -> Self {
        let full_name = user
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "N/A".to_string());
        // status follows is_superuser, matching the web admin page
        let (role, status) = if user.is_superuser {
            ("Superuser", "Active")
        } else {
            ("User", "Inactive")
        };
        Self {
            full_name,
            is_you: current_user_id == Some(user.id),
            email: user.username.clone(),
            role,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminListing {
    pub members: Vec<MemberRow>,
}

impl AdminListing {
    /// Reads `/users/me` directly and marks the row matching the cached current user.
    pub async fn load(session: &Session) -> Result<Self, ApiError> {
        let current_id = session.cached_user().map(|u| u.id);
        let user = session.api.read_user_me().await?;
        Ok(Self {
            members: vec![MemberRow::new(&user, current_id)],
        })
    }
}

impl fmt::Display for AdminListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:<32} {:<10} {:<8}", "Full name", "Email", "Role", "Status")?;
        for row in &self.members {
            let name = if row.is_you {
                format!("{} (You)", row.full_name)
            } else {
                row.full_name.clone()
            };
            writeln!(f, "{:<24} {:<32} {:<10} {:<8}", name, row.email, row.role, row.status)?;
        }
        Ok(())
    }
}
