use std::fmt;

use serde::{Deserialize, Serialize};
use tower_sessions::{session::Error as SessionError, Session};

pub const USER: &str = "auth.user";
pub const FLASH: &str = "flash";
pub const CSRF: &str = "security.csrf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

/// Who is logged in. Username and role are stored together so they can't drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub user_role: Role,
}

pub async fn store_user(session: &Session, user: &SessionUser) -> Result<(), SessionError> {
    session.insert(USER, user).await
}

pub async fn clear_user(session: &Session) -> Result<Option<SessionUser>, SessionError> {
    session.remove::<SessionUser>(USER).await
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, SessionError> {
    session.get(USER).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "flash-success",
            FlashLevel::Info => "flash-info",
            FlashLevel::Error => "flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a notice for the next rendered page.
pub async fn flash(session: &Session, level: FlashLevel, message: impl Into<String>) -> Result<(), SessionError> {
    let mut flashes: Vec<Flash> = session.get(FLASH).await?.unwrap_or_default();
    flashes.push(Flash { level, message: message.into() });
    session.insert(FLASH, flashes).await
}

/// Drain queued notices. Each one is seen exactly once.
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, SessionError> {
    Ok(session.remove::<Vec<Flash>>(FLASH).await?.unwrap_or_default())
}
