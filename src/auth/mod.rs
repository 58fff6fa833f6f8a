mod login;
mod logout;

use axum::{routing::get, Router};

use crate::{session::{Role, SessionUser}, AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "123456";
pub const GUEST_PASSWORD: &str = "guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Wrong username or password. Please try again.")]
    InvalidCredentials,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/login_failed/{username}", get(login::login_failed))
        .route("/logout", get(logout::logout))
}

/// Flat credential check: the one admin pair, or any username with the guest password.
pub fn authenticate(username: &str, password: &str) -> Result<SessionUser, AuthError> {
    let user_role = if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
        Role::Admin
    } else if password == GUEST_PASSWORD {
        Role::Guest
    } else {
        return Err(AuthError::InvalidCredentials);
    };

    Ok(SessionUser { username: username.to_owned(), user_role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_pair_is_admin() {
        let user = authenticate("admin", "123456").unwrap();
        assert_eq!(user, SessionUser { username: "admin".to_owned(), user_role: Role::Admin });
    }

    #[test]
    fn guest_password_works_for_any_name() {
        for name in ["bob", "admin", "", "张三"] {
            let user = authenticate(name, "guest").unwrap();
            assert_eq!(user.user_role, Role::Guest);
            assert_eq!(user.username, name);
        }
    }

    #[test]
    fn everything_else_fails() {
        for (name, password) in [("admin", "654321"), ("bob", "123456"), ("bob", "Guest"), ("admin", ""), ("", "")] {
            assert_eq!(authenticate(name, password), Err(AuthError::InvalidCredentials));
        }
    }
}
