use subtle::ConstantTimeEq;
use tower_sessions::{session::Error as SessionError, Session};

use crate::session::CSRF;

pub const CSRF_REJECTED: &str = "The form has expired or is invalid. Please submit it again.";

/// The session's token, created on first use.
pub async fn ensure_csrf_token(session: &Session) -> Result<String, SessionError> {
    if let Some(token) = session.get::<String>(CSRF).await? {
        return Ok(token);
    }

    let token = nanoid::nanoid!(64);
    session.insert(CSRF, &token).await?;
    Ok(token)
}

/// A session without a token accepts nothing.
pub async fn validate_csrf_token(session: &Session, provided: &str) -> Result<bool, SessionError> {
    let Some(expected) = session.get::<String>(CSRF).await? else {
        return Ok(false);
    };

    Ok(expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn token_is_stable_per_session() {
        let session = session();
        let token = ensure_csrf_token(&session).await.unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(ensure_csrf_token(&session).await.unwrap(), token);
        assert_ne!(ensure_csrf_token(&self::session()).await.unwrap(), token);
    }

    #[tokio::test]
    async fn only_the_issued_token_validates() {
        let session = session();
        let token = ensure_csrf_token(&session).await.unwrap();
        assert!(validate_csrf_token(&session, &token).await.unwrap());
        assert!(!validate_csrf_token(&session, "").await.unwrap());
        assert!(!validate_csrf_token(&session, &token[1..]).await.unwrap());
        assert!(!validate_csrf_token(&session, &"x".repeat(64)).await.unwrap());
    }

    #[tokio::test]
    async fn session_without_token_rejects_everything() {
        let session = session();
        assert!(!validate_csrf_token(&session, "").await.unwrap());
        assert!(!validate_csrf_token(&session, "anything").await.unwrap());
    }
}
