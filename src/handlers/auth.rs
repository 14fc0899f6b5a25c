// src/handlers/auth.rs
// DOCUMENTATION: Moderator authentication for curating endpoints
// PURPOSE: Resolve X-Admin-Token / X-User-Id headers into a moderation permission

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::CatalogError;
use actix_web::HttpRequest;
use sqlx::PgPool;
use uuid::Uuid;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";
pub const USER_ID_HEADER: &str = "X-User-Id";

/// What the request claims to be
#[derive(Debug, PartialEq, Eq)]
pub enum Credentials {
    AdminToken(String),
    User(Uuid),
    Anonymous,
}

impl Credentials {
    /// Read credentials from headers; the admin token takes precedence
    pub fn from_request(req: &HttpRequest) -> Result<Self, CatalogError> {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        if let Some(token) = header(ADMIN_TOKEN_HEADER) {
            return Ok(Credentials::AdminToken(token.to_string()));
        }

        match header(USER_ID_HEADER) {
            Some(raw) => Uuid::parse_str(raw).map(Credentials::User).map_err(|_| {
                log::warn!("Malformed {} header: {}", USER_ID_HEADER, raw);
                CatalogError::Unauthorized
            }),
            None => Ok(Credentials::Anonymous),
        }
    }
}

/// Require a moderator (or the configured admin token)
pub async fn verify_moderator(
    req: &HttpRequest,
    pool: &PgPool,
    config: &Config,
) -> Result<(), CatalogError> {
    match Credentials::from_request(req)? {
        Credentials::AdminToken(token) => {
            if config.admin_token.is_empty() || token != config.admin_token {
                log::warn!("Moderation request with invalid admin token");
                return Err(CatalogError::Forbidden);
            }
            Ok(())
        }
        Credentials::User(user_id) => {
            let user = match UserRepository::get_by_id(pool, user_id).await {
                Ok(user) => user,
                Err(CatalogError::NotFound(_)) => return Err(CatalogError::Unauthorized),
                Err(e) => return Err(e),
            };

            if !user.moderator {
                log::warn!("User {} is not a moderator", user.id);
                return Err(CatalogError::Forbidden);
            }
            Ok(())
        }
        Credentials::Anonymous => {
            log::warn!("Moderation request without credentials");
            Err(CatalogError::Unauthorized)
        }
    }
}

/// Require the given user themselves, or a moderator
pub async fn verify_user_or_moderator(
    req: &HttpRequest,
    pool: &PgPool,
    config: &Config,
    user_id: Uuid,
) -> Result<(), CatalogError> {
    if Credentials::from_request(req)? == Credentials::User(user_id) {
        return Ok(());
    }
    verify_moderator(req, pool, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_admin_token_wins_over_user() {
        let req = TestRequest::default()
            .insert_header((ADMIN_TOKEN_HEADER, "secret"))
            .insert_header((USER_ID_HEADER, Uuid::nil().to_string()))
            .to_http_request();

        assert_eq!(
            Credentials::from_request(&req).unwrap(),
            Credentials::AdminToken("secret".to_string())
        );
    }

    #[test]
    fn test_user_header_parsed() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        assert_eq!(Credentials::from_request(&req).unwrap(), Credentials::User(id));
    }

    #[test]
    fn test_missing_and_malformed_headers() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(
            Credentials::from_request(&req).unwrap(),
            Credentials::Anonymous
        );

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        assert!(matches!(
            Credentials::from_request(&req),
            Err(CatalogError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_admin_token_checked_against_config() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap();
        let mut config = Config::from_lookup(|_| None);
        config.admin_token = "secret".to_string();

        let good = TestRequest::default()
            .insert_header((ADMIN_TOKEN_HEADER, "secret"))
            .to_http_request();
        tokio_test::assert_ok!(verify_moderator(&good, &pool, &config).await);

        let bad = TestRequest::default()
            .insert_header((ADMIN_TOKEN_HEADER, "guess"))
            .to_http_request();
        assert!(matches!(
            verify_moderator(&bad, &pool, &config).await,
            Err(CatalogError::Forbidden)
        ));

        // An unset token never matches
        config.admin_token.clear();
        assert!(matches!(
            verify_moderator(&good, &pool, &config).await,
            Err(CatalogError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_user_acting_for_themselves_skips_the_lookup() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap();
        let config = Config::from_lookup(|_| None);
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        tokio_test::assert_ok!(verify_user_or_moderator(&req, &pool, &config, id).await);

        let anonymous = TestRequest::default().to_http_request();
        assert!(matches!(
            verify_user_or_moderator(&anonymous, &pool, &config, id).await,
            Err(CatalogError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap();
        let config = Config::from_lookup(|_| None);
        let req = TestRequest::default().to_http_request();

        assert!(matches!(
            verify_moderator(&req, &pool, &config).await,
            Err(CatalogError::Unauthorized)
        ));
    }
}
