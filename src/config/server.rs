use error_stack::{Report, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use validator::{extras::validate_url, Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize)]
pub struct Server {
    pub db: super::Database,
    pub auth: super::Auth,
    pub email: Option<super::Email>,
    /// Address the HTTP server binds to.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variables**:
    /// - `HUDDLE_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Externally reachable base URL, embedded into the links sent
    /// out in verification emails.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_PUBLIC_URL`
    #[serde(default = "Server::default_public_url")]
    pub public_url: String,
}

impl Server {
    pub fn load() -> error_stack::Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Validate for Server {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();

        if let Err(error) = self.db.validate() {
            fields.insert("db", error);
        }
        if let Err(error) = self.auth.validate() {
            fields.insert("auth", error);
        }
        if let Err(error) = self.email.validate() {
            fields.insert("email", error);
        }

        fields.insert("public_url", {
            let mut error = ValidateError::msg_builder();
            if !validate_url(&self.public_url) {
                error.insert("Invalid public URL");
            }
            error.build()
        });

        fields.build().into_result()
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &str = "huddle.yml";

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        3000
    }

    fn default_public_url() -> String {
        "http://localhost:3000".to_string()
    }

    /// Creates a default [`Figment`](figment::Figment) object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Yaml},
            Figment,
        };

        Figment::new()
            .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
            // One big con about figment (env provider to be specific) especially
            // these fields with underscore in it.
            .merge(Env::prefixed("HUDDLE_").map(|v| match v.as_str() {
                "AUTH_JWT_SECRET" => "auth.jwt_secret".into(),
                "AUTH_TOKEN_TTL_SECS" => "auth.token_ttl_secs".into(),

                "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

                "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
                "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

                "EMAIL_SMTP_RELAY" => "email.smtp_relay".into(),
                "EMAIL_FROM_ADDRESS" => "email.from_address".into(),

                "PUBLIC_URL" => "public_url".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "DATABASE_URL" => "db.primary.url".into(),
                _ => v.into(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::{NonZeroU32, NonZeroU64};

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/huddle");
            jail.set_env("HUDDLE_AUTH_JWT_SECRET", "a-very-long-signing-secret");
            jail.set_env("HUDDLE_AUTH_TOKEN_TTL_SECS", "120");

            jail.set_env("HUDDLE_DB_PRIMARY_MIN_IDLE", "100");
            jail.set_env("HUDDLE_DB_PRIMARY_POOL_SIZE", "100");

            jail.set_env("HUDDLE_DB_REPLICA_URL", "postgres://replica/huddle");
            jail.set_env("HUDDLE_DB_REPLICA_MIN_IDLE", "589");
            jail.set_env("HUDDLE_DB_REPLICA_POOL_SIZE", "589");

            jail.set_env("HUDDLE_DB_ENFORCE_TLS", "false");
            jail.set_env("HUDDLE_DB_TIMEOUT_SECS", "3030");

            jail.set_env("HUDDLE_PORT", "8080");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.db.primary.url.as_str(), "postgres://localhost/huddle");
            assert_eq!(
                config.db.primary.min_idle.unwrap(),
                NonZeroU32::new(100).unwrap()
            );
            assert_eq!(config.db.primary.pool_size, NonZeroU32::new(100).unwrap());
            assert_eq!(
                config.db.replica.as_ref().unwrap().min_idle.unwrap(),
                NonZeroU32::new(589).unwrap()
            );
            assert_eq!(
                config.db.replica.as_ref().unwrap().pool_size,
                NonZeroU32::new(589).unwrap()
            );

            assert_eq!(config.db.enforce_tls, false);
            assert_eq!(config.db.timeout_secs, NonZeroU64::new(3030).unwrap());

            assert_eq!(config.auth.jwt_secret.as_str(), "a-very-long-signing-secret");
            assert_eq!(config.auth.token_ttl_secs, NonZeroU64::new(120).unwrap());

            assert_eq!(config.port, 8080);
            assert!(config.email.is_none());

            Ok(())
        });
    }

    #[test]
    fn rejects_short_jwt_secrets() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/huddle");
            jail.set_env("HUDDLE_AUTH_JWT_SECRET", "short");

            let config: Server = Server::figment().extract()?;
            assert!(config.validate().is_err());

            Ok(())
        });
    }
}
