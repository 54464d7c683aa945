//! Configuration module
//!
//! Settings are read from the process environment (optionally seeded from a `.env`
//! file) once at startup. Storage settings keep one profile per vendor; the
//! `STORAGE_PROVIDER` discriminant picks which profile is used.

use std::env;

use crate::error::AppError;
use crate::storage_types::StorageBackend;

const SERVER_HOST: &str = "0.0.0.0";
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 500;
const HTTP_CONCURRENCY_LIMIT: usize = 512;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MIN_JWT_SECRET_LEN: usize = 32;
const DEFAULT_PROVIDER: &str = "aws";
const AWS_REGION: &str = "us-east-1";
const DB_NAME: &str = "streaming_platform";
const LOCAL_STORAGE_PATH: &str = "./storage";
const LOCAL_STORAGE_BASE_URL: &str = "http://localhost:8080/files";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    /// Requests handled at once; further requests wait.
    pub concurrency_limit: usize,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

/// Credentials for the user created on first start when the users table is empty.
#[derive(Clone, Debug, Default)]
pub struct HostUserConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AwsConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, ...)
    pub endpoint: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct GcpConfig {
    pub project_id: Option<String>,
    pub bucket: String,
    pub credentials_file: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AzureConfig {
    pub account_name: String,
    pub account_key: Option<String>,
    pub container: String,
}

#[derive(Clone, Debug, Default)]
pub struct LocalConfig {
    pub base_path: String,
    pub base_url: String,
    pub signing_secret: String,
}

/// Storage settings for every vendor plus the provider discriminant.
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub provider: String,
    pub aws: AwsConfig,
    pub gcp: GcpConfig,
    pub azure: AzureConfig,
    pub local: LocalConfig,
}

/// The one vendor profile selected for this process.
#[derive(Clone, Debug)]
pub enum ProviderProfile {
    Aws(AwsConfig),
    Gcp(GcpConfig),
    Azure(AzureConfig),
    Local(LocalConfig),
}

impl ProviderProfile {
    pub fn backend(&self) -> StorageBackend {
        match self {
            ProviderProfile::Aws(_) => StorageBackend::Aws,
            ProviderProfile::Gcp(_) => StorageBackend::Gcp,
            ProviderProfile::Azure(_) => StorageBackend::Azure,
            ProviderProfile::Local(_) => StorageBackend::Local,
        }
    }
}

impl StorageConfig {
    /// Resolve the configured provider name into its vendor profile.
    ///
    /// Fails with [`AppError::Configuration`] for an unknown provider name or when
    /// the selected profile lacks its bucket/container identifier.
    pub fn profile(&self) -> Result<ProviderProfile, AppError> {
        let backend: StorageBackend = self.provider.parse()?;
        let missing = |var: &str| {
            AppError::Configuration(format!("{} must be set for the {} provider", var, backend))
        };

        match backend {
            StorageBackend::Aws => {
                if self.aws.bucket.is_empty() {
                    return Err(missing("AWS_BUCKET_NAME"));
                }
                Ok(ProviderProfile::Aws(self.aws.clone()))
            }
            StorageBackend::Gcp => {
                if self.gcp.bucket.is_empty() {
                    return Err(missing("GCP_BUCKET_NAME"));
                }
                Ok(ProviderProfile::Gcp(self.gcp.clone()))
            }
            StorageBackend::Azure => {
                if self.azure.account_name.is_empty() {
                    return Err(missing("AZURE_ACCOUNT_NAME"));
                }
                if self.azure.container.is_empty() {
                    return Err(missing("AZURE_CONTAINER_NAME"));
                }
                Ok(ProviderProfile::Azure(self.azure.clone()))
            }
            StorageBackend::Local => Ok(ProviderProfile::Local(self.local.clone())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub host_user: HostUserConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn inner(&self) -> &AppConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn is_development(&self) -> bool {
        matches!(
            self.inner().server.environment.to_lowercase().as_str(),
            "development" | "dev"
        )
    }

    pub fn server_host(&self) -> &str {
        &self.inner().server.host
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server.port
    }

    pub fn environment(&self) -> &str {
        &self.inner().server.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().server.cors_origins
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().server.max_upload_size_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().server.concurrency_limit
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database.url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().database.max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().database.timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().auth.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.inner().auth.jwt_expiry_hours
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.inner().storage
    }

    pub fn host_user(&self) -> &HostUserConfig {
        &self.inner().host_user
    }
}

/// Non-empty environment variable.
fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn database_url_from_parts() -> String {
    let host = env_opt("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = env_opt("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = env_opt("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let password = env_opt("DB_PASSWORD").unwrap_or_default();
    let name = env_opt("DB_NAME").unwrap_or_else(|| DB_NAME.to_string());
    let sslmode = env_opt("DB_SSLMODE").unwrap_or_else(|| "disable".to_string());

    format!(
        "postgresql://{}:{}@{}:{}/{}?sslmode={}",
        user, password, host, port, name, sslmode
    )
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            environment,
            cors_origins,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
        };

        let database = DatabaseConfig {
            url: env_opt("DATABASE_URL").unwrap_or_else(database_url_from_parts),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
        };

        let jwt_secret = env_opt("JWT_SECRET")
            .or_else(|| env_opt("JWT_SECRET_KEY"))
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?;

        let auth = AuthConfig {
            jwt_secret: jwt_secret.clone(),
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
        };

        let storage = StorageConfig {
            provider: env::var("STORAGE_PROVIDER").unwrap_or_else(|_| DEFAULT_PROVIDER.to_string()),
            aws: AwsConfig {
                access_key_id: env_opt("AWS_ACCESS_KEY_ID"),
                secret_access_key: env_opt("AWS_SECRET_ACCESS_KEY"),
                region: env_opt("AWS_REGION").unwrap_or_else(|| AWS_REGION.to_string()),
                bucket: env_opt("AWS_BUCKET_NAME").unwrap_or_default(),
                endpoint: env_opt("AWS_ENDPOINT_URL"),
            },
            gcp: GcpConfig {
                project_id: env_opt("GCP_PROJECT_ID"),
                bucket: env_opt("GCP_BUCKET_NAME").unwrap_or_default(),
                credentials_file: env_opt("GCP_CREDENTIALS_FILE"),
            },
            azure: AzureConfig {
                account_name: env_opt("AZURE_ACCOUNT_NAME").unwrap_or_default(),
                account_key: env_opt("AZURE_ACCOUNT_KEY"),
                container: env_opt("AZURE_CONTAINER_NAME").unwrap_or_default(),
            },
            local: LocalConfig {
                base_path: env_opt("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|| LOCAL_STORAGE_PATH.to_string()),
                base_url: env_opt("LOCAL_STORAGE_BASE_URL")
                    .unwrap_or_else(|| LOCAL_STORAGE_BASE_URL.to_string()),
                signing_secret: jwt_secret,
            },
        };

        let host_user = HostUserConfig {
            username: env_opt("HOST_USERNAME"),
            password: env_opt("HOST_PASSWORD"),
            email: env_opt("HOST_EMAIL"),
        };

        let config = AppConfig {
            server,
            database,
            auth,
            storage,
            host_user,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let is_development = matches!(
            self.server.environment.to_lowercase().as_str(),
            "development" | "dev"
        );

        if !is_development && self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !self.database.url.starts_with("postgres://")
            && !self.database.url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.host_user.username.is_some() != self.host_user.password.is_some() {
            return Err(anyhow::anyhow!(
                "HOST_USERNAME and HOST_PASSWORD must be set together"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(provider: &str) -> StorageConfig {
        StorageConfig {
            provider: provider.to_string(),
            aws: AwsConfig {
                region: "eu-west-1".to_string(),
                bucket: "media-bucket".to_string(),
                ..Default::default()
            },
            gcp: GcpConfig {
                bucket: "gcs-bucket".to_string(),
                ..Default::default()
            },
            azure: AzureConfig {
                account_name: "account".to_string(),
                container: "media".to_string(),
                ..Default::default()
            },
            local: LocalConfig {
                base_path: "/tmp/streamhub".to_string(),
                base_url: "http://localhost:8080/files".to_string(),
                signing_secret: "secret".to_string(),
            },
        }
    }

    fn app_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: SERVER_HOST.to_string(),
                port: SERVER_PORT,
                environment: "production".to_string(),
                cors_origins: vec!["*".to_string()],
                max_upload_size_bytes: 1024,
                concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            },
            database: DatabaseConfig {
                url: "postgresql://postgres@localhost/streamhub".to_string(),
                max_connections: MAX_CONNECTIONS,
                timeout_seconds: CONNECTION_TIMEOUT_SECS,
            },
            auth: AuthConfig {
                jwt_secret: "x".repeat(MIN_JWT_SECRET_LEN),
                jwt_expiry_hours: JWT_EXPIRY_HOURS,
            },
            storage: storage("aws"),
            host_user: HostUserConfig::default(),
        }
    }

    #[test]
    fn profile_selects_exactly_the_named_vendor() {
        assert!(matches!(storage("aws").profile().unwrap(), ProviderProfile::Aws(c) if c.bucket == "media-bucket"));
        assert!(matches!(storage("GCP").profile().unwrap(), ProviderProfile::Gcp(c) if c.bucket == "gcs-bucket"));
        assert!(matches!(storage("azure").profile().unwrap(), ProviderProfile::Azure(c) if c.container == "media"));
        assert_eq!(storage("local").profile().unwrap().backend(), StorageBackend::Local);
    }

    #[test]
    fn profile_rejects_unknown_provider() {
        let err = storage("ftp").profile().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn profile_rejects_missing_bucket() {
        let mut cfg = storage("aws");
        cfg.aws.bucket.clear();
        let err = cfg.profile().unwrap_err();
        assert!(err.to_string().contains("AWS_BUCKET_NAME"));
    }

    #[test]
    fn validate_requires_long_secret_outside_development() {
        let mut cfg = app_config();
        assert!(cfg.validate().is_ok());

        cfg.auth.jwt_secret = "short".to_string();
        assert!(cfg.validate().is_err());

        cfg.server.environment = "development".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_requires_host_credentials_together() {
        let mut cfg = app_config();
        cfg.host_user.username = Some("host".to_string());
        assert!(cfg.validate().is_err());

        cfg.host_user.password = Some("hunter22".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let mut cfg = app_config();
        cfg.database.url = "mysql://localhost/db".to_string();
        assert!(cfg.validate().is_err());
    }
}
