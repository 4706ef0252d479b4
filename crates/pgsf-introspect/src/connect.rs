//! PostgreSQL connection acquisition.
//!
//! A connection is opened at phase entry and dropped at phase exit;
//! the driver's background `Connection` future is
//! spawned onto the current Tokio runtime and its task handle kept
//! alongside the client so callers can detect a connection drop.

use native_tls::TlsConnector;
use pgsf_core::config::{PostgresConfig, SslMode};
use postgres_native_tls::MakeTlsConnector;
use tokio::task::JoinHandle;
use tokio_postgres::Client;

use crate::error::{IntrospectError, IntrospectResult};

pub struct Connection {
    pub client: Client,
    driver: JoinHandle<()>,
}

impl Connection {
    /// Detach the background I/O driver task without waiting for it;
    /// dropping the client is enough to close the socket.
    pub fn close(self) {
        self.driver.abort();
    }
}

fn connect_string(cfg: &PostgresConfig) -> String {
    format!(
        "host={} port={} dbname={} user={} password={}",
        cfg.host, cfg.port, cfg.database, cfg.username, cfg.password
    )
}

/// Open a connection to the source database, honoring the requested
/// SSL mode. `disable`/`allow`/`prefer` connect in the clear;
/// `require`/`verify-ca`/`verify-full` negotiate TLS via
/// `postgres-native-tls`.
pub async fn connect(cfg: &PostgresConfig) -> IntrospectResult<Connection> {
    let conninfo = connect_string(cfg);
    let requires_tls = cfg
        .ssl
        .as_ref()
        .map(|ssl| {
            matches!(
                ssl.mode,
                SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull
            )
        })
        .unwrap_or(false);

    if requires_tls {
        let mut builder = TlsConnector::builder();
        if let Some(ssl) = &cfg.ssl {
            if matches!(ssl.mode, SslMode::Require) {
                // `require` negotiates TLS but skips certificate
                // verification, matching libpq's sslmode semantics.
                builder.danger_accept_invalid_certs(true);
            }
            if let Some(ca_path) = &ssl.ca {
                let pem = std::fs::read(ca_path).map_err(|e| {
                    IntrospectError::Tls(format!("failed to read CA cert {ca_path}: {e}"))
                })?;
                let cert = native_tls::Certificate::from_pem(&pem)
                    .map_err(|e| IntrospectError::Tls(format!("invalid CA cert: {e}")))?;
                builder.add_root_certificate(cert);
            }
        }
        let connector = builder
            .build()
            .map_err(|e| IntrospectError::Tls(e.to_string()))?;
        let tls = MakeTlsConnector::new(connector);
        let (client, connection) = tokio_postgres::connect(&conninfo, tls)
            .await
            .map_err(|source| IntrospectError::Connect {
                host: cfg.host.clone(),
                port: cfg.port,
                database: cfg.database.clone(),
                source,
            })?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("postgres connection driver error: {e}");
            }
        });
        Ok(Connection { client, driver })
    } else {
        let (client, connection) = tokio_postgres::connect(&conninfo, tokio_postgres::NoTls)
            .await
            .map_err(|source| IntrospectError::Connect {
                host: cfg.host.clone(),
                port: cfg.port,
                database: cfg.database.clone(),
                source,
            })?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("postgres connection driver error: {e}");
            }
        });
        Ok(Connection { client, driver })
    }
}
