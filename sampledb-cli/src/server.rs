use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sampledb_server::config::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use sampledb_server::{DatabaseConfig, ServerConfig};

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, env = "SAMPLEDB_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "SAMPLEDB_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Allow any CORS origin instead of localhost only
    #[arg(long, env = "SAMPLEDB_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Database server host
    #[arg(long, env = "SAMPLEDB_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database server port
    #[arg(long, env = "SAMPLEDB_DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "SAMPLEDB_DB_USER", default_value = "root")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "SAMPLEDB_DB_PASSWORD", default_value = "root", hide_env_values = true)]
    pub db_password: String,

    /// Schema name
    #[arg(long, env = "SAMPLEDB_DB_NAME", default_value = "sample")]
    pub db_name: String,

    /// Maximum concurrently open database connections
    #[arg(long, env = "SAMPLEDB_DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub db_max_connections: u32,

    /// Seconds a request waits for a free connection
    #[arg(
        long,
        env = "SAMPLEDB_DB_ACQUIRE_TIMEOUT",
        default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs()
    )]
    pub db_acquire_timeout: u64,
}

impl ServeArgs {
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
        }
    }
}

pub async fn run_server(args: ServeArgs) -> Result<()> {
    let database = args.database_config();
    let server = args.server_config();

    tracing::info!(
        bind_addr = %server.bind_addr,
        db_host = %database.host,
        db_name = %database.database,
        max_connections = database.max_connections,
        "starting sampledb server"
    );
    sampledb_server::serve(database, server).await?;
    tracing::info!("sampledb server stopped");
    Ok(())
}

/// Print the resolved configuration with the password redacted.
pub fn print_config(args: &ServeArgs) {
    let db = args.database_config();
    let server = args.server_config();

    println!("bind_addr          = {}", server.bind_addr);
    println!("cors_permissive    = {}", server.cors_permissive);
    println!("db_host            = {}", db.host);
    println!("db_port            = {}", db.port);
    println!("db_user            = {}", db.user);
    println!("db_password        = ********");
    println!("db_name            = {}", db.database);
    println!("db_max_connections = {}", db.max_connections);
    println!("db_acquire_timeout = {}s", db.acquire_timeout.as_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_configs() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--port",
            "8080",
            "--db-host",
            "db.internal",
            "--db-max-connections",
            "2",
        ])
        .unwrap();

        let server = args.server_config();
        assert_eq!(server.bind_addr.port(), 8080);

        let db = args.database_config();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.max_connections, 2);
        assert_eq!(db.database, "sample");
    }
}
