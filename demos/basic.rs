//! Basic usage example

use envfill::EnvFill;
use std::time::Duration;

#[derive(Debug, Default, EnvFill)]
struct Config {
    // Required field: the load fails unless DATABASE_URL is set
    #[conf(key = "DATABASE_URL", required)]
    pub database_url: String,

    // With default value
    #[conf(key = "SERVER_ADDR", default = "127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[conf(key = "MAX_CONNECTIONS", default = "10")]
    pub max_connections: u32,

    // Boolean type
    #[conf(key = "DEBUG_MODE", default = "false")]
    pub debug_mode: bool,

    // Duration from a unit-suffixed string
    #[conf(key = "REQUEST_TIMEOUT", default = "30s")]
    pub request_timeout: Duration,

    // Comma-separated list
    #[conf(key = "ALLOWED_ORIGINS", default = "localhost, 127.0.0.1")]
    pub allowed_origins: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");
    std::env::set_var("REQUEST_TIMEOUT", "1m30s");

    // Load configuration
    let mut config = Config::default();
    envfill::load(&mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Request Timeout: {:?}", config.request_timeout);
    println!("  Allowed Origins: {:?}", config.allowed_origins);

    Ok(())
}
