//! Walking a config's fields without loading anything
//!
//! The same traversal that drives loading can be used directly, for
//! example to print which environment variables a service reads.

use envfill::EnvFill;
use std::time::Duration;

#[derive(Debug, Default, EnvFill)]
struct ServerConfig {
    #[conf(key = "SERVER_HOST", default = "127.0.0.1")]
    pub host: String,

    #[conf(key = "SERVER_PORT", default = "8080")]
    pub port: u16,
}

#[derive(Debug, Default, EnvFill)]
struct Config {
    #[conf(key = "APP_NAME", required)]
    pub name: String,

    #[conf(key = "SHUTDOWN_GRACE", default = "10s")]
    pub shutdown_grace: Duration,

    #[conf(nested)]
    pub server: ServerConfig,
}

fn main() -> anyhow::Result<()> {
    let mut config = Config::default();

    println!("{:<16} {:<20} {:<10} {}", "VARIABLE", "FIELD", "REQUIRED", "DEFAULT");
    config.walk_fields("", &mut |field| {
        println!(
            "{:<16} {:<20} {:<10} {}",
            field.key(),
            field.path(),
            field.required(),
            field.default_value().unwrap_or("-"),
        );
        Ok(())
    })?;

    Ok(())
}
