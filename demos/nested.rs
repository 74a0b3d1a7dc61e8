//! Nested and flattened sub-structs

use envfill::EnvFill;

#[derive(Debug, Default, EnvFill)]
struct ServerConfig {
    #[conf(key = "SERVER_HOST", default = "127.0.0.1")]
    pub host: String,

    #[conf(key = "SERVER_PORT", default = "8080")]
    pub port: u16,
}

#[derive(Debug, Default, EnvFill)]
struct DatabaseConfig {
    #[conf(key = "DATABASE_URL", required)]
    pub url: String,

    #[conf(key = "DATABASE_POOL_SIZE", default = "5")]
    pub pool_size: u32,
}

#[derive(Debug, Default, EnvFill)]
struct Config {
    #[conf(key = "APP_NAME", default = "demo")]
    pub name: String,

    // Error paths read "server.host" / "server.port"
    #[conf(nested)]
    pub server: ServerConfig,

    // Error paths read "url" / "pool_size", no extra segment
    #[conf(flatten)]
    pub database: DatabaseConfig,
}

fn main() -> anyhow::Result<()> {
    // First attempt: DATABASE_URL is missing, so the load fails with the
    // field's path and key in the message.
    std::env::remove_var("DATABASE_URL");
    let mut config = Config::default();
    if let Err(err) = envfill::load(&mut config) {
        println!("Load failed as expected:\n{err}\n");
    }

    // Second attempt with a complete environment.
    std::env::set_var("DATABASE_URL", "postgres://localhost/demo");
    std::env::set_var("SERVER_PORT", "3000");

    let mut config = Config::default();
    envfill::load(&mut config)?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.database.url);
    println!("  Pool Size: {}", config.database.pool_size);

    Ok(())
}
