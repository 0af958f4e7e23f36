//! Server startup utilities.

use roster_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints where the server can be reached.
pub fn print_startup_info(server: &ServerConfig) {
    let base = format!("http://{}", server.addr());
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  {}/user/", base);
    info!("Health:    {}/health", base);
    info!("API Docs:  {}/swagger-ui", base);
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&ServerConfig::default());
    }
}
