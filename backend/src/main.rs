//! Job Application Agent - Main Entry Point
//!
//! Starts the local server for the application page.

use job_application_agent::{api::run_server, AgentConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Job Application Agent                        ║");
    println!("║   Upload → Review → Submit                     ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();

    let config = AgentConfig::from_env();
    run_server(&config).await
}
