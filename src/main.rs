//! yarn_release - release preparation and registry authentication checks for
//! yarn-managed packages.

use std::process;

use yarn_release::cli;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Fatal error: {e}");

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                eprintln!("\nRecovery suggestions:");
                for suggestion in suggestions {
                    eprintln!("  - {suggestion}");
                }
            }

            process::exit(1);
        }
    }
}
