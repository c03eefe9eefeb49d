//! depbundle - bundles a Python script's third-party dependencies into the script.
//!
//! Exits non-zero when no script is given, the entry script is missing, or the
//! scripts fail to evaluate.

use depbundle::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging; resolution warnings show unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
