use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Delegate to the page session entry point; it logs its own failures.
    match wedding_invite::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
