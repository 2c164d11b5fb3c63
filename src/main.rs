use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = rollcalld::run().await {
        eprintln!("rollcalld: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
