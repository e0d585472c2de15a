#[tokio::main]
async fn main() {
    if let Err(e) = triage_lib::run().await {
        tracing::error!("{e}");
        eprintln!("triage-service: {e}");
        std::process::exit(1);
    }
}
