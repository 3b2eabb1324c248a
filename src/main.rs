#[tokio::main]
async fn main() {
    if let Err(e) = healthrisk::run().await {
        tracing::error!("Fatal: {e}");
        eprintln!("healthrisk: {e}");
        std::process::exit(1);
    }
}
