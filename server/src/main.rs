#[tokio::main]
async fn main() {
    if let Err(e) = server::runner::run().await {
        eprintln!("Fatal: {e}");
        std::process::exit(1);
    }
}
