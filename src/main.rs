#[tokio::main]
async fn main() {
    if let Err(e) = movie_credits_loader::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
