use kisan::cli;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::main().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
