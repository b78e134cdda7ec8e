#[tokio::main]
async fn main() {
    let code = gamedeck_cli::run().await;
    if code != 0 {
        std::process::exit(code);
    }
}
