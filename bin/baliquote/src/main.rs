#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    baliquote::run().await
}
