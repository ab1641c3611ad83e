#[tokio::main]
async fn main() -> anyhow::Result<()> {
    espartan_backend::run().await
}
