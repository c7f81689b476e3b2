#[tokio::main]
async fn main() -> anyhow::Result<()> {
    estudos_backend::run().await
}
