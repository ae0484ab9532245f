#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mytribe::bootstrap::run_app().await
}
