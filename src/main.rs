#[tokio::main]
async fn main() -> asha::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("asha=info,reqwest=warn"),
    )
    .init();
    log::info!("Starting asha assistant");

    match asha::run().await {
        Ok(()) => {
            log::info!("Assistant shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Assistant encountered an error: {e}");
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}
