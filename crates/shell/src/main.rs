use cataloger_entry::FormConfig;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cataloger_observability::init();

    let config = FormConfig::from_env();
    tracing::info!(?config, "starting item entry shell");

    let items = cataloger_shell::run(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), config).await?;
    tracing::info!(items = items.len(), "shell finished");
    Ok(())
}
