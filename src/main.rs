use jetton_minter::cli::Cli;
use jetton_minter::utils::init_logger;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger()?;
    let cli = Cli::parse_args();
    cli.execute().await?;
    Ok(())
}
