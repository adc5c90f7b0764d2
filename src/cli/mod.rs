use clap::{Args, Parser, Subcommand};
use crate::client::ToncenterClient;
use crate::config::{ClientParams, MinterDefaults};
use crate::jetton::*;
use crate::models::JettonMetadata;
use crate::provider::TransferLinkSender;
use crate::tvm::{Address, ArcCell, base64_to_boc, hex_to_boc};
use crate::utils::{format_units, from_nano, to_nano};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// jetton-minter CLI
#[derive(Parser, Debug)]
#[command(name = "jetton-minter")]
#[command(about = "Build and query jetton minter messages", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub network: NetworkArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// toncenter API key
    #[arg(long, global = true, env = "TONCENTER_API_KEY")]
    pub api_key: Option<String>,
    /// toncenter v3 base url
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Use testnet endpoints and test-only address flags
    #[arg(long, global = true)]
    pub testnet: bool,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "5")]
    pub timeout: u64,
    /// TON attached to minter messages that pass no --forward
    #[arg(long, global = true, env = "JETTON_FORWARD_TON")]
    pub default_forward: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the minter state init and print a deploy link
    Init {
        /// Minter code BoC file
        #[arg(long)]
        minter_code: PathBuf,
        /// Jetton wallet code BoC file
        #[arg(long)]
        wallet_code: PathBuf,
        /// TON attached to the deploy message
        #[arg(long, default_value = "0.05")]
        value: String,
    },
    /// Mint jettons to an address
    Mint {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(long)]
        to: String,
        /// Jetton amount in base units
        #[arg(short = 'a', long)]
        amount: String,
        /// TON attached to the message, 0.05 when omitted
        #[arg(long)]
        forward: Option<String>,
    },
    /// Report burned jettons to the minter
    BurnNotification {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(long)]
        from: String,
        #[arg(short = 'a', long)]
        amount: String,
        #[arg(long, default_value = "0")]
        query_id: u64,
        #[arg(long)]
        forward: Option<String>,
    },
    /// Hand minter administration to another address
    ChangeAdmin {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(long)]
        new_admin: String,
        #[arg(long)]
        forward: Option<String>,
    },
    /// Send a transfer notification through the minter
    Notify {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(long)]
        from: String,
        #[arg(short = 'a', long)]
        amount: String,
        /// Must be an address
        #[arg(long)]
        comment: String,
        #[arg(long)]
        forward: Option<String>,
    },
    /// Query get_jetton_data
    JettonData {
        #[arg(short = 'm', long)]
        minter: String,
    },
    /// Query get_wallet_address for an owner
    WalletAddress {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(short = 'o', long)]
        owner: String,
    },
    /// Compute an owner's jetton wallet address offline
    DeriveWalletAddress {
        #[arg(short = 'm', long)]
        minter: String,
        #[arg(short = 'o', long)]
        owner: String,
        /// Jetton wallet code BoC file
        #[arg(long)]
        wallet_code: PathBuf,
    },
    /// Print the built-in metadata document and content cell
    Metadata,
    /// Decode a minter message body given as base64 or hex BoC
    DecodeBody {
        body: String,
    },
}

fn parse_address(s: &str) -> Result<Address> {
    let address = s
        .parse::<Address>()
        .map_err(EncodeError::from)
        .with_context(|| format!("bad address {s:?}"))?;
    Ok(address)
}

fn parse_body(s: &str) -> Result<ArcCell> {
    hex_to_boc(s)
        .or_else(|_| base64_to_boc(s))
        .context("body is neither hex nor base64 BoC")
}

fn parse_forward(forward: &Option<String>) -> Result<Option<u128>> {
    Ok(forward.as_deref().map(to_nano).transpose()?)
}

/// Jetton amount carried by a body, in whole tokens
fn jetton_amount(message: &MinterMessage) -> Option<String> {
    match message {
        MinterMessage::Mint { amount, .. }
        | MinterMessage::BurnNotification { amount, .. }
        | MinterMessage::Notify { amount, .. } => Some(format_units(*amount, JETTON_DECIMALS)),
        MinterMessage::ChangeAdmin { .. } => None,
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn client_params(&self) -> ClientParams {
        ClientParams {
            timeout: self.network.timeout,
            api_key: self.network.api_key.clone(),
            base_url: self.network.base_url.clone(),
            testnet: self.network.testnet,
        }
    }

    fn create_client(&self) -> Result<ToncenterClient> {
        let params = self.client_params();
        log::debug!("using toncenter at {}", params.base_url());
        Ok(ToncenterClient::new(Some(params))?)
    }

    pub fn minter_defaults(&self) -> Result<MinterDefaults> {
        let mut defaults = MinterDefaults::default();
        if let Some(forward) = &self.network.default_forward {
            defaults.forward_ton = to_nano(forward)?;
        }
        Ok(defaults)
    }

    fn minter(&self, address: &str) -> Result<JettonMinter> {
        let defaults = self.minter_defaults()?;
        Ok(JettonMinter::new(parse_address(address)?).with_forward_ton(defaults.forward_ton))
    }

    fn friendly(&self, address: &Address, bounceable: bool) -> String {
        address.to_friendly(bounceable, self.network.testnet)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        let sender = TransferLinkSender::new(self.network.testnet);

        match &self.command {
            Commands::Init { minter_code, wallet_code, value } => {
                let wallet_code = BocFileLoader::new(wallet_code).load()?;
                let init = JettonMinter::init(wallet_code, &BocFileLoader::new(minter_code))?;
                let defaults = self.minter_defaults()?;
                let minter = JettonMinter::from_init(init, defaults.workchain)?
                    .with_forward_ton(defaults.forward_ton);
                log::info!("minter address: {}", self.friendly(&minter.address, true));
                log::info!("raw: {}", minter.address.to_raw());
                let value = to_nano(value)?;
                log::info!("deploy value: {} TON", from_nano(value));
                minter.send_deploy(&sender, value).await?;
            }
            Commands::Mint { minter, to, amount, forward } => {
                let minter = self.minter(minter)?;
                let to = parse_address(to)?;
                minter
                    .send_mint(&sender, &to, parse_amount(amount)?, parse_forward(forward)?)
                    .await?;
            }
            Commands::BurnNotification { minter, from, amount, query_id, forward } => {
                let minter = self.minter(minter)?;
                let from = parse_address(from)?;
                minter
                    .send_burn_notification(
                        &sender,
                        &from,
                        parse_amount(amount)?,
                        *query_id,
                        parse_forward(forward)?,
                    )
                    .await?;
            }
            Commands::ChangeAdmin { minter, new_admin, forward } => {
                let minter = self.minter(minter)?;
                let new_admin = parse_address(new_admin)?;
                minter
                    .send_change_admin(&sender, &new_admin, parse_forward(forward)?)
                    .await?;
            }
            Commands::Notify { minter, from, amount, comment, forward } => {
                let minter = self.minter(minter)?;
                let from = parse_address(from)?;
                if comment.parse::<NotifyComment>().is_err() {
                    log::warn!("notify comment {:?} is free text, the minter expects an address", comment);
                }
                minter
                    .send_notify(&sender, &from, parse_amount(amount)?, comment, parse_forward(forward)?)
                    .await?;
            }
            Commands::JettonData { minter } => {
                let minter = self.minter(minter)?;
                let data = minter.get_jetton_data(&self.create_client()?).await?;
                log::info!("total supply: {}", data.total_supply);
                match &data.admin {
                    Some(admin) => log::info!("admin: {}", self.friendly(admin, true)),
                    None => log::info!("admin: none"),
                }
                log::info!("wallet code hash: {}", data.wallet_code.hash_hex());
                match JettonContent::from_cell(data.metadata.clone()) {
                    Ok(content) => log::info!("content: tag {:#04x}, uri {}", content.tag, content.uri),
                    Err(e) => log::warn!("metadata cell {} not understood: {}", data.metadata.hash_hex(), e),
                }
            }
            Commands::WalletAddress { minter, owner } => {
                let minter = self.minter(minter)?;
                let owner = parse_address(owner)?;
                let wallet = minter.get_wallet_address(&self.create_client()?, &owner).await?;
                log::info!("jetton wallet: {}", self.friendly(&wallet, true));
                log::info!("raw: {}", wallet.to_raw());
            }
            Commands::DeriveWalletAddress { minter, owner, wallet_code } => {
                let minter = parse_address(minter)?;
                let owner = parse_address(owner)?;
                let wallet_code = BocFileLoader::new(wallet_code).load()?;
                let wallet = JettonMinter::calculate_wallet_address(&owner, &minter, &wallet_code)?;
                log::info!("jetton wallet: {}", self.friendly(&wallet, true));
                log::info!("raw: {}", wallet.to_raw());
            }
            Commands::Metadata => {
                let metadata = JettonMetadata {
                    name: JETTON_NAME.to_string(),
                    symbol: JETTON_SYMBOL.to_string(),
                    decimals: JETTON_DECIMALS,
                    image: Some(JETTON_IMAGE.to_string()),
                    description: None,
                };
                println!("{}", serde_json::to_string_pretty(&metadata)?);
                let content = JettonContent::default().to_cell()?;
                log::info!("content cell: {}", crate::tvm::boc_to_base64(&content)?);
                log::info!("initial supply: {}", INITIAL_TOTAL_SUPPLY);
            }
            Commands::DecodeBody { body } => {
                let message = MinterMessage::from_cell(parse_body(body)?)?;
                log::info!("op {:#010x}: {:?}", message.opcode(), message);
                if let Some(amount) = jetton_amount(&message) {
                    log::info!("{} amount: {}", JETTON_SYMBOL, amount);
                }
            }
        }

        for link in sender.links() {
            println!("{link}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mint_command() {
        let cli = Cli::try_parse_from([
            "jetton-minter",
            "--testnet",
            "mint",
            "-m",
            "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N",
            "--to",
            INITIAL_OWNER,
            "-a",
            "1000000000",
        ])
        .unwrap();
        assert!(cli.network.testnet);
        assert!(matches!(cli.command, Commands::Mint { forward: None, .. }));
        assert_eq!(cli.client_params().base_url(), crate::config::TESTNET_BASE_URL);
    }

    #[tokio::test]
    async fn test_decode_body_command() {
        let body = MinterMessage::ChangeAdmin {
            new_admin: INITIAL_OWNER.parse().unwrap(),
        }
        .to_cell()
        .unwrap();
        let hex = crate::tvm::boc_to_hex(&body).unwrap();
        let cli = Cli::try_parse_from(["jetton-minter", "decode-body", hex.as_str()]).unwrap();
        cli.execute().await.unwrap();

        let cli = Cli::try_parse_from(["jetton-minter", "decode-body", "zz"]).unwrap();
        assert!(cli.execute().await.is_err());
    }

    #[test]
    fn test_default_forward_flag() {
        let minter = "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N";
        let cli = Cli::try_parse_from(["jetton-minter", "jetton-data", "-m", minter]).unwrap();
        if cli.network.default_forward.is_none() {
            assert_eq!(cli.minter(minter).unwrap().forward_ton(), DEFAULT_FORWARD_TON);
        }

        let cli = Cli::try_parse_from([
            "jetton-minter",
            "--default-forward",
            "0.1",
            "jetton-data",
            "-m",
            minter,
        ])
        .unwrap();
        assert_eq!(cli.minter(minter).unwrap().forward_ton(), 100_000_000);

        let cli =
            Cli::try_parse_from(["jetton-minter", "--default-forward", "lots", "metadata"]).unwrap();
        assert!(cli.minter_defaults().is_err());
    }

    #[test]
    fn test_jetton_amount_uses_token_decimals() {
        let owner: Address = INITIAL_OWNER.parse().unwrap();
        let burn = MinterMessage::BurnNotification {
            query_id: 0,
            amount: 2_500_000_000,
            from: owner,
        };
        assert_eq!(jetton_amount(&burn).as_deref(), Some("2.5"));
        let change = MinterMessage::ChangeAdmin { new_admin: owner };
        assert_eq!(jetton_amount(&change), None);
    }

    #[test]
    fn test_bad_forward_value() {
        assert_eq!(parse_forward(&Some("0.1".to_string())).unwrap(), Some(100_000_000));
        assert_eq!(parse_forward(&None).unwrap(), None);
        assert!(parse_forward(&Some("-1".to_string())).is_err());
    }
}
