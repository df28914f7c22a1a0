use anyhow::Context;
use clap::Parser;
use log::debug;
use serde::Serialize;

use pocket_query::cli::{ApplyArgs, Cli, Commands};
use pocket_query::config::load_query_config;
use pocket_query::log::init_logging;
use pocket_query::{
    AccountDetails, AccountHistoryQueryParams, AccountQueryParams, AppState, AppsQueryParams, BlockQueryParams,
    NodeState, QueryService, TransactionRecord, derive_address, format_pokt, is_valid_address, to_micro_units,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    let mut config = load_query_config(&cli.config)?;
    config.apply_gateway(&cli.gateway);
    debug!(gateway = config.gateway_url(), config:% = cli.config.display(); "Configuration loaded");

    let json = cli.json;
    let service = QueryService::new(config).context("Failed to initialize gateway client")?;

    match cli.command {
        Commands::Height => {
            let height = service.get_height().await?;
            if json {
                print_json(&serde_json::json!({ "height": height }))?;
            } else {
                println!("Latest block height: {}", height);
            }
        },
        Commands::Account { address, height } => {
            let account = service.get_account(&address, AccountQueryParams { height }).await?;
            if json {
                print_json(&account)?;
            } else {
                println!("Address: {}", account.address);
                println!("Balance: {}", format_pokt(&account.balance));
            }
        },
        Commands::App { address, height } => {
            let app = service.get_app(&address, AccountQueryParams { height }).await?;
            if json {
                print_json(&app)?;
            } else {
                print_app(&app);
            }
        },
        Commands::Apps {
            height,
            page,
            per_page,
            staking_status,
        } => {
            let apps = service
                .get_apps(AppsQueryParams {
                    height,
                    page,
                    per_page,
                    staking_status,
                })
                .await?;
            if json {
                print_json(&apps)?;
            } else {
                println!("{} application(s) on page {}", apps.len(), page);
                for app in &apps {
                    println!();
                    print_app(app);
                }
            }
        },
        Commands::Node { address, height } => {
            let node = service.get_node(&address, AccountQueryParams { height }).await?;
            if json {
                print_json(&node)?;
            } else {
                print_node(&node);
            }
        },
        Commands::Block { height } => {
            let block = service.get_block(BlockQueryParams { height }).await?;
            if json {
                print_json(&block)?;
            } else {
                println!("Height: {}", block.height);
                println!("Hash: {}", block.hash);
                println!("Time: {}", block.time);
                println!("Chain: {}", block.chain_id);
                println!("Proposer: {}", block.proposer_address);
                println!("Transactions: {}", block.num_txs);
            }
        },
        Commands::History {
            address,
            height,
            page,
            per_page,
            sort,
        } => {
            let records = service
                .get_account_history(&address, AccountHistoryQueryParams {
                    height,
                    page,
                    per_page,
                    sort,
                })
                .await?;
            if json {
                print_json(&records)?;
            } else {
                print_history(&records);
            }
        },
        Commands::Inspect {
            address,
            page,
            per_page,
        } => {
            let params = AccountHistoryQueryParams {
                page,
                per_page,
                ..AccountHistoryQueryParams::default()
            };
            let overview = service.inspect_account(&address, params).await?;
            if json {
                print_json(&overview)?;
            } else {
                println!("Address: {}", overview.address);
                println!("Balance: {}", format_pokt(&overview.balance));
                println!("Type: {}", overview.kind.as_label());
                match &overview.details {
                    AccountDetails::None => {},
                    AccountDetails::Application(app) => {
                        println!();
                        print_app(app);
                    },
                    AccountDetails::Node(node) => {
                        println!();
                        print_node(node);
                    },
                }
                println!();
                print_history(&overview.history);
            }
        },
        Commands::AddressFromKey { public_key } => {
            let address = derive_address(&public_key)?;
            println!("{}", address);
        },
        Commands::ValidateAddress { address } => {
            let valid = is_valid_address(&address);
            if json {
                print_json(&serde_json::json!({ "address": address, "valid": valid }))?;
            } else if valid {
                println!("{} is a valid address", address);
            } else {
                println!("{} is not a valid address", address);
            }
        },
        Commands::ToUpokt { quantity } => {
            let amount = to_micro_units(quantity.as_str())?;
            println!("{}", amount);
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

fn print_app(app: &AppState) {
    println!("Application: {}", app.address);
    println!("  Public key: {}", app.public_key);
    println!("  Status: {}", app.status);
    println!("  Staked: {}", format_pokt(&app.staked_tokens));
    println!("  Max relays: {}", app.max_relays);
    println!("  Chains: {}", app.chains.join(", "));
}

fn print_node(node: &NodeState) {
    println!("Node: {}", node.address);
    println!("  Public key: {}", node.public_key);
    println!("  Service URL: {}", node.service_url);
    println!("  Status: {}", node.status);
    println!("  Jailed: {}", node.jailed);
    println!("  Staked: {}", format_pokt(&node.staked_tokens));
    println!("  Chains: {}", node.chains.join(", "));
}

fn print_history(records: &[TransactionRecord]) {
    if records.is_empty() {
        println!("No transactions found.");
        return;
    }
    for record in records {
        println!(
            "{:>10}  {:<14} {}  fee {}",
            record.height,
            record.kind.as_label(),
            record.hash,
            format_pokt(&record.fee)
        );
    }
}
