//! Command line front end for the Earn pool browser.
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use earn_data::{
    EarnApiClient, EarnConfig, LiquidityPreviewSource, OciswapPreviewClient, PoolSource,
    PortfolioService, PreviewRequest, StaticBalances, StrategySource,
};
use earn_domain::deposit::{DepositSide, paired_amount};
use earn_domain::entities::Pool;
use earn_domain::format::shorten_address;
use earn_domain::math::DEFAULT_TICK_SPACING;
use earn_domain::metrics::PortfolioTotals;
use earn_domain::value_objects::{PercentRange, RangePreset};
use earn_view::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser)]
#[command(name = "earn")]
#[command(about = "Browse Radix liquidity pools, positions and strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pools with search, filters and sorting
    Pools {
        /// Start from a saved query string (e.g. "tab=boosted&sort=tvl&direction=desc")
        #[arg(long, default_value = "")]
        query: String,

        /// Fuzzy search over pool name and token symbols
        #[arg(short, long)]
        search: Option<String>,

        /// all, double, single, boosted, my_pools or owned_tokens
        #[arg(short, long)]
        tab: Option<String>,

        /// tvl, bonus_7d, volume_7d or bonus_name
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Only pools with at least this TVL
        #[arg(long)]
        tvl_above: Option<f64>,

        /// Only pools carrying one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Account used for the my_pools and owned_tokens tabs
        #[arg(long)]
        account: Option<String>,

        /// Maximum rows to print
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
    /// Compute aligned tick bounds for a deposit range
    Ticks {
        /// Current pool price
        #[arg(long)]
        price: Decimal,

        /// Lower bound, percent from the current price
        #[arg(long, allow_hyphen_values = true, default_value = "-90")]
        lower: Decimal,

        /// Upper bound, percent from the current price
        #[arg(long, allow_hyphen_values = true, default_value = "900")]
        upper: Decimal,

        /// Use a named range instead of --lower/--upper
        #[arg(long, value_enum)]
        preset: Option<Preset>,

        #[arg(long, default_value_t = DEFAULT_TICK_SPACING)]
        spacing: i32,

        /// Pool component to request an add-liquidity preview for
        #[arg(long)]
        pool: Option<String>,

        /// Amount of the left token for the preview
        #[arg(long)]
        x_amount: Option<Decimal>,
    },
    /// Show an account's positions and totals
    Portfolio {
        #[arg(short, long)]
        address: String,

        #[arg(short, long)]
        search: Option<String>,

        /// Only liquidity positions or only strategy positions
        #[arg(long, value_enum, default_value_t = PositionFilter::All)]
        kind: PositionFilter,
    },
    /// Deepest, busiest and best-rewarded pools
    Featured,
    /// List available strategies
    Strategies {
        #[arg(short, long)]
        search: Option<String>,

        /// Only strategies requiring one of these assets
        #[arg(long = "asset")]
        assets: Vec<String>,
    },
    /// Amount of the other token to pair with a deposit
    Pair {
        /// Pool component address
        #[arg(long)]
        pool: String,

        #[arg(long)]
        amount: Decimal,

        /// The amount is of the right token
        #[arg(long)]
        right: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Wide,
    Concentrated,
    Bold,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PositionFilter {
    All,
    Liquidity,
    Strategies,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EarnConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pools {
            query,
            search,
            tab,
            sort,
            desc,
            tvl_above,
            tags,
            account,
            limit,
        } => {
            let host = MemoryQueryHost::new(query);
            let url = UrlSync::new(host.clone());
            let restored = url.init();

            let client = Arc::new(EarnApiClient::from_config(&config));
            let mut model = PoolView::new(TagAliases::default());
            if let Some(account) = &account {
                let service =
                    PortfolioService::new(Arc::clone(&client), StaticBalances::new(), config.cache);
                let positions = service.all_positions(account).await?;
                let balances = service.balances(account).await?;
                model = model.with_portfolio(&positions).with_balances(&balances);
            }

            let mut store = ViewStore::new(
                model,
                ViewConfig {
                    search_debounce: config.search_debounce,
                },
            )
            .with_state(restored);
            url.follow(&mut store);

            if let Some(search) = search {
                store.set_search_now(search);
            }
            if let Some(tab) = tab {
                let tab: PoolTab = tab
                    .parse()
                    .map_err(|_| anyhow!("unknown tab '{tab}'"))?;
                store.select_tab(tab);
            }
            if let Some(column) = sort {
                let column: PoolColumn = column
                    .parse()
                    .map_err(|_| anyhow!("unknown sort column '{column}'"))?;
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                store.set_sort(SortState::new(column, direction));
            }
            if tvl_above.is_some() || !tags.is_empty() {
                store.update_filters(|filters| {
                    if let Some(value) = tvl_above {
                        filters.tvl = NumericFilter::above(value);
                    }
                    for tag in &tags {
                        filters.tags.set(tag, true);
                    }
                });
            }

            let ticket = store.begin_fetch();
            let pools = client.fetch_pools().await?;
            store.apply_fetch(ticket, pools);

            let shown: Vec<Pool> = store.items().iter().take(limit).cloned().collect();
            output::pools_table(&shown).printstd();
            println!("{} of {} pools", store.items().len(), store.base().len());

            println!("query: {}", host.query());
        }
        Commands::Ticks {
            price,
            lower,
            upper,
            preset,
            spacing,
            pool,
            x_amount,
        } => {
            let range = match preset {
                Some(Preset::Wide) => RangePreset::Wide.range(),
                Some(Preset::Concentrated) => RangePreset::Concentrated.range(),
                Some(Preset::Bold) => RangePreset::Bold.range(),
                None => None,
            }
            .unwrap_or_else(|| PercentRange::new(lower, upper));

            let bounds = range
                .tick_bounds(price, spacing)
                .context("invalid price range")?;
            info!(preset = ?RangePreset::detect(&range), "Computed tick bounds");
            output::ticks_table(&bounds).printstd();

            if let Some(pool) = pool {
                let preview = OciswapPreviewClient::from_config(&config);
                let request = PreviewRequest {
                    x_amount,
                    bounds: Some(bounds),
                    ..PreviewRequest::new(pool)
                };
                match preview.add_liquidity_preview(&request).await? {
                    Some(quote) => println!(
                        "x: {} ({} XRD), y: {} ({} XRD), liquidity: {}",
                        quote.x_amount.token,
                        quote.x_amount.xrd,
                        quote.y_amount.token,
                        quote.y_amount.xrd,
                        quote.liquidity_amount
                    ),
                    None => println!("no preview available for these amounts"),
                }
            }
        }
        Commands::Portfolio {
            address,
            search,
            kind,
        } => {
            let client = Arc::new(EarnApiClient::from_config(&config));
            let service = PortfolioService::new(client, StaticBalances::new(), config.cache);
            let items = service.all_positions(&address).await?;

            let state = PortfolioViewState {
                tab: match kind {
                    PositionFilter::All => PortfolioTab::All,
                    PositionFilter::Liquidity => PortfolioTab::Liquidity,
                    PositionFilter::Strategies => PortfolioTab::Strategies,
                },
                search: search.unwrap_or_default(),
                ..PortfolioViewState::default()
            };
            let visible = derive_view(&PortfolioView, &items, &state);

            println!("Account {}", shorten_address(&address));
            output::portfolio_table(&visible).printstd();
            output::totals_table(&PortfolioTotals::from_items(&visible)?).printstd();
        }
        Commands::Featured => {
            let client = EarnApiClient::from_config(&config);
            let featured = featured_pools(&client.fetch_pools().await?);

            println!("Deepest liquidity");
            output::pools_table(&featured.deepest_liquidity).printstd();
            println!("Highest volume");
            output::pools_table(&featured.highest_volume).printstd();
            println!("Best bonus");
            output::pools_table(&featured.best_bonus).printstd();
        }
        Commands::Strategies { search, assets } => {
            let client = EarnApiClient::from_config(&config);
            let strategies = client.fetch_strategies().await;

            let mut state = StrategyViewState {
                search: search.unwrap_or_default(),
                ..StrategyViewState::default()
            };
            state.filters.assets = StrategyView::asset_filters(&strategies);
            for asset in &assets {
                state.filters.assets.set(&asset.to_uppercase(), true);
            }

            let visible = derive_view(&StrategyView, &strategies, &state);
            output::strategies_table(&visible).printstd();
        }
        Commands::Pair {
            pool,
            amount,
            right,
        } => {
            let client = EarnApiClient::from_config(&config);
            let pools = client.fetch_pools().await?;
            let pool = pools
                .iter()
                .find(|p| p.component == pool)
                .ok_or_else(|| anyhow!("pool {pool} not found"))?;

            let side = if right { DepositSide::Y } else { DepositSide::X };
            match paired_amount(pool, side, amount)? {
                Some(other) => println!("pair with {other}"),
                None => println!("{} takes a single token", pool.name),
            }
        }
    }

    Ok(())
}
