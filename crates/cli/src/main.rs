//! Storefront command line: fetch the catalog once, filter it, print it.

mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use storefront_client::{refresh, ClientConfig, HttpCatalogLoader};
use storefront_observability::LogFormat;
use storefront_products::{FilterCriteria, LoadState, StorefrontSession};

use crate::output::OutputFormat;

/// Browse the storefront catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the storefront API
    #[arg(long, env = "STOREFRONT_API_URL")]
    pub api_url: Option<String>,

    /// Case-insensitive text to look for in product names
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show this category (repeat for several)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Lowest price to show, inclusive
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub min_price: String,

    /// Highest price to show, inclusive
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub max_price: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Print the available categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Emit logs as JSON instead of plain text
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_inputs(
            &self.search,
            self.categories.iter().cloned(),
            &self.min_price,
            &self.max_price,
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    storefront_observability::init_with(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = ClientConfig::from_env().context("invalid storefront configuration")?;
    if let Some(url) = &cli.api_url {
        config = config
            .with_api_url(url.as_str())
            .context("invalid --api-url")?;
    }

    let loader = HttpCatalogLoader::new(&config).context("failed to build HTTP client")?;
    let mut session = StorefrontSession::new();

    if let Err(err) = refresh(&mut session, &loader).await {
        tracing::debug!(error = %err, url = loader.url(), "load failed");
        if let LoadState::Failed { message } = session.state() {
            eprintln!("{message}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list_categories {
        output::write_categories(&mut out, session.categories(), cli.format)?;
        return Ok(ExitCode::SUCCESS);
    }

    let visible = session.apply(cli.criteria())?;
    output::write_products(&mut out, visible, cli.format)?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_products::PriceBound;

    #[test]
    fn flags_become_criteria() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--search",
            "shirt",
            "-c",
            "Apparel",
            "--category",
            "Home",
            "--min-price",
            "10",
            "--max-price",
            "abc",
        ])
        .unwrap();

        let criteria = cli.criteria();
        assert_eq!(criteria.search_term, "shirt");
        assert_eq!(criteria.selected_categories.len(), 2);
        assert_eq!(criteria.min_price, PriceBound::Amount(10.0));
        assert_eq!(criteria.max_price, PriceBound::Unparsable("abc".to_string()));
    }

    #[test]
    fn no_flags_is_the_identity_filter() {
        let cli = Cli::try_parse_from(["storefront"]).unwrap();

        assert!(cli.criteria().is_empty());
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.list_categories);
    }

    #[test]
    fn negative_price_input_is_accepted_as_text() {
        let cli = Cli::try_parse_from(["storefront", "--min-price", "-5"]).unwrap();
        assert_eq!(cli.criteria().min_price, PriceBound::Amount(-5.0));
    }

    #[test]
    fn json_format_is_selectable() {
        let cli = Cli::try_parse_from(["storefront", "-f", "json", "--list-categories"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.list_categories);
    }
}
