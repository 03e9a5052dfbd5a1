//! Reference set of well-known symbols.
//!
//! Classification is advisory: an unknown ticker is reported as a warning and
//! is never removed from a portfolio.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{normalize_ticker, AssetClass};

const KNOWN_ETFS: &[&str] = &[
    "ACWI", "AGG", "ARKK", "BND", "BNDX", "DBC", "DIA", "EEM", "EFA", "EMB", "EWJ", "GLD", "GOVT",
    "HYG", "IAU", "IEF", "IJH", "IJR", "IVV", "IWM", "LQD", "MDY", "MUB", "QQQ", "SCHD", "SHY",
    "SLV", "SMH", "SOXX", "SPY", "TIP", "TLT", "USO", "VEA", "VGT", "VIG", "VNQ", "VOO", "VT",
    "VTI", "VWO", "VXUS", "VYM", "XLB", "XLC", "XLE", "XLF", "XLI", "XLK", "XLP", "XLRE", "XLU",
    "XLV", "XLY",
];

const KNOWN_EQUITIES: &[&str] = &[
    "AAPL", "ABBV", "ABT", "ADBE", "AMD", "AMZN", "AVGO", "BA", "BAC", "BRK-B", "BRK.B", "C",
    "CAT", "CMCSA", "COST", "CRM", "CSCO", "CVX", "DIS", "GE", "GOOG", "GOOGL", "GS", "HD", "HON",
    "IBM", "INTC", "JNJ", "JPM", "KO", "LLY", "LMT", "MA", "MCD", "META", "MMM", "MRK", "MS",
    "MSFT", "NFLX", "NKE", "NVDA", "ORCL", "PEP", "PFE", "PG", "PYPL", "QCOM", "SBUX", "T", "TMO",
    "TSLA", "TXN", "UBER", "UNH", "UPS", "V", "VZ", "WFC", "WMT", "XOM",
];

const KNOWN_CRYPTO: &[&str] = &[
    "ADA", "BTC", "BTC-USD", "DOGE", "ETH", "ETH-USD", "SOL", "SOL-USD", "XRP",
];

/// (ticker, fund name, category) for ETFs with curated metadata.
const ETF_DETAILS: &[(&str, &str, &str)] = &[
    ("AGG", "iShares Core U.S. Aggregate Bond ETF", "Bond"),
    ("BND", "Vanguard Total Bond Market ETF", "Bond"),
    ("EEM", "iShares MSCI Emerging Markets ETF", "Emerging Markets"),
    ("EFA", "iShares MSCI EAFE ETF", "International"),
    ("GLD", "SPDR Gold Shares", "Commodity"),
    ("IWM", "iShares Russell 2000 ETF", "Small Cap"),
    ("QQQ", "Invesco QQQ Trust", "Technology"),
    ("SPY", "SPDR S&P 500 ETF Trust", "Large Cap"),
    ("VNQ", "Vanguard Real Estate ETF", "Real Estate"),
    ("VOO", "Vanguard S&P 500 ETF", "Large Cap"),
    ("VTI", "Vanguard Total Stock Market ETF", "Large Cap"),
];

const DEFAULT_CURRENCY: &str = "USD";

/// Asset class of a well-known symbol, or `None` when it is not in the reference set.
pub fn classify(ticker: &str) -> Option<AssetClass> {
    let ticker = normalize_ticker(ticker);
    let ticker = ticker.as_str();

    if KNOWN_ETFS.contains(&ticker) {
        Some(AssetClass::Etf)
    } else if KNOWN_EQUITIES.contains(&ticker) {
        Some(AssetClass::Equity)
    } else if KNOWN_CRYPTO.contains(&ticker) {
        Some(AssetClass::Crypto)
    } else {
        None
    }
}

pub fn is_known_symbol(ticker: &str) -> bool {
    classify(ticker).is_some()
}

/// Splits tickers into (known, unknown), keeping first-seen order and
/// listing each ticker once.
pub fn partition_symbols<'a, I>(tickers: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut known: Vec<String> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();

    for raw in tickers {
        let ticker = normalize_ticker(raw);
        if ticker.is_empty() || known.contains(&ticker) || unknown.contains(&ticker) {
            continue;
        }

        if is_known_symbol(&ticker) {
            known.push(ticker);
        } else {
            unknown.push(ticker);
        }
    }

    (known, unknown)
}

/// Display metadata for a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerMetadata {
    pub ticker: String,
    pub name: Option<String>,
    pub asset_class: AssetClass,
    pub category: Option<String>,
    pub currency: String,
    pub exchange: Option<String>,
}

impl TickerMetadata {
    pub fn lookup(ticker: &str) -> Self {
        let ticker = normalize_ticker(ticker);
        let details = ETF_DETAILS
            .iter()
            .find(|(symbol, _, _)| *symbol == ticker.as_str());

        Self {
            asset_class: classify(&ticker).unwrap_or(AssetClass::Unknown),
            name: details.map(|(_, name, _)| (*name).to_owned()),
            category: details.map(|(_, _, category)| (*category).to_owned()),
            currency: DEFAULT_CURRENCY.to_owned(),
            exchange: None,
            ticker,
        }
    }
}

/// Resolves a batch of raw tickers, keyed by normalized ticker. Blank entries are dropped.
pub fn resolve_tickers<'a, I>(tickers: I) -> BTreeMap<String, TickerMetadata>
where
    I: IntoIterator<Item = &'a str>,
{
    tickers
        .into_iter()
        .map(normalize_ticker)
        .filter(|ticker| !ticker.is_empty())
        .map(|ticker| {
            let metadata = TickerMetadata::lookup(&ticker);
            (ticker, metadata)
        })
        .collect()
}
