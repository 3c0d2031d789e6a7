//! Currency pairs and the exchange-defined list of tradable pairs.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Pair used by [`FetchConfig::new`](crate::models::fetch_config::FetchConfig::new) when the
/// caller does not name one.
pub const DEFAULT_CURRENCY_PAIR: &str = "USDT_BTC";

/// Every pair the exchange accepts, in the order the exchange lists them.
static KNOWN_PAIRS: LazyLock<IndexSet<&'static str>> = LazyLock::new(|| {
    [
        "BTC_AMP", "BTC_ARDR", "BTC_BCH", "BTC_BCN", "BTC_BCY", "BTC_BELA", "BTC_BLK",
        "BTC_BTCD", "BTC_BTM", "BTC_BTS", "BTC_BURST", "BTC_CLAM", "BTC_CVC", "BTC_DASH",
        "BTC_DCR", "BTC_DGB", "BTC_DOGE", "BTC_EMC2", "BTC_ETC", "BTC_ETH", "BTC_EXP",
        "BTC_FCT", "BTC_FLDC", "BTC_FLO", "BTC_GAME", "BTC_GAS", "BTC_GNO", "BTC_GNT",
        "BTC_GRC", "BTC_HUC", "BTC_LBC", "BTC_LSK", "BTC_LTC", "BTC_MAID", "BTC_NAV",
        "BTC_NEOS", "BTC_NMC", "BTC_NXC", "BTC_NXT", "BTC_OMG", "BTC_OMNI", "BTC_PASC",
        "BTC_PINK", "BTC_POT", "BTC_PPC", "BTC_RADS", "BTC_SC", "BTC_STEEM", "BTC_STORJ",
        "BTC_STR", "BTC_STRAT", "BTC_SYS", "BTC_VIA", "BTC_VRC", "BTC_VTC", "BTC_XBC",
        "BTC_XCP", "BTC_XEM", "BTC_XMR", "BTC_XPM", "BTC_XRP", "BTC_XVC", "BTC_ZEC",
        "BTC_ZRX", "ETH_BCH", "ETH_CVC", "ETH_ETC", "ETH_GAS", "ETH_GNO", "ETH_GNT",
        "ETH_LSK", "ETH_OMG", "ETH_REP", "ETH_STEEM", "ETH_ZEC", "ETH_ZRX", "USDT_BCH",
        "USDT_BTC", "USDT_DASH", "USDT_ETC", "USDT_ETH", "USDT_LTC", "USDT_NXT", "USDT_REP",
        "USDT_STR", "USDT_XMR", "USDT_XRP", "USDT_ZEC", "XMR_BCN", "XMR_BLK", "XMR_BTCD",
        "XMR_DASH", "XMR_LTC", "XMR_MAID", "XMR_NXT", "XMR_ZEC", "BTC_REP", "BTC_RIC",
        "BTC_SBD",
    ]
    .into_iter()
    .collect()
});

/// Returns the known pairs in exchange order.
pub fn known_pairs() -> impl ExactSizeIterator<Item = &'static str> {
    KNOWN_PAIRS.iter().copied()
}

/// A `BASE_QUOTE` trading pair such as `USDT_BTC`, always stored uppercase.
///
/// Membership in the known set is not checked on construction; the exchange is the
/// authority and rejects unknown pairs itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyPair(String);

impl CurrencyPair {
    pub fn new(pair: &str) -> Self {
        Self(pair.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_PAIRS.contains(self.0.as_str())
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_PAIR)
    }
}

impl From<String> for CurrencyPair {
    fn from(pair: String) -> Self {
        Self::new(&pair)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.0
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lays the known pairs out in rows of `columns`, each column padded to its widest entry
/// and separated by tabs.
pub fn format_pairs_table(columns: usize) -> String {
    let columns = columns.max(1);
    let pairs: Vec<&str> = known_pairs().collect();
    let rows: Vec<&[&str]> = pairs.chunks(columns).collect();

    let mut widths = vec![0usize; columns];
    for row in &rows {
        for (i, pair) in row.iter().enumerate() {
            widths[i] = widths[i].max(pair.len());
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, pair)| format!("{pair:<width$}", width = widths[i]))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
