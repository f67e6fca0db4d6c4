use serde::Deserialize;
use serde_json::Value;

use super::{decode, keep_raw, parse_decimal, AccountView};
use crate::{Account, Entry, PortfolioError, Ticker, UtcDateTime};

/// Balances at or below this many units are dropped as dust.
pub const DUST_THRESHOLD: f64 = 2.0;

#[derive(Debug, Deserialize)]
struct AccountPayload {
    active: bool,
    available_balance: BalancePayload,
    currency: String,
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct BalancePayload {
    value: String,
}

/// Keep accounts holding more than [`DUST_THRESHOLD`], keyed by currency.
///
/// A later record for the same currency replaces an earlier one.
pub fn aggregate_accounts(records: &[Value], include_raw: bool) -> Result<AccountView, PortfolioError> {
    let mut view = AccountView::new();

    for (index, raw) in records.iter().enumerate() {
        let context = format!("accounts[{index}]");
        let payload: AccountPayload = decode(&context, raw)?;

        let balance = parse_decimal(&context, "available_balance.value", &payload.available_balance.value)?;
        if balance <= DUST_THRESHOLD {
            tracing::debug!(currency = %payload.currency, balance, "dropping dust account");
            continue;
        }

        let currency = Ticker::parse(&payload.currency)
            .map_err(|error| PortfolioError::unexpected_schema(&context, error.to_string()))?;
        let updated_at = UtcDateTime::parse(&payload.updated_at)
            .map_err(|error| PortfolioError::unexpected_schema(&context, error.to_string()))?;

        let account = Account {
            active: payload.active,
            available_balance: balance,
            currency: currency.clone(),
            updated_at,
        };
        view.insert(currency, Entry::new(account, keep_raw(include_raw, raw)));
    }

    Ok(view)
}
