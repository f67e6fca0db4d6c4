//! Server-side HTML for the dashboard page.

use std::fmt::Write;

use coinfolio_core::Dashboard;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#1d2430}\
table{border-collapse:collapse;margin-bottom:2rem}\
th,td{padding:.4rem .8rem;border-bottom:1px solid #d8dde6;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.cards{display:flex;gap:1rem;margin-bottom:2rem}\
.card{border:1px solid #d8dde6;border-radius:6px;padding:1rem;min-width:10rem}\
.card span{display:block;font-size:.8rem;color:#5b6575}\
.up{color:#137333}.down{color:#b3261e}.warn{color:#8a5300}";

/// Render the full dashboard page.
pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Portfolio</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><h1>Portfolio</h1>");

    write_summary(&mut html, dashboard);
    write_holdings(&mut html, dashboard);
    write_orders(&mut html, dashboard);
    write_warnings(&mut html, dashboard);

    let _ = write!(
        html,
        "<footer>Generated {} in {} ms (request {})</footer></body></html>",
        dashboard.meta.generated_at,
        dashboard.meta.latency_ms,
        escape(&dashboard.meta.request_id),
    );
    html
}

fn write_summary(html: &mut String, dashboard: &Dashboard) {
    html.push_str("<section class=\"cards\">");
    for (label, value) in [
        ("Liquid", dashboard.liquid),
        ("In open orders", dashboard.illiquid),
        ("Potential sale", dashboard.potential_sale),
        ("Total net worth", dashboard.total_net_worth),
        ("Potential net worth", dashboard.potential_net_worth),
    ] {
        let _ = write!(
            html,
            "<div class=\"card\"><span>{label}</span>{}</div>",
            usd(value)
        );
    }
    html.push_str("</section>");
}

fn write_holdings(html: &mut String, dashboard: &Dashboard) {
    html.push_str(
        "<h2>Holdings</h2><table><thead><tr><th>Asset</th><th>Balance</th><th>Price</th>\
<th>24h</th><th>Value</th><th>In orders</th><th>Orders</th></tr></thead><tbody>",
    );

    for holding in &dashboard.holdings {
        let product = dashboard.products.get(&holding.ticker);
        let name = product
            .map(|entry| entry.record.base_name.as_str())
            .unwrap_or_default();
        let change = product.and_then(|entry| entry.record.price_percentage_change_24h);
        let (class, change) = match change {
            Some(change) if change < 0.0 => ("down", format!("{change:+.2}%")),
            Some(change) => ("up", format!("{change:+.2}%")),
            None => ("", String::from("n/a")),
        };

        let _ = write!(
            html,
            "<tr><td><strong>{}</strong> {}</td><td>{:.8}</td><td>{}</td>\
<td class=\"{class}\">{change}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(holding.ticker.as_str()),
            escape(name),
            holding.balance,
            usd(holding.spot_price),
            usd(holding.liquid),
            usd(holding.illiquid),
            holding.open_orders,
        );
    }

    html.push_str("</tbody></table>");
}

fn write_orders(html: &mut String, dashboard: &Dashboard) {
    if dashboard.orders.is_empty() {
        return;
    }

    html.push_str(
        "<h2>Open orders</h2><table><thead><tr><th>Asset</th><th>Side</th><th>On hold</th>\
<th>Value after fees</th><th>Avg fill</th></tr></thead><tbody>",
    );

    for (ticker, entries) in &dashboard.orders {
        for entry in entries {
            let order = &entry.record;
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{:.8}</td><td>{}</td><td>{}</td></tr>",
                escape(ticker.as_str()),
                order.side,
                order.outstanding_hold_amount,
                usd(order.total_value_after_fees),
                order.average_filled_price.map_or_else(|| String::from("n/a"), usd),
            );
        }
    }

    html.push_str("</tbody></table>");
}

fn write_warnings(html: &mut String, dashboard: &Dashboard) {
    if dashboard.meta.warnings.is_empty() {
        return;
    }

    html.push_str("<h2>Not counted</h2><ul class=\"warn\">");
    for warning in &dashboard.meta.warnings {
        let _ = write!(html, "<li>{}</li>", escape(warning));
    }
    html.push_str("</ul>");
}

fn usd(value: f64) -> String {
    format!("${value:.2}")
}

fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
