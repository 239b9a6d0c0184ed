//! Metric display commands for the selected tenant.

use chrono::{Duration, NaiveDate, Utc};
use storepulse_session::SessionStore;

use super::CommandError;

/// Default span of the order series when no range is given.
const DEFAULT_RANGE_DAYS: i64 = 30;

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CommandError::InvalidDate(raw.to_owned()))
}

/// Print the aggregated overview.
pub async fn overview(store: &SessionStore) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;
    let metrics = store.client().overview_metrics(&token, &tenant_id).await?;

    println!("Overview for {tenant_id}");
    println!("  customers:           {}", metrics.total_customers);
    println!("  orders:              {}", metrics.total_orders);
    println!("  products:            {}", metrics.total_products);
    println!("  revenue:             {:.2}", metrics.total_revenue);
    println!("  average order value: {:.2}", metrics.average_order_value);
    match metrics.last_sync_at {
        Some(at) => println!("  last sync:           {}", at.to_rfc3339()),
        None => println!("  last sync:           never"),
    }
    Ok(())
}

/// Print the per-day order series for a date range.
pub async fn orders(
    store: &SessionStore,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;

    let today = Utc::now().date_naive();
    let to = to.map_or(Ok(today), parse_date)?;
    let from = from.map_or_else(|| Ok(to - Duration::days(DEFAULT_RANGE_DAYS)), parse_date)?;

    let points = store
        .client()
        .order_metrics(&token, &tenant_id, from, to)
        .await?;

    if points.is_empty() {
        println!("No orders between {from} and {to}");
        return Ok(());
    }

    println!("{:<12} {:>8} {:>12}", "date", "orders", "revenue");
    for point in &points {
        println!(
            "{:<12} {:>8} {:>12.2}",
            point.date, point.orders, point.revenue
        );
    }
    Ok(())
}

/// Print the highest-spending customers.
pub async fn customers(store: &SessionStore, limit: u32) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;
    let customers = store
        .client()
        .top_customers(&token, &tenant_id, limit)
        .await?;

    if customers.is_empty() {
        println!("No customers synced yet");
        return Ok(());
    }

    println!("{:<24} {:<32} {:>12}", "name", "email", "spent");
    for customer in &customers {
        println!(
            "{:<24} {:<32} {:>12.2}",
            customer.name, customer.email, customer.total_spent
        );
    }
    Ok(())
}

/// Print the most recent orders.
pub async fn recent(store: &SessionStore, limit: u32) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;
    let orders = store
        .client()
        .recent_orders(&token, &tenant_id, limit)
        .await?;

    if orders.is_empty() {
        println!("No recent orders");
        return Ok(());
    }

    println!(
        "{:<12} {:>10} {:<4} {:<8} {}",
        "order", "total", "cur", "status", "date"
    );
    for order in &orders {
        println!(
            "{:<12} {:>10.2} {:<4} {:<8} {}",
            order.order_number,
            order.total_price,
            order.currency,
            order.status,
            order.date.to_rfc3339()
        );
    }
    Ok(())
}
