//! Operator sales dashboard

use chrono::{Days, NaiveDate};
use shared::models::{DaySales, OrderStatus, SalesStats};

use crate::db::{ShopStore, StoreResult};

async fn day_sales(store: &dyn ShopStore, date: NaiveDate) -> StoreResult<DaySales> {
    Ok(DaySales {
        date,
        sales: store.completed_sales(Some(date)).await?,
    })
}

/// Build the dashboard for `today` (UTC)
pub async fn sales_stats(store: &dyn ShopStore, today: NaiveDate) -> StoreResult<SalesStats> {
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

    Ok(SalesStats {
        today: day_sales(store, today).await?,
        yesterday: day_sales(store, yesterday).await?,
        all_time: store.completed_sales(None).await?,
        active_orders: store.count_orders(OrderStatus::New).await?,
        units_in_stock: store.units_in_stock().await?,
    })
}

/// Parse an operator-entered day (`DD.MM.YYYY`)
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d.%m.%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("04.02.2026"),
            NaiveDate::from_ymd_opt(2026, 2, 4)
        );
        assert_eq!(parse_day(" 31.12.2025 "), NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(parse_day("2026-02-04"), None);
        assert_eq!(parse_day("31.02.2026"), None);
    }
}
