//! DTO to view-model conversion functions.
//!
//! All derivation rules live here so the default policy stays auditable in
//! one place: tenant display names, connected/syncing status, customer
//! display names, currency and status defaults.

use storepulse_core::{Tenant, TenantStatus, tenant_name_from_domain};

use crate::dto::{
    MetricsOverviewDto, OrderMetricsPointDto, ProductDto, RecentOrderDto, TenantRecord,
    TopCustomerDto,
};
use crate::views::{
    DEFAULT_CURRENCY, OrderMetric, OverviewMetrics, ProductRecord, RECENT_ORDER_STATUS,
    RecentOrder, TopCustomer,
};

/// Map a backend tenant record into the [`Tenant`] view model.
///
/// Status is `Connected` iff the backend reports a last sync; `last_sync`
/// falls back to the creation time so freshly onboarded tenants still show
/// a timestamp.
#[must_use]
pub fn convert_tenant(record: TenantRecord) -> Tenant {
    let status = if record.last_sync_at.is_some() {
        TenantStatus::Connected
    } else {
        TenantStatus::Syncing
    };

    Tenant {
        id: record.id,
        name: tenant_name_from_domain(&record.shop_domain),
        domain: record.shop_domain,
        status,
        last_sync: record.last_sync_at.or(Some(record.created_at)),
        email: record.contact_email,
    }
}

/// Compute the overview view model, including the average order value.
#[must_use]
pub fn convert_overview(dto: MetricsOverviewDto) -> OverviewMetrics {
    let average_order_value = if dto.order_count > 0 {
        #[allow(clippy::cast_precision_loss)]
        let orders = dto.order_count as f64;
        dto.total_revenue / orders
    } else {
        0.0
    };

    OverviewMetrics {
        total_customers: dto.customer_count,
        total_orders: dto.order_count,
        total_products: dto.product_count,
        total_revenue: dto.total_revenue,
        average_order_value,
        last_sync_at: dto.last_sync_at,
    }
}

/// Rename one order-series point into chart-friendly field names.
#[must_use]
pub fn convert_order_point(dto: OrderMetricsPointDto) -> OrderMetric {
    OrderMetric {
        date: dto.date,
        orders: dto.order_count,
        revenue: dto.total_sales,
    }
}

/// Derive the display name for a ranked customer.
///
/// Space-joins the non-empty parts of `firstName`/`lastName`; falls back to
/// the email address when both are absent.
#[must_use]
pub fn convert_top_customer(dto: TopCustomerDto) -> TopCustomer {
    let name = [dto.first_name.as_deref(), dto.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let name = if name.is_empty() {
        dto.email.clone()
    } else {
        name
    };

    TopCustomer {
        id: dto.id,
        name,
        email: dto.email,
        total_spent: dto.total_spent,
    }
}

/// Fill feed defaults for one recent order.
#[must_use]
pub fn convert_recent_order(dto: RecentOrderDto) -> RecentOrder {
    RecentOrder {
        id: dto.id,
        order_number: dto.order_number,
        total_price: dto.total_price,
        currency: dto
            .currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        date: dto.created_at,
        status: RECENT_ORDER_STATUS.to_owned(),
    }
}

/// Map one catalog product.
#[must_use]
pub fn convert_product(dto: ProductDto) -> ProductRecord {
    ProductRecord {
        id: dto.id,
        shop_product_id: dto.shop_product_id,
        title: dto.title,
        price: dto.price,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use storepulse_core::{CustomerId, OrderId, TenantId};

    use super::*;

    fn tenant_record(last_sync_at: Option<chrono::DateTime<Utc>>) -> TenantRecord {
        TenantRecord {
            id: TenantId::new("t-1"),
            shop_domain: "acme-store.myshopify.com".to_owned(),
            contact_email: Some("owner@acme.test".to_owned()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            last_sync_at,
        }
    }

    #[test]
    fn test_tenant_with_last_sync_is_connected() {
        let synced_at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let tenant = convert_tenant(tenant_record(Some(synced_at)));
        assert_eq!(tenant.status, TenantStatus::Connected);
        assert_eq!(tenant.last_sync, Some(synced_at));
    }

    #[test]
    fn test_tenant_without_last_sync_is_syncing() {
        let tenant = convert_tenant(tenant_record(None));
        assert_eq!(tenant.status, TenantStatus::Syncing);
        // Falls back to the creation time.
        assert_eq!(
            tenant.last_sync,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_tenant_name_derived_from_domain() {
        let tenant = convert_tenant(tenant_record(None));
        assert_eq!(tenant.name, "Acme Store");
        assert_eq!(tenant.domain, "acme-store.myshopify.com");
    }

    #[test]
    fn test_overview_average_order_value() {
        let overview = convert_overview(MetricsOverviewDto {
            customer_count: 10,
            order_count: 4,
            product_count: 7,
            total_revenue: 100.0,
            last_sync_at: None,
        });
        assert!((overview.average_order_value - 25.0).abs() < f64::EPSILON);
        assert!((overview.total_revenue - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overview_zero_orders_means_zero_aov() {
        let overview = convert_overview(MetricsOverviewDto {
            customer_count: 10,
            order_count: 0,
            product_count: 0,
            total_revenue: 100.0,
            last_sync_at: None,
        });
        assert!((overview.average_order_value - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_customer_full_name() {
        let customer = convert_top_customer(TopCustomerDto {
            id: CustomerId::new("c-1"),
            email: "x@y.com".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            total_spent: 12.5,
            updated_at: None,
        });
        assert_eq!(customer.name, "Ada Lovelace");
    }

    #[test]
    fn test_top_customer_falls_back_to_email() {
        let customer = convert_top_customer(TopCustomerDto {
            id: CustomerId::new("c-2"),
            email: "x@y.com".to_owned(),
            first_name: None,
            last_name: None,
            total_spent: 0.0,
            updated_at: None,
        });
        assert_eq!(customer.name, "x@y.com");
    }

    #[test]
    fn test_top_customer_single_name_part() {
        let customer = convert_top_customer(TopCustomerDto {
            id: CustomerId::new("c-3"),
            email: "x@y.com".to_owned(),
            first_name: None,
            last_name: Some("Lovelace".to_owned()),
            total_spent: 0.0,
            updated_at: None,
        });
        assert_eq!(customer.name, "Lovelace");
    }

    #[test]
    fn test_recent_order_defaults() {
        let order = convert_recent_order(RecentOrderDto {
            id: OrderId::new("o-1"),
            order_number: "#1001".to_owned(),
            total_price: 49.99,
            currency: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        });
        assert_eq!(order.currency, "USD");
        assert_eq!(order.status, "synced");
        assert!((order.total_price - 49.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recent_order_keeps_currency() {
        let order = convert_recent_order(RecentOrderDto {
            id: OrderId::new("o-2"),
            order_number: "#1002".to_owned(),
            total_price: 10.0,
            currency: Some("EUR".to_owned()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        });
        assert_eq!(order.currency, "EUR");
    }
}
