//! Product catalog commands for the selected tenant.

use storepulse_client::dto::CreateProductRequest;
use storepulse_session::SessionStore;

use super::CommandError;

/// Print the synced product catalog.
pub async fn list(store: &SessionStore) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;
    let products = store.client().products(&token, &tenant_id).await?;

    if products.is_empty() {
        println!("No products synced yet");
        return Ok(());
    }

    println!("{:<36} {:<32} {:>10}", "id", "title", "price");
    for product in &products {
        println!(
            "{:<36} {:<32} {:>10.2}",
            product.id.as_str(),
            product.title,
            product.price
        );
    }
    Ok(())
}

/// Create a product in the selected tenant's catalog.
pub async fn create(
    store: &SessionStore,
    title: String,
    price: f64,
    shop_product_id: Option<i64>,
) -> Result<(), CommandError> {
    let (token, tenant_id) = super::require_tenant(store).await?;
    let product = store
        .client()
        .create_product(
            &token,
            &tenant_id,
            CreateProductRequest {
                title,
                price,
                shop_product_id,
            },
        )
        .await?;

    println!("Created {} ({})", product.title, product.id);
    Ok(())
}
