//! Session and tenant management commands.

use storepulse_client::conversions::convert_tenant;
use storepulse_core::{Email, TenantId, TenantStatus};
use storepulse_session::SessionStore;

use super::CommandError;

/// Log in, persist the session, and print the fetched tenants.
pub async fn login(
    store: &SessionStore,
    email: &str,
    password: Option<String>,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    store.login(&email, &password).await?;

    let state = store.snapshot().await;
    let name = state.user.map_or_else(String::new, |u| u.name);
    println!("Logged in as {name} ({} tenants)", state.tenants.len());
    tenants_list(store).await;
    Ok(())
}

/// Clear the session.
pub async fn logout(store: &SessionStore) {
    store.logout().await;
    println!("Logged out");
}

/// Print the known tenants, marking the selected one.
pub async fn tenants_list(store: &SessionStore) {
    let state = store.snapshot().await;
    if state.tenants.is_empty() {
        println!("No tenants onboarded yet");
        return;
    }

    for tenant in &state.tenants {
        let marker = if state.selected_tenant_id.as_ref() == Some(&tenant.id) {
            "*"
        } else {
            " "
        };
        let last_sync = tenant
            .last_sync
            .map_or_else(|| "never".to_owned(), |t| t.to_rfc3339());
        println!(
            "{marker} {:<36} {:<24} {:<10} last sync: {last_sync}",
            tenant.id.as_str(),
            tenant.name,
            tenant.status.as_str()
        );
    }
}

/// Onboard a new tenant and add it to the session.
pub async fn tenants_add(
    store: &SessionStore,
    shop_domain: &str,
    access_token: &str,
    contact_email: &str,
) -> Result<(), CommandError> {
    let token = store.token().await?;
    let record = store
        .client()
        .onboard_tenant(&token, shop_domain, access_token, contact_email)
        .await?;
    let tenant = convert_tenant(record);
    let id = tenant.id.clone();

    store.add_tenant(tenant).await;
    println!("Onboarded {shop_domain} as {id}");
    println!("Run 'storepulse sync {id}' to start the first ingestion");
    Ok(())
}

/// Remove a tenant from the session.
pub async fn tenants_remove(store: &SessionStore, id: &str) {
    store.remove_tenant(&TenantId::new(id)).await;
    println!("Removed {id}");
}

/// Select the tenant subsequent commands operate on.
pub async fn tenants_switch(store: &SessionStore, id: &str) -> Result<(), CommandError> {
    let id = TenantId::new(id);
    let known = store.snapshot().await.tenants.iter().any(|t| t.id == id);
    if !known {
        tracing::warn!(tenant_id = %id, "selecting a tenant not present in the session");
    }

    store.set_selected_tenant(id.clone()).await;
    println!("Selected {id}");
    Ok(())
}

/// Trigger a backend sync and mark the tenant as syncing locally.
pub async fn sync(store: &SessionStore, tenant_id: Option<&str>) -> Result<(), CommandError> {
    let tenant_id = match tenant_id {
        Some(id) => TenantId::new(id),
        None => super::require_tenant(store).await?.1,
    };

    let token = store.snapshot().await.token;
    store
        .client()
        .trigger_sync(token.as_deref(), &tenant_id)
        .await?;
    store
        .update_tenant_status(&tenant_id, TenantStatus::Syncing)
        .await;

    println!("Sync triggered for {tenant_id}");
    Ok(())
}
