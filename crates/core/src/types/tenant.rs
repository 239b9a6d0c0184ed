//! Tenant and operator identity view models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::TenantId;
use super::status::TenantStatus;

/// Suffix stripped from shop domains when deriving a display name.
const SHOP_DOMAIN_SUFFIX: &str = ".myshopify.com";

/// One onboarded storefront the operator monitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Stable backend-assigned identifier.
    pub id: TenantId,
    /// Human-readable label, usually derived from the shop domain.
    pub name: String,
    /// Canonical shop domain (e.g., `acme-store.myshopify.com`).
    pub domain: String,
    /// Current synchronization status.
    pub status: TenantStatus,
    /// Timestamp of the most recent successful synchronization.
    pub last_sync: Option<DateTime<Utc>>,
    /// Optional contact address for the storefront.
    pub email: Option<String>,
}

/// Display identity of the logged-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Login email address.
    pub email: Email,
    /// Display name; derived from the email local part when the backend
    /// supplies none.
    pub name: String,
}

impl SessionUser {
    /// Build an identity from a login email, deriving the display name from
    /// the local part.
    #[must_use]
    pub fn from_email(email: Email) -> Self {
        let name = email.local_part().to_owned();
        Self { email, name }
    }
}

/// Derive a display name from a raw shop domain.
///
/// Strips a trailing `.myshopify.com` (case-insensitive), replaces `-` and
/// `_` with spaces, and uppercases the first character of every word, where
/// a word starts at the beginning of the string or after any
/// non-alphanumeric character. Dots stay in place, so `"acme.shop"` becomes
/// `"Acme.Shop"`.
///
/// ```
/// use storepulse_core::tenant_name_from_domain;
///
/// assert_eq!(tenant_name_from_domain("acme-store.myshopify.com"), "Acme Store");
/// assert_eq!(tenant_name_from_domain("plain_shop"), "Plain Shop");
/// ```
#[must_use]
pub fn tenant_name_from_domain(domain: &str) -> String {
    let stripped = if domain
        .to_ascii_lowercase()
        .ends_with(SHOP_DOMAIN_SUFFIX)
    {
        domain
            .get(..domain.len() - SHOP_DOMAIN_SUFFIX.len())
            .unwrap_or(domain)
    } else {
        domain
    };

    let mut name = String::with_capacity(stripped.len());
    let mut at_boundary = true;
    for ch in stripped.chars() {
        let ch = if matches!(ch, '-' | '_') { ' ' } else { ch };
        if at_boundary {
            name.extend(ch.to_uppercase());
        } else {
            name.push(ch);
        }
        at_boundary = !ch.is_alphanumeric();
    }
    name
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_strips_shopify_suffix() {
        assert_eq!(
            tenant_name_from_domain("acme-store.myshopify.com"),
            "Acme Store"
        );
    }

    #[test]
    fn test_name_suffix_case_insensitive() {
        assert_eq!(
            tenant_name_from_domain("acme.MyShopify.Com"),
            "Acme"
        );
    }

    #[test]
    fn test_name_underscores_become_spaces() {
        assert_eq!(tenant_name_from_domain("north_wind_trading"), "North Wind Trading");
    }

    #[test]
    fn test_name_without_suffix() {
        assert_eq!(tenant_name_from_domain("standalone"), "Standalone");
    }

    #[test]
    fn test_name_keeps_double_separators_as_spaces() {
        assert_eq!(tenant_name_from_domain("a--b"), "A  B");
    }

    #[test]
    fn test_name_uppercases_after_dot() {
        assert_eq!(tenant_name_from_domain("acme.shop"), "Acme.Shop");
    }

    #[test]
    fn test_name_digits_do_not_start_words() {
        // A letter following a digit sits inside the same word.
        assert_eq!(tenant_name_from_domain("shop2go"), "Shop2go");
        assert_eq!(tenant_name_from_domain("24-seven"), "24 Seven");
    }

    #[test]
    fn test_session_user_from_email() {
        let user = SessionUser::from_email(Email::parse("ada@example.com").unwrap());
        assert_eq!(user.name, "ada");
        assert_eq!(user.email.as_str(), "ada@example.com");
    }
}
