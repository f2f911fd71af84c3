//! Per-role navigation menus.
//!
//! Menus are filtered through the [`RoutePolicy`] before they are handed
//! out, so a menu never links to a page its audience would be bounced from.

use serde::{Deserialize, Serialize};

use storefront_entity::user::Role;

use super::table::RoutePolicy;

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link text.
    pub label: String,
    /// Target path.
    pub href: String,
    /// Icon name understood by the front end.
    pub icon: String,
}

impl NavItem {
    fn new(label: &str, href: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Navigation menus keyed by audience.
#[derive(Debug, Clone)]
pub struct Navigation {
    admin: Vec<NavItem>,
    customer: Vec<NavItem>,
    guest: Vec<NavItem>,
}

impl Navigation {
    /// Builds navigation from explicit menus.
    pub fn new(admin: Vec<NavItem>, customer: Vec<NavItem>, guest: Vec<NavItem>) -> Self {
        Self {
            admin,
            customer,
            guest,
        }
    }

    /// Returns the menu for `role`, keeping only links the role may open.
    pub fn for_role(&self, policy: &RoutePolicy, role: Option<Role>) -> Vec<NavItem> {
        let menu = match role {
            Some(Role::Admin) => &self.admin,
            Some(Role::User) => &self.customer,
            Some(Role::Guest) | None => &self.guest,
        };
        menu.iter()
            .filter(|item| policy.can_access(role, &item.href))
            .cloned()
            .collect()
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(
            vec![
                NavItem::new("Dashboard", "/admin/dashboard", "LayoutGrid"),
                NavItem::new("Inventory", "/admin/products", "Package"),
                NavItem::new("Add Product", "/admin/addproducts", "PlusCircle"),
                NavItem::new("Orders", "/admin/orders", "List"),
                NavItem::new("Customers", "/admin/customers", "Users"),
                NavItem::new("Settings", "/admin/settings", "Settings"),
            ],
            vec![
                NavItem::new("Shop", "/", "Store"),
                NavItem::new("My Cart", "/cart", "ShoppingBag"),
                NavItem::new("My Orders", "/account/orders", "PackageCheck"),
                NavItem::new("Settings", "/account/settings", "Settings"),
            ],
            vec![
                NavItem::new("Shop", "/", "Store"),
                NavItem::new("Login", "/auth/sign-in", "LogIn"),
                NavItem::new("Register", "/auth/sign-up", "UserPlus"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::config::AccessConfig;

    fn policy() -> RoutePolicy {
        RoutePolicy::from_config(&AccessConfig::default()).unwrap()
    }

    fn hrefs(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.href.as_str()).collect()
    }

    #[test]
    fn test_guest_menu_has_no_admin_links() {
        let items = Navigation::default().for_role(&policy(), None);
        assert_eq!(hrefs(&items), vec!["/", "/auth/sign-in", "/auth/sign-up"]);
    }

    #[test]
    fn test_admin_menu_is_complete() {
        let items = Navigation::default().for_role(&policy(), Some(Role::Admin));
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|i| i.href.starts_with("/admin/")));
    }

    #[test]
    fn test_menu_filtered_through_policy() {
        let policy = RoutePolicy::new(
            [("/account/settings", Role::Admin), ("/account", Role::User)],
            ["/admin"],
        )
        .unwrap();
        let items = Navigation::default().for_role(&policy, Some(Role::User));
        assert_eq!(hrefs(&items), vec!["/", "/cart", "/account/orders"]);
    }

    #[test]
    fn test_misplaced_admin_link_is_dropped_for_guests() {
        let navigation = Navigation::new(
            Vec::new(),
            Vec::new(),
            vec![
                NavItem::new("Shop", "/", "Store"),
                NavItem::new("Inventory", "/admin/products", "Package"),
            ],
        );
        let items = navigation.for_role(&policy(), None);
        assert_eq!(hrefs(&items), vec!["/"]);
    }
}
