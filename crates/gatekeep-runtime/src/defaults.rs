//! Built-in menu catalog, routes and accounts.
//!
//! Used when no configuration layer supplies its own lists.

use crate::guard::{RouteDef, RouteMeta};
use crate::menu::MenuEntry;
use crate::signin::Account;
use gatekeep_types::{PermissionCode, Role};

/// The 13-entry admin sidebar, in display order.
#[must_use]
pub fn menu_entries() -> Vec<MenuEntry> {
    use PermissionCode as P;

    vec![
        MenuEntry::new("dashboard", "Dashboard", "/")
            .with_icon("Odometer")
            .requires([P::DASHBOARD_VIEW]),
        MenuEntry::new("products", "Products", "/products/manage")
            .with_icon("Goods")
            .requires([P::PRODUCT_VIEW]),
        MenuEntry::new("orders", "Orders", "/orders")
            .with_icon("List")
            .requires([P::ORDER_VIEW]),
        MenuEntry::new("users", "Users", "/user-center")
            .with_icon("User")
            .requires([P::USER_VIEW]),
        MenuEntry::new("sales", "Sales Reports", "/sales")
            .with_icon("TrendCharts")
            .requires([P::DASHBOARD_VIEW, P::ORDER_VIEW]),
        MenuEntry::new("promotions", "Promotions", "/promotion-center")
            .with_icon("Discount")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("content", "Content", "/content-management")
            .with_icon("Document")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("purchase", "Purchasing", "/purchase-center")
            .with_icon("ShoppingCart")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("warehouse", "Warehouse", "/wms-warehouse")
            .with_icon("OfficeBuilding")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("dispatch", "Dispatch", "/dispatch-center")
            .with_icon("Van")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("logistics", "Logistics", "/logistics-center")
            .with_icon("Location")
            .requires([P::SETTINGS_VIEW]),
        MenuEntry::new("system", "System", "/permission-management")
            .with_icon("Setting")
            .requires([P::SYSTEM_VIEW]),
        MenuEntry::new("settings", "Settings", "/settings")
            .with_icon("UserFilled")
            .requires([P::SETTINGS_VIEW]),
    ]
}

/// Built-in route table.
///
/// `Login`, `Forbidden` and `About` are public; every other route needs a
/// signed-in principal.
#[must_use]
pub fn routes() -> Vec<RouteDef> {
    use PermissionCode as P;

    let public = RouteMeta::public;
    let protected = RouteMeta::protected;

    vec![
        RouteDef::new("Login", "/login", public().with_title("Sign In")),
        RouteDef::new("Forbidden", "/403", public().with_title("Access Denied")),
        RouteDef::new("Home", "/", protected().with_title("Dashboard")),
        RouteDef::new(
            "ProductManage",
            "/products/manage",
            protected().with_title("Products").requires(P::PRODUCT_VIEW),
        ),
        RouteDef::new(
            "OrderList",
            "/orders",
            protected().with_title("Orders").requires(P::ORDER_VIEW),
        ),
        RouteDef::new("About", "/about", public().with_title("About")),
        RouteDef::new(
            "PermissionManagement",
            "/permission-management",
            protected()
                .with_title("Permission Management")
                .requires(P::USER_VIEW),
        ),
        RouteDef::new(
            "SalesDashboard",
            "/sales",
            protected()
                .with_title("Sales Dashboard")
                .requires(vec![P::DASHBOARD_VIEW, P::ORDER_VIEW]),
        ),
        RouteDef::new("TestData", "/test-data", protected().with_title("Test Data")),
        RouteDef::new(
            "UserCenter",
            "/user-center",
            protected().with_title("User Center").requires(P::USER_VIEW),
        ),
        RouteDef::new(
            "PromotionCenter",
            "/promotion-center",
            protected()
                .with_title("Promotion Center")
                .requires(P::SETTINGS_VIEW),
        ),
        RouteDef::new(
            "ContentManagement",
            "/content-management",
            protected().with_title("Content Management"),
        ),
        RouteDef::new(
            "PurchaseCenter",
            "/purchase-center",
            protected().with_title("Purchase Center"),
        ),
        RouteDef::new(
            "WmsWarehouse",
            "/wms-warehouse",
            protected().with_title("Warehouse"),
        ),
        RouteDef::new(
            "DispatchCenter",
            "/dispatch-center",
            protected().with_title("Dispatch Center"),
        ),
        RouteDef::new(
            "LogisticsCenter",
            "/logistics-center",
            protected()
                .with_title("Logistics Center")
                .requires(P::SETTINGS_VIEW),
        ),
        RouteDef::new(
            "PermissionDemo",
            "/permission-demo",
            protected()
                .with_title("Permission Demo")
                .requires(P::DASHBOARD_VIEW),
        ),
    ]
}

/// Built-in credential directory: a single administrator.
#[must_use]
pub fn accounts() -> Vec<Account> {
    vec![Account::new("admin", "123456", Role::Admin).with_display_name("Administrator")]
}
