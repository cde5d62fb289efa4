use dioxus::prelude::*;

use crate::client::{
    components::DashboardLayout,
    routes::{
        Addons, AllOrders, Coupons, CreateAddon, CreateProduct, DailyOrders, EditAddon, EditProduct,
        Home, NotFound, OrderDetail, Products, ReferenceItems,
    },
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(DashboardLayout)]

    #[route("/")]
    Home {},

    #[nest("/orders")]

        #[route("/all-orders")]
        AllOrders {},

        #[route("/daily-orders")]
        DailyOrders {},

        #[route("/:id")]
        OrderDetail { id: i64 },

    #[end_nest]

    #[nest("/products")]

        #[route("/")]
        Products {},

        #[route("/create")]
        CreateProduct {},

        #[route("/edit/:id")]
        EditProduct { id: i64 },

    #[end_nest]

    #[nest("/addons")]

        #[route("/")]
        Addons {},

        #[route("/create")]
        CreateAddon {},

        #[route("/edit/:id")]
        EditAddon { id: i64 },

    #[end_nest]

    #[route("/coupons")]
    Coupons {},

    #[route("/items/:kind")]
    ReferenceItems { kind: String },

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
