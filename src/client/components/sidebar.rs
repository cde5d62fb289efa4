use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaBox, FaCalendarDay, FaCartShopping, FaFolder, FaGift, FaHouse, FaLayerGroup, FaTicket,
};
use dioxus_free_icons::Icon;

use crate::{
    client::{router::Route, store::UserState},
    model::reference::ItemKind,
};

#[component]
fn NavLink(to: Route, label: &'static str, children: Element) -> Element {
    rsx!(
        li {
            Link { to: to, class: "flex items-center gap-3",
                {children}
                span { "{label}" }
            }
        }
    )
}

/// Navigation. Catalog screens are only listed for admins; order handlers see
/// the daily orders screen alone.
#[component]
pub fn Sidebar() -> Element {
    let user_store = use_context::<Signal<UserState>>();
    let user = user_store.read();

    rsx!(
        aside { class: "w-64 min-h-screen bg-base-200 flex flex-col",
            div { class: "p-6 flex items-baseline gap-2",
                p { class: "text-2xl font-bold",
                    "Blossom Admin"
                }
                p { class: "text-xs",
                    "v0.1.0-alpha.1"
                }
            }
            if !user.fetched {
                div { class: "px-6 flex flex-col gap-2",
                    div { class: "skeleton h-6 w-40" }
                    div { class: "skeleton h-6 w-32" }
                }
            } else {
                ul { class: "menu w-full flex-1",
                    if user.is_admin() {
                        NavLink { to: Route::Home {}, label: "Dashboard",
                            Icon { width: 16, height: 16, icon: FaHouse }
                        }
                        li { class: "menu-title", "Catalog" }
                        NavLink { to: Route::Products {}, label: "Products",
                            Icon { width: 16, height: 16, icon: FaBox }
                        }
                        NavLink { to: Route::Addons {}, label: "Addons",
                            Icon { width: 16, height: 16, icon: FaGift }
                        }
                        li { class: "menu-title", "Additionals" }
                        for kind in ItemKind::ALL {
                            NavLink {
                                to: Route::ReferenceItems { kind: kind.resource().to_string() },
                                label: kind.title(),
                                Icon { width: 16, height: 16, icon: FaFolder }
                            }
                        }
                        NavLink { to: Route::Coupons {}, label: "Coupons",
                            Icon { width: 16, height: 16, icon: FaTicket }
                        }
                    }
                    li { class: "menu-title", "Orders" }
                    if user.is_admin() {
                        NavLink { to: Route::AllOrders {}, label: "All Orders",
                            Icon { width: 16, height: 16, icon: FaLayerGroup }
                        }
                    }
                    NavLink { to: Route::DailyOrders {}, label: "Daily Orders",
                        Icon { width: 16, height: 16, icon: FaCalendarDay }
                    }
                }
            }
            div { class: "p-4 border-t border-base-300 flex items-center gap-2 text-sm",
                Icon { width: 16, height: 16, icon: FaCartShopping }
                if let Some(email) = user.user.as_ref().and_then(|u| u.email.clone()) {
                    span { "{email}" }
                } else {
                    span { "Not signed in" }
                }
            }
        }
    )
}
