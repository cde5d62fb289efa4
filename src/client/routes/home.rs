use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBoxOpen, FaCalendarDay, FaGift, FaListCheck, FaTicket};
use dioxus_free_icons::Icon;

use crate::client::{
    components::{LiveIndicator, Page},
    router::Route,
    store::UserState,
};

#[component]
fn ShortcutCard(to: Route, title: &'static str, description: &'static str, children: Element) -> Element {
    rsx!(
        Link { to, class: "card bg-base-200 hover:bg-base-300 transition-colors",
            div { class: "card-body flex-row items-center gap-4",
                {children}
                div {
                    h2 { class: "card-title", "{title}" }
                    p { class: "text-sm opacity-70", "{description}" }
                }
            }
        }
    )
}

#[component]
pub fn Home() -> Element {
    let user = use_context::<Signal<UserState>>();
    let is_admin = user.read().is_admin();
    let greeting = user
        .read()
        .user
        .as_ref()
        .and_then(|u| u.email.as_deref())
        .map(|email| format!("Signed in as {}", email))
        .unwrap_or_else(|| "Welcome".to_string());

    rsx!(
        Page { title: "Dashboard",
            actions: rsx!( LiveIndicator {} ),
            p { class: "text-lg", "{greeting}" }
            div { class: "grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4",
                ShortcutCard {
                    to: Route::DailyOrders {},
                    title: "Daily Orders",
                    description: "Paid orders for today, yesterday and this week.",
                    Icon { width: 28, height: 28, icon: FaCalendarDay }
                }
                if is_admin {
                    ShortcutCard {
                        to: Route::AllOrders {},
                        title: "All Orders",
                        description: "Every order with status, date and coupon filters.",
                        Icon { width: 28, height: 28, icon: FaListCheck }
                    }
                    ShortcutCard {
                        to: Route::Products {},
                        title: "Products",
                        description: "Bouquets, arrangements and their variations.",
                        Icon { width: 28, height: 28, icon: FaBoxOpen }
                    }
                    ShortcutCard {
                        to: Route::Addons {},
                        title: "Addons",
                        description: "Balloons, chocolates and cakes sold with products.",
                        Icon { width: 28, height: 28, icon: FaGift }
                    }
                    ShortcutCard {
                        to: Route::Coupons {},
                        title: "Coupons",
                        description: "Discount codes and special customer coupons.",
                        Icon { width: 28, height: 28, icon: FaTicket }
                    }
                }
            }
        }
    )
}
