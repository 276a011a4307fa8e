use cart::CartItem;
use catalog::{Catalog, Location};
use foundation::LocationId;
use i18n::Strings;
use maud::{Markup, html};

use crate::action::Action;
use crate::toasts::Toast;

fn cart_toggle_icon(in_cart: bool) -> &'static str {
    if in_cart {
        "fas fa-trash-alt"
    } else {
        "fas fa-cart-plus"
    }
}

fn cart_toggle_label(strings: &Strings, in_cart: bool) -> &'static str {
    if in_cart {
        strings.remove_from_cart
    } else {
        strings.add_to_cart
    }
}

fn maps_link(strings: &Strings, url: &str) -> Markup {
    html! {
        a.maps-link href=(url) target="_blank" rel="noopener noreferrer" {
            i class="fas fa-map-marker-alt" {}
            " " (strings.view_on_map)
        }
    }
}

/// Marker popup. The cart button flips between add and remove.
pub fn popup(strings: &Strings, loc: &Location, in_cart: bool) -> Markup {
    let toggle = Action::ToggleCart(loc.id);
    html! {
        div.location-popup data-id=(loc.id) {
            h3 { (loc.name) }
            @if let Some(src) = &loc.image_url {
                img.popup-image src=(src) alt=(loc.name) loading="lazy";
            }
            p.popup-visitors {
                strong { (strings.visitors_label) ": " }
                (loc.visitors)
            }
            p.popup-description { (loc.description) }
            p.popup-facing {
                strong { (strings.facing_label) ": " }
                (loc.facing_to)
            }
            div.popup-actions {
                button.popup-cart-btn.remove[in_cart].add[!in_cart] type="button"
                    data-action=(toggle.name()) data-id=[toggle.id_attr()] {
                    i class=(cart_toggle_icon(in_cart)) {}
                    " " (cart_toggle_label(strings, in_cart))
                }
                @if let Some(url) = &loc.google_maps_url {
                    (maps_link(strings, url))
                }
            }
        }
    }
}

/// Sidebar entry. The maps link sits beside the clickable block so opening
/// it does not also select the location.
pub fn sidebar_entry(strings: &Strings, loc: &Location, selected: bool, in_cart: bool) -> Markup {
    let select = Action::SelectLocation(loc.id);
    html! {
        div.location-item.active[selected].in-cart[in_cart] id=(sidebar_element_id(loc.id)) {
            div.location-select data-action=(select.name()) data-id=[select.id_attr()] {
                h4 { (loc.name) }
                p.location-visitors {
                    i class="fas fa-users" {}
                    " " (loc.visitors)
                }
                p.location-facing { (strings.facing_label) ": " (loc.facing_to) }
            }
            @if let Some(url) = &loc.google_maps_url {
                (maps_link(strings, url))
            }
        }
    }
}

pub fn sidebar_element_id(id: LocationId) -> String {
    format!("location-item-{id}")
}

pub fn locations_list(
    strings: &Strings,
    catalog: &Catalog,
    selected: Option<LocationId>,
    in_cart: &dyn Fn(LocationId) -> bool,
) -> Markup {
    html! {
        @for loc in catalog.iter() {
            (sidebar_entry(strings, loc, selected == Some(loc.id), in_cart(loc.id)))
        }
    }
}

/// Rows of the cart panel. Thumbnails only for items that have an image.
pub fn cart_items(strings: &Strings, items: &[CartItem]) -> Markup {
    html! {
        @for item in items {
            @let remove = Action::RemoveFromCart(item.id);
            div.cart-item data-id=(item.id) {
                @if let Some(src) = &item.image_url {
                    img.cart-item-image src=(src) alt=(item.name);
                }
                div.cart-item-info {
                    h4 { (item.name) }
                    p { (item.visitors) }
                }
                button.cart-item-remove type="button" title=(strings.remove_item)
                    data-action=(remove.name()) data-id=[remove.id_attr()] {
                    i class="fas fa-times" {}
                }
            }
        }
    }
}

pub fn cart_empty(strings: &Strings) -> Markup {
    html! {
        p.cart-empty-message { (strings.cart_empty) }
    }
}

/// Content of the floating add/remove button.
pub fn floating_button(strings: &Strings, in_cart: bool) -> Markup {
    html! {
        i class=(cart_toggle_icon(in_cart)) {}
        span { (cart_toggle_label(strings, in_cart)) }
    }
}

pub fn notifications(toasts: &[Toast]) -> Markup {
    html! {
        @for t in toasts {
            @let dismiss = Action::DismissToast(t.id);
            div class=(t.kind.css_class()) role="status" {
                i class=(t.kind.icon()) {}
                span { (t.text) }
                button.notification-close type="button"
                    data-action=(dismiss.name()) data-id=[dismiss.id_attr()] {
                    "\u{00d7}"
                }
            }
        }
    }
}

pub fn order_summary(strings: &Strings, items: &[CartItem]) -> Markup {
    html! {
        div.order-summary {
            h4 { (strings.order_summary_heading) " (" (items.len()) ")" }
            ul {
                @for item in items {
                    li {
                        strong { (item.name) }
                        " (" (item.visitors) ")"
                    }
                }
            }
        }
    }
}

/// Inline replacement for the map container when the map cannot start.
pub fn map_error(strings: &Strings) -> Markup {
    html! {
        div.map-error {
            i class="fas fa-exclamation-triangle" {}
            p { (strings.map_load_error) }
        }
    }
}

pub fn pdf_error(strings: &Strings) -> Markup {
    html! {
        div.pdf-error-message {
            i class="fas fa-file-pdf" {}
            p { (strings.pdf_error) }
        }
    }
}

pub fn pdf_page_info(label: &str) -> Markup {
    html! { (label) }
}

/// Labels of the viewer's previous and next buttons.
pub fn pdf_nav_buttons(strings: &Strings) -> (Markup, Markup) {
    let prev = html! {
        i class="fas fa-chevron-left" {}
        " " (strings.pdf_previous)
    };
    let next = html! {
        (strings.pdf_next) " "
        i class="fas fa-chevron-right" {}
    };
    (prev, next)
}
