use cart::{AddOutcome, CartStorage, CartStore, ToggleOutcome};
use catalog::Catalog;
use foundation::LocationId;
use i18n::{Locale, Strings, fill, strings};
use map::{MapBackend, MapRenderer, MapSurface, initialize_map};
use order::{OrderForm, build_order_email};
use runtime::Timers;
use ui::{Action, ToastKind, ToastStack, templates};

use crate::config::SiteConfig;
use crate::host::{Host, Slot};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    ExpireToasts,
    CompleteOrder,
}

/// Controller of the advertising map page.
///
/// Owns the catalog, the cart, the map renderer (and through it the
/// selection), the notifications and the deferred work. Every cart mutation
/// re-renders its dependents synchronously.
pub struct MapPage<H: Host, M: MapSurface, S: CartStorage> {
    host: H,
    locale: Locale,
    strings: &'static Strings,
    config: SiteConfig,
    catalog: Catalog,
    cart: CartStore<S>,
    map: Option<MapRenderer<M>>,
    toasts: ToastStack,
    timers: Timers<Deferred>,
}

impl<H: Host, M: MapSurface, S: CartStorage> MapPage<H, M, S> {
    /// Hydrates the cart from `storage`. The map is not created yet.
    pub fn new(host: H, catalog: Catalog, storage: S, config: SiteConfig) -> Self {
        let locale = catalog.locale();
        let cart = CartStore::hydrate(storage, &config.cart);
        tracing::debug!(
            locale = locale.tag(),
            locations = catalog.len(),
            cart = cart.len(),
            "map page created"
        );
        Self {
            host,
            locale,
            strings: strings(locale),
            config,
            catalog,
            cart,
            map: None,
            toasts: ToastStack::new(),
            timers: Timers::new(),
        }
    }

    /// Full page start: cart, map, then every dependent view.
    pub fn init<B: MapBackend<Surface = M>>(
        host: H,
        catalog: Catalog,
        storage: S,
        config: SiteConfig,
        backend: &mut B,
        container_id: &str,
    ) -> Self {
        let mut page = Self::new(host, catalog, storage, config);
        page.initialize_map(backend, container_id);
        page.render_all();
        page
    }

    /// Returns `false` (after writing the inline error) when the map cannot
    /// start; the rest of the page keeps working.
    pub fn initialize_map<B: MapBackend<Surface = M>>(
        &mut self,
        backend: &mut B,
        container_id: &str,
    ) -> bool {
        let cart = &self.cart;
        self.map = initialize_map(
            backend,
            container_id,
            self.locale,
            &self.catalog,
            &|id| cart.contains(id),
            &self.config.map,
        );
        self.map.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn map(&self) -> Option<&MapRenderer<M>> {
        self.map.as_ref()
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn selected(&self) -> Option<LocationId> {
        self.map.as_ref().and_then(|m| m.selected())
    }

    pub fn render_all(&mut self) {
        self.render_locations_list();
        self.update_cart_ui();
        self.render_floating_button();
        self.render_notifications();
        self.host.set_visible(Slot::OrderModal, false);
    }

    /// The only writer of the cart slots: badge, rows, empty state and the
    /// order button.
    pub fn update_cart_ui(&mut self) {
        let items = self.cart.items();
        self.host.patch(Slot::CartCount, &items.len().to_string());
        self.host.patch(
            Slot::CartItems,
            &templates::cart_items(self.strings, items).into_string(),
        );
        let empty = items.is_empty();
        if empty {
            self.host
                .patch(Slot::CartEmpty, &templates::cart_empty(self.strings).into_string());
        }
        self.host.set_visible(Slot::CartEmpty, empty);
        self.host.set_enabled(Slot::OrderButton, !empty);
    }

    pub fn render_locations_list(&mut self) {
        let cart = &self.cart;
        let selected = self.map.as_ref().and_then(|m| m.selected());
        let html = templates::locations_list(
            self.strings,
            &self.catalog,
            selected,
            &|id| cart.contains(id),
        )
        .into_string();
        self.host.patch(Slot::LocationsList, &html);
    }

    /// Hidden without a selection; otherwise reflects cart membership.
    pub fn render_floating_button(&mut self) {
        match self.selected() {
            Some(id) => {
                let html =
                    templates::floating_button(self.strings, self.cart.contains(id)).into_string();
                self.host.patch(Slot::FloatingCartButton, &html);
                self.host.set_visible(Slot::FloatingCartButton, true);
            }
            None => self.host.set_visible(Slot::FloatingCartButton, false),
        }
    }

    fn render_notifications(&mut self) {
        let html = templates::notifications(self.toasts.visible()).into_string();
        self.host.patch(Slot::Notifications, &html);
    }

    pub fn on_marker_click(&mut self, id: LocationId) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        if !map.select(id) {
            return;
        }
        self.host.highlight_sidebar(Some(id));
        self.render_floating_button();
    }

    /// Sidebar click: selects and pans the map to the location.
    pub fn select_location(&mut self, id: LocationId) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        if !map.focus(id) {
            return;
        }
        self.host.highlight_sidebar(Some(id));
        self.render_floating_button();
    }

    pub fn toggle_cart_item(&mut self, id: LocationId) {
        match self.cart.toggle(id, &self.catalog) {
            ToggleOutcome::Added(item) => {
                let text = fill(self.strings.notify_added, &[("name", &item.name)]);
                self.after_cart_change(Some(id));
                self.notify(ToastKind::Success, text);
            }
            ToggleOutcome::Removed(item) => {
                let text = fill(self.strings.notify_removed, &[("name", &item.name)]);
                self.after_cart_change(Some(id));
                self.notify(ToastKind::Info, text);
            }
            ToggleOutcome::Unknown => {
                tracing::debug!(%id, "toggle on unknown location ignored");
            }
        }
    }

    /// Adds without toggling; a second add warns instead.
    pub fn add_to_cart(&mut self, id: LocationId) {
        let Some(location) = self.catalog.get(id) else {
            tracing::debug!(%id, "add on unknown location ignored");
            return;
        };
        let name = location.name.clone();
        match self.cart.add(location) {
            AddOutcome::Added => {
                self.after_cart_change(Some(id));
                self.notify(
                    ToastKind::Success,
                    fill(self.strings.notify_added, &[("name", &name)]),
                );
            }
            AddOutcome::Duplicate => {
                self.notify(
                    ToastKind::Warning,
                    fill(self.strings.notify_duplicate, &[("name", &name)]),
                );
            }
        }
    }

    pub fn remove_from_cart(&mut self, id: LocationId) {
        let Some(item) = self.cart.remove(id) else {
            return;
        };
        self.after_cart_change(Some(id));
        self.notify(
            ToastKind::Info,
            fill(self.strings.notify_removed, &[("name", &item.name)]),
        );
    }

    /// Floating button: toggles the selected location.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected() {
            self.toggle_cart_item(id);
        }
    }

    /// Asks for confirmation, then empties the cart. Returns `true` when the
    /// cart was cleared. An empty cart is left alone without prompting.
    pub fn reset_cart(&mut self) -> bool {
        if self.cart.is_empty() {
            return false;
        }
        if !self.host.confirm(self.strings.reset_confirm) {
            return false;
        }
        self.cart.reset();
        self.after_cart_change(None);
        self.notify(ToastKind::Info, self.strings.notify_cart_cleared);
        true
    }

    pub fn open_order_modal(&mut self) -> bool {
        if self.cart.is_empty() {
            return false;
        }
        let html = templates::order_summary(self.strings, self.cart.items()).into_string();
        self.host.patch(Slot::OrderSummary, &html);
        self.host.set_visible(Slot::OrderModal, true);
        true
    }

    pub fn close_order_modal(&mut self) {
        self.host.set_visible(Slot::OrderModal, false);
    }

    /// Opens the mail client on the order and schedules the cart reset.
    /// Returns the `mailto:` URI.
    pub fn submit_order(&mut self, form: &OrderForm) -> Option<String> {
        if self.cart.is_empty() {
            tracing::warn!("order submitted with an empty cart");
            return None;
        }
        let email = build_order_email(self.locale, form, self.cart.items(), &self.config.order);
        let url = email.mailto_url();
        tracing::info!(
            items = self.cart.len(),
            recipient = %email.recipient,
            "order dispatched to mail client"
        );
        self.host.navigate(&url);
        self.defer(self.config.order.reset_delay_ms, Deferred::CompleteOrder);
        Some(url)
    }

    fn complete_order(&mut self) {
        self.cart.reset();
        self.close_order_modal();
        self.host.reset_form(Slot::OrderForm);
        self.after_cart_change(None);
        self.notify(ToastKind::Success, self.strings.notify_order_sent);
    }

    pub fn show_all_locations(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.show_all_locations();
        }
    }

    /// Back to the default view; drops the selection.
    pub fn center_map(&mut self) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        map.center_map();
        self.host.highlight_sidebar(None);
        self.render_floating_button();
    }

    pub fn handle_resize(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.handle_resize();
        }
    }

    pub fn notify(&mut self, kind: ToastKind, text: impl Into<String>) {
        let now = self.host.now();
        self.toasts.push(now, kind, text, &self.config.ui);
        self.render_notifications();
        self.defer(self.config.ui.toast_ttl_ms, Deferred::ExpireToasts);
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        if self.toasts.dismiss(id) {
            self.render_notifications();
        }
    }

    /// Runs every deferred task that is due.
    pub fn tick(&mut self) {
        let now = self.host.now();
        for task in self.timers.pop_due(now) {
            match task {
                Deferred::ExpireToasts => {
                    if self.toasts.expire(now) {
                        self.render_notifications();
                    }
                }
                Deferred::CompleteOrder => self.complete_order(),
            }
        }
    }

    /// Dispatches a delegated click. Returns `false` for actions this page
    /// does not handle.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleCart(id) => self.toggle_cart_item(id),
            Action::RemoveFromCart(id) => self.remove_from_cart(id),
            Action::SelectLocation(id) => self.select_location(id),
            Action::ToggleSelected => self.toggle_selected(),
            Action::ResetCart => {
                self.reset_cart();
            }
            Action::OpenOrder => {
                self.open_order_modal();
            }
            Action::CloseOrder => self.close_order_modal(),
            Action::ShowAll => self.show_all_locations(),
            Action::CenterMap => self.center_map(),
            Action::DismissToast(id) => self.dismiss_toast(id),
            Action::PdfPrevious
            | Action::PdfNext
            | Action::PdfZoomIn
            | Action::PdfZoomOut
            | Action::PdfZoomReset => return false,
        }
        true
    }

    /// Refreshes popups, cart slots, floating button and sidebar after a
    /// mutation of `changed` (or of everything when `None`).
    fn after_cart_change(&mut self, changed: Option<LocationId>) {
        let cart = &self.cart;
        if let Some(map) = self.map.as_mut() {
            match changed {
                Some(id) => map.refresh_marker(&self.catalog, id, cart.contains(id)),
                None => map.refresh_all(&self.catalog, &|id| cart.contains(id)),
            }
        }
        self.update_cart_ui();
        self.render_floating_button();
        self.render_locations_list();
    }

    fn defer(&mut self, delay_ms: u64, task: Deferred) {
        let now = self.host.now();
        self.timers.schedule(now, delay_ms, task);
        self.host.schedule_wake(delay_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::MapPage;
    use crate::config::SiteConfig;
    use crate::host::{RecordingHost, Slot};
    use cart::{CartItem, InMemoryCartStorage};
    use catalog::{Catalog, Location};
    use foundation::LocationId;
    use i18n::Locale;
    use map::{RecordingBackend, RecordingSurface, SurfaceCall};
    use order::OrderForm;
    use pretty_assertions::assert_eq;
    use ui::Action;

    type TestPage = MapPage<RecordingHost, RecordingSurface, InMemoryCartStorage>;

    fn loc(id: u32, name: &str, visitors: &str) -> Location {
        Location {
            id: LocationId(id),
            lat: 46.8 + id as f64 * 0.01,
            lng: -71.2 - id as f64 * 0.01,
            name: name.to_string(),
            visitors: visitors.to_string(),
            description: format!("Spot {id}"),
            facing_to: "Street".to_string(),
            google_maps_url: None,
            image_url: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            Locale::En,
            vec![
                loc(1, "Cafe One", "1,000/month"),
                loc(2, "Arena", "2,000/month"),
                loc(3, "Mall", "3,000/month"),
                loc(5, "Gym X", "3,000/month"),
            ],
        )
        .unwrap()
    }

    fn page_with(storage: InMemoryCartStorage) -> TestPage {
        let mut backend = RecordingBackend::with_container("map");
        MapPage::init(
            RecordingHost::new(),
            catalog(),
            storage,
            SiteConfig::default(),
            &mut backend,
            "map",
        )
    }

    fn page() -> TestPage {
        page_with(InMemoryCartStorage::new())
    }

    fn stored_ids(page: &TestPage) -> Vec<u32> {
        let raw = page.cart().storage().raw("xtranumerik_cart").unwrap_or("[]");
        let items: Vec<CartItem> = serde_json::from_str(raw).unwrap();
        items.iter().map(|i| i.id.get()).collect()
    }

    fn acme() -> OrderForm {
        OrderForm {
            company: "Acme".to_string(),
            contact: "Jo".to_string(),
            email: "jo@acme.com".to_string(),
            phone: "555".to_string(),
            duration: "3 months".to_string(),
            message: None,
        }
    }

    #[test]
    fn init_renders_every_dependent_view() {
        let p = page();
        let host = p.host();
        assert_eq!(host.slot(Slot::CartCount), "0");
        assert_eq!(host.is_visible(Slot::CartEmpty), Some(true));
        assert!(host.slot(Slot::CartEmpty).contains("No location selected yet."));
        assert_eq!(host.is_enabled(Slot::OrderButton), Some(false));
        assert_eq!(host.is_visible(Slot::FloatingCartButton), Some(false));
        assert!(host.slot(Slot::LocationsList).contains("location-item-5"));
        assert_eq!(p.map().unwrap().marker_count(), 4);
    }

    #[test]
    fn cart_scenario_with_reset_confirmation() {
        let mut p = page();
        p.add_to_cart(LocationId(1));
        p.add_to_cart(LocationId(3));
        assert_eq!(p.cart().ids(), vec![LocationId(1), LocationId(3)]);

        p.toggle_cart_item(LocationId(1));
        assert_eq!(p.cart().ids(), vec![LocationId(3)]);
        assert_eq!(stored_ids(&p), vec![3]);

        p.host_mut().confirm_answer = false;
        assert!(!p.reset_cart());
        assert_eq!(p.cart().ids(), vec![LocationId(3)]);

        p.host_mut().confirm_answer = true;
        assert!(p.reset_cart());
        assert!(p.cart().is_empty());
        assert_eq!(p.cart().storage().raw("xtranumerik_cart"), Some("[]"));
        assert_eq!(p.host().confirms.len(), 2);
        assert_eq!(p.host().slot(Slot::CartCount), "0");
    }

    #[test]
    fn reset_on_empty_cart_neither_prompts_nor_writes() {
        let mut p = page();
        assert!(!p.reset_cart());
        assert!(p.host().confirms.is_empty());
        assert_eq!(p.cart().storage().writes(), 0);
    }

    #[test]
    fn duplicate_add_warns_without_changing_cart() {
        let mut p = page();
        p.add_to_cart(LocationId(2));
        p.add_to_cart(LocationId(2));
        assert_eq!(p.cart().len(), 1);
        let last = p.toasts().visible().last().unwrap();
        assert_eq!(last.kind, ui::ToastKind::Warning);
        assert_eq!(last.text, "Arena is already in your cart");
        assert_eq!(p.cart().storage().writes(), 1);
    }

    #[test]
    fn toggle_refreshes_popup_badge_and_list() {
        let mut p = page();
        p.toggle_cart_item(LocationId(2));
        let surface = p.map().unwrap().surface();
        assert!(surface.popup(LocationId(2)).unwrap().contains("Remove from cart"));
        assert!(surface.popup(LocationId(1)).unwrap().contains("Add to cart"));
        let host = p.host();
        assert_eq!(host.slot(Slot::CartCount), "1");
        assert!(host.slot(Slot::CartItems).contains("Arena"));
        assert_eq!(host.is_visible(Slot::CartEmpty), Some(false));
        assert_eq!(host.is_enabled(Slot::OrderButton), Some(true));
        assert!(host.slot(Slot::LocationsList).contains("in-cart"));
    }

    #[test]
    fn toggle_unknown_id_changes_nothing() {
        let mut p = page();
        let patches = p.host().patches;
        p.toggle_cart_item(LocationId(99));
        assert_eq!(p.host().patches, patches);
        assert!(p.toasts().is_empty());
    }

    #[test]
    fn marker_click_selects_without_adding() {
        let mut p = page();
        p.on_marker_click(LocationId(3));
        assert_eq!(p.selected(), Some(LocationId(3)));
        assert!(p.cart().is_empty());
        assert_eq!(p.host().highlighted, Some(LocationId(3)));
        assert_eq!(p.host().is_visible(Slot::FloatingCartButton), Some(true));
        assert!(p.host().slot(Slot::FloatingCartButton).contains("Add to cart"));

        p.toggle_selected();
        assert_eq!(p.cart().ids(), vec![LocationId(3)]);
        assert!(p.host().slot(Slot::FloatingCartButton).contains("Remove from cart"));
    }

    #[test]
    fn sidebar_selection_pans_and_center_clears() {
        let mut p = page();
        p.select_location(LocationId(5));
        let surface = p.map().unwrap().surface();
        assert_eq!(surface.count(|c| *c == SurfaceCall::OpenPopup(LocationId(5))), 1);
        assert_eq!(p.selected(), Some(LocationId(5)));

        p.center_map();
        assert_eq!(p.selected(), None);
        assert_eq!(p.host().highlighted, None);
        assert_eq!(p.host().is_visible(Slot::FloatingCartButton), Some(false));
    }

    #[test]
    fn hydrated_cart_shows_in_popups() {
        let raw = r#"[{"id":2,"name":"Arena","visitors":"2,000/month"}]"#;
        let p = page_with(InMemoryCartStorage::with_entry("xtranumerik_cart", raw));
        assert_eq!(p.host().slot(Slot::CartCount), "1");
        let surface = p.map().unwrap().surface();
        assert!(surface.popup(LocationId(2)).unwrap().contains("Remove from cart"));
    }

    #[test]
    fn order_opens_mail_client_then_resets_after_delay() {
        let mut p = page();
        p.add_to_cart(LocationId(5));
        assert!(p.open_order_modal());
        assert_eq!(p.host().is_visible(Slot::OrderModal), Some(true));
        assert!(p.host().slot(Slot::OrderSummary).contains("Gym X"));

        let url = p.submit_order(&acme()).unwrap();
        assert!(url.starts_with("mailto:info@xtranumerik.ca?subject="));
        assert!(url.contains("Acme"));
        assert!(url.contains("Gym%20X"));
        assert!(url.contains("3%2C000%2Fmonth"));
        assert_eq!(p.host().navigations, vec![url]);
        assert_eq!(p.cart().len(), 1);

        p.host_mut().advance(999);
        p.tick();
        assert_eq!(p.cart().len(), 1);

        p.host_mut().advance(1);
        p.tick();
        assert!(p.cart().is_empty());
        assert_eq!(p.cart().storage().raw("xtranumerik_cart"), Some("[]"));
        assert_eq!(p.host().is_visible(Slot::OrderModal), Some(false));
        assert_eq!(p.host().forms_reset, vec![Slot::OrderForm]);
        assert_eq!(p.toasts().visible().last().unwrap().kind, ui::ToastKind::Success);
        assert!(p.host().slot(Slot::Notifications).contains("Your email client has been opened"));
    }

    #[test]
    fn order_on_empty_cart_is_refused() {
        let mut p = page();
        assert!(!p.open_order_modal());
        assert_eq!(p.submit_order(&acme()), None);
        assert!(p.host().navigations.is_empty());
    }

    #[test]
    fn toasts_expire_through_tick() {
        let mut p = page();
        p.add_to_cart(LocationId(1));
        assert!(p.host().slot(Slot::Notifications).contains("Cafe One was added"));
        assert_eq!(p.host().wakes, vec![3_000]);

        p.host_mut().advance(3_000);
        p.tick();
        assert!(p.toasts().is_empty());
        assert_eq!(p.host().slot(Slot::Notifications), "");
    }

    #[test]
    fn delegated_actions_reach_the_page() {
        let mut p = page();
        assert!(p.handle_action(Action::ToggleCart(LocationId(2))));
        assert!(p.handle_action(Action::RemoveFromCart(LocationId(2))));
        assert!(p.cart().is_empty());
        assert!(p.handle_action(Action::ShowAll));
        assert!(p.map().unwrap().surface().fitted.is_some());
        assert!(!p.handle_action(Action::PdfNext));

        let id = p.toasts().visible()[0].id;
        assert!(p.handle_action(Action::DismissToast(id)));
        assert_eq!(p.toasts().visible().len(), 1);
    }

    #[test]
    fn page_without_map_still_manages_cart() {
        let mut backend = RecordingBackend::with_container("map");
        backend.library_loaded = false;
        let mut p: TestPage = MapPage::init(
            RecordingHost::new(),
            catalog(),
            InMemoryCartStorage::new(),
            SiteConfig::default(),
            &mut backend,
            "map",
        );
        assert!(p.map().is_none());
        assert_eq!(backend.errors.len(), 1);

        p.toggle_cart_item(LocationId(1));
        p.on_marker_click(LocationId(1));
        p.handle_resize();
        assert_eq!(p.cart().ids(), vec![LocationId(1)]);
        assert_eq!(p.selected(), None);
    }
}
