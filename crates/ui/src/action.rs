use foundation::LocationId;

/// Click targets carried in `data-action` / `data-id` attributes.
///
/// Templates emit them; the browser binding reads them back from the clicked
/// element and forwards the action to the page controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleCart(LocationId),
    RemoveFromCart(LocationId),
    SelectLocation(LocationId),
    ToggleSelected,
    ResetCart,
    OpenOrder,
    CloseOrder,
    ShowAll,
    CenterMap,
    DismissToast(u64),
    PdfPrevious,
    PdfNext,
    PdfZoomIn,
    PdfZoomOut,
    PdfZoomReset,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::ToggleCart(_) => "toggle-cart",
            Action::RemoveFromCart(_) => "remove-from-cart",
            Action::SelectLocation(_) => "select-location",
            Action::ToggleSelected => "toggle-selected",
            Action::ResetCart => "reset-cart",
            Action::OpenOrder => "open-order",
            Action::CloseOrder => "close-order",
            Action::ShowAll => "show-all",
            Action::CenterMap => "center-map",
            Action::DismissToast(_) => "dismiss-toast",
            Action::PdfPrevious => "pdf-prev",
            Action::PdfNext => "pdf-next",
            Action::PdfZoomIn => "pdf-zoom-in",
            Action::PdfZoomOut => "pdf-zoom-out",
            Action::PdfZoomReset => "pdf-zoom-reset",
        }
    }

    /// Value of the `data-id` attribute, if the action carries one.
    pub fn id_attr(self) -> Option<String> {
        match self {
            Action::ToggleCart(id) | Action::RemoveFromCart(id) | Action::SelectLocation(id) => {
                Some(id.to_string())
            }
            Action::DismissToast(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn parse(name: &str, id: Option<&str>) -> Option<Self> {
        let location = || id.and_then(|s| s.parse::<LocationId>().ok());
        Some(match name {
            "toggle-cart" => Action::ToggleCart(location()?),
            "remove-from-cart" => Action::RemoveFromCart(location()?),
            "select-location" => Action::SelectLocation(location()?),
            "toggle-selected" => Action::ToggleSelected,
            "reset-cart" => Action::ResetCart,
            "open-order" => Action::OpenOrder,
            "close-order" => Action::CloseOrder,
            "show-all" => Action::ShowAll,
            "center-map" => Action::CenterMap,
            "dismiss-toast" => Action::DismissToast(id?.trim().parse().ok()?),
            "pdf-prev" => Action::PdfPrevious,
            "pdf-next" => Action::PdfNext,
            "pdf-zoom-in" => Action::PdfZoomIn,
            "pdf-zoom-out" => Action::PdfZoomOut,
            "pdf-zoom-reset" => Action::PdfZoomReset,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Action;
    use foundation::LocationId;

    #[test]
    fn parse_round_trips_names() {
        let all = [
            Action::ToggleCart(LocationId(5)),
            Action::RemoveFromCart(LocationId(7)),
            Action::SelectLocation(LocationId(30)),
            Action::ToggleSelected,
            Action::ResetCart,
            Action::OpenOrder,
            Action::CloseOrder,
            Action::ShowAll,
            Action::CenterMap,
            Action::DismissToast(4),
            Action::PdfPrevious,
            Action::PdfNext,
            Action::PdfZoomIn,
            Action::PdfZoomOut,
            Action::PdfZoomReset,
        ];
        for a in all {
            let id = a.id_attr();
            assert_eq!(Action::parse(a.name(), id.as_deref()), Some(a));
        }
    }

    #[test]
    fn parse_rejects_missing_or_bad_ids() {
        assert_eq!(Action::parse("toggle-cart", None), None);
        assert_eq!(Action::parse("toggle-cart", Some("0")), None);
        assert_eq!(Action::parse("toggle-cart", Some("abc")), None);
        assert_eq!(Action::parse("launch", None), None);
    }
}
