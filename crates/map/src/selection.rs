use foundation::LocationId;

/// The location targeted by the floating call-to-action.
///
/// Single-valued and independent of cart membership: selecting never adds to
/// the cart, and removing from the cart never clears the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<LocationId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<LocationId> {
        self.selected
    }

    pub fn is_selected(&self, id: LocationId) -> bool {
        self.selected == Some(id)
    }

    /// Returns `true` if the selection changed.
    pub fn set(&mut self, id: LocationId) -> bool {
        let changed = self.selected != Some(id);
        self.selected = Some(id);
        changed
    }

    /// Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
