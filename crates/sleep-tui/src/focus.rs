//! FocusRing: manages keyboard focus cycling between components.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    /// Focus `id` if it is part of the ring. No-op otherwise.
    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current().map_or(false, |c| c == id)
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_both_ways() {
        let mut ring = FocusRing::new(vec![
            ComponentId::FrequencyCarousel,
            ComponentId::PlaylistGrid,
        ]);
        assert_eq!(ring.current(), Some(ComponentId::FrequencyCarousel));
        assert_eq!(ring.next(), Some(ComponentId::PlaylistGrid));
        assert_eq!(ring.next(), Some(ComponentId::FrequencyCarousel));
        assert_eq!(ring.prev(), Some(ComponentId::PlaylistGrid));
        assert!(ring.is_focused(ComponentId::PlaylistGrid));
    }

    #[test]
    fn set_ignores_ids_outside_the_ring() {
        let mut ring = FocusRing::new(vec![
            ComponentId::FrequencyCarousel,
            ComponentId::PlaylistGrid,
        ]);
        ring.set(ComponentId::PlaylistGrid);
        ring.set(ComponentId::HelpOverlay);
        assert_eq!(ring.current(), Some(ComponentId::PlaylistGrid));
    }

    #[test]
    fn empty_ring_has_no_focus() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.current(), None);
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
    }
}
