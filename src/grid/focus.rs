//! Keyboard focus bookkeeping for the table document.
//!
//! Focus moves synchronously; notifications are queued and delivered to the
//! widget afterwards, in the order a browser would fire them.

use std::collections::VecDeque;

use super::table::NodeId;

/// Who holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusOwner {
    /// Nothing inside the widget (terminal unfocused, or never focused).
    #[default]
    Outside,
    /// The table container itself.
    Container,
    /// An inline input node inside one of the cells.
    Input(NodeId),
}

/// The element a focus notification was fired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Container,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Focus(FocusTarget),
    /// The container lost focus, either to its own input or to the outside.
    Blur,
}

#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    owner: FocusOwner,
    queue: VecDeque<FocusEvent>,
}

impl FocusTracker {
    pub const fn owner(&self) -> FocusOwner {
        self.owner
    }

    pub fn focus_container(&mut self) {
        if self.owner != FocusOwner::Container {
            self.owner = FocusOwner::Container;
            self.queue.push_back(FocusEvent::Focus(FocusTarget::Container));
        }
    }

    pub fn focus_input(&mut self, input: NodeId) {
        if self.owner == FocusOwner::Input(input) {
            return;
        }
        if self.owner == FocusOwner::Container {
            self.queue.push_back(FocusEvent::Blur);
        }
        self.owner = FocusOwner::Input(input);
        self.queue.push_back(FocusEvent::Focus(FocusTarget::Input));
    }

    /// Focus left the widget entirely.
    pub fn leave(&mut self) {
        if self.owner != FocusOwner::Outside {
            self.owner = FocusOwner::Outside;
            self.queue.push_back(FocusEvent::Blur);
        }
    }

    /// A removed input gives focus back to the container it lived in.
    pub fn input_removed(&mut self, input: NodeId) {
        if self.owner == FocusOwner::Input(input) {
            self.focus_container();
        }
    }

    pub fn take_event(&mut self) -> Option<FocusEvent> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(tracker: &mut FocusTracker) -> Vec<FocusEvent> {
        std::iter::from_fn(|| tracker.take_event()).collect()
    }

    #[test]
    fn test_focus_container_is_idempotent() {
        let mut tracker = FocusTracker::default();
        tracker.focus_container();
        tracker.focus_container();
        assert_eq!(
            drain(&mut tracker),
            vec![FocusEvent::Focus(FocusTarget::Container)]
        );
    }

    #[test]
    fn test_moving_into_input_blurs_container_first() {
        let mut tracker = FocusTracker::default();
        tracker.focus_container();
        drain(&mut tracker);

        tracker.focus_input(NodeId::from_raw(7));
        assert_eq!(
            drain(&mut tracker),
            vec![FocusEvent::Blur, FocusEvent::Focus(FocusTarget::Input)]
        );
        assert_eq!(tracker.owner(), FocusOwner::Input(NodeId::from_raw(7)));
    }

    #[test]
    fn test_focusing_input_from_outside_does_not_blur() {
        let mut tracker = FocusTracker::default();
        tracker.focus_input(NodeId::from_raw(3));
        assert_eq!(
            drain(&mut tracker),
            vec![FocusEvent::Focus(FocusTarget::Input)]
        );
    }

    #[test]
    fn test_leaving_from_input_reports_blur() {
        let mut tracker = FocusTracker::default();
        tracker.focus_input(NodeId::from_raw(3));
        drain(&mut tracker);

        tracker.leave();
        tracker.leave();
        assert_eq!(drain(&mut tracker), vec![FocusEvent::Blur]);
        assert_eq!(tracker.owner(), FocusOwner::Outside);
    }

    #[test]
    fn test_removing_focused_input_refocuses_container() {
        let mut tracker = FocusTracker::default();
        let input = NodeId::from_raw(4);
        tracker.focus_input(input);
        drain(&mut tracker);

        tracker.input_removed(NodeId::from_raw(5));
        assert!(tracker.take_event().is_none());

        tracker.input_removed(input);
        assert_eq!(
            drain(&mut tracker),
            vec![FocusEvent::Focus(FocusTarget::Container)]
        );
    }
}
