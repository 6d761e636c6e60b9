//! Component contract and the host view a component sees after mount.

use cardkit_core::{Document, Element};

/// Read access to the committed tree, handed to a component once after its
/// first commit.
pub trait HostTree {
    /// Rendered text of the element with this id, whitespace collapsed.
    /// `None` when no such element exists or the host cannot be inspected.
    fn inner_text_of(&self, element_id: &str) -> Option<String>;
}

impl HostTree for Document {
    fn inner_text_of(&self, element_id: &str) -> Option<String> {
        let node = self.find_by_element_id(element_id)?;
        self.inner_text(&node.id)
    }
}

/// A host with no inspectable tree, such as a headless or server-side
/// render. Every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl HostTree for DetachedHost {
    fn inner_text_of(&self, _element_id: &str) -> Option<String> {
        None
    }
}

/// A stateful view the host renders, commits and notifies after mount.
pub trait Component {
    type Props;

    /// Describe the current view. Must not mutate state.
    fn render(&self) -> Element;

    /// Runs once, after the first successful commit. Returns `true` when
    /// state changed and the host must render again.
    fn mounted(&mut self, _host: &dyn HostTree) -> bool {
        false
    }

    /// Called after the host removed the component's tree. A component
    /// mounted again afterwards starts over, as a fresh instance would.
    fn unmounted(&mut self) {}

    /// Replace the props. Does not re-run [`mounted`](Self::mounted).
    fn set_props(&mut self, props: Self::Props);
}
