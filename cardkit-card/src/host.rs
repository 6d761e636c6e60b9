//! Host page: owns the document → layout → paint pipeline and drives
//! component lifecycles.
//!
//! Mounting a component runs, in order:
//!
//! 1. `render()` and commit the element tree under the page root
//! 2. sync the layout tree and compute layout for the viewport
//! 3. build the display list
//! 4. `mounted()` with a view of the committed document
//! 5. if the component changed state, render, commit and paint again
//!
//! Element ids are unique per page, so each page hosts at most one instance
//! of a given card.

use cardkit_core::{BoxStyle, Document, DocumentError, Length, Rect};
use cardkit_layout::{LayoutBridge, LayoutEngine, LayoutError};
use cardkit_render::{collect_display_list, DisplayList, FrameStats};
use cardkit_text::TextEngine;
use taffy::prelude::Size;
use thiserror::Error;
use uuid::Uuid;

use crate::component::{Component, DetachedHost, HostTree};
use crate::config::{ConfigError, HostConfig};

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown mount handle: {0:?}")]
    UnknownMount(MountHandle),
}

/// Identifies one mounted component within a [`HostPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountHandle(Uuid);

impl MountHandle {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

struct Mounted<C> {
    handle: MountHandle,
    component: C,
    /// Root node of the component's committed subtree.
    root: Uuid,
}

pub struct HostPage<C: Component> {
    config: HostConfig,
    document: Document,
    engine: LayoutEngine,
    bridge: LayoutBridge,
    text: TextEngine,
    display: DisplayList,
    mounts: Vec<Mounted<C>>,
    /// When false, components see a [`DetachedHost`] after mount.
    inspectable: bool,
    frames: u64,
}

impl<C: Component> Default for HostPage<C> {
    fn default() -> Self {
        Self::build(HostConfig::default(), true)
    }
}

impl<C: Component> HostPage<C> {
    pub fn new(config: HostConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self::build(config, true))
    }

    /// A page whose tree cannot be inspected by components, as in a
    /// server-side render. Lookups after mount always miss.
    pub fn detached(config: HostConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self::build(config, false))
    }

    fn build(config: HostConfig, inspectable: bool) -> Self {
        let root_style = BoxStyle::default().size(
            Length::Px(config.viewport.width),
            Length::Px(config.viewport.height),
        );
        Self {
            document: Document::new(root_style),
            engine: LayoutEngine::new(),
            bridge: LayoutBridge::new(config.text_style()),
            text: config.text_engine(),
            display: DisplayList::default(),
            mounts: Vec::new(),
            inspectable,
            frames: 0,
            config,
        }
    }

    /// Mount `component` at the end of the page.
    pub fn mount(&mut self, mut component: C) -> Result<MountHandle, HostError> {
        let page_root = self.document.root_id();
        let mut root = self.document.commit(page_root, None, &component.render())?;
        self.paint()?;

        let changed = if self.inspectable {
            component.mounted(&self.document)
        } else {
            log::warn!("Host page is detached; component cannot inspect its tree");
            component.mounted(&DetachedHost)
        };
        if changed {
            root = self.document.commit(page_root, Some(root), &component.render())?;
            self.paint()?;
        }

        let handle = MountHandle(Uuid::new_v4());
        log::info!(
            "Mounted component {} ({} node(s) in page)",
            handle.0,
            self.document.len()
        );
        self.mounts.push(Mounted {
            handle,
            component,
            root,
        });
        Ok(handle)
    }

    /// Supply new props and re-render. The post-mount hook does not run again.
    pub fn update(&mut self, handle: MountHandle, props: C::Props) -> Result<(), HostError> {
        let page_root = self.document.root_id();
        let mount = self
            .mounts
            .iter_mut()
            .find(|m| m.handle == handle)
            .ok_or(HostError::UnknownMount(handle))?;

        mount.component.set_props(props);
        mount.root = self
            .document
            .commit(page_root, Some(mount.root), &mount.component.render())?;
        self.paint()?;
        Ok(())
    }

    /// Remove a component and its subtree, handing the component back.
    /// The component is reset and can be mounted again.
    pub fn unmount(&mut self, handle: MountHandle) -> Result<C, HostError> {
        let index = self
            .mounts
            .iter()
            .position(|m| m.handle == handle)
            .ok_or(HostError::UnknownMount(handle))?;

        let mut mount = self.mounts.remove(index);
        let removed = self.document.remove_subtree(mount.root)?;
        self.paint()?;
        mount.component.unmounted();
        log::info!("Unmounted component {} ({removed} node(s))", handle.0);
        Ok(mount.component)
    }

    pub fn component(&self, handle: MountHandle) -> Option<&C> {
        self.mounts
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| &m.component)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display
    }

    pub fn is_inspectable(&self) -> bool {
        self.inspectable
    }

    /// Frames painted since the page was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> FrameStats {
        self.display.stats()
    }

    /// Laid-out bounds of the element with this id, in page coordinates.
    pub fn bounds_of(&self, element_id: &str) -> Option<Rect> {
        let node = self.document.find_by_element_id(element_id)?;
        self.engine.absolute_bounds(node.id)
    }

    /// Rendered text of an element, as a component would see it.
    pub fn inner_text_of(&self, element_id: &str) -> Option<String> {
        self.document.inner_text_of(element_id)
    }

    fn paint(&mut self) -> Result<(), HostError> {
        self.bridge.sync(&self.document, &mut self.engine)?;
        let viewport = Size {
            width: self.config.viewport.width,
            height: self.config.viewport.height,
        };
        self.engine
            .compute_layout(self.document.root_id(), viewport, &mut self.text)?;
        self.display =
            collect_display_list(&self.document, &self.engine, &self.bridge, &mut self.text);
        self.frames += 1;

        let stats = self.display.stats();
        log::debug!(
            "Frame {}: {} rect(s), {} image(s), {} text line(s)",
            self.frames,
            stats.rect_count,
            stats.image_count,
            stats.text_lines
        );
        Ok(())
    }
}
