//! Tabs and the active selection.
//!
//! A [`Workspace`] owns one [`Container`] per tab. Containers share only the
//! engine configuration. Which tab and frame are active is not stored here:
//! the host keeps an [`ActiveSelection`] value and passes it through
//! [`Workspace::focus`] and [`Workspace::normalize`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::container::Container;
use crate::error::{LayoutError, Result};

/// Identifier of one tab's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(u32);

impl ContainerId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// The container and frame the user is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActiveSelection {
    pub container: Option<ContainerId>,
    pub frame: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    config: EngineConfig,
    containers: BTreeMap<ContainerId, Container>,
    next_id: u32,
}

impl Workspace {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create an empty container and return its id. Ids are never reused.
    pub fn open_container(&mut self) -> ContainerId {
        let id = ContainerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.containers.insert(id, Container::new(self.config));
        debug!(container = %id, "container opened");
        id
    }

    /// Drop a container and every surface it still owns.
    pub fn close_container(&mut self, id: ContainerId) -> Result<Container> {
        let container = self
            .containers
            .remove(&id)
            .ok_or(LayoutError::UnknownContainer { id })?;
        debug!(container = %id, "container closed");
        Ok(container)
    }

    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Make `container` active, optionally selecting `frame` in it.
    ///
    /// Without a frame, the current frame is kept when `selection` already
    /// points at the same container and the frame is still valid.
    pub fn focus(
        &self,
        selection: ActiveSelection,
        container: ContainerId,
        frame: Option<usize>,
    ) -> Result<ActiveSelection> {
        let target = self
            .container(container)
            .ok_or(LayoutError::UnknownContainer { id: container })?;
        let frame_count = target.frame_count();

        let frame = match frame {
            Some(frame) if frame >= frame_count => {
                return Err(LayoutError::FrameOutOfRange { frame, frame_count });
            }
            Some(frame) => Some(frame),
            None if selection.container == Some(container) => {
                selection.frame.filter(|frame| *frame < frame_count)
            }
            None => None,
        };

        Ok(ActiveSelection {
            container: Some(container),
            frame,
        })
    }

    /// Repair a selection after containers closed or layouts changed.
    ///
    /// A closed container clears the whole selection. A frame beyond the
    /// container's current frame count falls back to frame 0, or to no frame
    /// when the container has no layout yet.
    #[must_use]
    pub fn normalize(&self, selection: ActiveSelection) -> ActiveSelection {
        let Some(id) = selection.container else {
            return ActiveSelection::default();
        };
        let Some(container) = self.container(id) else {
            return ActiveSelection::default();
        };
        let frame_count = container.frame_count();
        let frame = selection.frame.and_then(|frame| {
            if frame < frame_count {
                Some(frame)
            } else if frame_count > 0 {
                Some(0)
            } else {
                None
            }
        });
        ActiveSelection {
            container: Some(id),
            frame,
        }
    }
}
