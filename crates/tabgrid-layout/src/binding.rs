//! Pane content binding.
//!
//! Chart surfaces are owned by [`PaneSlots`], one slot per logical chart,
//! independent of the region nodes that currently host them. Switching
//! layouts only moves the host pointer of each slot, so a surface outlives
//! any number of node rebuilds.

use std::fmt;

use serde::{Deserialize, Serialize};
use tabgrid_core::PixelRect;
use tracing::trace;

use crate::region::RegionId;

/// The rendering side of a pane.
///
/// The engine calls `resize` once per hosted pane on every layout pass and
/// never inspects the surface otherwise.
pub trait ContentSurface {
    fn resize(&mut self, width_px: u32, height_px: u32);
}

/// One logical chart surface and where it is shown.
#[derive(Default)]
pub struct PaneSlot {
    surface: Option<Box<dyn ContentSurface>>,
    host: Option<RegionId>,
    last_size: Option<(u32, u32)>,
}

impl fmt::Debug for PaneSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaneSlot")
            .field("bound", &self.surface.is_some())
            .field("host", &self.host)
            .field("last_size", &self.last_size)
            .finish()
    }
}

/// What a [`PaneSlots::rehost`] pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RehostSummary {
    /// Existing slots given a new host.
    pub reused: usize,
    /// Anonymous slots appended for extra frames.
    pub created: usize,
    /// Slots left without a host; their surfaces are kept.
    pub unhosted: usize,
}

/// The chart surfaces of one container, in frame order.
#[derive(Debug, Default)]
pub struct PaneSlots {
    slots: Vec<PaneSlot>,
}

impl PaneSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Point slot `i` at `frames[i]`.
    ///
    /// Missing slots are created empty; slots past the end of `frames` lose
    /// their host but keep their surface so a later layout with more frames
    /// shows them again.
    pub fn rehost(&mut self, frames: &[RegionId]) -> RehostSummary {
        let reused = self.slots.len().min(frames.len());
        let created = frames.len().saturating_sub(self.slots.len());
        let unhosted = self.slots.len().saturating_sub(frames.len());

        self.slots.resize_with(self.slots.len().max(frames.len()), PaneSlot::default);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.host = frames.get(index).copied();
            slot.last_size = None;
        }

        RehostSummary {
            reused,
            created,
            unhosted,
        }
    }

    /// Slot currently hosted by `region`.
    #[must_use]
    pub fn slot_for(&self, region: RegionId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.host == Some(region))
    }

    /// Region currently hosting `slot`.
    #[must_use]
    pub fn host_of(&self, slot: usize) -> Option<RegionId> {
        self.slots.get(slot).and_then(|s| s.host)
    }

    #[must_use]
    pub fn is_bound(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| s.surface.is_some())
    }

    /// Size most recently pushed to `slot`'s surface since it was last rehosted.
    #[must_use]
    pub fn last_size(&self, slot: usize) -> Option<(u32, u32)> {
        self.slots.get(slot).and_then(|s| s.last_size)
    }

    /// Host `slot` at `region` and store `surface` in it, returning the
    /// surface it replaces.
    ///
    /// Hands `surface` back as the error when `slot` does not exist.
    pub fn bind(
        &mut self,
        slot: usize,
        region: RegionId,
        surface: Box<dyn ContentSurface>,
    ) -> Result<Option<Box<dyn ContentSurface>>, Box<dyn ContentSurface>> {
        let Some(entry) = self.slots.get_mut(slot) else {
            return Err(surface);
        };
        entry.host = Some(region);
        entry.last_size = None;
        Ok(entry.surface.replace(surface))
    }

    /// Detach the slot hosted by `region`, keeping its surface.
    pub fn unbind(&mut self, region: RegionId) -> Option<usize> {
        let index = self.slot_for(region)?;
        let slot = &mut self.slots[index];
        slot.host = None;
        slot.last_size = None;
        Some(index)
    }

    /// Remove the surface from `slot`, dropping the engine's ownership of it.
    pub fn take_surface(&mut self, slot: usize) -> Option<Box<dyn ContentSurface>> {
        let entry = self.slots.get_mut(slot)?;
        entry.last_size = None;
        entry.surface.take()
    }

    /// Push a size to one slot's surface. Returns true if a surface was
    /// notified.
    pub fn deliver_to(&mut self, slot: usize, rect: PixelRect) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        let Some(surface) = entry.surface.as_mut() else {
            return false;
        };
        surface.resize(rect.width, rect.height);
        entry.last_size = Some((rect.width, rect.height));
        true
    }

    /// Push sizes to every hosted, bound surface. `lookup` resolves a host
    /// region to its pixel rect. Returns the number of surfaces notified.
    pub fn deliver(&mut self, lookup: impl Fn(RegionId) -> Option<PixelRect>) -> usize {
        let mut delivered = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let (Some(host), Some(surface)) = (slot.host, slot.surface.as_mut()) else {
                continue;
            };
            let Some(rect) = lookup(host) else {
                continue;
            };
            surface.resize(rect.width, rect.height);
            slot.last_size = Some((rect.width, rect.height));
            trace!(slot = index, region = %host, width = rect.width, height = rect.height, "delivered size");
            delivered += 1;
        }
        delivered
    }
}
