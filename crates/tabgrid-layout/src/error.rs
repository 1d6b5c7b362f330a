use thiserror::Error;

use crate::region::RegionId;
use crate::workspace::ContainerId;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Host-facing failures of the layout engine.
///
/// Routine conditions (a 0×0 resize, an unknown layout code, a drag past the
/// minimum frame size) are reported as outcome values, never as errors.
/// Everything here means the host addressed something that does not exist.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("region {id} does not exist in this container")]
    UnknownRegion { id: RegionId },

    #[error("region {id} is a pane, not a separator")]
    NotASeparator { id: RegionId },

    #[error("region {id} is a separator, not a pane")]
    NotAPane { id: RegionId },

    #[error("container {id} does not exist")]
    UnknownContainer { id: ContainerId },

    #[error("frame {frame} is out of range (container has {frame_count} frames)")]
    FrameOutOfRange { frame: usize, frame_count: usize },

    #[error("malformed host command: {0}")]
    Command(#[from] serde_json::Error),
}
