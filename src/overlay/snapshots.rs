//! Per-overlay memory of where a box was when it was captured.
//!
//! A snapshot records an overlay's rectangle as viewport-relative ratios
//! together with the rotation epoch in effect at capture time. Replaying
//! later rotates the stored corners by the epoch delta and scales into the
//! page's intrinsic dimensions, so a mask lands on the original content even
//! if the user rotated the page after placing the edit. Replay only reads;
//! nothing here is silently overwritten by rotation or zoom changes.

use crate::geometry::Rect;
use crate::overlay::rotation::{RatioRect, Viewport};
use crate::overlay::{OverlayId, Rotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An overlay's captured bounds, in page-relative ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsSnapshot {
    /// Left edge / viewport width at capture time
    pub left_ratio: f32,
    /// Top edge / viewport height at capture time
    pub top_ratio: f32,
    /// Width / viewport width at capture time
    pub width_ratio: f32,
    /// Height / viewport height at capture time
    pub height_ratio: f32,
    /// Rotation epoch at capture time, serialized as degrees
    pub capture_rotation: Rotation,
}

impl BoundsSnapshot {
    /// Capture an overlay rectangle against the current viewport and
    /// rotation.
    ///
    /// Returns `None` when the viewport cannot produce meaningful ratios.
    pub fn capture(rect: Rect, viewport: Viewport, rotation: Rotation) -> Option<Self> {
        if viewport.is_degenerate() {
            log::warn!("cannot capture bounds against degenerate viewport {viewport:?}");
            return None;
        }
        let ratios = RatioRect::from_pixels(rect, viewport);
        Some(Self {
            left_ratio: ratios.left,
            top_ratio: ratios.top,
            width_ratio: ratios.width,
            height_ratio: ratios.height,
            capture_rotation: rotation,
        })
    }

    /// The stored ratios as a [`RatioRect`].
    pub fn ratio_rect(&self) -> RatioRect {
        RatioRect {
            left: self.left_ratio,
            top: self.top_ratio,
            width: self.width_ratio,
            height: self.height_ratio,
        }
    }

    /// Replay the captured bounds under the current rotation, scaled into
    /// the page's intrinsic dimensions.
    pub fn replay(&self, current: Rotation, page_width: f32, page_height: f32) -> Rect {
        let delta = current.delta_since(self.capture_rotation);
        self.ratio_rect().rotated(delta).to_pixels(page_width, page_height)
    }
}

/// Explicit id-keyed store of bounds snapshots.
///
/// Snapshot lifetime is managed explicitly: captured on first activation,
/// replaced only on deliberate re-capture, removed when the overlay is
/// destroyed.
#[derive(Debug, Default)]
pub struct BoundsSnapshotStore {
    entries: HashMap<OverlayId, BoundsSnapshot>,
}

impl BoundsSnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture on first activation. An existing snapshot wins; rotation and
    /// zoom replay must keep reading the original capture.
    pub fn capture_if_absent(
        &mut self,
        id: OverlayId,
        rect: Rect,
        viewport: Viewport,
        rotation: Rotation,
    ) -> Option<BoundsSnapshot> {
        if let Some(existing) = self.entries.get(&id) {
            return Some(*existing);
        }
        let snapshot = BoundsSnapshot::capture(rect, viewport, rotation)?;
        self.entries.insert(id, snapshot);
        Some(snapshot)
    }

    /// Deliberately replace an overlay's snapshot, e.g. after a user-driven
    /// move committed new geometry.
    pub fn recapture(
        &mut self,
        id: OverlayId,
        rect: Rect,
        viewport: Viewport,
        rotation: Rotation,
    ) -> Option<BoundsSnapshot> {
        let snapshot = BoundsSnapshot::capture(rect, viewport, rotation)?;
        self.entries.insert(id, snapshot);
        Some(snapshot)
    }

    /// Look up an overlay's snapshot.
    pub fn get(&self, id: OverlayId) -> Option<&BoundsSnapshot> {
        self.entries.get(&id)
    }

    /// Drop an overlay's snapshot when the overlay is destroyed.
    pub fn remove(&mut self, id: OverlayId) -> Option<BoundsSnapshot> {
        self.entries.remove(&id)
    }

    /// Number of tracked overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
