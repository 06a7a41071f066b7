// Copyright 2025 the Floorgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing layer seam and the cross-thread redraw signal.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use floorgrid_event_state::PointerEvent;
use floorgrid_grid::GridSurface;

/// A drawable, input-consuming layer in a host's ordered layer list.
///
/// The host owns the list, feeds input top-down until a layer handles it,
/// steps animations once per frame and renders bottom-up.
pub trait Layer {
    /// Offers a pointer event to the layer. Returns whether it was handled.
    fn on_input(&mut self, event: &PointerEvent) -> bool;

    /// Advances the layer's animations to `now_ms`.
    ///
    /// Returns `true` if the layer wants another frame.
    fn on_animation_step(&mut self, now_ms: u64) -> bool;

    /// Draws the layer.
    fn render(&mut self, surface: &mut dyn GridSurface);
}

/// A shareable "please draw another frame" flag.
///
/// Cloning shares the flag. Requesting is idempotent and may happen from
/// any thread; the host [`take`](Self::take)s it when scheduling frames.
#[derive(Clone, Debug, Default)]
pub struct RedrawSignal(Arc<AtomicBool>);

impl RedrawSignal {
    /// Creates a signal with no pending request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a redraw.
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clears and returns the pending request.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Returns `true` if a redraw is pending, without clearing it.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
