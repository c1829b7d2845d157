use gpui::{Pixels, point, px};
use gpui_component::VirtualListScrollHandle;

/// Distance from the tail within which the list counts as "at the bottom".
const TAIL_SNAP_THRESHOLD: Pixels = px(32.);

/// Keeps the message list pinned to its newest row unless the user scrolled up to read.
pub struct ScrollManager {
    scroll_handle: VirtualListScrollHandle,
    pin_to_tail: bool,
    pending_jump: bool,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: VirtualListScrollHandle::new(),
            pin_to_tail: true,
            pending_jump: true,
        }
    }

    pub fn handle(&self) -> &VirtualListScrollHandle {
        &self.scroll_handle
    }

    /// Called when rows were appended; jumps only if the reader was already at the tail.
    pub fn on_rows_appended(&mut self) {
        if self.pin_to_tail {
            self.pending_jump = true;
        }
    }

    /// Called on a conversation reset; always returns to the tail.
    pub fn reset(&mut self) {
        self.pin_to_tail = true;
        self.pending_jump = true;
    }

    /// Samples the current offset once per frame and applies a pending jump.
    pub fn sync(&mut self) {
        if !self.pending_jump {
            self.pin_to_tail = self.is_near_tail();
            return;
        }

        let max_offset = self.scroll_handle.max_offset().height;
        let current_x = self.scroll_handle.offset().x;
        // GPUI scrolls downward with negative Y offsets.
        let target_y = if max_offset > Pixels::ZERO {
            -max_offset
        } else {
            Pixels::ZERO
        };
        self.scroll_handle.set_offset(point(current_x, target_y));
        self.pending_jump = false;
    }

    fn is_near_tail(&self) -> bool {
        let max_offset = self.scroll_handle.max_offset().height;
        if max_offset <= Pixels::ZERO {
            return true;
        }

        let offset = self.scroll_handle.offset().y;
        (offset + max_offset).abs() <= TAIL_SNAP_THRESHOLD
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}
