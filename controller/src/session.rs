//! Pointer-frame driver for windowed adapters.

use planet_builder_core::GameConfig;
use planet_builder_rendering::{FrameInput, Scene};
use planet_builder_system_drag_drop::{DragDrop, DropPermission};

use crate::{DropOutcome, OrbitSystem};

/// Couples an [`OrbitSystem`] with the drag gesture driven by pointer frames.
#[derive(Debug)]
pub struct Session {
    system: OrbitSystem,
    gesture: DragDrop,
}

impl Session {
    /// Creates a session with an empty system.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            system: OrbitSystem::new(config),
            gesture: DragDrop::new(),
        }
    }

    /// Underlying orbit system.
    #[must_use]
    pub fn system(&self) -> &OrbitSystem {
        &self.system
    }

    /// Applies one frame of pointer input to the scene.
    ///
    /// Pressing on a palette source starts a gesture and pressing on the reset
    /// trigger resets the system. Releasing over a zone completes the gesture;
    /// releasing anywhere else abandons it. Returns the outcome of a completed
    /// drop, if one happened this frame.
    pub fn handle_frame(&mut self, input: FrameInput, scene: &mut Scene) -> Option<DropOutcome> {
        let Some(pointer) = input.pointer else {
            if input.released {
                self.gesture.cancel();
                scene.dragged = None;
            }
            return None;
        };

        if input.pressed {
            if let Some(source) = scene.palette_at(pointer) {
                self.gesture.drag_element(source.element);
            } else if scene.reset.contains(pointer) {
                self.gesture.cancel();
                self.system.reset(scene);
            }
        }

        scene.dragged = self.gesture.carried_element();

        if !input.released {
            return None;
        }

        scene.dragged = None;
        let zone = scene.layout.hit_test(pointer);
        if self.gesture.drag_over(zone) == DropPermission::Rejected {
            self.gesture.cancel();
            return None;
        }

        let drop = self.gesture.drop(zone)?;
        Some(self.system.handle_drop(drop, scene))
    }
}
