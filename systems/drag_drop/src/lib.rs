#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input adaptation that turns a pointer-drag gesture into structured drops.
//!
//! Adapters report the three gesture phases (start, hover, release) and
//! receive a [`DropEvent`] only when the gesture carried a recognised element
//! and ended on a tagged orbit zone.

use log::debug;
use planet_builder_core::{DropEvent, ElementType, OrbitIndex};

/// Phase of the drag gesture currently in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No token is being dragged.
    #[default]
    Idle,
    /// A token is being dragged with the captured payload.
    Carrying {
        /// Raw payload captured when the drag started.
        payload: String,
    },
}

/// Answer given to the input source while the pointer hovers a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropPermission {
    /// The zone accepts the carried payload.
    Allowed,
    /// The zone keeps the platform's default reject behaviour.
    Rejected,
}

/// Drag gesture tracker shared by every adapter.
#[derive(Clone, Debug, Default)]
pub struct DragDrop {
    state: DragState,
}

impl DragDrop {
    /// Creates an idle gesture tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture phase.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Payload carried by the gesture in flight, if any.
    #[must_use]
    pub fn carried(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Carrying { payload } => Some(payload.as_str()),
        }
    }

    /// Element carried by the gesture in flight when the payload names one.
    #[must_use]
    pub fn carried_element(&self) -> Option<ElementType> {
        self.carried()?.parse().ok()
    }

    /// Starts a gesture carrying the provided payload, replacing any gesture in flight.
    pub fn drag_start<P>(&mut self, payload: P)
    where
        P: Into<String>,
    {
        self.state = DragState::Carrying {
            payload: payload.into(),
        };
    }

    /// Starts a gesture carrying the payload of a palette token.
    pub fn drag_element(&mut self, element: ElementType) {
        self.drag_start(element.payload());
    }

    /// Reports whether a drop on the hovered zone should be permitted.
    #[must_use]
    pub fn drag_over(&self, zone: Option<OrbitIndex>) -> DropPermission {
        match (&self.state, zone) {
            (DragState::Carrying { .. }, Some(_)) => DropPermission::Allowed,
            _ => DropPermission::Rejected,
        }
    }

    /// Completes the gesture over `zone`.
    ///
    /// The gesture is consumed whatever the outcome. Malformed payloads and
    /// untagged zones yield `None` so nothing downstream can mutate state.
    pub fn drop(&mut self, zone: Option<OrbitIndex>) -> Option<DropEvent> {
        let DragState::Carrying { payload } = std::mem::take(&mut self.state) else {
            return None;
        };

        let Some(orbit) = zone else {
            debug!("drop of `{payload}` landed outside every orbit zone");
            return None;
        };

        match payload.parse::<ElementType>() {
            Ok(element) => Some(DropEvent::new(element, orbit)),
            Err(error) => {
                debug!("ignoring drop on orbit {orbit}: {error}");
                None
            }
        }
    }

    /// Abandons the gesture in flight without producing a drop.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
