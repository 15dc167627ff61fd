/// Camera-drag interaction state machine.
///
/// Two states: idle, and dragging with the last observed pointer Y. Pointer
/// motion while dragging yields the vertical delta since the previous sample;
/// the tracker itself carries no camera semantics.
///
/// At most one drag session is active at a time. The machine is defensive by
/// construction: a press while already dragging and a release while idle are
/// both ignored.
#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        last_y: f32,
    },
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Primary-button press over the surface at vertical position `y`.
    ///
    /// Returns `true` if a drag session started.
    pub fn press(&mut self, y: f32) -> bool {
        match self.state {
            DragState::Idle => {
                self.state = DragState::Dragging { last_y: y };
                true
            }
            DragState::Dragging { .. } => false,
        }
    }

    /// Pointer motion to vertical position `y`.
    ///
    /// While dragging, returns `Some(delta)` with `delta = y - last_y` and
    /// advances the session. While idle, returns `None`.
    pub fn motion(&mut self, y: f32) -> Option<f32> {
        match &mut self.state {
            DragState::Idle => None,
            DragState::Dragging { last_y } => {
                let delta = y - *last_y;
                *last_y = y;
                Some(delta)
            }
        }
    }

    /// Primary-button release, observed anywhere (a drag that leaves the
    /// surface still terminates correctly).
    ///
    /// Returns `true` if a drag session ended.
    pub fn release(&mut self) -> bool {
        match self.state {
            DragState::Dragging { .. } => {
                self.state = DragState::Idle;
                true
            }
            DragState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_move_move_release_yields_deltas_in_order() {
        let mut drag = DragTracker::new();
        let mut deltas = Vec::new();

        assert!(drag.press(100.0));
        if let Some(d) = drag.motion(105.0) {
            deltas.push(d);
        }
        if let Some(d) = drag.motion(102.0) {
            deltas.push(d);
        }
        assert!(drag.release());

        assert_eq!(deltas, vec![5.0, -3.0]);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn motion_while_idle_yields_nothing() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.motion(50.0), None);
    }

    #[test]
    fn press_while_dragging_is_ignored() {
        let mut drag = DragTracker::new();
        assert!(drag.press(10.0));
        assert!(!drag.press(999.0));
        // The original session's baseline survives the spurious press.
        assert_eq!(drag.motion(12.0), Some(2.0));
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut drag = DragTracker::new();
        assert!(!drag.release());
    }

    #[test]
    fn tracker_is_reentrant_across_sessions() {
        let mut drag = DragTracker::new();
        assert!(drag.press(0.0));
        assert!(drag.release());
        assert!(drag.press(40.0));
        assert_eq!(drag.motion(45.0), Some(5.0));
        assert!(drag.release());
    }
}
