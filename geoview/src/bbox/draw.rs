use geoview_types::Rect;

use crate::bbox::BboxEmitter;
use crate::error::GeoviewError;
use crate::view::ViewState;

/// State of the box drawing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    /// No box is being drawn.
    #[default]
    Idle,
    /// The user is drawing a box.
    Drawing,
}

/// Box drawn by the user, shown on the map until the next box is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxOverlay {
    /// Projection the box was drawn in.
    pub projection: String,
    /// Drawn box.
    pub extent: Rect,
}

/// Control that lets the user draw a bounding box on the map and emits it through a [`BboxEmitter`].
///
/// Besides drawing, the control can emit the extent of the current view, either on request or every time the
/// map stops moving when auto mode is on.
#[derive(Debug)]
pub struct BoxDrawControl {
    emitter: BboxEmitter,
    state: DrawState,
    overlay: Option<BoxOverlay>,
    auto: bool,
}

impl BoxDrawControl {
    /// Creates an idle control that emits through the given emitter.
    pub fn new(emitter: BboxEmitter) -> Self {
        Self {
            emitter,
            state: DrawState::Idle,
            overlay: None,
            auto: false,
        }
    }

    /// Current interaction state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// The last drawn box.
    pub fn overlay(&self) -> Option<&BoxOverlay> {
        self.overlay.as_ref()
    }

    /// Removes the last drawn box from the map.
    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    /// Whether the view extent is emitted on every map move.
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Turns emitting the view extent on every map move on or off.
    pub fn set_auto(&mut self, auto: bool) {
        self.auto = auto;
    }

    /// Starts drawing. Returns false if a drawing interaction is already active.
    pub fn activate(&mut self) -> bool {
        if self.state == DrawState::Drawing {
            return false;
        }

        log::debug!("Box drawing started");
        self.state = DrawState::Drawing;
        true
    }

    /// Stops drawing without emitting anything.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }

    /// Finishes drawing with the given box: emits it, keeps it as the overlay and goes back to idle.
    ///
    /// Returns `Ok(None)` if drawing was not active.
    pub fn complete(&mut self, projection: &str, extent: Rect) -> Result<Option<String>, GeoviewError> {
        if self.state != DrawState::Drawing {
            log::debug!("Ignoring box completion while not drawing");
            return Ok(None);
        }

        self.state = DrawState::Idle;
        self.overlay = Some(BoxOverlay {
            projection: projection.to_string(),
            extent,
        });

        self.emitter.emit(projection, &extent).map(Some)
    }

    /// Emits the extent of the view.
    pub fn fit_to_view(&self, view: &ViewState) -> Result<String, GeoviewError> {
        self.emitter.emit_view(view)
    }

    /// Handles the end of a map move. Emits the view extent if auto mode is on.
    pub fn on_move_end(&self, view: &ViewState) -> Result<Option<String>, GeoviewError> {
        if !self.auto {
            return Ok(None);
        }

        self.emitter.emit_view(view).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::tests::recording_emitter;
    use geoview_types::{Point2d, Size};

    fn view() -> ViewState {
        ViewState::new("EPSG:4326")
            .with_size(Size::new(100.0, 50.0))
            .with_center(Point2d::new(5.0, 52.0))
            .with_resolution(0.01)
    }

    #[test]
    fn draw_cycle() {
        let (emitter, received) = recording_emitter();
        let mut control = BoxDrawControl::new(emitter);
        assert_eq!(control.state(), DrawState::Idle);

        assert!(control.activate());
        assert!(!control.activate());
        assert_eq!(control.state(), DrawState::Drawing);

        let extent = Rect::new(4.0, 51.0, 6.0, 53.0);
        assert_eq!(
            control.complete("EPSG:4326", extent).expect("emitted"),
            Some("4,51,6,53".to_string())
        );
        assert_eq!(control.state(), DrawState::Idle);
        assert_eq!(
            control.overlay(),
            Some(&BoxOverlay {
                projection: "EPSG:4326".to_string(),
                extent
            })
        );
        assert_eq!(received.lock().len(), 1);

        assert_eq!(control.complete("EPSG:4326", extent).expect("ignored"), None);
        assert_eq!(received.lock().len(), 1);
    }

    #[test]
    fn cancel_does_not_emit() {
        let (emitter, received) = recording_emitter();
        let mut control = BoxDrawControl::new(emitter);
        control.activate();
        control.cancel();

        assert_eq!(control.state(), DrawState::Idle);
        assert!(control.overlay().is_none());
        assert!(received.lock().is_empty());
    }

    #[test]
    fn failed_emission_still_finishes_drawing() {
        let (emitter, received) = recording_emitter();
        let mut control = BoxDrawControl::new(emitter);
        control.activate();

        assert!(control
            .complete("EPSG:999999", Rect::new(0.0, 0.0, 1.0, 1.0))
            .is_err());
        assert_eq!(control.state(), DrawState::Idle);
        assert!(control.overlay().is_some());
        assert!(received.lock().is_empty());
    }

    #[test]
    fn auto_mode_emits_on_move_end() {
        let (emitter, received) = recording_emitter();
        let mut control = BoxDrawControl::new(emitter);

        assert_eq!(control.on_move_end(&view()).expect("not emitted"), None);
        assert!(received.lock().is_empty());

        control.set_auto(true);
        assert_eq!(
            control.on_move_end(&view()).expect("emitted"),
            Some("4.5,51.75,5.5,52.25".to_string())
        );
        assert_eq!(
            control.fit_to_view(&view()).expect("emitted"),
            "4.5,51.75,5.5,52.25"
        );
        assert_eq!(received.lock().len(), 2);
    }
}
