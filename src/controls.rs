//! Camera controls driven by discrete input actions

use crate::camera::Camera;

/// World units moved per key press
pub const MOVE_STEP: f32 = 2.0;

/// Degrees turned per arrow key press
pub const ROTATE_STEP: f32 = 3.0;

/// Degrees turned per terminal cell of mouse travel
pub const MOUSE_SENSITIVITY: f32 = 0.7;

/// Key actions for the raytracer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
    /// Mouse look, in degrees
    Look { d_yaw: f32, d_pitch: f32 },
    ToggleOrbit,
    Pause,
    Reset,
}

impl Action {
    /// True for actions that move or turn the camera
    pub fn steers_camera(&self) -> bool {
        !matches!(
            self,
            Action::None | Action::Quit | Action::ToggleOrbit | Action::Pause | Action::Reset
        )
    }
}

/// Apply a steering action to `camera`; other actions are ignored.
///
/// Rows of the image grow along the basis `up` vector, so "up" on screen is
/// the negative `up` direction and negative pitch. Likewise screen right is
/// the negative basis `right`.
pub fn apply_action(camera: &mut Camera, action: Action) {
    let basis = camera.basis();
    let screen_right = -basis.right;
    let screen_up = -basis.up;

    match action {
        Action::MoveForward => camera.translate(basis.forward * MOVE_STEP),
        Action::MoveBack => camera.translate(-basis.forward * MOVE_STEP),
        Action::MoveLeft => camera.translate(-screen_right * MOVE_STEP),
        Action::MoveRight => camera.translate(screen_right * MOVE_STEP),
        Action::MoveUp => camera.translate(screen_up * MOVE_STEP),
        Action::MoveDown => camera.translate(-screen_up * MOVE_STEP),
        Action::LookUp => camera.look(0.0, -ROTATE_STEP),
        Action::LookDown => camera.look(0.0, ROTATE_STEP),
        Action::LookLeft => camera.look(-ROTATE_STEP, 0.0),
        Action::LookRight => camera.look(ROTATE_STEP, 0.0),
        Action::Look { d_yaw, d_pitch } => camera.look(d_yaw, d_pitch),
        Action::None | Action::Quit | Action::ToggleOrbit | Action::Pause | Action::Reset => {}
    }
}
