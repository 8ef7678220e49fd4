/// Keyboard camera controls
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use painter3d_core::Camera;

/// Distance moved per key press
pub const MOVE_STEP: f32 = 0.2;
/// Yaw change per key press (radians)
pub const TURN_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAction {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    /// Along -up
    Lower,
    /// Along +up
    Raise,
    Quit,
}

impl CameraAction {
    /// W/S move, A/D strafe, arrows turn, Space and Ctrl+key move
    /// vertically, Q/Esc/Ctrl+C quit
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(Self::Quit),
                _ => Some(Self::Raise),
            };
        }
        match event.code {
            KeyCode::Char('w') => Some(Self::Forward),
            KeyCode::Char('s') => Some(Self::Back),
            KeyCode::Char('a') => Some(Self::StrafeLeft),
            KeyCode::Char('d') => Some(Self::StrafeRight),
            KeyCode::Left => Some(Self::TurnLeft),
            KeyCode::Right => Some(Self::TurnRight),
            KeyCode::Char(' ') => Some(Self::Lower),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    /// Mutate `camera`. `Quit` leaves it untouched.
    pub fn apply(self, camera: &mut Camera) {
        let look = camera.look_direction();
        let strafe = camera.right_direction();
        let up = camera.up;
        match self {
            Self::Forward => camera.translate(look * MOVE_STEP),
            Self::Back => camera.translate(look * -MOVE_STEP),
            Self::StrafeLeft => camera.translate(strafe * MOVE_STEP),
            Self::StrafeRight => camera.translate(strafe * -MOVE_STEP),
            Self::TurnLeft => camera.turn(TURN_STEP),
            Self::TurnRight => camera.turn(-TURN_STEP),
            Self::Lower => camera.translate(up * -MOVE_STEP),
            Self::Raise => camera.translate(up * MOVE_STEP),
            Self::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use painter3d_core::Vector3D;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        let action = |code| CameraAction::from_key(&key(code));
        assert_eq!(action(KeyCode::Char('w')), Some(CameraAction::Forward));
        assert_eq!(action(KeyCode::Left), Some(CameraAction::TurnLeft));
        assert_eq!(action(KeyCode::Char(' ')), Some(CameraAction::Lower));
        assert_eq!(action(KeyCode::Esc), Some(CameraAction::Quit));
        assert_eq!(action(KeyCode::Char('x')), None);
        let ctrl = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(CameraAction::from_key(&ctrl), Some(CameraAction::Raise));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(CameraAction::from_key(&ctrl_c), Some(CameraAction::Quit));
    }

    #[test]
    fn test_forward_then_back_returns() {
        let mut camera = Camera::default();
        CameraAction::Forward.apply(&mut camera);
        assert!((camera.position.z - MOVE_STEP).abs() < 1e-6);
        CameraAction::Back.apply(&mut camera);
        assert!(camera.position.length() < 1e-6);
    }

    #[test]
    fn test_strafe_and_vertical() {
        let mut camera = Camera::default();
        CameraAction::StrafeLeft.apply(&mut camera);
        // look (0,0,1) x up (0,1,0) = (-1,0,0)
        assert!((camera.position.x + MOVE_STEP).abs() < 1e-6);
        CameraAction::Lower.apply(&mut camera);
        assert!((camera.position.y + MOVE_STEP).abs() < 1e-6);
        CameraAction::Raise.apply(&mut camera);
        CameraAction::StrafeRight.apply(&mut camera);
        assert!(camera.position.length() < 1e-6);
    }

    #[test]
    fn test_turning_changes_only_yaw() {
        let mut camera = Camera::new(Vector3D::new(1.0, 2.0, 3.0));
        CameraAction::TurnLeft.apply(&mut camera);
        CameraAction::TurnLeft.apply(&mut camera);
        CameraAction::TurnRight.apply(&mut camera);
        assert!((camera.yaw() - TURN_STEP).abs() < 1e-6);
        assert_eq!(camera.position, Vector3D::new(1.0, 2.0, 3.0));
    }
}
