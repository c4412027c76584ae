use bitflags::bitflags;

bitflags! {
    /// Keys held down during this frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u16 {
        const FORWARD      = 1 << 0; // W
        const BACK         = 1 << 1; // S
        const STRAFE_LEFT  = 1 << 2; // Q
        const STRAFE_RIGHT = 1 << 3; // E
        const TURN_LEFT    = 1 << 4; // A
        const TURN_RIGHT   = 1 << 5; // D
        const BOOST        = 1 << 6; // Shift
        const SLOW         = 1 << 7; // Insert

        const MOVEMENT = Self::FORWARD.bits()
            | Self::BACK.bits()
            | Self::STRAFE_LEFT.bits()
            | Self::STRAFE_RIGHT.bits();
    }
}

bitflags! {
    /// Keys that went down this frame (edge-triggered).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Commands: u8 {
        const PAUSE      = 1 << 0; // P
        const TOGGLE_MAP = 1 << 1; // M
        const SPEED_UP   = 1 << 2; // NumPad +
        const SPEED_DOWN = 1 << 3; // NumPad -
        const QUIT       = 1 << 4; // Escape
    }
}

/// Input snapshot for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub held: Buttons,
    pub pressed: Commands,
}

impl InputCmd {
    pub fn held(held: Buttons) -> Self {
        Self {
            held,
            pressed: Commands::empty(),
        }
    }
}

/// Per-player movement flag carried between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveState {
    /// Set while a direction key is held; cleared when the slide pass hits
    /// a wall.
    pub moving: bool,
}
