mod collision;
mod components;
mod movement;
mod tic;

pub use collision::{MoveResult, Opening, slide_move};
pub use components::{Buttons, Commands, InputCmd, MoveState};
pub use movement::{EYE_HEIGHT, HEAD_MARGIN, KNEE_HEIGHT, move_player};
pub use tic::{player_tic, speed_factor};
