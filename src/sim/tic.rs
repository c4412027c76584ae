use glam::{Vec2, vec2};

use super::{
    collision::slide_move,
    components::{Buttons, MoveState},
    movement::move_player,
};
use crate::world::{Level, Player};

pub const SPEED_NORMAL: f32 = 2.0;
pub const SPEED_BOOST: f32 = 5.0; // Shift
pub const SPEED_SLOW: f32 = 0.2; // Insert
/// Walking covers `MOVE_SCALE * speed` map units per second.
pub const MOVE_SCALE: f32 = 2.0;
pub const ACCEL_PUSHING: f32 = 0.4;
pub const ACCEL_COASTING: f32 = 0.2;

/// Speed factor for the held modifier keys; boost wins over slow.
#[inline]
pub fn speed_factor(held: Buttons) -> f32 {
    if held.contains(Buttons::BOOST) {
        SPEED_BOOST
    } else if held.contains(Buttons::SLOW) {
        SPEED_SLOW
    } else {
        SPEED_NORMAL
    }
}

/// Run one frame of player movement.
///
/// 1. if moving, clip the current velocity against the walls and move
/// 2. turn, then settle with a zero move
/// 3. build the wished direction from the held keys
/// 4. blend it into the velocity
pub fn player_tic(level: &Level, player: &mut Player, state: &mut MoveState, held: Buttons, dt: f32) {
    /* ----- 1. collision / slide ------------------------------------- */
    if state.moving {
        let res = slide_move(level, player, player.velocity().truncate());
        if res.hit_wall {
            state.moving = false;
        }
        move_player(level, player, res.delta);
    }

    /* ----- 2. turning ----------------------------------------------- */
    let speed = speed_factor(held);
    if held.contains(Buttons::TURN_LEFT) {
        player.turn(-speed * dt);
    }
    if held.contains(Buttons::TURN_RIGHT) {
        player.turn(speed * dt);
    }
    move_player(level, player, Vec2::ZERO);

    /* ----- 3. wished direction -------------------------------------- */
    let step = MOVE_SCALE * speed * dt;
    let (s, c) = (player.anglesin(), player.anglecos());
    let mut wish = Vec2::ZERO;
    if held.contains(Buttons::FORWARD) {
        wish += vec2(c, s) * step;
    }
    if held.contains(Buttons::BACK) {
        wish -= vec2(c, s) * step;
    }
    if held.contains(Buttons::STRAFE_LEFT) {
        wish += vec2(s, -c) * step;
    }
    if held.contains(Buttons::STRAFE_RIGHT) {
        wish += vec2(-s, c) * step;
    }

    /* ----- 4. smoothing --------------------------------------------- */
    let pushing = held.intersects(Buttons::MOVEMENT);
    let accel = if pushing { ACCEL_PUSHING } else { ACCEL_COASTING };
    let v = player.velocity();
    let xy = v.truncate() * (1.0 - accel) + wish * accel;
    player.set_velocity(xy.extend(v.z));

    if pushing {
        state.moving = true;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
