use glam::Vec2;

use crate::world::{
    Level, Player,
    helpers::{boxes_intersect, point_side},
};

/// Camera height above the floor when standing.
pub const EYE_HEIGHT: f32 = 6.0;
/// Room above the eye before the head touches a ceiling.
pub const HEAD_MARGIN: f32 = 1.0;
/// Tallest step that can be walked over.
pub const KNEE_HEIGHT: f32 = 2.0;

/// Move the player by `delta` without any wall blocking.
///
/// If the segment leaves the current sector through a portal edge the
/// player's sector becomes that neighbor. Only the first qualifying edge
/// (lowest edge index) counts. The displacement is always applied, the
/// eye is put back on the floor and the heading caches are refreshed.
pub fn move_player(level: &Level, player: &mut Player, delta: Vec2) {
    let from = player.xy();
    let to = from + delta;

    let crossed = level.sector(player.sector()).and_then(|sector| {
        sector
            .edges()
            .find(|e| {
                e.neighbor.is_some()
                    && boxes_intersect(from, to, e.a, e.b)
                    && point_side(to, e.a, e.b) < 0.0
            })
            .and_then(|e| e.neighbor)
    });
    if let Some(next) = crossed {
        player.set_sector(next);
    }

    player.translate(delta);

    if let Some(sector) = level.sector(player.sector()) {
        player.set_z(sector.floor + EYE_HEIGHT);
    }

    player.set_angle(player.angle());
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
