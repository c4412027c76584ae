use glam::Vec2;
use log::info;

use crate::{
    config::{Config, RenderMode},
    mapfile::MapData,
    renderer::{
        BLACK, CYAN, Direct, MAGENTA, MapView, Playback, PortalRenderer, Surface, draw_map,
        draw_stats,
    },
    sim::{Commands, InputCmd, MoveState, move_player, player_tic},
    world::{Level, Player},
};

/// Everything one frame loop owns: world, player and the render state.
pub struct Engine {
    pub level: Level,
    pub player: Player,
    pub motion: MoveState,
    pub renderer: PortalRenderer,
    pub playback: Playback,
    pub mode: RenderMode,
    pub show_map: bool,
    pub map_view: MapView,
}

impl Engine {
    /// Take ownership of a loaded map and settle the player into it.
    pub fn new(map: MapData, cfg: &Config) -> Self {
        let MapData { level, mut player, .. } = map;
        move_player(&level, &mut player, Vec2::ZERO);
        info!(
            "engine: {} sectors, {}x{} {:?}",
            level.sectors.len(),
            cfg.width,
            cfg.height,
            cfg.mode
        );

        Self {
            level,
            player,
            motion: MoveState::default(),
            renderer: PortalRenderer::new(cfg.width, cfg.height),
            playback: Playback::new(cfg.playback_speed),
            mode: cfg.mode,
            show_map: cfg.show_map,
            map_view: MapView::default(),
        }
    }

    /// Apply one frame of input. Returns `false` once quit was requested.
    pub fn tick(&mut self, dt: f32, cmd: &InputCmd) -> bool {
        let pressed = cmd.pressed;
        if pressed.contains(Commands::QUIT) {
            return false;
        }
        if pressed.contains(Commands::PAUSE) {
            self.playback.toggle_pause();
        }
        if pressed.contains(Commands::TOGGLE_MAP) {
            self.show_map = !self.show_map;
        }
        if pressed.contains(Commands::SPEED_UP) {
            self.playback.faster();
        }
        if pressed.contains(Commands::SPEED_DOWN) {
            self.playback.slower();
        }

        player_tic(&self.level, &mut self.player, &mut self.motion, cmd.held, dt);
        true
    }

    /// Produce the frame on `surface` per the current mode, then the overlay.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        match self.mode {
            RenderMode::Direct => {
                surface.clear(BLACK);
                self.renderer
                    .render(&self.level, &self.player, &mut Direct(&mut *surface));
            }
            RenderMode::Slomo => {
                self.playback
                    .tick(&mut self.renderer, &self.level, &self.player, surface);
            }
        }

        if self.show_map {
            draw_map(surface, &self.level, &self.player, &self.map_view, CYAN);
            draw_stats(surface, &self.level, &self.player, &self.map_view, MAGENTA);
        }
    }

    /// Drop the level; later frames render nothing.
    pub fn shutdown(&mut self) {
        self.level.unload();
        info!("engine: level unloaded");
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
