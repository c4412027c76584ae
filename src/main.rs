//! Interactive portal renderer.
//!
//! ```bash
//! cargo run --release -- assets/demo.map --mode slomo --show-map
//! ```
//!
//! W/S walk, Q/E strafe, A/D turn, Shift boost, Insert slow motion,
//! P pause playback, M map overlay, +/- playback speed, Esc quit.

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

use yaportal_rs::{
    config::Config,
    engine::Engine,
    mapfile::{dump, load_map},
    renderer::Software,
    sim::{Buttons, Commands, InputCmd},
};

/// Longest frame step fed to the simulation, in seconds.
const MAX_DT: f32 = 0.1;

const HELD: [(Key, Buttons); 9] = [
    (Key::W, Buttons::FORWARD),
    (Key::S, Buttons::BACK),
    (Key::Q, Buttons::STRAFE_LEFT),
    (Key::E, Buttons::STRAFE_RIGHT),
    (Key::A, Buttons::TURN_LEFT),
    (Key::D, Buttons::TURN_RIGHT),
    (Key::LeftShift, Buttons::BOOST),
    (Key::RightShift, Buttons::BOOST),
    (Key::Insert, Buttons::SLOW),
];

const PRESSED: [(Key, Commands); 7] = [
    (Key::P, Commands::PAUSE),
    (Key::M, Commands::TOGGLE_MAP),
    (Key::NumPadPlus, Commands::SPEED_UP),
    (Key::Equal, Commands::SPEED_UP),
    (Key::NumPadMinus, Commands::SPEED_DOWN),
    (Key::Minus, Commands::SPEED_DOWN),
    (Key::Escape, Commands::QUIT),
];

fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();
    for (key, button) in HELD {
        if win.is_key_down(key) {
            cmd.held |= button;
        }
    }
    for (key, command) in PRESSED {
        if win.is_key_pressed(key, KeyRepeat::No) {
            cmd.pressed |= command;
        }
    }
    cmd
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::parse();
    let map = load_map(&cfg.map).with_context(|| format!("loading {}", cfg.map.display()))?;
    if cfg.dump {
        info!("{}", dump(&map));
    }

    let mut engine = Engine::new(map, &cfg);
    let mut fb = Software::new(cfg.width, cfg.height);

    let mut win = Window::new(
        "yaportal - sector/portal renderer",
        cfg.width,
        cfg.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(cfg.fps);

    let mut last = Instant::now();
    while win.is_open() {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(MAX_DT);
        last = now;

        let cmd = read_input(&win);
        if !engine.tick(dt, &cmd) {
            break;
        }

        engine.draw(&mut fb);
        fb.end_frame(|buf, w, h| win.update_with_buffer(buf, w, h))
            .map_err(|e| anyhow!("presenting frame: {e}"))?;
    }

    engine.shutdown();
    Ok(())
}
