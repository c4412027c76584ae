//! Instrumented rendering: record a traversal, then replay it a few strips
//! per tick so the portal order can be watched.

use log::debug;

use super::{BLACK, Strip, StripColors, Surface, portal::PortalRenderer, portal::StripSink};
use crate::world::{Level, Player, SectorId};

/// One recorded step of a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderRecord {
    Strip(Strip),
    /// Everything up to the next boundary belongs to this sector.
    SectorBoundary(SectorId),
}

/// Ordered record list with a playback cursor.
#[derive(Clone, Debug, Default)]
pub struct RenderQueue {
    records: Vec<RenderRecord>,
    cursor: usize,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once every record has been popped (or none were recorded).
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.cursor >= self.records.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(self.cursor)
    }

    #[inline]
    pub fn records(&self) -> &[RenderRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = 0;
    }

    pub fn pop(&mut self) -> Option<RenderRecord> {
        let rec = *self.records.get(self.cursor)?;
        self.cursor += 1;
        Some(rec)
    }

    /// Strips ahead of the cursor, stopping at the next sector boundary.
    pub fn upcoming_strips(&self) -> impl Iterator<Item = &Strip> + '_ {
        self.records[self.cursor.min(self.records.len())..]
            .iter()
            .map_while(|rec| match rec {
                RenderRecord::Strip(s) => Some(s),
                RenderRecord::SectorBoundary(_) => None,
            })
    }
}

impl StripSink for RenderQueue {
    const REVEALS_WINDOW: bool = true;

    fn begin_sector(&mut self, sector: SectorId) {
        self.records.push(RenderRecord::SectorBoundary(sector));
    }

    fn strip(&mut self, strip: Strip) {
        self.records.push(RenderRecord::Strip(strip));
    }
}

/*───────────────────────────────────────────────────────────────────────*/

/// Drives a [`RenderQueue`] a bounded number of records per tick.
#[derive(Clone, Debug)]
pub struct Playback {
    speed: u32,
    paused: bool,
    queue: RenderQueue,
}

impl Playback {
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 20;
    pub const DEFAULT_SPEED: u32 = 3;

    pub fn new(speed: u32) -> Self {
        Self {
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            paused: false,
            queue: RenderQueue::new(),
        }
    }

    /// Records drawn per tick.
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
        debug!("playback speed {}", self.speed);
    }

    pub fn faster(&mut self) {
        self.set_speed(self.speed.saturating_add(1));
    }

    pub fn slower(&mut self) {
        self.set_speed(self.speed.saturating_sub(1));
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!("playback {}", if self.paused { "paused" } else { "resumed" });
    }

    #[inline]
    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Advance playback by one tick.
    ///
    /// A drained queue is refilled with a fresh traversal and the surface is
    /// cleared; nothing else is drawn on that tick. Otherwise up to
    /// [`speed`](Self::speed) records are consumed. Reaching a sector
    /// boundary paints that sector's strips in the highlight colours at once;
    /// they are then replayed in their own colours as playback catches up.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        renderer: &mut PortalRenderer,
        level: &Level,
        player: &Player,
        surface: &mut S,
    ) {
        if self.paused {
            return;
        }

        if self.queue.is_drained() {
            self.queue.clear();
            renderer.render(level, player, &mut self.queue);
            debug!("playback refilled with {} records", self.queue.records.len());
            surface.clear(BLACK);
            return;
        }

        for _ in 0..self.speed {
            match self.queue.pop() {
                Some(RenderRecord::Strip(strip)) => surface.draw_strip(&strip),
                Some(RenderRecord::SectorBoundary(_)) => {
                    for strip in self.queue.upcoming_strips() {
                        surface.draw_strip(&Strip {
                            colors: StripColors::HIGHLIGHT,
                            ..*strip
                        });
                    }
                }
                None => break,
            }
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Direct, Software, rgb};
    use crate::sim::move_player;
    use crate::world::rect_sector;
    use glam::{Vec2, vec2};

    const W: usize = 64;
    const H: usize = 48;

    fn strip(x: i32) -> Strip {
        Strip::new(x, 1, 4, StripColors::WALL).unwrap()
    }

    fn two_rooms() -> (Level, Player) {
        let level = Level {
            sectors: vec![
                rect_sector(0.0, 0.0, 10.0, 10.0, 0.0, 20.0, [None, Some(1), None, None]),
                rect_sector(10.0, 0.0, 20.0, 10.0, 0.0, 20.0, [None, None, None, Some(0)]),
            ],
        };
        let mut player = Player::new(vec2(5.0, 5.0), 0.0, 0);
        move_player(&level, &mut player, Vec2::ZERO);
        (level, player)
    }

    #[test]
    fn upcoming_stops_at_boundary() {
        let mut q = RenderQueue::new();
        q.begin_sector(0);
        q.strip(strip(0));
        q.strip(strip(1));
        q.begin_sector(1);
        q.strip(strip(2));

        assert_eq!(q.pop(), Some(RenderRecord::SectorBoundary(0)));
        let xs: Vec<i32> = q.upcoming_strips().map(|s| s.x).collect();
        assert_eq!(xs, vec![0, 1]);

        q.pop();
        q.pop();
        assert_eq!(q.upcoming_strips().count(), 0);
        assert_eq!(q.remaining(), 2);
    }

    #[test]
    fn pop_past_end_is_none() {
        let mut q = RenderQueue::new();
        assert!(q.is_drained());
        assert_eq!(q.pop(), None);
        q.strip(strip(0));
        assert!(!q.is_drained());
        q.pop();
        assert!(q.is_drained());
        assert_eq!(q.upcoming_strips().count(), 0);
    }

    #[test]
    fn queue_gets_markers_and_windows() {
        let (level, player) = two_rooms();
        let mut q = RenderQueue::new();
        PortalRenderer::new(W, H).render(&level, &player, &mut q);

        let markers: Vec<_> = q
            .records()
            .iter()
            .filter_map(|r| match r {
                RenderRecord::SectorBoundary(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec![0, 1]);
        assert_eq!(q.records()[0], RenderRecord::SectorBoundary(0));
        assert!(
            q.records()
                .iter()
                .any(|r| matches!(r, RenderRecord::Strip(s) if s.colors == StripColors::WINDOW))
        );
    }

    #[test]
    fn speed_is_clamped() {
        let mut p = Playback::new(0);
        assert_eq!(p.speed(), 1);
        p.slower();
        assert_eq!(p.speed(), 1);
        p.set_speed(99);
        assert_eq!(p.speed(), 20);
        p.faster();
        assert_eq!(p.speed(), 20);
        assert_eq!(Playback::default().speed(), 3);
    }

    #[test]
    fn first_tick_refills_and_clears() {
        let (level, player) = two_rooms();
        let mut r = PortalRenderer::new(W, H);
        let mut fb = Software::new(W, H);
        fb.clear(rgb(9, 9, 9));

        let mut p = Playback::default();
        p.tick(&mut r, &level, &player, &mut fb);
        assert!(!p.queue().is_drained());
        assert!(fb.pixels().iter().all(|&px| px == BLACK));
    }

    #[test]
    fn tick_consumes_speed_records() {
        let (level, player) = two_rooms();
        let mut r = PortalRenderer::new(W, H);
        let mut fb = Software::new(W, H);
        let mut p = Playback::new(5);
        p.tick(&mut r, &level, &player, &mut fb);
        let before = p.queue().remaining();
        p.tick(&mut r, &level, &player, &mut fb);
        assert_eq!(p.queue().remaining(), before - 5);
    }

    #[test]
    fn boundary_highlights_sector_strips() {
        let (level, player) = two_rooms();
        let mut r = PortalRenderer::new(W, H);
        let mut fb = Software::new(W, H);
        let mut p = Playback::new(1);
        p.tick(&mut r, &level, &player, &mut fb); // refill
        p.tick(&mut r, &level, &player, &mut fb); // marker of sector 0
        let green = fb
            .pixels()
            .iter()
            .filter(|&&px| px == StripColors::HIGHLIGHT.middle || px == StripColors::HIGHLIGHT.top)
            .count();
        assert!(green > 0);
    }

    #[test]
    fn paused_playback_does_nothing() {
        let (level, player) = two_rooms();
        let mut r = PortalRenderer::new(W, H);
        let mut fb = Software::new(W, H);
        let mut p = Playback::default();
        p.toggle_pause();
        assert!(p.paused());
        p.tick(&mut r, &level, &player, &mut fb);
        assert!(p.queue().is_drained());
        assert!(p.queue().records().is_empty());
    }

    #[test]
    fn full_playback_matches_direct_render() {
        let (level, player) = two_rooms();
        let mut r = PortalRenderer::new(W, H);

        let mut direct = Software::new(W, H);
        r.render(&level, &player, &mut Direct(&mut direct));

        let mut played = Software::new(W, H);
        let mut p = Playback::new(Playback::MAX_SPEED);
        p.tick(&mut r, &level, &player, &mut played);
        while !p.queue().is_drained() {
            p.tick(&mut r, &level, &player, &mut played);
        }

        // windows are drawn over by the next sector, so only the pixels the
        // direct pass never covers with ceiling, floor or wall could differ
        let window = [StripColors::WINDOW.top, StripColors::WINDOW.middle];
        let differ = direct
            .pixels()
            .iter()
            .zip(played.pixels())
            .filter(|(a, b)| a != b && !window.contains(b))
            .count();
        assert_eq!(differ, 0);
    }
}
