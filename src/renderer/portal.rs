//! Breadth-first portal renderer.
//!
//! A FIFO of [`WorkItem`]s `{sector, sx1, sx2}` starts with the player's
//! sector over the whole screen. Popping an item draws every edge of that
//! sector that faces the viewer and falls inside `sx1..=sx2`:
//!
//! ```text
//!   ytop[x]    ┬ ceiling strip
//!              │ upper wall    (portal)  ┐
//!              │   ... window handed to the neighbor ...
//!              │ lower wall    (portal)  ┘   or one solid wall strip
//!   ybottom[x] ┴ floor strip
//! ```
//!
//! `ytop`/`ybottom` only ever shrink, so nearer geometry always wins without
//! a depth buffer. Portals enqueue the neighbor over the clipped column range,
//! which always lies inside the parent's range.
//!
//! An item identical to one already processed this frame is skipped; it
//! could only repaint columns that are already final. Malformed graphs are
//! additionally cut off after `sectors × width` work items, the worst case a
//! well-formed map can reach.
//!
//! The traversal is written once, generic over a [`StripSink`]: the direct
//! variant paints a [`Surface`], the playback variant records into a
//! `RenderQueue`.

use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

use super::{
    Strip, StripColors, Surface,
    projection::{Screen, clip_to_frustum, to_view},
};
use crate::world::{Edge, Level, Player, Sector, SectorId};

/// Receives strips in traversal order.
pub trait StripSink {
    /// Also emit the window left open after each portal column.
    const REVEALS_WINDOW: bool = false;

    /// A work item for `sector` is about to be processed.
    fn begin_sector(&mut self, _sector: SectorId) {}

    fn strip(&mut self, strip: Strip);
}

/// Paints strips straight onto a surface.
pub struct Direct<'a, S: Surface + ?Sized>(pub &'a mut S);

impl<S: Surface + ?Sized> StripSink for Direct<'_, S> {
    #[inline]
    fn strip(&mut self, strip: Strip) {
        self.0.draw_strip(&strip);
    }
}

/// A pending portal view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub sector: SectorId,
    pub sx1: i32,
    pub sx2: i32,
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Renderer                                */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Clone, Debug)]
pub struct PortalRenderer {
    screen: Screen,
    /* remaining window per column, survives across work items */
    ytop: Vec<i32>,
    ybottom: Vec<i32>,
    /* pending items, each with the index of the visit that queued it */
    queue: VecDeque<(WorkItem, Option<usize>)>,
    seen: HashSet<WorkItem>,
    visited: Vec<WorkItem>,
    parents: Vec<Option<usize>>,
}

impl PortalRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let screen = Screen::new(width, height);
        Self {
            screen,
            ytop: vec![0; width],
            ybottom: vec![screen.height - 1; width],
            queue: VecDeque::new(),
            seen: HashSet::new(),
            visited: Vec::new(),
            parents: Vec::new(),
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Work items processed by the last [`render`](Self::render), in order.
    #[inline]
    pub fn visited(&self) -> &[WorkItem] {
        &self.visited
    }

    /// The visit whose portal queued `visited()[i]`; `None` for the root.
    pub fn parent(&self, i: usize) -> Option<&WorkItem> {
        let p = (*self.parents.get(i)?)?;
        self.visited.get(p)
    }

    /// Most work items one frame may process on `level`.
    fn budget(&self, level: &Level) -> usize {
        level.sectors.len().saturating_mul(self.screen.width.max(0) as usize)
    }

    /// Run one full traversal from the player's viewpoint into `sink`.
    ///
    /// Renders nothing when the player's sector does not exist.
    pub fn render<K: StripSink>(&mut self, level: &Level, player: &Player, sink: &mut K) {
        self.ytop.fill(0);
        self.ybottom.fill(self.screen.height - 1);
        self.queue.clear();
        self.seen.clear();
        self.visited.clear();
        self.parents.clear();

        if self.screen.is_empty() || level.sector(player.sector()).is_none() {
            return;
        }

        let root = WorkItem {
            sector: player.sector(),
            sx1: 0,
            sx2: self.screen.width - 1,
        };
        self.queue.push_back((root, None));

        let budget = self.budget(level);
        while let Some((now, parent)) = self.queue.pop_front() {
            if self.visited.len() >= budget {
                debug!("portal pass cut off after {budget} work items");
                break;
            }
            let Some(sector) = level.sector(now.sector) else {
                continue;
            };
            if !self.seen.insert(now) {
                continue;
            }

            let index = self.visited.len();
            self.visited.push(now);
            self.parents.push(parent);
            sink.begin_sector(now.sector);

            for edge in sector.edges() {
                self.draw_edge(level, player, sector, &edge, now, index, sink);
            }
        }

        trace!("portal pass: {} work items", self.visited.len());
    }

    /// Project one edge and fill its columns inside `now.sx1..=now.sx2`.
    #[allow(clippy::too_many_arguments)]
    fn draw_edge<K: StripSink>(
        &mut self,
        level: &Level,
        player: &Player,
        sector: &Sector,
        edge: &Edge,
        now: WorkItem,
        index: usize,
        sink: &mut K,
    ) {
        /*----- 1. view space, skip if fully behind --------------------------*/
        let mut t1 = to_view(player, edge.a);
        let mut t2 = to_view(player, edge.b);
        if t1.y <= 0.0 && t2.y <= 0.0 {
            return;
        }

        /*----- 2. clip the part behind the viewer ---------------------------*/
        if t1.y <= 0.0 || t2.y <= 0.0 {
            let Some((a, b)) = clip_to_frustum(t1, t2) else {
                return;
            };
            (t1, t2) = (a, b);
        }

        /*----- 3. screen columns, back-face and range reject ----------------*/
        let screen = self.screen;
        let x1 = screen.column(t1);
        let x2 = screen.column(t2);
        if x1 >= x2 || x2 < now.sx1 || x1 > now.sx2 {
            return;
        }

        /*----- 4. rows for our own and the neighbor's planes ----------------*/
        let eye = player.pos().z;
        let rows = |h: f32| (screen.row(h - eye, t1.y), screen.row(h - eye, t2.y));
        let ceil = Ramp::new(x1, x2, rows(sector.ceil));
        let floor = Ramp::new(x1, x2, rows(sector.floor));

        // a dangling neighbor index is drawn as a solid wall
        let neighbor = edge
            .neighbor
            .and_then(|n| level.sector(n).map(|s| (n, s)))
            .map(|(n, s)| (n, Ramp::new(x1, x2, rows(s.ceil)), Ramp::new(x1, x2, rows(s.floor))));

        /*----- 5. columns ---------------------------------------------------*/
        let begin = x1.max(now.sx1);
        let end = x2.min(now.sx2);
        for x in begin..=end {
            let col = x as usize;
            let (top, bottom) = (self.ytop[col], self.ybottom[col]);
            if top > bottom {
                continue; // column already closed
            }
            let outline = x == x1 || x == x2;

            let cya = ceil.at(x, top, bottom);
            let cyb = floor.at(x, top, bottom);

            emit(sink, x, top, cya - 1, StripColors::CEILING);
            emit(sink, x, cyb + 1, bottom, StripColors::FLOOR);

            match &neighbor {
                Some((_, nceil, nfloor)) => {
                    let cnya = nceil.at(x, top, bottom);
                    let cnyb = nfloor.at(x, top, bottom);

                    let upper = if outline { StripColors::OUTLINE } else { StripColors::WALL };
                    emit(sink, x, cya, cnya - 1, upper);
                    self.ytop[col] = cya.max(cnya);

                    let lower = if outline { StripColors::OUTLINE } else { StripColors::LOWER_WALL };
                    emit(sink, x, cnyb + 1, cyb, lower);
                    self.ybottom[col] = cyb.min(cnyb);

                    if K::REVEALS_WINDOW {
                        emit(sink, x, self.ytop[col], self.ybottom[col], StripColors::WINDOW);
                    }
                }
                None => {
                    let wall = if outline { StripColors::OUTLINE } else { StripColors::WALL };
                    emit(sink, x, cya, cyb, wall);
                }
            }
        }

        /*----- 6. recurse through the portal --------------------------------*/
        if let Some((n, _, _)) = neighbor {
            if end >= begin {
                let next = WorkItem {
                    sector: n,
                    sx1: begin,
                    sx2: end,
                };
                self.queue.push_back((next, Some(index)));
            }
        }
    }
}

#[inline]
fn emit<K: StripSink>(sink: &mut K, x: i32, y1: i32, y2: i32, colors: StripColors) {
    if let Some(strip) = Strip::new(x, y1, y2, colors) {
        sink.strip(strip);
    }
}

/// Row that varies linearly between two screen columns.
#[derive(Clone, Copy, Debug)]
struct Ramp {
    x1: i64,
    x2: i64,
    y1: i64,
    y2: i64,
}

impl Ramp {
    fn new(x1: i32, x2: i32, (y1, y2): (i32, i32)) -> Self {
        Self {
            x1: x1.into(),
            x2: x2.into(),
            y1: y1.into(),
            y2: y2.into(),
        }
    }

    /// Integer interpolation at column `x`, clamped to `lo..=hi`.
    #[inline]
    fn at(&self, x: i32, lo: i32, hi: i32) -> i32 {
        // widened: both factors can span the full i32 range
        let dx = i128::from(i64::from(x) - self.x1);
        let y = dx * i128::from(self.y2 - self.y1) / i128::from(self.x2 - self.x1)
            + i128::from(self.y1);
        // lo <= hi, so the result fits in i32
        y.clamp(lo.into(), hi.into()) as i32
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
