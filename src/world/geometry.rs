use glam::{Vec2, vec2};

pub type SectorId = usize;

/// Runtime snapshot of one map: an index-addressed list of sectors.
///
/// Sector identity is its index; neighbor links and `Player::sector` refer
/// to sectors by that index. Nothing is inserted or removed after load
/// except [`Level::unload`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Level {
    pub sectors: Vec<Sector>,
}

/*----------------------------- sectors ------------------------------*/

/// One convex room with a flat floor and a flat ceiling.
///
/// `vertices` form a closed polygon wound clockwise on a y-down screen;
/// closure is implicit (`vertices[n-1] -> vertices[0]`).
///
/// **Neighbor indexing:** `neighbors[i]` belongs to the edge that *ends* at
/// `vertices[i]`, i.e. `vertices[i-1] -> vertices[i]`. The edge starting at
/// `vertices[i]` therefore uses `neighbors[(i + 1) % n]`. Map files rely on
/// this convention; use [`Sector::edges`] instead of indexing by hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sector {
    pub floor: f32,
    pub ceil: f32,
    pub vertices: Vec<Vec2>,
    /// `None` = solid wall.
    pub neighbors: Vec<Option<SectorId>>,
}

/// One edge of a sector, already paired with the portal it carries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Index of the starting vertex.
    pub index: usize,
    pub a: Vec2,
    pub b: Vec2,
    pub neighbor: Option<SectorId>,
}

impl Sector {
    /// Walk the edges `v[i] -> v[i+1 mod n]` in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| {
            let next = (i + 1) % n;
            Edge {
                index: i,
                a: self.vertices[i],
                b: self.vertices[next],
                neighbor: self.neighbors.get(next).copied().flatten(),
            }
        })
    }

    #[inline]
    pub fn is_portal_free(&self) -> bool {
        self.neighbors.iter().all(Option::is_none)
    }
}

/*------------------------------ level -------------------------------*/

impl Level {
    #[inline]
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Drop every sector. Always succeeds.
    pub fn unload(&mut self) {
        self.sectors.clear();
    }

    /// Axis-aligned bounds of every vertex, `None` for an empty level.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        self.sectors
            .iter()
            .flat_map(|s| s.vertices.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Portal links that are not reciprocated by the sector on the other
    /// side, as `(sector, edge index, neighbor)`.
    pub fn one_way_portals(&self) -> Vec<(SectorId, usize, SectorId)> {
        let mut out = Vec::new();
        for (id, sector) in self.sectors.iter().enumerate() {
            for edge in sector.edges() {
                let Some(n) = edge.neighbor else { continue };
                let links_back = self
                    .sector(n)
                    .is_some_and(|other| other.neighbors.contains(&Some(id)));
                if !links_back {
                    out.push((id, edge.index, n));
                }
            }
        }
        out
    }
}

/// Axis-aligned rectangular sector `(x0,y0)-(x1,y1)` wound clockwise on
/// screen. Neighbors are given per side: top, right, bottom, left.
pub fn rect_sector(
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    floor: f32,
    ceil: f32,
    [top, right, bottom, left]: [Option<SectorId>; 4],
) -> Sector {
    Sector {
        floor,
        ceil,
        vertices: vec![vec2(x0, y0), vec2(x1, y0), vec2(x1, y1), vec2(x0, y1)],
        // neighbors[i] is the edge ending at vertex i
        neighbors: vec![left, top, right, bottom],
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
