// ──────────────────────────────────────────────────────────────────────────
// mapfile/parser.rs
//
//  text lines ──► vertex table ──╮
//                                ├──► world::Level + world::Player
//             sector / player  ──╯
// ──────────────────────────────────────────────────────────────────────────

use glam::{Vec2, vec2};
use log::warn;
use std::path::PathBuf;
use thiserror::Error;

use crate::world::{Level, Player, Sector, SectorId};

/// Neighbor value used by map files for a solid wall.
pub const NO_NEIGHBOR: i64 = -1;

/*──────────────────────────── Error types ──────────────────────────*/

/// What went wrong inside a single line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("`{directive}` expects {expected} tokens, got {got}")]
    TokenCount {
        directive: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("`{0}` is not a valid number")]
    BadNumber(String),

    #[error("sector line has {0} tokens; it needs 2k+3 (floor, ceil, k vertices, k neighbors)")]
    SectorParity(usize),

    #[error("sector has {0} vertices; at least 3 are required")]
    TooFewVertices(usize),

    #[error("vertex index {index} out of range (table holds {len})")]
    VertexOutOfRange { index: i64, len: usize },

    #[error("negative index {0} (only -1 is allowed, for neighbors)")]
    NegativeIndex(i64),
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("cannot read map file {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {kind}: `{content}`")]
    Parse {
        line: usize,
        content: String,
        kind: LineError,
    },

    #[error("sector {sector}: neighbor slot {slot} points at sector {neighbor}, but only {count} exist")]
    NeighborOutOfRange {
        sector: SectorId,
        slot: usize,
        neighbor: SectorId,
        count: usize,
    },

    #[error("player starts in sector {sector}, but only {count} exist")]
    PlayerSectorOutOfRange { sector: SectorId, count: usize },

    #[error("map defines no sectors")]
    NoSectors,
}

/*──────────────────────────── Output ───────────────────────────────*/

/// Everything a successful load produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapData {
    /// Declaration-order vertex table (kept for the dump).
    pub vertices: Vec<Vec2>,
    pub level: Level,
    pub player: Player,
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Parse a complete map description.
///
/// The result is built from scratch and only handed back when every line
/// and every cross-reference checks out; on error nothing is returned.
pub fn parse_str(text: &str) -> Result<MapData, MapError> {
    let mut parser = Parser::default();

    for (n, raw) in text.lines().enumerate() {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some(&head) = tokens.first() else { continue };
        if head.starts_with('#') {
            continue;
        }
        parser.line(&tokens).map_err(|kind| MapError::Parse {
            line: n + 1,
            content: raw.trim().to_owned(),
            kind,
        })?;
    }

    parser.finish()
}

/*====================================================================*/
/*                       Line-level parsing                           */
/*====================================================================*/

#[derive(Default)]
struct Parser {
    vertices: Vec<Vec2>,
    sectors: Vec<Sector>,
    /// Raw neighbor slots, checked once all sectors are known.
    links: Vec<Vec<i64>>,
    player: Option<(Vec2, f32, SectorId)>,
}

impl Parser {
    fn line(&mut self, tokens: &[&str]) -> Result<(), LineError> {
        match tokens[0] {
            "vertex" => self.vertex(&tokens[1..]),
            "sector" => self.sector(&tokens[1..]),
            "player" => self.player(&tokens[1..]),
            other => Err(LineError::UnknownDirective(other.to_owned())),
        }
    }

    /// `vertex <y> <x1> .. <xn>`
    fn vertex(&mut self, args: &[&str]) -> Result<(), LineError> {
        if args.len() < 2 {
            return Err(LineError::TokenCount {
                directive: "vertex",
                expected: "at least 3",
                got: args.len() + 1,
            });
        }
        let y = float(args[0])?;
        for tok in &args[1..] {
            self.vertices.push(vec2(float(tok)?, y));
        }
        Ok(())
    }

    /// `sector <floor> <ceil> <v1>..<vk> <n1>..<nk>`
    fn sector(&mut self, args: &[&str]) -> Result<(), LineError> {
        let total = args.len() + 1;
        if total % 2 != 1 || args.len() < 2 {
            return Err(LineError::SectorParity(total));
        }
        let k = (args.len() - 2) / 2;
        if k < 3 {
            return Err(LineError::TooFewVertices(k));
        }

        let floor = float(args[0])?;
        let ceil = float(args[1])?;
        let (verts, neigh) = args[2..].split_at(k);

        let vertices = verts
            .iter()
            .map(|tok| {
                let index = int(tok)?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| self.vertices.get(i).copied())
                    .ok_or(LineError::VertexOutOfRange {
                        index,
                        len: self.vertices.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let links = neigh
            .iter()
            .map(|tok| match int(tok)? {
                n if n < NO_NEIGHBOR => Err(LineError::NegativeIndex(n)),
                n => Ok(n),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.sectors.push(Sector {
            floor,
            ceil,
            vertices,
            neighbors: Vec::new(),
        });
        self.links.push(links);
        Ok(())
    }

    /// `player <x> <y> <angle> <sector>`
    fn player(&mut self, args: &[&str]) -> Result<(), LineError> {
        let [x, y, angle, sector] = args else {
            return Err(LineError::TokenCount {
                directive: "player",
                expected: "exactly 5",
                got: args.len() + 1,
            });
        };
        let sector = int(sector)?;
        let sector = usize::try_from(sector).map_err(|_| LineError::NegativeIndex(sector))?;
        self.player = Some((vec2(float(x)?, float(y)?), float(angle)?, sector));
        Ok(())
    }

    /*──────────────── cross-reference checks ────────────────*/

    fn finish(mut self) -> Result<MapData, MapError> {
        let count = self.sectors.len();
        if count == 0 {
            return Err(MapError::NoSectors);
        }

        for (id, (sector, links)) in self.sectors.iter_mut().zip(&self.links).enumerate() {
            sector.neighbors = links
                .iter()
                .enumerate()
                .map(|(slot, &n)| match usize::try_from(n) {
                    Err(_) => Ok(None),
                    Ok(n) if n < count => Ok(Some(n)),
                    Ok(n) => Err(MapError::NeighborOutOfRange {
                        sector: id,
                        slot,
                        neighbor: n,
                        count,
                    }),
                })
                .collect::<Result<_, _>>()?;
        }

        let player = match self.player {
            Some((_, _, sector)) if sector >= count => {
                return Err(MapError::PlayerSectorOutOfRange { sector, count });
            }
            Some((pos, angle, sector)) => Player::new(pos, angle, sector),
            None => {
                warn!("map has no `player` line; starting at the origin in sector 0");
                Player::default()
            }
        };

        let level = Level {
            sectors: self.sectors,
        };
        for (sector, edge, neighbor) in level.one_way_portals() {
            warn!("sector {sector} edge {edge} leads to sector {neighbor}, which does not link back");
        }

        Ok(MapData {
            vertices: self.vertices,
            level,
            player,
        })
    }
}

/*──────────────────────────── Tokens ───────────────────────────────*/

fn float(tok: &str) -> Result<f32, LineError> {
    tok.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineError::BadNumber(tok.to_owned()))
}

fn int(tok: &str) -> Result<i64, LineError> {
    tok.parse::<i64>()
        .map_err(|_| LineError::BadNumber(tok.to_owned()))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
