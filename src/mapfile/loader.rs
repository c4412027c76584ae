use log::info;
use std::path::Path;

use super::parser::{MapData, MapError, parse_str};

/// Read and parse the map file at `path`.
pub fn load_map(path: impl AsRef<Path>) -> Result<MapData, MapError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_str(&text)?;
    info!(
        "loaded {}: {} vertices, {} sectors",
        path.display(),
        map.vertices.len(),
        map.level.sectors.len()
    );
    Ok(map)
}

/// Human-readable listing of the vertex table, every sector, and the
/// player start, in declaration order.
pub fn dump(map: &MapData) -> String {
    let mut out = format!("vertices ({}):\n", map.vertices.len());
    for (i, v) in map.vertices.iter().enumerate() {
        out += &format!("  [{i:3}] ({}, {})\n", v.x, v.y);
    }

    out += &format!("sectors ({}):\n", map.level.sectors.len());
    for (i, s) in map.level.sectors.iter().enumerate() {
        out += &format!("  [{i:3}] floor {} ceil {}\n", s.floor, s.ceil);
        out += "        vertices:";
        for v in &s.vertices {
            out += &format!(" ({}, {})", v.x, v.y);
        }
        out += "\n        neighbors:";
        for n in &s.neighbors {
            match n {
                Some(n) => out += &format!(" {n}"),
                None => out += " -1",
            }
        }
        out.push('\n');
    }

    let p = &map.player;
    out += &format!(
        "player: pos ({}, {}) angle {} sector {}\n",
        p.pos().x,
        p.pos().y,
        p.angle(),
        p.sector()
    );
    out
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn demo_map() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join("demo.map")
    }

    fn write_temp(text: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.map");
        match load_map(&path) {
            Err(MapError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn load_unload_reload_is_identical() {
        let file = write_temp(
            "vertex 0 0 10 20\nvertex 10 0 10 20\n\
             sector 0 20 0 1 4 3 -1 -1 1 -1\n\
             sector 2 18 1 2 5 4 0 -1 -1 -1\n\
             player 5 5 0 0\n",
        );
        let mut first = load_map(file.path()).unwrap();
        let again = first.level.clone();
        first.level.unload();
        assert!(first.level.sectors.is_empty());

        let second = load_map(file.path()).unwrap();
        assert_eq!(second.level, again);
    }

    #[test]
    fn parse_error_through_file() {
        let file = write_temp("vertex 0 0 10\nbogus\n");
        assert!(matches!(
            load_map(file.path()),
            Err(MapError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn demo_map_is_well_formed() {
        let map = load_map(demo_map()).unwrap();
        let count = map.level.sectors.len();
        assert!(count >= 2);
        for s in &map.level.sectors {
            assert_eq!(s.vertices.len(), s.neighbors.len());
            assert!(s.vertices.len() >= 3);
            assert!(s.neighbors.iter().flatten().all(|&n| n < count));
        }
        assert!(map.level.one_way_portals().is_empty());
        assert!(map.player.sector() < count);
    }

    #[test]
    fn dump_lists_everything() {
        let map = parse_str(
            "vertex 0 0 10\nvertex 10 0 10\nsector 0 20 0 1 3 2 -1 -1 -1 -1\nplayer 2 6 0 0\n",
        )
        .unwrap();
        let text = dump(&map);
        assert!(text.contains("vertices (4):"));
        assert!(text.contains("sectors (1):"));
        assert!(text.contains("neighbors: -1 -1 -1 -1"));
        assert!(text.contains("player: pos (2, 6) angle 0 sector 0"));
    }
}
