//! Shape catalog - tetromino footprints and wall-kick tables
//!
//! Pure data plus the rotation transform. Coordinates are centered and y-up:
//! gravity is negative y. Each shape is 4 cell offsets around its pivot; each
//! kick table has 8 rows (4 rotation states x 2 directions) of candidate
//! translations tried in order, first candidate always (0, 0).

use thiserror::Error;

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece pivot.
pub type CellOffset = (i8, i8);

/// Number of cells in every piece footprint.
pub const FOOTPRINT_CELLS: usize = 4;

/// Kick table dimensions: one row per (new rotation state, direction) pair.
pub const KICK_ROWS: usize = 8;
pub const KICK_CANDIDATES: usize = 5;

pub type KickTable = [[(i8, i8); KICK_CANDIDATES]; KICK_ROWS];

/// Immutable per-kind shape data. Loaded once, copied into each spawned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeData {
    pub kind: PieceKind,
    pub cells: [CellOffset; FOOTPRINT_CELLS],
    pub kicks: KickTable,
}

/// Externally supplied shape definition, validated by [`ShapeCatalog::load`].
#[derive(Debug, Clone)]
pub struct ShapeDef<'a> {
    pub kind: PieceKind,
    pub cells: &'a [CellOffset],
    pub kick_rows: &'a [&'a [(i8, i8)]],
}

/// Shape/kick data errors, detected at load time (the core never runs with
/// partially loaded data).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("shape {kind:?} has {found} cell offsets, expected {FOOTPRINT_CELLS}")]
    WrongCellCount { kind: PieceKind, found: usize },
    #[error("shape {kind:?} has {found} kick rows, expected {KICK_ROWS}")]
    WrongKickRowCount { kind: PieceKind, found: usize },
    #[error("shape {kind:?} kick row {row} has {found} candidates, expected {KICK_CANDIDATES}")]
    RaggedKickRow {
        kind: PieceKind,
        row: usize,
        found: usize,
    },
    #[error("shape {0:?} defined more than once")]
    DuplicateKind(PieceKind),
    #[error("no definition for shape {0:?}")]
    MissingKind(PieceKind),
}

/// The set of 7 shapes the game spawns from.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: [ShapeData; 7],
}

impl ShapeCatalog {
    /// Catalog with the standard shapes and SRS kick tables.
    pub fn standard() -> Self {
        let shapes = PieceKind::ALL.map(|kind| ShapeData {
            kind,
            cells: base_cells(kind),
            kicks: *kick_table(kind),
        });
        Self { shapes }
    }

    /// Build a catalog from external definitions, validating counts and
    /// table dimensions. All 7 kinds must appear exactly once.
    pub fn load(defs: &[ShapeDef<'_>]) -> Result<Self, CatalogError> {
        let mut slots: [Option<ShapeData>; 7] = [None; 7];

        for def in defs {
            let cells: [CellOffset; FOOTPRINT_CELLS] = def
                .cells
                .try_into()
                .map_err(|_| CatalogError::WrongCellCount {
                    kind: def.kind,
                    found: def.cells.len(),
                })?;

            if def.kick_rows.len() != KICK_ROWS {
                return Err(CatalogError::WrongKickRowCount {
                    kind: def.kind,
                    found: def.kick_rows.len(),
                });
            }
            let mut kicks: KickTable = [[(0, 0); KICK_CANDIDATES]; KICK_ROWS];
            for (row, candidates) in def.kick_rows.iter().enumerate() {
                kicks[row] =
                    (*candidates)
                        .try_into()
                        .map_err(|_| CatalogError::RaggedKickRow {
                            kind: def.kind,
                            row,
                            found: candidates.len(),
                        })?;
            }

            let slot = &mut slots[kind_index(def.kind)];
            if slot.is_some() {
                return Err(CatalogError::DuplicateKind(def.kind));
            }
            *slot = Some(ShapeData {
                kind: def.kind,
                cells,
                kicks,
            });
        }

        for (i, slot) in slots.iter().enumerate() {
            if slot.is_none() {
                return Err(CatalogError::MissingKind(PieceKind::ALL[i]));
            }
        }

        Ok(Self {
            shapes: slots.map(|s| s.expect("checked above")),
        })
    }

    pub fn get(&self, kind: PieceKind) -> &ShapeData {
        &self.shapes[kind_index(kind)]
    }
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::J => 1,
        PieceKind::L => 2,
        PieceKind::O => 3,
        PieceKind::S => 4,
        PieceKind::T => 5,
        PieceKind::Z => 6,
    }
}

/// Base footprints (rotation state 0), centered on the pivot.
pub fn base_cells(kind: PieceKind) -> [CellOffset; FOOTPRINT_CELLS] {
    match kind {
        PieceKind::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
        PieceKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
        PieceKind::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
        PieceKind::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
    }
}

/// Kick table for a piece kind. I has its own; the rest share one.
pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLOSTZ_KICKS,
    }
}

/// Row index for a rotation transition: the rotation index after the attempt
/// and the direction it was reached by (+1 clockwise, -1 counter-clockwise).
pub fn kick_row(new_rotation: i8, direction: i8) -> usize {
    let mut row = i32::from(new_rotation) * 2;
    if direction < 0 {
        row -= 1;
    }
    crate::core::piece::wrap(row, 0, KICK_ROWS as i32) as usize
}

/// Shared kick table for J, L, O, S, T, Z (SRS values, y-up).
/// Rows ordered so that `kick_row` lands on the right transition.
const JLOSTZ_KICKS: KickTable = [
    // 3->0 (cw)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->1 (ccw)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->1 (cw)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->2 (ccw)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2 (cw)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 0->3 (ccw)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3 (cw)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (ccw)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
];

/// I piece kick table (SRS values, y-up).
const I_KICKS: KickTable = [
    // 3->0 (cw)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->1 (ccw)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->1 (cw)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->2 (ccw)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2 (cw)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 0->3 (ccw)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3 (cw)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->0 (ccw)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
];

/// 90-degree rotation matrix, scaled by direction at apply time.
const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

/// Rotate a footprint one step (+1 clockwise, -1 counter-clockwise).
///
/// I and O rotate about a half-cell pivot: shift by -0.5 per axis, apply the
/// matrix, round by ceiling. Everything else rotates about an integer cell
/// center and rounds to nearest. The two paths must not be unified: I and O
/// visibly mis-rotate under the integer-center rule.
pub fn rotate_offsets(
    kind: PieceKind,
    cells: [CellOffset; FOOTPRINT_CELLS],
    direction: i8,
) -> [CellOffset; FOOTPRINT_CELLS] {
    let d = f32::from(direction);
    let m = ROTATION_MATRIX;

    let mut out = [(0i8, 0i8); FOOTPRINT_CELLS];
    for (i, &(x, y)) in cells.iter().enumerate() {
        out[i] = match kind {
            PieceKind::I | PieceKind::O => {
                let cx = f32::from(x) - 0.5;
                let cy = f32::from(y) - 0.5;
                let rx = ((cx * m[0] + cy * m[1]) * d).ceil();
                let ry = ((cx * m[2] + cy * m[3]) * d).ceil();
                (rx as i8, ry as i8)
            }
            _ => {
                let cx = f32::from(x);
                let cy = f32::from(y);
                let rx = ((cx * m[0] + cy * m[1]) * d).round();
                let ry = ((cx * m[2] + cy * m[3]) * d).round();
                (rx as i8, ry as i8)
            }
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_all_kinds() {
        let catalog = ShapeCatalog::standard();
        for kind in PieceKind::ALL {
            let shape = catalog.get(kind);
            assert_eq!(shape.kind, kind);
            assert_eq!(shape.cells.len(), FOOTPRINT_CELLS);
        }
    }

    #[test]
    fn rotate_i_half_cell_pivot() {
        // Horizontal I at y=1 rotates cw to a vertical bar at x=1.
        let cw = rotate_offsets(PieceKind::I, base_cells(PieceKind::I), 1);
        assert_eq!(cw, [(1, 2), (1, 1), (1, 0), (1, -1)]);

        // And ccw to a vertical bar at x=0.
        let ccw = rotate_offsets(PieceKind::I, base_cells(PieceKind::I), -1);
        assert_eq!(ccw, [(0, -1), (0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn rotate_o_permutes_footprint() {
        let base = base_cells(PieceKind::O);
        let mut rotated = rotate_offsets(PieceKind::O, base, 1);
        rotated.sort_unstable();
        let mut sorted_base = base;
        sorted_base.sort_unstable();
        assert_eq!(rotated, sorted_base);
    }

    #[test]
    fn rotate_integer_center_is_own_inverse() {
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            let base = base_cells(kind);
            let there = rotate_offsets(kind, base, 1);
            let back = rotate_offsets(kind, there, -1);
            assert_eq!(back, base, "{kind:?} cw then ccw should restore the footprint");
        }
    }

    #[test]
    fn rotate_half_cell_pivot_is_own_inverse() {
        for kind in [PieceKind::I, PieceKind::O] {
            let base = base_cells(kind);
            let there = rotate_offsets(kind, base, 1);
            let back = rotate_offsets(kind, there, -1);
            assert_eq!(back, base, "{kind:?} cw then ccw should restore the footprint");
        }
    }

    #[test]
    fn four_cw_rotations_restore_footprint() {
        for kind in PieceKind::ALL {
            let base = base_cells(kind);
            let mut cells = base;
            for _ in 0..4 {
                cells = rotate_offsets(kind, cells, 1);
            }
            assert_eq!(cells, base, "{kind:?} four cw rotations should be identity");
        }
    }

    #[test]
    fn kick_row_mapping() {
        // cw transitions land on even rows, ccw on odd (mod wrap).
        assert_eq!(kick_row(1, 1), 2); // 0->1
        assert_eq!(kick_row(2, 1), 4); // 1->2
        assert_eq!(kick_row(3, 1), 6); // 2->3
        assert_eq!(kick_row(0, 1), 0); // 3->0
        assert_eq!(kick_row(3, -1), 5); // 0->3
        assert_eq!(kick_row(2, -1), 3); // 3->2
        assert_eq!(kick_row(1, -1), 1); // 2->1
        assert_eq!(kick_row(0, -1), 7); // 1->0
    }

    #[test]
    fn every_kick_row_starts_in_place() {
        for kind in PieceKind::ALL {
            for row in kick_table(kind).iter() {
                assert_eq!(row[0], (0, 0));
            }
        }
    }

    #[test]
    fn load_rejects_wrong_cell_count() {
        let mut defs = standard_defs();
        defs[0].cells = &[(0, 0), (1, 0), (2, 0)];
        let err = ShapeCatalog::load(&defs).unwrap_err();
        assert_eq!(
            err,
            CatalogError::WrongCellCount {
                kind: PieceKind::I,
                found: 3
            }
        );
    }

    #[test]
    fn load_rejects_short_kick_table() {
        let mut defs = standard_defs();
        static ROWS: [&[(i8, i8)]; 2] = [&[(0, 0)], &[(0, 0)]];
        defs[1].kick_rows = &ROWS;
        let err = ShapeCatalog::load(&defs).unwrap_err();
        assert_eq!(
            err,
            CatalogError::WrongKickRowCount {
                kind: PieceKind::J,
                found: 2
            }
        );
    }

    #[test]
    fn load_rejects_missing_kind() {
        let defs = standard_defs();
        let err = ShapeCatalog::load(&defs[..6]).unwrap_err();
        assert_eq!(err, CatalogError::MissingKind(PieceKind::Z));
    }

    #[test]
    fn load_rejects_duplicate_kind() {
        let mut defs = standard_defs();
        defs[6].kind = PieceKind::I;
        let err = ShapeCatalog::load(&defs).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKind(PieceKind::I));
    }

    #[test]
    fn load_roundtrips_standard_data() {
        let defs = standard_defs();
        let loaded = ShapeCatalog::load(&defs).unwrap();
        let standard = ShapeCatalog::standard();
        for kind in PieceKind::ALL {
            assert_eq!(loaded.get(kind), standard.get(kind));
        }
    }

    fn standard_defs() -> Vec<ShapeDef<'static>> {
        PieceKind::ALL
            .iter()
            .map(|&kind| ShapeDef {
                kind,
                cells: leak_cells(kind),
                kick_rows: leak_kick_rows(kind),
            })
            .collect()
    }

    fn leak_cells(kind: PieceKind) -> &'static [CellOffset] {
        Box::leak(Box::new(base_cells(kind))).as_slice()
    }

    fn leak_kick_rows(kind: PieceKind) -> &'static [&'static [(i8, i8)]] {
        let rows: Vec<&'static [(i8, i8)]> = kick_table(kind)
            .iter()
            .map(|row| Box::leak(Box::new(*row)).as_slice())
            .collect();
        Box::leak(rows.into_boxed_slice())
    }
}
