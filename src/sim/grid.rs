//! Brick grid: fixed row/column layout, computed once at round start

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Brick types, fixed at creation by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Top rows, worth double
    Special,
}

impl BrickKind {
    /// Kind for a brick in the given row
    pub fn for_row(row: usize) -> Self {
        if row < SPECIAL_ROWS {
            BrickKind::Special
        } else {
            BrickKind::Normal
        }
    }

    /// Points awarded when a brick of this kind is destroyed
    pub fn score(self) -> u32 {
        match self {
            BrickKind::Normal => NORMAL_BRICK_SCORE,
            BrickKind::Special => SPECIAL_BRICK_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single brick. Position is the top-left corner in field coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub col: usize,
    pub row: usize,
    pub pos: Vec2,
    pub kind: BrickKind,
    pub status: BrickStatus,
}

impl Brick {
    pub fn new(col: usize, row: usize) -> Self {
        let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT;
        let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
        Self {
            col,
            row,
            pos: Vec2::new(x, y),
            kind: BrickKind::for_row(row),
            status: BrickStatus::Alive,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Strict interior test; a point on the edge is not inside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + BRICK_WIDTH
            && p.y > self.pos.y
            && p.y < self.pos.y + BRICK_HEIGHT
    }

    /// Center point (for rendering and tests)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(BRICK_WIDTH / 2.0, BRICK_HEIGHT / 2.0)
    }
}

/// The brick grid, stored column-major (index = col * rows + row).
///
/// Iteration order is column-major, then row. Collision resolution relies on
/// this order as its tie-break, so it must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new(BRICK_COLUMNS, BRICK_ROWS)
    }
}

impl BrickGrid {
    /// Create a fresh grid with every brick alive
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut bricks = Vec::with_capacity(columns * rows);
        for col in 0..columns {
            for row in 0..rows {
                bricks.push(Brick::new(col, row));
            }
        }
        Self {
            columns,
            rows,
            bricks,
        }
    }

    /// Build a grid from arbitrary bricks (iteration order is the given order)
    pub fn from_bricks(bricks: Vec<Brick>) -> Self {
        let columns = bricks.iter().map(|b| b.col + 1).max().unwrap_or(0);
        let rows = bricks.iter().map(|b| b.row + 1).max().unwrap_or(0);
        Self {
            columns,
            rows,
            bricks,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.col == col && b.row == row)
    }

    /// All bricks in column-major order, alive or not
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Alive bricks in column-major order
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    /// Mark a brick destroyed. Returns true only on an ALIVE -> DESTROYED
    /// transition; destroyed or missing bricks are left untouched.
    pub fn mark_destroyed(&mut self, col: usize, row: usize) -> bool {
        match self
            .bricks
            .iter_mut()
            .find(|b| b.col == col && b.row == row)
        {
            Some(brick) if brick.is_alive() => {
                brick.status = BrickStatus::Destroyed;
                true
            }
            _ => false,
        }
    }

    pub fn count_alive(&self) -> usize {
        self.alive().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_layout() {
        let grid = BrickGrid::default();
        assert_eq!((grid.columns(), grid.rows()), (8, 5));
        assert_eq!(grid.len(), 40);
        assert_eq!(grid.count_alive(), 40);

        let first = grid.get(0, 0).unwrap();
        assert_eq!(first.pos, Vec2::new(35.0, 40.0));

        // x = col*(80+15)+35, y = row*(25+15)+40
        let last = grid.get(7, 4).unwrap();
        assert_eq!(last.pos, Vec2::new(700.0, 200.0));
        assert!(last.pos.x + BRICK_WIDTH <= FIELD_WIDTH);
    }

    #[test]
    fn test_kind_by_row() {
        let grid = BrickGrid::default();
        for brick in grid.iter() {
            let expected = if brick.row < 2 {
                BrickKind::Special
            } else {
                BrickKind::Normal
            };
            assert_eq!(brick.kind, expected);
        }
        assert_eq!(
            grid.iter().filter(|b| b.kind == BrickKind::Special).count(),
            16
        );
    }

    #[test]
    fn test_iteration_is_column_major() {
        let grid = BrickGrid::default();
        let order: Vec<_> = grid.iter().take(6).map(|b| (b.col, b.row)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 0)]);
    }

    #[test]
    fn test_mark_destroyed_is_one_way() {
        let mut grid = BrickGrid::default();
        assert!(grid.mark_destroyed(3, 2));
        assert_eq!(grid.count_alive(), 39);
        assert!(!grid.mark_destroyed(3, 2));
        assert_eq!(grid.count_alive(), 39);
        assert_eq!(grid.get(3, 2).unwrap().status, BrickStatus::Destroyed);
        // Out of range is ignored
        assert!(!grid.mark_destroyed(99, 0));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let brick = Brick::new(0, 0);
        assert!(brick.contains_point(brick.center()));
        assert!(!brick.contains_point(brick.pos));
        assert!(!brick.contains_point(Vec2::new(brick.pos.x + BRICK_WIDTH, brick.center().y)));
        assert!(!brick.contains_point(Vec2::new(brick.center().x, brick.pos.y + BRICK_HEIGHT)));
    }

    #[test]
    fn test_bricks_do_not_overlap() {
        let grid = BrickGrid::default();
        for a in grid.iter() {
            for b in grid.iter() {
                if (a.col, a.row) == (b.col, b.row) {
                    continue;
                }
                assert!(!a.contains_point(b.center()));
            }
        }
    }
}
