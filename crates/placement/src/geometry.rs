//! Cell geometry for the triangular foundation system.
//!
//! Building space is a grid of 96 px cells. A cell holds either one full
//! foundation or up to two triangle foundations that tile the square exactly.
//! Walls, fences and doors attach to cell edges: the four cardinal borders
//! plus the two diagonals that serve as triangle hypotenuses.
//!
//! World coordinates are y-down (north is negative y), matching the wire
//! data; the renderer flips the axis when it draws.

use bevy::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::{CELL_SIZE_PX, DIAG_EDGE_PREFERENCE, DIAG_EDGE_SNAP_PX};

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Foundation footprint within one cell. Discriminants match the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FoundationShape {
    Full = 1,
    TriNw = 2,
    TriNe = 3,
    TriSe = 4,
    TriSw = 5,
}

impl FoundationShape {
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Full),
            2 => Some(Self::TriNw),
            3 => Some(Self::TriNe),
            4 => Some(Self::TriSe),
            5 => Some(Self::TriSw),
            _ => None,
        }
    }

    #[inline]
    pub fn to_wire(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_triangle(self) -> bool {
        self != Self::Full
    }

    /// Edges a wall may attach to on this shape. Triangles expose their two
    /// cardinal legs and their hypotenuse.
    pub fn legal_edges(self) -> &'static [CellEdge] {
        match self {
            Self::Full => &[
                CellEdge::North,
                CellEdge::East,
                CellEdge::South,
                CellEdge::West,
            ],
            Self::TriNw => &[CellEdge::North, CellEdge::West, CellEdge::DiagNeSw],
            Self::TriNe => &[CellEdge::North, CellEdge::East, CellEdge::DiagNwSe],
            Self::TriSe => &[CellEdge::South, CellEdge::East, CellEdge::DiagNeSw],
            Self::TriSw => &[CellEdge::South, CellEdge::West, CellEdge::DiagNwSe],
        }
    }

    /// True for the two triangle pairs that tile a cell with no overlap:
    /// {TriNw, TriSe} and {TriNe, TriSw}. Symmetric in its arguments.
    pub fn complementary(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::TriNw, Self::TriSe)
                | (Self::TriSe, Self::TriNw)
                | (Self::TriNe, Self::TriSw)
                | (Self::TriSw, Self::TriNe)
        )
    }

    pub fn wood_cost(self) -> u32 {
        if self.is_triangle() {
            crate::config::FOUNDATION_TRI_WOOD_COST
        } else {
            crate::config::FOUNDATION_FULL_WOOD_COST
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::TriNw => "Triangle NW",
            Self::TriNe => "Triangle NE",
            Self::TriSe => "Triangle SE",
            Self::TriSw => "Triangle SW",
        }
    }

    /// Next shape in the rotation order used by the placement tool.
    pub fn next(self) -> Self {
        match self {
            Self::Full => Self::TriNw,
            Self::TriNw => Self::TriNe,
            Self::TriNe => Self::TriSe,
            Self::TriSe => Self::TriSw,
            Self::TriSw => Self::Full,
        }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// One attachable edge of a cell. Discriminants match the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellEdge {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    DiagNeSw = 4,
    DiagNwSe = 5,
}

impl CellEdge {
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            4 => Some(Self::DiagNeSw),
            5 => Some(Self::DiagNwSe),
            _ => None,
        }
    }

    #[inline]
    pub fn to_wire(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::DiagNeSw | Self::DiagNwSe)
    }

    /// True for edges that run along the x axis (north and south borders).
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// The same physical border seen from the adjacent cell. A north border
    /// of (x, y) is the south border of (x, y-1), and so on. Diagonals are
    /// interior to one cell and have no mirror.
    pub fn mirror(self, cell: IVec2) -> Option<(IVec2, CellEdge)> {
        match self {
            Self::North => Some((IVec2::new(cell.x, cell.y - 1), Self::South)),
            Self::South => Some((IVec2::new(cell.x, cell.y + 1), Self::North)),
            Self::East => Some((IVec2::new(cell.x + 1, cell.y), Self::West)),
            Self::West => Some((IVec2::new(cell.x - 1, cell.y), Self::East)),
            Self::DiagNeSw | Self::DiagNwSe => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::DiagNeSw => "NE-SW diagonal",
            Self::DiagNwSe => "NW-SE diagonal",
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinate conversions
// ---------------------------------------------------------------------------

/// Cell containing a world position.
#[inline]
pub fn cell_of_world(pos: Vec2) -> IVec2 {
    IVec2::new(
        (pos.x / CELL_SIZE_PX).floor() as i32,
        (pos.y / CELL_SIZE_PX).floor() as i32,
    )
}

/// World position of a cell's center.
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    Vec2::new(
        cell.x as f32 * CELL_SIZE_PX + CELL_SIZE_PX * 0.5,
        cell.y as f32 * CELL_SIZE_PX + CELL_SIZE_PX * 0.5,
    )
}

/// World midpoint of an edge. Both diagonals pass through the cell center.
pub fn edge_midpoint(cell: IVec2, edge: CellEdge) -> Vec2 {
    let center = cell_center(cell);
    let half = CELL_SIZE_PX * 0.5;
    match edge {
        CellEdge::North => Vec2::new(center.x, center.y - half),
        CellEdge::South => Vec2::new(center.x, center.y + half),
        CellEdge::East => Vec2::new(center.x + half, center.y),
        CellEdge::West => Vec2::new(center.x - half, center.y),
        CellEdge::DiagNeSw | CellEdge::DiagNwSe => center,
    }
}

// ---------------------------------------------------------------------------
// Edge selection
// ---------------------------------------------------------------------------

/// Pick the edge a point is aiming at within a cell.
///
/// Full cells use pure cardinal logic: the dominant axis of the offset from
/// the center picks the border. Triangle cells also measure the point
/// against both diagonal lines and prefer the nearer diagonal when it is
/// within [`DIAG_EDGE_PREFERENCE`] of the nearest cardinal border or within
/// [`DIAG_EDGE_SNAP_PX`] outright; diagonals are thin targets and lose every
/// tie without that margin.
pub fn edge_for_point(cell_center: Vec2, point: Vec2, triangle: bool) -> CellEdge {
    let dx = point.x - cell_center.x;
    let dy = point.y - cell_center.y;

    let cardinal = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            CellEdge::East
        } else {
            CellEdge::West
        }
    } else if dy > 0.0 {
        CellEdge::South
    } else {
        CellEdge::North
    };

    if !triangle {
        return cardinal;
    }

    // Distance to the nearest cardinal border for a point inside the cell.
    let half = CELL_SIZE_PX * 0.5;
    let cardinal_dist = (half - dx.abs().max(dy.abs())).max(0.0);

    // On the NW-SE diagonal dx == dy; on the NE-SW diagonal dx == -dy.
    let nwse_dist = (dx - dy).abs();
    let nesw_dist = (dx + dy).abs();
    let (diagonal, diag_dist) = if nwse_dist < nesw_dist {
        (CellEdge::DiagNwSe, nwse_dist)
    } else {
        (CellEdge::DiagNeSw, nesw_dist)
    };

    if diag_dist <= cardinal_dist * DIAG_EDGE_PREFERENCE || diag_dist <= DIAG_EDGE_SNAP_PX {
        diagonal
    } else {
        cardinal
    }
}

/// Whether a point lies within `margin` of an edge's collision band.
/// Cardinal borders are treated as full-length slabs; diagonals as bands
/// around the hypotenuse line, clipped to the cell's bounding box.
pub fn point_near_edge(cell: IVec2, edge: CellEdge, point: Vec2, margin: f32) -> bool {
    let half = CELL_SIZE_PX * 0.5;
    let mid = edge_midpoint(cell, edge);
    match edge {
        CellEdge::North | CellEdge::South => {
            (point.x - mid.x).abs() <= half + margin && (point.y - mid.y).abs() <= margin
        }
        CellEdge::East | CellEdge::West => {
            (point.x - mid.x).abs() <= margin && (point.y - mid.y).abs() <= half + margin
        }
        CellEdge::DiagNeSw | CellEdge::DiagNwSe => {
            let dx = point.x - mid.x;
            let dy = point.y - mid.y;
            if dx.abs() > half + margin || dy.abs() > half + margin {
                return false;
            }
            let line_dist = if edge == CellEdge::DiagNwSe {
                (dx - dy).abs()
            } else {
                (dx + dy).abs()
            } * std::f32::consts::FRAC_1_SQRT_2;
            line_dist <= margin
        }
    }
}
