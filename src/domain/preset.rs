use serde::{Deserialize, Serialize};

/// A named pattern of alive cells inside its bounding box.
///
/// Coordinates are (x, y) relative to the top-left corner of the box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>,
}

impl Preset {
    /// Create a preset from absolute cell coordinates.
    ///
    /// The cells are translated so the minimal bounding box starts at the
    /// origin. No cells gives an empty 0x0 preset.
    pub fn new(name: impl Into<String>, cells: Vec<(usize, usize)>) -> Self {
        let name = name.into();
        let (Some(min_x), Some(min_y)) = (
            cells.iter().map(|&(x, _)| x).min(),
            cells.iter().map(|&(_, y)| y).min(),
        ) else {
            return Self::from_parts(name, 0, 0, Vec::new());
        };
        let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(min_x);
        let max_y = cells.iter().map(|&(_, y)| y).max().unwrap_or(min_y);

        let cells = cells
            .into_iter()
            .map(|(x, y)| (x - min_x, y - min_y))
            .collect();

        Self::from_parts(name, max_x - min_x + 1, max_y - min_y + 1, cells)
    }

    /// Create a preset from already normalized parts
    pub fn from_parts(
        name: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<(usize, usize)>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cells,
        }
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// First cell lying outside the declared bounding box, if any
    pub fn first_outside_box(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .copied()
            .find(|&(x, y)| x >= self.width || y >= self.height)
    }
}

/// Classic Game of Life patterns library
pub mod library {
    use super::*;

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Preset {
        Preset::new(
            "glider",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Preset {
        Preset::new("blinker", vec![(0, 1), (1, 1), (2, 1)])
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Preset {
        Preset::new(
            "toad",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Preset {
        Preset::new(
            "beacon",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// Pulsar - period 3 oscillator
    pub fn pulsar() -> Preset {
        let quadrant = [
            (2, 0), (3, 0), (4, 0),
            (0, 2), (5, 2),
            (0, 3), (5, 3),
            (0, 4), (5, 4),
            (2, 5), (3, 5), (4, 5),
        ];
        // Mirror one quadrant across both axes of the 13x13 box
        let cells = quadrant
            .iter()
            .flat_map(|&(x, y)| [(x, y), (12 - x, y), (x, 12 - y), (12 - x, 12 - y)])
            .collect();
        Preset::new("pulsar", cells)
    }

    /// Lightweight spaceship
    pub fn lwss() -> Preset {
        Preset::new(
            "lwss",
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    /// Gosper glider gun - produces gliders indefinitely (period 30)
    pub fn glider_gun() -> Preset {
        Preset::new(
            "gosper-glider-gun",
            vec![
                // Left square
                (0, 4), (0, 5),
                (1, 4), (1, 5),

                // Left circle
                (10, 4), (10, 5), (10, 6),
                (11, 3), (11, 7),
                (12, 2), (12, 8),
                (13, 2), (13, 8),
                (14, 5),
                (15, 3), (15, 7),
                (16, 4), (16, 5), (16, 6),
                (17, 5),

                // Middle pieces
                (20, 2), (20, 3), (20, 4),
                (21, 2), (21, 3), (21, 4),
                (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),

                // Right square
                (34, 2), (34, 3),
                (35, 2), (35, 3),
            ],
        )
    }

    /// R-pentomino - methuselah, stabilizes after 1103 generations
    pub fn r_pentomino() -> Preset {
        Preset::new(
            "r-pentomino",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Acorn - methuselah, stabilizes after 5206 generations
    pub fn acorn() -> Preset {
        Preset::new(
            "acorn",
            vec![
                (1, 0),
                (3, 1),
                (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Preset {
        Preset::new("block", vec![(0, 0), (1, 0), (0, 1), (1, 1)])
    }

    /// Every built-in pattern
    pub fn all() -> Vec<Preset> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            lwss(),
            glider_gun(),
            r_pentomino(),
            acorn(),
            block(),
        ]
    }
}
