use tracing::debug;

use crate::{ActionSpec, CompiledMdp, MdpError, MdpSpec, OutcomeSpec, StateSpec};

/// Id of the absorbing state every exit leads to.
pub const TERMINAL_STATE: &str = "TERMINAL";

/// Three-by-four grid with a +1 and a -1 exit on the right.
pub const BOOK_LAYOUT: &str = "
_ _ _ 1
_ # _ -1
S _ _ _
";

/// A narrow bridge between a close +1 exit and a far +10 exit, lined with -100 cliffs.
pub const BRIDGE_LAYOUT: &str = "
# -100 -100 -100 -100 -100 #
1 S _ _ _ _ 10
# -100 -100 -100 -100 -100 #
";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Wall,
    Open,
    Start,
    /// Only action is `exit`, paying this reward and ending the episode.
    Exit(f64),
}

/// Compass moves. Row 0 is the top of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    North,
    West,
    South,
    East,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::North, Move::West, Move::South, Move::East];

    pub fn name(self) -> &'static str {
        match self {
            Move::North => "north",
            Move::West => "west",
            Move::South => "south",
            Move::East => "east",
        }
    }

    fn offset(self) -> (isize, isize) {
        match self {
            Move::North => (-1, 0),
            Move::West => (0, -1),
            Move::South => (1, 0),
            Move::East => (0, 1),
        }
    }

    fn perpendicular(self) -> [Move; 2] {
        match self {
            Move::North | Move::South => [Move::West, Move::East],
            Move::West | Move::East => [Move::North, Move::South],
        }
    }
}

/// Gridworld compiled to an explicit MDP.
///
/// A move goes where intended with probability `1 - noise` and slips to each
/// perpendicular direction with probability `noise / 2`. Bumping into a wall
/// or the border leaves the agent in place. Every move pays `living_reward`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    cells: Vec<Vec<Cell>>,
    start: (usize, usize),
    noise: f64,
    living_reward: f64,
}

impl GridWorld {
    /// Parse a whitespace separated layout: `#` wall, `S` start, `_` or `.`
    /// open, a number for an exit paying that reward.
    pub fn from_layout(layout: &str) -> Result<Self, MdpError> {
        let cells = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split_whitespace()
                    .enumerate()
                    .map(|(col, token)| parse_cell(row, col, token))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MdpError::EmptyLayout);
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(MdpError::RaggedLayout {
                row,
                expected: width,
                found,
            });
        }

        let starts: Vec<(usize, usize)> = positions(&cells)
            .filter(|&(row, col)| cells[row][col] == Cell::Start)
            .collect();
        let &[start] = starts.as_slice() else {
            return Err(MdpError::GridStart {
                found: starts.len(),
            });
        };

        Ok(GridWorld {
            cells,
            start,
            noise: 0.2,
            living_reward: 0.0,
        })
    }

    pub fn book() -> Result<Self, MdpError> {
        Self::from_layout(BOOK_LAYOUT)
    }

    pub fn bridge() -> Result<Self, MdpError> {
        Self::from_layout(BRIDGE_LAYOUT)
    }

    pub fn with_noise(mut self, noise: f64) -> Result<Self, MdpError> {
        if !noise.is_finite() || !(0.0..=1.0).contains(&noise) {
            return Err(MdpError::InvalidGridParameter {
                name: "noise",
                value: noise,
            });
        }
        self.noise = noise;
        Ok(self)
    }

    pub fn with_living_reward(mut self, living_reward: f64) -> Result<Self, MdpError> {
        if !living_reward.is_finite() {
            return Err(MdpError::InvalidGridParameter {
                name: "living reward",
                value: living_reward,
            });
        }
        self.living_reward = living_reward;
        Ok(self)
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn living_reward(&self) -> f64 {
        self.living_reward
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// State id of the cell at `(row, col)`.
    pub fn state_id(row: usize, col: usize) -> String {
        format!("{row},{col}")
    }

    pub fn to_spec(&self) -> MdpSpec {
        let mut states: Vec<StateSpec> = positions(&self.cells)
            .filter_map(|(row, col)| {
                let actions = match self.cells[row][col] {
                    Cell::Wall => return None,
                    Cell::Exit(reward) => vec![ActionSpec {
                        id: "exit".to_string(),
                        outcomes: vec![OutcomeSpec {
                            next: TERMINAL_STATE.to_string(),
                            prob: 1.0,
                            reward,
                        }],
                    }],
                    Cell::Open | Cell::Start => Move::ALL
                        .iter()
                        .map(|&intended| self.move_action(row, col, intended))
                        .collect(),
                };
                Some(StateSpec {
                    id: Self::state_id(row, col),
                    terminal: false,
                    actions,
                })
            })
            .collect();

        states.push(StateSpec {
            id: TERMINAL_STATE.to_string(),
            terminal: true,
            actions: Vec::new(),
        });

        MdpSpec {
            version: Some(1),
            start: Self::state_id(self.start.0, self.start.1),
            states,
        }
    }

    pub fn compile(&self) -> Result<CompiledMdp, MdpError> {
        let mdp = self.to_spec().compile()?;
        debug!(
            rows = self.rows(),
            cols = self.cols(),
            states = mdp.state_count(),
            noise = self.noise,
            "compiled gridworld"
        );
        Ok(mdp)
    }

    fn move_action(&self, row: usize, col: usize, intended: Move) -> ActionSpec {
        let [left, right] = intended.perpendicular();
        let slip = self.noise / 2.0;
        let mut outcomes: Vec<OutcomeSpec> = Vec::with_capacity(3);

        for (direction, prob) in [(intended, 1.0 - self.noise), (left, slip), (right, slip)] {
            if prob <= 0.0 {
                continue;
            }
            let (r, c) = self.destination(row, col, direction);
            let next = Self::state_id(r, c);
            // Bounces off different walls can land on the same cell.
            match outcomes.iter_mut().find(|outcome| outcome.next == next) {
                Some(outcome) => outcome.prob += prob,
                None => outcomes.push(OutcomeSpec {
                    next,
                    prob,
                    reward: self.living_reward,
                }),
            }
        }

        ActionSpec {
            id: intended.name().to_string(),
            outcomes,
        }
    }

    fn destination(&self, row: usize, col: usize, direction: Move) -> (usize, usize) {
        let (dr, dc) = direction.offset();
        let target = row
            .checked_add_signed(dr)
            .zip(col.checked_add_signed(dc))
            .filter(|&(r, c)| matches!(self.cell(r, c), Some(cell) if cell != Cell::Wall));
        target.unwrap_or((row, col))
    }
}

fn parse_cell(row: usize, col: usize, token: &str) -> Result<Cell, MdpError> {
    match token {
        "#" => Ok(Cell::Wall),
        "S" => Ok(Cell::Start),
        "_" | "." => Ok(Cell::Open),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|reward| reward.is_finite())
            .map(Cell::Exit)
            .ok_or_else(|| MdpError::UnknownCell {
                row,
                col,
                token: other.to_string(),
            }),
    }
}

fn positions(cells: &[Vec<Cell>]) -> impl Iterator<Item = (usize, usize)> + '_ {
    cells
        .iter()
        .enumerate()
        .flat_map(|(row, line)| (0..line.len()).map(move |col| (row, col)))
}
