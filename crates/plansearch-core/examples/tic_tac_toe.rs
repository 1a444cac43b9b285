use plansearch_core::{AdversarialGame, AdversarialSearch, AgentConfig, ContestAgent, SearchMode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mark {
    Empty,
    X,
    O,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Board {
    cells: [Mark; 9],
}

impl Board {
    fn winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];

        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a];
            (mark != Mark::Empty && mark == self.cells[b] && mark == self.cells[c]).then_some(mark)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Mark::Empty)
    }

    fn render(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Mark::Empty => ".",
                        Mark::X => "X",
                        Mark::O => "O",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// X is agent 0 and maximizes, O is agent 1.
struct TicTacToe;

impl AdversarialGame for TicTacToe {
    type State = Board;
    type Action = usize;

    fn num_agents(&self, _state: &Board) -> usize {
        2
    }

    fn legal_actions(&self, state: &Board, _agent: usize) -> Vec<usize> {
        if state.winner().is_some() {
            return Vec::new();
        }
        (0..9).filter(|&idx| state.cells[idx] == Mark::Empty).collect()
    }

    fn successor(&self, state: &Board, agent: usize, cell: &usize) -> Board {
        let mut next = state.clone();
        next.cells[*cell] = if agent == 0 { Mark::X } else { Mark::O };
        next
    }

    fn is_win(&self, state: &Board) -> bool {
        state.winner() == Some(Mark::X)
    }

    fn is_lose(&self, state: &Board) -> bool {
        state.winner() == Some(Mark::O)
    }
}

fn evaluate(board: &Board) -> f64 {
    match board.winner() {
        Some(Mark::X) => 1.0,
        Some(Mark::O) => -1.0,
        _ if board.is_full() => 0.0,
        // Centre and corners are worth a little before the game is decided.
        _ => [0, 2, 4, 6, 8]
            .iter()
            .map(|&idx| match board.cells[idx] {
                Mark::X => 0.05,
                Mark::O => -0.05,
                Mark::Empty => 0.0,
            })
            .sum(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    //  X . .
    //  . O .
    //  . . .
    let mut start = Board {
        cells: [Mark::Empty; 9],
    };
    start.cells[0] = Mark::X;
    start.cells[4] = Mark::O;

    let config = AgentConfig::from_default_yaml().expect("bundled config is valid");
    println!("Start position:\n{}\n", start.render());

    for mode in [SearchMode::Minimax, SearchMode::AlphaBeta, SearchMode::Expectimax] {
        let decision = AdversarialSearch::new(mode).decide(&TicTacToe, &start, 3, evaluate);
        println!(
            "{mode:?}: cell {:?} value {:.3} nodes {}",
            decision.action, decision.value, decision.nodes
        );
    }

    let contest = ContestAgent::new(5, config.game.node_budget);
    let decision = contest.decide(&TicTacToe, &start, evaluate);
    println!(
        "contest agent: cell {:?} value {:.3} nodes {}",
        decision.action, decision.value, decision.nodes
    );
}
