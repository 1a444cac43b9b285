use crate::adversarial::game::AdversarialGame;

/// Nested description of a game tree used to build [`GameTree`].
#[derive(Debug, Clone)]
pub enum Shape {
    Leaf(f64),
    Node(Vec<Shape>),
}

#[derive(Debug, Clone)]
struct TreeNode {
    children: Vec<usize>,
    value: f64,
    terminal: bool,
}

/// Explicit game tree: states are node indices, actions are child positions.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    agents: usize,
}

impl GameTree {
    pub fn new(shape: &Shape, agents: usize) -> Self {
        let mut tree = GameTree {
            nodes: Vec::new(),
            agents,
        };
        tree.insert(shape);
        tree
    }

    fn insert(&mut self, shape: &Shape) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            children: Vec::new(),
            value: 0.0,
            terminal: false,
        });
        match shape {
            Shape::Leaf(value) => self.nodes[id].value = *value,
            Shape::Node(children) => {
                let ids: Vec<usize> = children.iter().map(|c| self.insert(c)).collect();
                self.nodes[id].children = ids;
            }
        }
        id
    }

    /// Mark `node` as won with the given static value; its subtree is never searched.
    pub fn mark_terminal(&mut self, node: usize, value: f64) {
        self.nodes[node].terminal = true;
        self.nodes[node].value = value;
    }

    pub fn evaluate(&self, state: &usize) -> f64 {
        self.nodes[*state].value
    }
}

impl AdversarialGame for GameTree {
    type State = usize;
    type Action = usize;

    fn num_agents(&self, _state: &usize) -> usize {
        self.agents
    }

    fn legal_actions(&self, state: &usize, _agent: usize) -> Vec<usize> {
        (0..self.nodes[*state].children.len()).collect()
    }

    fn successor(&self, state: &usize, _agent: usize, action: &usize) -> usize {
        self.nodes[*state].children[*action]
    }

    fn is_win(&self, state: &usize) -> bool {
        self.nodes[*state].terminal
    }

    fn is_lose(&self, _state: &usize) -> bool {
        false
    }
}

/// Exhaustive reference evaluation straight off the shape.
pub fn brute_force(shape: &Shape, level: usize, agents: usize) -> f64 {
    match shape {
        Shape::Leaf(value) => *value,
        Shape::Node(children) => {
            let values = children
                .iter()
                .map(|child| brute_force(child, level + 1, agents));
            if level % agents == 0 {
                values.fold(f64::NEG_INFINITY, f64::max)
            } else {
                values.fold(f64::INFINITY, f64::min)
            }
        }
    }
}

pub fn leaves(values: &[f64]) -> Shape {
    Shape::Node(values.iter().copied().map(Shape::Leaf).collect())
}

/// Two-player take-away game: take one or two coins, taking the last coin wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakeAway {
    pub coins: u32,
    pub to_move: usize,
}

pub struct TakeAwayGame;

impl TakeAwayGame {
    pub fn evaluate(state: &TakeAway) -> f64 {
        match (state.coins, state.to_move) {
            (0, 1) => 1.0,
            (0, _) => -1.0,
            _ => 0.0,
        }
    }
}

impl AdversarialGame for TakeAwayGame {
    type State = TakeAway;
    type Action = u32;

    fn num_agents(&self, _state: &TakeAway) -> usize {
        2
    }

    fn legal_actions(&self, state: &TakeAway, _agent: usize) -> Vec<u32> {
        (1..=2).filter(|take| *take <= state.coins).collect()
    }

    fn successor(&self, state: &TakeAway, agent: usize, action: &u32) -> TakeAway {
        TakeAway {
            coins: state.coins - action,
            to_move: 1 - agent,
        }
    }

    fn is_win(&self, state: &TakeAway) -> bool {
        state.coins == 0 && state.to_move == 1
    }

    fn is_lose(&self, state: &TakeAway) -> bool {
        state.coins == 0 && state.to_move == 0
    }
}
