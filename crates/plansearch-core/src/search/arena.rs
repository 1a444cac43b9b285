/// Index of a node inside a [`SearchArena`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// Return the position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A reached state plus the edge that reached it.
///
/// Nodes only point at their parent, so every path prefix is stored once no
/// matter how many frontier entries extend it.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode<S, A> {
    pub state: S,
    pub parent: Option<(NodeId, A)>,
    pub path_cost: f64,
}

impl<S, A> SearchNode<S, A> {
    pub fn root(state: S) -> Self {
        SearchNode {
            state,
            parent: None,
            path_cost: 0.0,
        }
    }

    pub fn child(state: S, parent: NodeId, action: A, path_cost: f64) -> Self {
        SearchNode {
            state,
            parent: Some((parent, action)),
            path_cost,
        }
    }
}

/// Append-only node storage for a single search call.
pub(crate) struct SearchArena<S, A> {
    storage: Vec<SearchNode<S, A>>,
}

impl<S, A: Clone> SearchArena<S, A> {
    pub fn new() -> Self {
        SearchArena {
            storage: Vec::new(),
        }
    }

    /// Store a node and return its id.
    pub fn allocate(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.storage.len());
        self.storage.push(node);
        id
    }

    /// Ids are only minted by `allocate` and nodes are never removed,
    /// so every id handed out is in bounds.
    pub fn node(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.storage[id.index()]
    }

    /// Number of nodes generated so far.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Rebuild the action sequence from the root to `id`.
    pub fn actions_to(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = id;

        while let Some((parent, action)) = &self.node(current).parent {
            actions.push(action.clone());
            current = *parent;
        }

        actions.reverse();
        actions
    }
}
