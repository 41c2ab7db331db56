// The per-agent predicates every engine consults while it walks the graph.
//
// An `Agent` carries no graph-position state of its own — every method is a
// pure function of the node handles it's given, so the same `Agent` value
// can be shared across concurrent queries run by separate engine instances.

/// The per-agent traversal façade: step cost, traversal predicates, and the
/// relaxed-range flag that loosens the coverage/A*-truncation end condition.
///
/// # Invariants
/// - `step_cost(a, b) > 0.0` for every neighbour pair `a`, `b`.
/// - `step_cost(a, b) >= graph.distance(a, b)` — this is what makes the
///   graph's `distance` an admissible A* heuristic.
/// - `can_make_step` depends only on the `(source, neighbour)` pair, never
///   on any notion of "current position" held elsewhere.
/// - `relaxed_range()` is constant for the lifetime of the agent.
pub trait Agent<N> {
    /// Whether this agent may end a bounded-cost movement (coverage, or A*'s
    /// truncated-range retrieval) on a node whose own entry cost would
    /// overshoot the budget, provided the predecessor was strictly under
    /// budget.
    fn relaxed_range(&self) -> bool;

    /// Whether the agent can step from `a` directly to neighbour `b`.
    fn can_make_step(&self, a: N, b: N) -> bool;

    /// Whether the agent may end movement occupying `n`.
    fn can_occupy(&self, n: N) -> bool;

    /// The cost of stepping from `a` to neighbour `b`. Must be positive.
    fn step_cost(&self, a: N, b: N) -> f64;

    /// Whether `candidate` is "near enough" to `target` to end an A* search.
    /// `distance` carries the graph distance between the two, as already
    /// computed by the caller — this crate's own call-sites always pass a
    /// concrete non-negative distance.
    ///
    /// Default: exact arrival (`distance == 0`).
    fn is_near_target(&self, _candidate: N, _target: N, distance: f64) -> bool {
        distance == 0.0
    }
}
