use super::state::{Action, State};

/// Every state reachable from `current` in one move.
///
/// Always returns all six candidates in the same order, including no-ops and
/// duplicates. The order is the tie-break between states found at the same
/// depth of the search.
pub fn next_states(current: State, capacity: State) -> [(State, Action); 6] {
    let State { x, y } = current;
    let State { x: max_x, y: max_y } = capacity;
    // Saturates instead of wrapping for levels beyond what a `Puzzle` allows
    let total = x.saturating_add(y);

    [
        (State::new(max_x, y), Action::FillX),
        (State::new(x, max_y), Action::FillY),
        (State::new(0, y), Action::EmptyX),
        (State::new(x, 0), Action::EmptyY),
        (
            State::new(total.min(max_x), y.saturating_sub(max_x.saturating_sub(x))),
            Action::TransferYToX,
        ),
        (
            State::new(x.saturating_sub(max_y.saturating_sub(y)), total.min(max_y)),
            Action::TransferXToY,
        ),
    ]
}
