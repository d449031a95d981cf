use crate::oracle::ScoredMove;

/// Joins rendered moves in a report line.
pub const MOVE_SEPARATOR: &str = " ; ";

/// Returns the `n_best` best and `n_worst` worst moves, cost-descending.
/// A list short enough to show whole is returned unchanged (sorted); a
/// longer one keeps both extremes so the reader sees strong and weak
/// options, not just one end. The sort is stable, so equal costs keep
/// their original relative order.
pub fn truncate_moves(mut moves: Vec<ScoredMove>, n_best: usize, n_worst: usize) -> Vec<ScoredMove> {
    moves.sort_by(|a, b| b.cost.cmp(&a.cost));
    if moves.len() <= n_best + n_worst {
        return moves;
    }
    let worst_start = moves.len() - n_worst;
    let worst: Vec<ScoredMove> = moves[worst_start..].to_vec();
    moves.truncate(n_best);
    moves.extend(worst);
    moves
}

/// Renders moves for the report, page coordinates throughout.
pub fn render_moves(moves: &[ScoredMove]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(MOVE_SEPARATOR)
}
