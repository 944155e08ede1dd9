use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal move sequences of length `depth` from `pos`. The position
/// is used as scratch space and is restored before returning.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(pos, buf);
        if rest.is_empty() {
            return buf.len() as u64;
        }

        let snapshot = pos.snapshot();
        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            pos.apply_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.restore(&snapshot);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-root-move perft counts, in generation order.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut scratch = *pos;
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(&mut scratch, &mut roots);

    roots
        .into_iter()
        .map(|mv| {
            let mut child = *pos;
            child.apply_move(mv);
            (mv, perft(&mut child, depth.saturating_sub(1)))
        })
        .collect()
}
