use rand::Rng;

use super::difficulty::Competence;
use super::grid::Direction;
use super::state::GameState;

/// Manhattan radius around the player's head inside which a delayed rival
/// may hesitate.
const HESITATION_RADIUS: i32 = 2;

/// Pick a move for the rival at `rival_index`.
///
/// Greedy policy: among the four cardinal moves whose target cell is not
/// occupied by any snake body, choose the one minimizing Manhattan distance
/// to the primary food; ties go to the first candidate in the fixed
/// enumeration order Up, Down, Left, Right. Returns None (hold position)
/// when no move is safe.
///
/// Occupancy is evaluated against the state as it stands when the rival is
/// processed, so rivals that already moved this tick are seen at their new
/// positions.
///
/// While the competence flag is Delayed, a rival whose head is within two
/// cells of the player's head holds position with probability 1/2 regardless
/// of the chosen move.
pub fn choose_move<R: Rng>(
    state: &GameState,
    rival_index: usize,
    rng: &mut R,
) -> Option<Direction> {
    let rival = &state.rivals[rival_index];
    let head = rival.head();
    let width = state.grid_width as i32;
    let height = state.grid_height as i32;

    let mut best: Option<(Direction, i32)> = None;
    for direction in Direction::ALL {
        let next = head.stepped(direction, width, height);
        if state.occupied_by_snake(next) {
            continue;
        }
        let distance = next.manhattan(state.food.primary);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((direction, distance));
        }
    }

    let (direction, _) = best?;

    if state.difficulty.competence == Competence::Delayed
        && head.manhattan(state.player.head()) <= HESITATION_RADIUS
        && rng.gen_bool(0.5)
    {
        return None;
    }

    Some(direction)
}
