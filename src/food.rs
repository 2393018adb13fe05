use std::collections::VecDeque;

use log::info;
use rand::Rng;

use crate::grid::{contains, Coords, CELL_COUNT};

pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new<R: Rng>(snake_body: &VecDeque<Coords>, rng: &mut R) -> Self {
        let position = random_position(snake_body, rng);
        info!("New food created at {}", position);
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn reposition<R: Rng>(&mut self, snake_body: &VecDeque<Coords>, rng: &mut R) -> Coords {
        self.position = random_position(snake_body, rng);
        self.position
    }
}

/// Rejection sampling over the whole grid: both axes are redrawn until the
/// cell is free. Never returns if the snake covers every cell.
pub fn random_position<R: Rng>(snake_body: &VecDeque<Coords>, rng: &mut R) -> Coords {
    loop {
        let pos = Coords::new(rng.gen_range(0..CELL_COUNT), rng.gen_range(0..CELL_COUNT));
        if !contains(pos, snake_body) {
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::INITIAL_BODY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RNG_SEED: u64 = 0x5EED_5A4E;

    #[test]
    fn new_food_avoids_initial_body() {
        let body: VecDeque<Coords> = INITIAL_BODY.iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(RNG_SEED);

        for _ in 0..1_000 {
            let food = Food::new(&body, &mut rng);
            assert!(food.position().in_bounds());
            assert!(!contains(food.position(), &body));
        }
    }

    #[test]
    fn placement_never_hits_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let mut body: VecDeque<Coords> = VecDeque::new();

        // Grow a pseudo-random body of varying shape, checking placement as it fills.
        for trial in 0..10_000 {
            if trial % 20 == 0 {
                body.clear();
            }
            let pos = random_position(&body, &mut rng);
            assert!(pos.in_bounds(), "{} out of bounds", pos);
            assert!(!contains(pos, &body), "{} placed on the snake", pos);
            body.push_front(pos);
        }
    }

    #[test]
    fn placement_finds_the_last_free_cell() {
        let free = Coords::new(12, 3);
        let body: VecDeque<Coords> = (0..CELL_COUNT)
            .flat_map(|y| (0..CELL_COUNT).map(move |x| Coords::new(x, y)))
            .filter(|c| *c != free)
            .collect();
        let mut rng = StdRng::seed_from_u64(RNG_SEED);

        assert_eq!(random_position(&body, &mut rng), free);
    }

    #[test]
    fn reposition_updates_position() {
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let body: VecDeque<Coords> = INITIAL_BODY.iter().copied().collect();
        let mut food = Food::new(&body, &mut rng);

        let moved = food.reposition(&body, &mut rng);
        assert_eq!(food.position(), moved);
        assert!(!contains(moved, &body));
    }
}
