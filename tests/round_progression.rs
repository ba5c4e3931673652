use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wormy::game::{
    Action, CollisionType, Direction, GameConfig, GameEngine, GameEvent, Grid, Position,
    RoundState, TerminationCause, Worm,
};

#[test]
fn eight_by_eight_round_ramps_up_after_four_meals() {
    let mut engine = GameEngine::new(GameConfig::new(8, 8).with_seed(11)).unwrap();

    let fresh = engine.reset().unwrap();
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.tick_rate, 15);
    assert!(fresh.obstacles.is_empty());

    // Run along row 1 so food always has room below the exclusion box
    let worm = Worm::new(Position::new(2, 1), Direction::Right, 3);
    let mut state = RoundState::new(worm, Position::new(3, 1), Grid::new(8, 8));

    for meal in 1..=4u32 {
        let next = state.worm.peek_move(Direction::Right);
        state.food.relocate(next);

        let outcome = engine.tick(&mut state, Action::Continue);

        assert!(!outcome.terminated, "meal {meal} ended the round");
        assert_eq!(outcome.score, meal);
        assert_eq!(state.worm.len(), 3 + meal as usize);
    }

    assert_eq!(state.score, 4);
    assert_eq!(state.obstacles.count(), 1);
    assert_eq!(state.tick_rate, 16);

    let obstacle = *state.obstacles.iter().next().unwrap();
    assert_ne!(obstacle, state.food.position());
    assert!(!state.worm.occupies(obstacle));
}

#[test]
fn rightmost_column_moving_right_terminates() {
    let mut engine = GameEngine::new(GameConfig::new(8, 8).with_seed(5)).unwrap();
    let worm = Worm::new(Position::new(7, 6), Direction::Right, 3);
    let mut state = RoundState::new(worm, Position::new(0, 0), Grid::new(8, 8));

    let outcome = engine.tick(&mut state, Action::Move(Direction::Right));

    assert!(outcome.terminated);
    assert_eq!(
        state.termination(),
        Some(TerminationCause::Collision(CollisionType::Wall))
    );
}

#[test]
fn reversal_requests_are_ignored() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(8)).unwrap();
    let mut state = engine.reset().unwrap();

    for (heading, reverse) in [
        (Direction::Right, Direction::Left),
        (Direction::Up, Direction::Down),
    ] {
        engine.tick(&mut state, Action::Move(heading));
        let outcome = engine.tick(&mut state, Action::Move(reverse));
        assert!(!outcome.terminated);
        assert_eq!(state.worm.direction, heading);
    }
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Headings that neither reverse nor crash on the next tick
fn safe_moves(state: &RoundState) -> Vec<Direction> {
    DIRECTIONS
        .into_iter()
        .filter(|&dir| !state.worm.direction.is_opposite(dir))
        .filter(|&dir| {
            let next = state.worm.peek_move(dir);
            let grow = next == state.food.position();
            state.grid.contains(next)
                && !state.worm.collides_with_self(next, grow)
                && !state.obstacles.contains(next)
        })
        .collect()
}

fn distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Head for the food along a safe move, with a random pick among ties
fn greedy_action(state: &RoundState, rng: &mut StdRng) -> Action {
    let safe = safe_moves(state);
    let food = state.food.position();
    let now = distance(state.worm.head(), food);

    let closer: Vec<Direction> = safe
        .iter()
        .copied()
        .filter(|&dir| distance(state.worm.peek_move(dir), food) < now)
        .collect();

    let pool = if closer.is_empty() { &safe } else { &closer };
    if pool.is_empty() {
        // Boxed in: any direction ends the round
        Action::Move(DIRECTIONS[rng.gen_range(0..4)])
    } else {
        Action::Move(pool[rng.gen_range(0..pool.len())])
    }
}

/// Food-seeking play across many seeded rounds, checking the per-tick invariants
#[test]
fn food_seeking_play_keeps_round_invariants() {
    let mut meals = 0u32;
    let mut most_obstacles = 0usize;

    for seed in 0..40u64 {
        let config = GameConfig::new(24, 18).with_seed(seed);
        let mut engine = GameEngine::new(config).unwrap();
        let mut input_rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut state = engine.reset().unwrap();

        for _ in 0..2000 {
            let before = state.clone();
            let action = greedy_action(&state, &mut input_rng);

            let outcome = engine.tick(&mut state, action);

            if outcome.terminated {
                assert!(matches!(
                    outcome.events.last(),
                    Some(GameEvent::RoundTerminated(_))
                ));
                break;
            }

            assert!(state.obstacles.count() >= before.obstacles.count());
            assert_eq!(state.obstacles.count(), (state.score / 4) as usize);
            assert_eq!(state.tick_rate, (15 + state.score / 3).min(30));
            assert!(state.grid.contains(state.worm.head()));

            if outcome.info.ate_food {
                meals += 1;
                assert_eq!(state.score, before.score + 1);
                assert_eq!(state.worm.len(), before.worm.len() + 1);

                let food = state.food.position();
                assert_ne!(food, before.food.position());
                assert!(!food.is_within_box(state.worm.head(), 5));
                assert!(!state.obstacles.contains(food));
                assert!(!state.worm.occupies(food));
                if let Some(obstacle) = outcome.info.new_obstacle {
                    assert_ne!(obstacle, food);
                    assert!(!state.worm.body[1..].contains(&obstacle));
                }
            } else {
                assert_eq!(state.score, before.score);
                assert_eq!(state.worm.len(), before.worm.len());
                assert_eq!(state.food, before.food);
            }
        }

        most_obstacles = most_obstacles.max(state.obstacles.count());
    }

    assert!(meals >= 40, "only {meals} meals across all rounds");
    assert!(
        most_obstacles >= 2,
        "no round grew past {most_obstacles} obstacles"
    );
}
