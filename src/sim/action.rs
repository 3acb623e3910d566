//! Actions and the state reducer
//!
//! Every input to the game is one of a closed set of actions. Applying an
//! action to a snapshot yields the next snapshot; the previous one is left
//! untouched, so a fixed action log always replays to the same states.

use serde::{Deserialize, Serialize};

use super::body::{Body, Surface};
use super::collision::{Direction, detect_collision};
use super::rng::bounce_speed;
use super::state::GameState;
use crate::consts::*;

/// A discrete input to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// One simulation step; `elapsed` becomes the simulation clock
    Tick { elapsed: u64 },
    /// Overrides the bird's velocity with the flap impulse
    Flap,
    /// A top/bottom pipe pair with a gap given as fractions of viewport height
    SpawnPipes {
        gap_center: f64,
        gap_height: f64,
        /// Scheduled time in seconds from game start
        time: f64,
    },
}

impl Action {
    /// Produce the next snapshot. Total over every reachable state; a
    /// finished game is returned unchanged.
    pub fn apply(&self, state: &GameState) -> GameState {
        if state.game_ended {
            return state.clone();
        }

        match *self {
            Action::Tick { elapsed } => tick(state, elapsed),
            Action::Flap => flap(state),
            Action::SpawnPipes {
                gap_center,
                gap_height,
                time,
            } => spawn_pipes(state, gap_center, gap_height, time),
        }
    }
}

/// Fold an action log onto a starting snapshot
pub fn reduce<'a, I>(initial: GameState, actions: I) -> GameState
where
    I: IntoIterator<Item = &'a Action>,
{
    actions
        .into_iter()
        .fold(initial, |state, action| action.apply(&state))
}

/// Like `reduce`, but yields the snapshot after every action
pub fn scan<'a, I>(initial: GameState, actions: I) -> impl Iterator<Item = GameState> + 'a
where
    I: IntoIterator<Item = &'a Action>,
    I::IntoIter: 'a,
{
    actions.into_iter().scan(initial, |state, action| {
        *state = action.apply(state);
        Some(state.clone())
    })
}

/// Expire, collide, score, integrate, then stamp the clock.
///
/// Collision and scoring see this tick's pre-movement geometry; expiry sees
/// the geometry left by the previous tick.
fn tick(state: &GameState, elapsed: u64) -> GameState {
    let next = expire_pipes(state.clone());
    let next = resolve_collision(next, elapsed);
    let next = update_score(next);
    let next = integrate(next);
    GameState {
        elapsed_time: elapsed,
        ..next
    }
}

/// Move off-screen pipes into the expired set (replacing last tick's set)
fn expire_pipes(state: GameState) -> GameState {
    let GameState {
        top_pipes,
        bottom_pipes,
        ..
    } = state;

    let (expired_top, top_pipes): (Vec<Body>, Vec<Body>) =
        top_pipes.into_iter().partition(Body::is_off_screen);
    let (expired_bottom, bottom_pipes): (Vec<Body>, Vec<Body>) =
        bottom_pipes.into_iter().partition(Body::is_off_screen);

    let expired: Vec<Body> = expired_top.into_iter().chain(expired_bottom).collect();
    if !expired.is_empty() {
        log::debug!(
            "Expired {} pipe(s): {:?}",
            expired.len(),
            expired.iter().map(|p| p.id).collect::<Vec<_>>()
        );
    }

    GameState {
        top_pipes,
        bottom_pipes,
        expired,
        ..state
    }
}

/// At most one bounce per tick; costs a life
fn resolve_collision(state: GameState, elapsed: u64) -> GameState {
    let Some(surface) = detect_collision(&state.bird, &state.top_pipes, &state.bottom_pipes)
    else {
        return state;
    };

    let direction = Direction::away_from(surface);
    let speed = bounce_speed(elapsed);
    let lives = state.lives - 1;
    let game_ended = lives < 0;

    log::debug!(
        "Bounce off {:?} at t={}: {:?} @ {:.3}, lives {}",
        surface,
        elapsed,
        direction,
        speed,
        lives
    );
    if game_ended {
        log::info!("Game over at t={} with score {}", elapsed, state.score);
    }

    GameState {
        bird: Body {
            vel: direction.unit() * speed,
            ..state.bird
        },
        lives,
        game_ended,
        ..state
    }
}

/// Award a point once the bird is past the tracked top pipe
fn update_score(state: GameState) -> GameState {
    let passed = state
        .next_scoring_pipe()
        .is_some_and(|pipe| state.bird.position().x > pipe.position().x);
    if !passed {
        return state;
    }

    log::debug!(
        "Passed pipe {}, score {}",
        state.next_scoring_pipe_id,
        state.score + 1
    );

    GameState {
        score: state.score + 1,
        // Pipes are minted as (top, bottom) pairs
        next_scoring_pipe_id: state.next_scoring_pipe_id + 2,
        ..state
    }
}

fn integrate(state: GameState) -> GameState {
    GameState {
        bird: state.bird.integrate(),
        top_pipes: state.top_pipes.iter().map(Body::integrate).collect(),
        bottom_pipes: state.bottom_pipes.iter().map(Body::integrate).collect(),
        ..state
    }
}

fn flap(state: &GameState) -> GameState {
    GameState {
        bird: Body {
            vel: FLAP_VEL,
            ..state.bird.clone()
        },
        ..state.clone()
    }
}

fn spawn_pipes(state: &GameState, gap_center: f64, gap_height: f64, time: f64) -> GameState {
    let gap_y = gap_center * VIEWPORT_HEIGHT;
    let half_gap = gap_height * VIEWPORT_HEIGHT / 2.0;
    let top_id = state.spawned_object_count;
    let bottom_id = top_id + 1;

    let top = Body::pipe(top_id, time, 0.0, gap_y - half_gap, Surface::TopPipe);
    let bottom_y = gap_y + half_gap;
    let bottom = Body::pipe(
        bottom_id,
        time,
        bottom_y,
        VIEWPORT_HEIGHT - bottom_y,
        Surface::BottomPipe,
    );

    log::debug!(
        "Spawned pipes {}/{} (gap {:.1}..{:.1}) scheduled at {}s",
        top_id,
        bottom_id,
        gap_y - half_gap,
        bottom_y,
        time
    );

    GameState {
        top_pipes: std::iter::once(top)
            .chain(state.top_pipes.iter().cloned())
            .collect(),
        bottom_pipes: std::iter::once(bottom)
            .chain(state.bottom_pipes.iter().cloned())
            .collect(),
        spawned_object_count: state.spawned_object_count + 2,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Vector;
    use proptest::prelude::*;

    fn ticks(from: u64, count: u64) -> Vec<Action> {
        (from..from + count)
            .map(|elapsed| Action::Tick { elapsed })
            .collect()
    }

    /// A bird that hovers in place so pipes can fly past untouched
    fn hovering_state() -> GameState {
        GameState {
            bird: Body {
                acc: Vector::ZERO,
                ..Body::bird()
            },
            ..GameState::new()
        }
    }

    /// Bird resting on the floor, with no gravity
    fn floor_bird() -> Body {
        Body {
            displacement: Vector::new(0.0, VIEWPORT_HEIGHT - BIRD_HEIGHT - BIRD_START_POS.y),
            acc: Vector::ZERO,
            ..Body::bird()
        }
    }

    const CENTRE_GAP: Action = Action::SpawnPipes {
        gap_center: 0.5,
        gap_height: 0.25,
        time: 1.0,
    };

    #[test]
    fn test_tick_integration_order() {
        let state = GameState {
            bird: Body {
                vel: Vector::new(0.0, 2.0),
                ..Body::bird()
            },
            ..GameState::new()
        };
        let next = Action::Tick { elapsed: 1 }.apply(&state);
        // v + a = 3, and displacement moves by the updated velocity
        assert_eq!(next.bird.vel, Vector::new(0.0, 3.0));
        assert_eq!(next.bird.displacement, Vector::new(0.0, 3.0));
        assert_eq!(next.elapsed_time, 1);
        // Previous snapshot untouched
        assert_eq!(state.bird.vel, Vector::new(0.0, 2.0));
    }

    #[test]
    fn test_free_fall() {
        let state = reduce(GameState::new(), &ticks(0, 3));
        // 1 + 2 + 3
        assert_eq!(state.bird.vel, Vector::new(0.0, 3.0));
        assert_eq!(state.bird.displacement, Vector::new(0.0, 6.0));
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let state = GameState {
            bird: Body {
                vel: Vector::new(0.0, 12.0),
                ..Body::bird()
            },
            ..GameState::new()
        };
        let once = Action::Flap.apply(&state);
        let twice = Action::Flap.apply(&once);
        assert_eq!(once.bird.vel, FLAP_VEL);
        assert_eq!(once, twice);
        assert_eq!(once.lives, state.lives);
        assert_eq!(once.score, state.score);

        let after = Action::Tick { elapsed: 1 }.apply(&twice);
        assert_eq!(after.bird.vel, FLAP_VEL + GRAVITY);
    }

    #[test]
    fn test_spawn_pipes_geometry() {
        let state = CENTRE_GAP.apply(&GameState::new());
        assert_eq!(state.top_pipes.len(), 1);
        assert_eq!(state.bottom_pipes.len(), 1);

        let top = &state.top_pipes[0];
        let bottom = &state.bottom_pipes[0];
        assert_eq!(top.id, 1);
        assert_eq!(bottom.id, 2);
        assert_eq!(top.start_pos, Vector::new(VIEWPORT_WIDTH, 0.0));
        assert_eq!(top.height, 150.0);
        assert_eq!(bottom.start_pos, Vector::new(VIEWPORT_WIDTH, 250.0));
        assert_eq!(bottom.height, 150.0);
        // 100 pixel gap centred on y=200
        assert_eq!(bottom.start_pos.y - top.height, 100.0);
        assert_eq!((top.height + bottom.start_pos.y) / 2.0, 200.0);
        assert_eq!(top.vel, PIPE_VEL);
        assert_eq!(top.width, PIPE_WIDTH);
        assert_eq!(top.surface, Some(Surface::TopPipe));
        assert_eq!(bottom.surface, Some(Surface::BottomPipe));
        assert_eq!(top.created_at, 1.0);
        assert_eq!(state.spawned_object_count, 3);
    }

    #[test]
    fn test_spawn_newest_first() {
        let second = Action::SpawnPipes {
            gap_center: 0.4,
            gap_height: 0.3,
            time: 3.0,
        };
        let state = reduce(GameState::new(), &[CENTRE_GAP, second]);
        let top_ids: Vec<u32> = state.top_pipes.iter().map(|p| p.id).collect();
        let bottom_ids: Vec<u32> = state.bottom_pipes.iter().map(|p| p.id).collect();
        assert_eq!(top_ids, vec![3, 1]);
        assert_eq!(bottom_ids, vec![4, 2]);
        assert_eq!(state.spawned_object_count, 5);
        assert_eq!(state.next_scoring_pipe().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_expiry_timing() {
        let state = CENTRE_GAP.apply(&hovering_state());

        // 650 px of travel at 5 px/tick; strictly past after 131 moves,
        // removed by the expiry phase of the following tick.
        let state = reduce(state, &ticks(1, 131));
        assert_eq!(state.top_pipes.len(), 1);
        assert!(state.expired.is_empty());

        let state = Action::Tick { elapsed: 132 }.apply(&state);
        assert!(state.top_pipes.is_empty());
        assert!(state.bottom_pipes.is_empty());
        let mut expired: Vec<u32> = state.expired.iter().map(|p| p.id).collect();
        expired.sort();
        assert_eq!(expired, vec![1, 2]);

        let state = Action::Tick { elapsed: 133 }.apply(&state);
        assert!(state.expired.is_empty());
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_scoring_once_per_pair() {
        let state = CENTRE_GAP.apply(&hovering_state());

        // Bird x=159; pipe x after n moves is 600 - 5n, passed after 89 moves,
        // observed on the next tick.
        let state = reduce(state, &ticks(1, 89));
        assert_eq!(state.score, 0);
        let state = Action::Tick { elapsed: 90 }.apply(&state);
        assert_eq!(state.score, 1);
        assert_eq!(state.next_scoring_pipe_id, 3);

        let state = reduce(state, &ticks(91, 30));
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_scoring_tracks_oldest_pair() {
        let later = Action::SpawnPipes {
            gap_center: 0.5,
            gap_height: 0.25,
            time: 2.0,
        };
        let state = reduce(hovering_state(), &[CENTRE_GAP]);
        let state = reduce(state, &ticks(1, 20));
        let state = later.apply(&state);
        // Second pair has moved 88 times after tick 109, still ahead of the bird
        let state = reduce(state, &ticks(21, 89));
        assert_eq!(state.score, 1);
        assert_eq!(state.next_scoring_pipe_id, 3);
        let state = reduce(state, &ticks(110, 30));
        assert_eq!(state.score, 2);
        assert_eq!(state.next_scoring_pipe_id, 5);
    }

    #[test]
    fn test_floor_bounce() {
        let state = GameState {
            bird: Body {
                acc: GRAVITY,
                ..floor_bird()
            },
            ..GameState::new()
        };
        let next = Action::Tick { elapsed: 7 }.apply(&state);
        assert_eq!(next.lives, START_LIVES - 1);
        assert_eq!(next.bird.vel, Vector::new(0.0, -bounce_speed(7)) + GRAVITY);
        assert!(next.bird.vel.y < 0.0);
    }

    #[test]
    fn test_ceiling_bounce_goes_down() {
        let state = GameState {
            bird: Body {
                displacement: Vector::new(0.0, -BIRD_START_POS.y),
                ..Body::bird()
            },
            ..GameState::new()
        };
        let next = Action::Tick { elapsed: 3 }.apply(&state);
        assert_eq!(next.lives, START_LIVES - 1);
        assert!(next.bird.vel.y >= BOUNCE_SPEED_MIN);
    }

    #[test]
    fn test_lives_and_termination() {
        let mut state = GameState::new();
        for (i, elapsed) in (1..=4u64).enumerate() {
            state = GameState {
                bird: floor_bird(),
                ..state
            };
            state = Action::Tick { elapsed }.apply(&state);
            assert_eq!(state.lives, START_LIVES - 1 - i as i32);
            assert_eq!(state.game_ended, i == 3, "after bounce {}", i + 1);
        }
        assert_eq!(state.lives, -1);

        // Absorbing: nothing changes after the end
        let ended = state.clone();
        let after = reduce(
            state,
            &[
                Action::Tick { elapsed: 5 },
                Action::Flap,
                CENTRE_GAP,
                Action::Tick { elapsed: 6 },
            ],
        );
        assert_eq!(after, ended);
    }

    #[test]
    fn test_scan_yields_every_snapshot() {
        let actions = [CENTRE_GAP, Action::Tick { elapsed: 1 }, Action::Flap];
        let states: Vec<GameState> = scan(GameState::new(), &actions).collect();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].top_pipes.len(), 1);
        assert_eq!(states[1].elapsed_time, 1);
        assert_eq!(states[2].bird.vel, FLAP_VEL);
        assert_eq!(states[2], reduce(GameState::new(), &actions));
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0u64..10_000).prop_map(|elapsed| Action::Tick { elapsed }),
            Just(Action::Flap),
            (0.0..=1.0f64, 0.0..=1.0f64, 0.0..120.0f64).prop_map(
                |(gap_center, gap_height, time)| Action::SpawnPipes {
                    gap_center,
                    gap_height,
                    time,
                }
            ),
        ]
    }

    proptest! {
        #[test]
        fn prop_replay_is_deterministic(actions in prop::collection::vec(arb_action(), 0..300)) {
            let a = reduce(GameState::new(), &actions);
            let b = reduce(GameState::new(), &actions);
            prop_assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }

        #[test]
        fn prop_score_never_decreases(actions in prop::collection::vec(arb_action(), 0..300)) {
            let mut last_score = 0;
            let mut last_count = 1;
            let mut ended = false;
            for state in scan(GameState::new(), &actions) {
                prop_assert!(state.score >= last_score);
                prop_assert!(state.score <= last_score + 1);
                prop_assert!(state.spawned_object_count >= last_count);
                prop_assert!(!ended || state.game_ended);
                last_score = state.score;
                last_count = state.spawned_object_count;
                ended = state.game_ended;
            }
        }
    }
}
