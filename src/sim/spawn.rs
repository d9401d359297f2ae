//! Spawn scheduling, kind selection and declustering

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EntityKind;
use crate::consts::SPAWN_HISTORY_CAP;
use crate::tuning::Tuning;

/// Recently spawned kinds, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnHistory {
    kinds: Vec<EntityKind>,
}

impl SpawnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a kind, dropping the oldest entry past capacity
    pub fn record(&mut self, kind: EntityKind) {
        self.kinds.push(kind);
        if self.kinds.len() > SPAWN_HISTORY_CAP {
            self.kinds.remove(0);
        }
    }

    /// The two most recent kinds, once at least two have spawned
    pub fn last_two(&self) -> Option<(EntityKind, EntityKind)> {
        match self.kinds.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Countdown between spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks counted since the countdown was last re-armed
    pub ticks_since_last_spawn: u32,
    /// Ticks that must elapse before the next spawn
    pub next_spawn_threshold: u32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            ticks_since_last_spawn: 0,
            next_spawn_threshold: tuning.spawn_delay_initial,
        }
    }

    /// Count one tick. When the countdown elapses, pick the next kind,
    /// record it in the history and re-arm with a fresh random countdown.
    ///
    /// The kind roll always happens before the countdown roll, so seeded
    /// streams stay reproducible.
    pub fn draw<R: Rng>(
        &mut self,
        history: &mut SpawnHistory,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<EntityKind> {
        self.ticks_since_last_spawn += 1;
        if self.ticks_since_last_spawn < self.next_spawn_threshold {
            return None;
        }

        let kind = decluster(kind_for_roll(rng.random(), tuning), history);
        history.record(kind);

        self.ticks_since_last_spawn = 0;
        let span = (tuning.spawn_delay_max - tuning.spawn_delay_min) as f32;
        self.next_spawn_threshold = tuning.spawn_delay_min + (rng.random::<f32>() * span) as u32;

        Some(kind)
    }
}

/// Map a uniform roll in [0, 1) onto a kind by cumulative weight
pub fn kind_for_roll(roll: f32, tuning: &Tuning) -> EntityKind {
    if roll < tuning.obstacle_weight {
        EntityKind::Obstacle
    } else if roll < tuning.obstacle_weight + tuning.coin_weight {
        EntityKind::Coin
    } else {
        EntityKind::Heart
    }
}

/// Break up reward clusters: when the last two spawns already match the
/// fresh kind, an Obstacle spawns instead. A run of Obstacles is unaffected
/// since the substitute is the same kind.
pub fn decluster(kind: EntityKind, history: &SpawnHistory) -> EntityKind {
    match history.last_two() {
        Some((a, b)) if a == b && b == kind => EntityKind::Obstacle,
        _ => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// RNG stub that yields a fixed bit pattern, so the float draws it
    /// produces are known exactly
    struct ConstRng(u32);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.0.to_le_bytes();
            for (d, s) in dest.iter_mut().zip(bytes.iter().cycle()) {
                *d = *s;
            }
        }
    }

    fn fast_tuning() -> Tuning {
        Tuning {
            spawn_delay_initial: 1,
            spawn_delay_min: 1,
            spawn_delay_max: 2,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_kind_for_roll_cumulative_bands() {
        let tuning = Tuning::default();
        assert_eq!(kind_for_roll(0.0, &tuning), EntityKind::Obstacle);
        assert_eq!(kind_for_roll(0.5, &tuning), EntityKind::Obstacle);
        assert_eq!(kind_for_roll(0.64, &tuning), EntityKind::Obstacle);
        assert_eq!(kind_for_roll(0.65, &tuning), EntityKind::Coin);
        assert_eq!(kind_for_roll(0.75, &tuning), EntityKind::Coin);
        assert_eq!(kind_for_roll(0.89, &tuning), EntityKind::Coin);
        assert_eq!(kind_for_roll(0.91, &tuning), EntityKind::Heart);
        assert_eq!(kind_for_roll(0.999, &tuning), EntityKind::Heart);
    }

    #[test]
    fn test_decluster_breaks_reward_runs() {
        let mut history = SpawnHistory::new();
        history.record(EntityKind::Coin);
        history.record(EntityKind::Coin);
        assert_eq!(decluster(EntityKind::Coin, &history), EntityKind::Obstacle);
        // a different kind passes through
        assert_eq!(decluster(EntityKind::Heart, &history), EntityKind::Heart);
    }

    #[test]
    fn test_decluster_needs_two_matching_entries() {
        let mut history = SpawnHistory::new();
        assert_eq!(decluster(EntityKind::Coin, &history), EntityKind::Coin);
        history.record(EntityKind::Coin);
        // only one entry so far
        assert_eq!(decluster(EntityKind::Coin, &history), EntityKind::Coin);
        history.record(EntityKind::Heart);
        // last two differ
        assert_eq!(decluster(EntityKind::Heart, &history), EntityKind::Heart);
    }

    #[test]
    fn test_history_caps_at_window_size() {
        let mut history = SpawnHistory::new();
        for _ in 0..10 {
            history.record(EntityKind::Obstacle);
        }
        history.record(EntityKind::Coin);
        assert_eq!(history.len(), SPAWN_HISTORY_CAP);
        // newest entry survives, oldest fell off
        assert_eq!(history.kinds().last(), Some(&EntityKind::Coin));
    }

    #[test]
    fn test_draw_waits_for_initial_countdown() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut history = SpawnHistory::new();
        // bits chosen so the roll is exactly 0.75
        let mut rng = ConstRng(0xC000_0000);

        for _ in 0..79 {
            assert_eq!(spawner.draw(&mut history, &tuning, &mut rng), None);
        }
        assert_eq!(
            spawner.draw(&mut history, &tuning, &mut rng),
            Some(EntityKind::Coin)
        );
        assert_eq!(spawner.ticks_since_last_spawn, 0);
        // re-armed from the same 0.75 roll: 60 + floor(0.75 * 80)
        assert_eq!(spawner.next_spawn_threshold, 120);
        assert_eq!(history.kinds(), &[EntityKind::Coin]);
    }

    #[test]
    fn test_forced_roll_spawns_coin_on_first_overlapping_kind() {
        // every roll lands in the coin band
        let tuning = fast_tuning();
        let mut spawner = Spawner::new(&tuning);
        let mut history = SpawnHistory::new();
        let mut rng = ConstRng(0xC000_0000);

        assert_eq!(
            spawner.draw(&mut history, &tuning, &mut rng),
            Some(EntityKind::Coin)
        );
    }

    #[test]
    fn test_heart_run_is_cut_by_declustering() {
        // every roll is 0.953125, deep in the heart band
        let tuning = fast_tuning();
        let mut spawner = Spawner::new(&tuning);
        let mut history = SpawnHistory::new();
        let mut rng = ConstRng(0xF400_0000);

        let kinds: Vec<_> = (0..3)
            .filter_map(|_| spawner.draw(&mut history, &tuning, &mut rng))
            .collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Heart, EntityKind::Heart, EntityKind::Obstacle]
        );
        assert_eq!(
            history.kinds(),
            &[EntityKind::Heart, EntityKind::Heart, EntityKind::Obstacle]
        );
    }

    #[test]
    fn test_rearmed_countdown_stays_in_bounds() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut history = SpawnHistory::new();
        let mut rng = Pcg32::seed_from_u64(9);

        for _ in 0..200 {
            spawner.ticks_since_last_spawn = 0;
            spawner.next_spawn_threshold = 1;
            let kind = spawner.draw(&mut history, &tuning, &mut rng);
            assert!(kind.is_some());
            assert!(spawner.next_spawn_threshold >= tuning.spawn_delay_min);
            assert!(spawner.next_spawn_threshold < tuning.spawn_delay_max);
        }
    }

    proptest! {
        #[test]
        fn prop_no_triple_reward_runs(seed in any::<u64>()) {
            let tuning = fast_tuning();
            let mut spawner = Spawner::new(&tuning);
            let mut history = SpawnHistory::new();
            let mut rng = Pcg32::seed_from_u64(seed);

            let kinds: Vec<_> = (0..60)
                .filter_map(|_| spawner.draw(&mut history, &tuning, &mut rng))
                .collect();

            for window in kinds.windows(3) {
                let clustered = window[0] == window[1]
                    && window[1] == window[2]
                    && window[0] != EntityKind::Obstacle;
                prop_assert!(!clustered, "reward cluster {:?}", window);
            }
        }

        #[test]
        fn prop_draw_sequence_is_seed_deterministic(seed in any::<u64>()) {
            let tuning = fast_tuning();
            let mut a = (Spawner::new(&tuning), SpawnHistory::new(), Pcg32::seed_from_u64(seed));
            let mut b = (Spawner::new(&tuning), SpawnHistory::new(), Pcg32::seed_from_u64(seed));

            for _ in 0..40 {
                let ka = a.0.draw(&mut a.1, &tuning, &mut a.2);
                let kb = b.0.draw(&mut b.1, &tuning, &mut b.2);
                prop_assert_eq!(ka, kb);
            }
        }
    }
}
