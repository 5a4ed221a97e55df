//! Injectable random number generation.
//!
//! Every random decision in an encounter goes through the [`PsiRng`] trait.
//! Nothing reads global or thread-local randomness, so an encounter replays
//! identically from the same seed and parallel encounters never share a
//! generator.
//!
//! ## Implementations
//!
//! - [`GameRng`]: seedable ChaCha8 stream, the default for real encounters
//! - [`ScriptedRng`]: replays a fixed list of rolls, for tests and replays
//!
//! ```
//! use psionic_core::core::{GameRng, PsiRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_percent(), b.roll_percent());
//!
//! // A checkpoint resumes the stream where it was taken.
//! let checkpoint = a.state();
//! let mut resumed = GameRng::from_state(&checkpoint);
//! assert_eq!(a.roll_between(-20, 20), resumed.roll_between(-20, 20));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness for ability and control resolution.
///
/// A roll "succeeds" against a percentage chance when
/// `roll_percent() < chance`, so a chance of 0 never succeeds and a chance
/// of 100 always does.
pub trait PsiRng {
    /// Uniform integer in `0..100`.
    fn roll_percent(&mut self) -> u32;

    /// Uniform integer in `low..=high`. `low` must not exceed `high`.
    fn roll_between(&mut self, low: i32, high: i32) -> i32;

    /// Roll against a percentage chance (values above 100 act as 100).
    fn check(&mut self, chance: u32) -> bool {
        self.roll_percent() < chance.min(100)
    }
}

/// Seedable ChaCha8 stream; the default generator of an encounter.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Checkpoint of the stream position, for pausing a replay.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            position: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream at a checkpoint taken by [`GameRng::state`].
    #[must_use]
    pub fn from_state(checkpoint: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(checkpoint.seed);
        inner.set_word_pos(checkpoint.position);
        Self {
            inner,
            seed: checkpoint.seed,
        }
    }
}

impl PsiRng for GameRng {
    fn roll_percent(&mut self) -> u32 {
        self.inner.gen_range(0..100)
    }

    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        self.inner.gen_range(low..=high)
    }
}

/// Serializable [`GameRng`] checkpoint: seed plus ChaCha8 word position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub position: u128,
}

/// RNG that replays a fixed script of rolls, cycling when exhausted.
///
/// `roll_percent` returns the next scripted value (capped at 99).
/// `roll_between` returns the next scripted value clamped into the range,
/// so `ScriptedRng::always(0)` yields zero variance for symmetric ranges.
///
/// ```
/// use psionic_core::core::{PsiRng, ScriptedRng};
///
/// let mut pass = ScriptedRng::always_succeed();
/// assert!(pass.check(1));
///
/// let mut fail = ScriptedRng::always_fail();
/// assert!(!fail.check(99));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRng {
    rolls: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    /// Replay the given rolls in order, then start over.
    ///
    /// An empty script behaves like `always(0)`.
    #[must_use]
    pub fn sequence(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Return the same roll forever.
    #[must_use]
    pub fn always(roll: u32) -> Self {
        Self::sequence([roll])
    }

    /// Every check with a non-zero chance passes.
    #[must_use]
    pub fn always_succeed() -> Self {
        Self::always(0)
    }

    /// Every check with a chance below 100 fails.
    #[must_use]
    pub fn always_fail() -> Self {
        Self::always(99)
    }

    /// Number of rolls consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_roll(&mut self) -> u32 {
        if self.rolls.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}

impl PsiRng for ScriptedRng {
    fn roll_percent(&mut self) -> u32 {
        self.next_roll().min(99)
    }

    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        let roll = i32::try_from(self.next_roll()).unwrap_or(i32::MAX);
        roll.clamp(low, high)
    }
}
