use cage_common::random::{seeded_rng, ChaCha20Rng};
use near_sdk::env;

use crate::Contract;

impl Contract {
    pub(crate) fn assert_owner(&self) {
        assert!(
            env::predecessor_account_id() == self.owner_id,
            "Only the owner can operate the cage"
        );
    }
}

/// Entropy for the `draw_index`-th ball of the game, `sha256(random_seed || draw_index)`
/// as a ChaCha20 key. Mixing in the index keeps two draws inside one block apart.
pub(crate) fn draw_rng(draw_index: usize) -> ChaCha20Rng {
    return seeded_rng(&env::random_seed(), draw_index as u64);
}
