use near_sdk::AccountId;

pub fn owner() -> AccountId {
    "owner".parse().unwrap()
}

pub fn alice() -> AccountId {
    "alice".parse().unwrap()
}

pub fn cage() -> AccountId {
    "cage".parse().unwrap()
}

#[cfg(test)]
pub mod tests {
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, VMContext};

    use crate::engine::Pacing;
    use crate::*;

    pub use super::*;

    pub const ONE_MS_TS: u64 = 1_000_000;
    pub const ONE_BLOCK_MS: u64 = 1_000;

    pub struct Emulator {
        pub contract: Contract,
        pub block_index: u64,
        pub block_timestamp: u64,
        pub predecessor: AccountId,
        pub context: VMContext,
    }

    impl Emulator {
        pub fn new(pacing: Option<Pacing>) -> Self {
            let context = VMContextBuilder::new()
                .current_account_id(cage())
                .predecessor_account_id(owner())
                .signer_account_id(owner())
                .build();
            testing_env!(context.clone());
            let contract = Contract::new(owner(), pacing);
            Emulator {
                contract,
                block_index: 0,
                block_timestamp: 0,
                predecessor: owner(),
                context,
            }
        }

        pub fn update_context(&mut self, random_seed: [u8; 32]) {
            self.context = VMContextBuilder::new()
                .current_account_id(cage())
                .predecessor_account_id(self.predecessor.clone())
                .signer_account_id(self.predecessor.clone())
                .block_index(self.block_index)
                .block_timestamp(self.block_timestamp)
                .random_seed(random_seed)
                .build();
            testing_env!(self.context.clone());
        }

        pub fn set_predecessor(&mut self, account_id: AccountId) {
            self.predecessor = account_id;
            self.update_context([0; 32]);
        }

        /// Moves block time forward, one block per started second.
        pub fn skip_ms(&mut self, ms: u64, random_seed: [u8; 32]) {
            self.block_index += (ms + ONE_BLOCK_MS - 1) / ONE_BLOCK_MS;
            self.block_timestamp += ms * ONE_MS_TS;
            self.update_context(random_seed);
        }
    }
}
