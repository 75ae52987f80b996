use cage_common::types::{is_valid_ball, BallColor, BallNumber, MAX_BALL, MIN_BALL};
use near_sdk::json_types::U64;
use near_sdk::{env, log, near_bindgen, AccountId, PanicOnDefault};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use engine::{DrawEngine, Pacing, Transition};
use interfaces::draw::{BoardCell, CageOperator, DrawScheduler, DrawSnapshot, DrawView, PendingTaskView};

pub mod engine;
pub mod events;
pub mod interfaces;
mod utils;

#[cfg(test)]
mod test_utils;

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract {
    owner_id: AccountId,
    engine: DrawEngine,
    muted: bool,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId, pacing: Option<Pacing>) -> Self {
        assert!(!env::state_exists(), "Already initialized");
        let pacing = pacing.unwrap_or_default();
        assert!(pacing.is_valid(), "Pacing intervals must be positive");

        log!(
            "Cage ready: dwell {} ms, reveal {} ms, fanfare offset {} ms",
            pacing.dwell_ms,
            pacing.reveal_ms,
            pacing.fanfare_offset_ms
        );

        Self {
            owner_id,
            engine: DrawEngine::new(pacing),
            muted: false,
        }
    }

    pub fn get_pacing(&self) -> Pacing {
        return self.engine.pacing();
    }

    /// Ignored unless the cage is idle with nothing scheduled.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.assert_owner();
        assert!(pacing.is_valid(), "Pacing intervals must be positive");

        if self.engine.set_pacing(pacing) {
            log!("Pacing changed: dwell {} ms, reveal {} ms", pacing.dwell_ms, pacing.reveal_ms);
        }
    }

    pub fn is_muted(&self) -> bool { self.muted }

    pub fn toggle_mute(&mut self) -> bool {
        self.assert_owner();
        self.muted = !self.muted;
        return self.muted;
    }

    pub fn get_ball_color(&self, number: BallNumber) -> BallColor {
        if !is_valid_ball(number) {
            env::panic_str("Ball number out of range");
        }
        return BallColor::for_ball(number);
    }

    fn emit_all(&self, transitions: &[Transition]) {
        let pacing = self.engine.pacing();
        for transition in transitions {
            events::emit(transition, &pacing, self.muted);
        }
    }
}

#[near_bindgen]
impl CageOperator for Contract {
    fn can_spin(&self) -> bool {
        return self.engine.can_spin();
    }

    fn spin(&mut self) {
        self.assert_owner();

        let transitions = self.engine.spin(env::block_timestamp_ms());
        self.emit_all(&transitions);
    }

    fn dismiss_reveal(&mut self) {
        self.assert_owner();

        if let Some(transition) = self.engine.dismiss_reveal() {
            self.emit_all(&[transition]);
        }
    }

    fn reset(&mut self) {
        self.assert_owner();

        let transition = self.engine.reset();
        self.emit_all(&[transition]);
    }
}

#[near_bindgen]
impl DrawScheduler for Contract {
    fn can_complete_draw(&self) -> bool {
        return self.engine.can_complete_draw(env::block_timestamp_ms());
    }

    fn tick(&mut self) {
        let mut rng = utils::draw_rng(self.engine.history().len());
        let transitions = self.engine.advance(env::block_timestamp_ms(), &mut rng);
        self.emit_all(&transitions);
    }
}

#[near_bindgen]
impl DrawView for Contract {
    fn get_state(&self) -> DrawSnapshot {
        return self.engine.snapshot_at(env::block_timestamp_ms());
    }

    fn get_pending(&self) -> Vec<PendingTaskView> {
        self.engine
            .pending()
            .into_iter()
            .map(|task| PendingTaskView {
                id: U64(task.id),
                action: task.action,
                due_at: U64(task.due_at),
            })
            .collect()
    }

    fn get_board(&self) -> Vec<BoardCell> {
        let pool = self.engine.pool();
        (MIN_BALL..=MAX_BALL)
            .map(|number| BoardCell {
                number,
                drawn: !pool.contains(number),
                color: BallColor::for_ball(number),
            })
            .collect()
    }
}
