pub mod draw {
    use cage_common::types::{BallColor, BallNumber, TimestampMs};
    use near_sdk::json_types::U64;
    use near_sdk::serde::{Serialize, Deserialize};

    use crate::engine::Deferred;

    /// Everything a renderer needs to draw one frame.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct DrawSnapshot {
        pub drawn_numbers: Vec<BallNumber>,
        pub current_ball: Option<BallNumber>,
        pub is_spinning: bool,
        pub show_reveal: bool,
        pub remaining_count: u8,
        pub is_complete: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct PendingTaskView {
        pub id: U64,
        pub action: Deferred,
        pub due_at: U64,
    }

    impl PendingTaskView {
        pub fn due_at_ms(&self) -> TimestampMs {
            self.due_at.0
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct BoardCell {
        pub number: BallNumber,
        pub drawn: bool,
        pub color: BallColor,
    }

    pub trait CageOperator {
        fn can_spin(&self) -> bool;
        fn spin(&mut self);
        fn dismiss_reveal(&mut self);
        fn reset(&mut self);
    }

    pub trait DrawScheduler {
        /// True once the pending draw's dwell deadline has passed.
        fn can_complete_draw(&self) -> bool;
        /// Applies every deferred action that is due.
        fn tick(&mut self);
    }

    pub trait DrawView {
        fn get_state(&self) -> DrawSnapshot;
        fn get_pending(&self) -> Vec<PendingTaskView>;
        fn get_board(&self) -> Vec<BoardCell>;
    }
}
