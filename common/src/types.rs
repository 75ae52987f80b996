use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Serialize, Deserialize};

pub type BallNumber = u8;
pub type TimestampMs = u64;

pub const MIN_BALL: BallNumber = 1;
pub const MAX_BALL: BallNumber = 90;
pub const BALL_COUNT: usize = MAX_BALL as usize;

pub fn is_valid_ball(number: BallNumber) -> bool {
    (MIN_BALL..=MAX_BALL).contains(&number)
}

/// Colour band painted on a ball, by number range.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BallColor {
    Red,
    Gold,
    Green,
    Orange,
    White,
}

impl BallColor {
    pub fn for_ball(number: BallNumber) -> Self {
        match number {
            0..=19 => BallColor::Red,
            20..=39 => BallColor::Gold,
            40..=59 => BallColor::Green,
            60..=79 => BallColor::Orange,
            _ => BallColor::White,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            BallColor::Red => "#DC143C",
            BallColor::Gold => "#FFD700",
            BallColor::Green => "#10B981",
            BallColor::Orange => "#F97316",
            BallColor::White => "#F1F5F9",
        }
    }
}
