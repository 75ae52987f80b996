use cage_common::types::{BallColor, BallNumber, BALL_COUNT};
use near_sdk::json_types::U64;
use near_sdk::log;
use near_sdk::serde::Serialize;
use near_sdk::serde_json::json;

use crate::engine::{DismissCause, Pacing, Transition};

/// Effect the presentation layer should play for a transition.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    SpinTone,
    StopSpinTone,
    DropTone,
    Fanfare,
    Confetti,
}

impl Cue {
    pub fn is_audio(&self) -> bool {
        !matches!(self, Cue::Confetti)
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct TimedCue {
    pub cue: Cue,
    pub delay_ms: u64,
}

impl TimedCue {
    fn now(cue: Cue) -> Self { Self { cue, delay_ms: 0 } }
}

pub fn cues_for(transition: &Transition, pacing: &Pacing, muted: bool) -> Vec<TimedCue> {
    let cues = match transition {
        Transition::SpinStarted { .. } => vec![TimedCue::now(Cue::SpinTone)],
        Transition::BallDrawn { .. } => vec![
            TimedCue::now(Cue::StopSpinTone),
            TimedCue::now(Cue::DropTone),
            TimedCue { cue: Cue::Fanfare, delay_ms: pacing.fanfare_offset_ms },
            TimedCue::now(Cue::Confetti),
        ],
        Transition::GameReset { was_spinning: true } => vec![TimedCue::now(Cue::StopSpinTone)],
        _ => Vec::new(),
    };

    return cues.into_iter().filter(|timed| !(muted && timed.cue.is_audio())).collect();
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct SpinStarted {
    due_at: U64,
    cues: Vec<TimedCue>,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct BallDrawn {
    ball: BallNumber,
    color: BallColor,
    remaining: usize,
    cues: Vec<TimedCue>,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct RevealDismissed {
    ball: Option<BallNumber>,
    by_timer: bool,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct GameReset {
    cues: Vec<TimedCue>,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct GameCompleted {
    drawn: usize,
}

fn log_event<T: Serialize>(event: &str, data: T) {
    let event = json!({
        "standard": "cage-draw",
        "version": "1.0.0",
        "event": event,
        "data": [data]
    });

    log!("EVENT_JSON:{}", event.to_string());
}

pub fn emit(transition: &Transition, pacing: &Pacing, muted: bool) {
    let cues = cues_for(transition, pacing, muted);

    match *transition {
        Transition::SpinStarted { due_at } => log_event(
            "spin_started",
            SpinStarted { due_at: U64(due_at), cues },
        ),
        Transition::BallDrawn { ball, remaining } => log_event(
            "ball_drawn",
            BallDrawn {
                ball,
                color: BallColor::for_ball(ball),
                remaining,
                cues,
            },
        ),
        Transition::RevealDismissed { ball, cause } => log_event(
            "reveal_dismissed",
            RevealDismissed {
                ball,
                by_timer: cause == DismissCause::Timer,
            },
        ),
        Transition::GameCompleted => log_event(
            "game_completed",
            GameCompleted { drawn: BALL_COUNT },
        ),
        Transition::GameReset { .. } => log_event("game_reset", GameReset { cues }),
    }
}
