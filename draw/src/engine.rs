//! The cage state machine: idle -> spinning -> revealing -> idle.
//!
//! Deferred actions are stored as scheduled tasks with a deadline and fired
//! by [`DrawEngine::advance`]. Nothing in here reads the chain environment;
//! the caller passes the clock and the entropy in.

use cage_common::number_pool::NumberPool;
use cage_common::random::{select_one, ByteSource};
use cage_common::types::{BallNumber, TimestampMs, BALL_COUNT};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{Serialize, Deserialize};

use crate::interfaces::draw::DrawSnapshot;

pub const DEFAULT_DWELL_MS: u64 = 2_200;
pub const DEFAULT_REVEAL_MS: u64 = 3_000;
pub const DEFAULT_FANFARE_OFFSET_MS: u64 = 200;

pub type TaskId = u64;

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
pub struct Pacing {
    /// Spin animation length before the ball is picked.
    pub dwell_ms: u64,
    /// How long a drawn ball stays zoomed in.
    pub reveal_ms: u64,
    /// Pause between the drop tone and the fanfare.
    pub fanfare_offset_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
            reveal_ms: DEFAULT_REVEAL_MS,
            fanfare_offset_ms: DEFAULT_FANFARE_OFFSET_MS,
        }
    }
}

impl Pacing {
    pub fn is_valid(&self) -> bool {
        self.dwell_ms > 0 && self.reveal_ms > 0 && self.fanfare_offset_ms > 0
    }
}

#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
    Revealing,
}

#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(crate = "near_sdk::serde")]
#[serde(rename_all = "snake_case")]
pub enum Deferred {
    CompleteDraw,
    DismissReveal,
}

/// Handle of a deferred action. Only the handle currently stored in the
/// engine can fire; anything older is stale.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub action: Deferred,
    pub due_at: TimestampMs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissCause {
    Timer,
    Command,
}

/// What changed, for whoever drives sounds and effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    SpinStarted { due_at: TimestampMs },
    BallDrawn { ball: BallNumber, remaining: usize },
    RevealDismissed { ball: Option<BallNumber>, cause: DismissCause },
    GameCompleted,
    GameReset { was_spinning: bool },
}

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug)]
pub struct DrawEngine {
    pacing: Pacing,
    pool: NumberPool,
    history: Vec<BallNumber>,
    phase: Phase,
    current_ball: Option<BallNumber>,
    pending_draw: Option<ScheduledTask>,
    pending_dismiss: Option<ScheduledTask>,
    next_task_id: TaskId,
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}

impl DrawEngine {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            pool: NumberPool::full(),
            history: Vec::with_capacity(BALL_COUNT),
            phase: Phase::Idle,
            current_ball: None,
            pending_draw: None,
            pending_dismiss: None,
            next_task_id: 0,
        }
    }

    pub fn pacing(&self) -> Pacing { self.pacing }

    /// Only takes effect while idle with nothing scheduled.
    pub fn set_pacing(&mut self, pacing: Pacing) -> bool {
        if self.phase != Phase::Idle || self.next_due().is_some() {
            return false;
        }
        self.pacing = pacing;
        return true;
    }

    pub fn phase(&self) -> Phase { self.phase }

    pub fn pool(&self) -> &NumberPool { &self.pool }

    pub fn history(&self) -> &[BallNumber] { &self.history }

    pub fn current_ball(&self) -> Option<BallNumber> { self.current_ball }

    pub fn remaining(&self) -> usize { self.pool.len() }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Spinning
    }

    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn can_spin(&self) -> bool {
        return self.phase != Phase::Spinning && !self.pool.is_empty();
    }

    pub fn can_complete_draw(&self, now: TimestampMs) -> bool {
        return self.pending_draw.map_or(false, |task| task.due_at <= now);
    }

    /// Pending tasks, earliest first.
    pub fn pending(&self) -> Vec<ScheduledTask> {
        let mut tasks: Vec<ScheduledTask> = self
            .pending_draw
            .into_iter()
            .chain(self.pending_dismiss)
            .collect();
        tasks.sort_by_key(|task| (task.due_at, task.id));
        return tasks;
    }

    pub fn next_due(&self) -> Option<ScheduledTask> {
        self.pending().into_iter().next()
    }

    /// Pool and history partition 1..=90 with no repeats.
    pub fn is_consistent(&self) -> bool {
        let mut seen = NumberPool::empty();
        for &ball in &self.history {
            if self.pool.contains(ball) || !seen.insert(ball) {
                return false;
            }
        }
        return self.pool.len() + self.history.len() == BALL_COUNT;
    }

    /// Starts a spin. A reveal still open is closed first and reported before
    /// `SpinStarted`. Returns nothing when the spin is not allowed.
    pub fn spin(&mut self, now: TimestampMs) -> Vec<Transition> {
        if !self.can_spin() {
            return Vec::new();
        }

        let mut transitions = Vec::with_capacity(2);
        if self.phase == Phase::Revealing {
            // an expired reveal nobody ticked yet was closed by its timer
            let cause = match self.pending_dismiss {
                Some(task) if task.due_at <= now => DismissCause::Timer,
                _ => DismissCause::Command,
            };
            transitions.push(Transition::RevealDismissed { ball: self.current_ball, cause });
        }

        self.pending_dismiss = None;
        self.current_ball = None;
        self.phase = Phase::Spinning;

        let task = self.schedule(Deferred::CompleteDraw, now.saturating_add(self.pacing.dwell_ms));
        self.pending_draw = Some(task);

        transitions.push(Transition::SpinStarted { due_at: task.due_at });
        return transitions;
    }

    pub fn dismiss_reveal(&mut self) -> Option<Transition> {
        if self.phase != Phase::Revealing {
            return None;
        }

        self.pending_dismiss = None;
        self.phase = Phase::Idle;

        Some(Transition::RevealDismissed {
            ball: self.current_ball,
            cause: DismissCause::Command,
        })
    }

    pub fn reset(&mut self) -> Transition {
        let was_spinning = self.phase == Phase::Spinning;

        self.pending_draw = None;
        self.pending_dismiss = None;
        self.pool.refill();
        self.history.clear();
        self.current_ball = None;
        self.phase = Phase::Idle;

        return Transition::GameReset { was_spinning };
    }

    /// Fires every task due at `now`, earliest first.
    pub fn advance<S>(&mut self, now: TimestampMs, source: &mut S) -> Vec<Transition>
    where
        S: ByteSource + ?Sized,
    {
        let mut transitions = Vec::new();
        while let Some(task) = self.next_due().filter(|task| task.due_at <= now) {
            transitions.extend(self.fire(task, now, &mut *source));
        }
        return transitions;
    }

    /// Runs one task if its deadline has been reached at `now`. Stale handles
    /// and tasks that are not yet due do nothing.
    pub fn fire<S>(&mut self, task: ScheduledTask, now: TimestampMs, source: &mut S) -> Vec<Transition>
    where
        S: ByteSource + ?Sized,
    {
        if task.due_at > now {
            return Vec::new();
        }

        match task.action {
            Deferred::CompleteDraw if self.pending_draw == Some(task) => {
                self.pending_draw = None;
                self.complete_draw(task, source)
            }
            Deferred::DismissReveal if self.pending_dismiss == Some(task) => {
                self.pending_dismiss = None;
                self.phase = Phase::Idle;
                vec![Transition::RevealDismissed {
                    ball: self.current_ball,
                    cause: DismissCause::Timer,
                }]
            }
            _ => Vec::new(),
        }
    }

    pub fn snapshot_at(&self, now: TimestampMs) -> DrawSnapshot {
        let dismiss_due = self.pending_dismiss.map_or(false, |task| task.due_at <= now);

        DrawSnapshot {
            drawn_numbers: self.history.clone(),
            current_ball: self.current_ball,
            is_spinning: self.phase == Phase::Spinning,
            show_reveal: self.phase == Phase::Revealing && !dismiss_due,
            remaining_count: self.pool.len() as u8,
            is_complete: self.is_complete(),
        }
    }

    fn complete_draw<S>(&mut self, task: ScheduledTask, source: &mut S) -> Vec<Transition>
    where
        S: ByteSource + ?Sized,
    {
        assert!(!self.pool.is_empty(), "Draw completion scheduled on an empty pool");

        let candidates = self.pool.to_vec();
        let ball = match select_one(&candidates, source) {
            Ok(ball) => ball,
            Err(err) => panic!("Draw invariant violated: {}", err),
        };

        self.pool.remove(ball);
        self.history.push(ball);
        self.current_ball = Some(ball);
        self.phase = Phase::Revealing;

        // measured from the deadline so a late tick does not stretch the reveal
        let dismiss = self.schedule(Deferred::DismissReveal, task.due_at.saturating_add(self.pacing.reveal_ms));
        self.pending_dismiss = Some(dismiss);

        let mut transitions = vec![Transition::BallDrawn {
            ball,
            remaining: self.pool.len(),
        }];
        if self.pool.is_empty() {
            transitions.push(Transition::GameCompleted);
        }
        return transitions;
    }

    fn schedule(&mut self, action: Deferred, due_at: TimestampMs) -> ScheduledTask {
        let id = self.next_task_id;
        self.next_task_id += 1;

        ScheduledTask { id, action, due_at }
    }
}
