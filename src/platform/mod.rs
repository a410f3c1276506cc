//! Platform boundary
//!
//! The simulation never polls keys or draws pixels. A frontend supplies
//! controls through `InputSource` and receives frames through `RenderSink`;
//! `run_session` drives the two around the core one tick at a time.
//!
//! Headless implementations live here too: scripted input for replays and
//! tests, a greedy autopilot for demos, a logging sink, and a pacing
//! wrapper that holds a native loop at `ticks_per_second`.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::sim::{
    Direction, RoundController, RoundStats, SimError, TickInput, TickReport, tick,
};

/// One poll of the input boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Steer(Direction),
    /// No key this tick
    Idle,
    /// Player asked to leave
    Quit,
}

pub trait InputSource {
    fn poll(&mut self, round: &RoundController) -> Control;
}

pub trait RenderSink {
    fn present(&mut self, report: &TickReport);
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    Quit,
    TickLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub stopped: StopReason,
    pub stats: RoundStats,
}

/// Poll, tick, present until the input quits or `max_ticks` is reached
pub fn run_session(
    round: &mut RoundController,
    input: &mut dyn InputSource,
    sink: &mut dyn RenderSink,
    max_ticks: Option<u64>,
) -> Result<SessionSummary, SimError> {
    let mut ticks = 0u64;
    let stopped = loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break StopReason::TickLimit;
        }
        let tick_input = match input.poll(round) {
            Control::Quit => break StopReason::Quit,
            Control::Steer(direction) => TickInput::steer(direction),
            Control::Idle => TickInput::default(),
        };
        let report = tick(round, &tick_input)?;
        sink.present(&report);
        ticks += 1;
    };

    log::info!(
        "Session ended ({:?}) after {} ticks: {} eaten, {} resets, best length {}",
        stopped,
        ticks,
        round.stats.food_eaten,
        round.stats.resets,
        round.stats.best_length
    );
    Ok(SessionSummary {
        ticks,
        stopped,
        stats: round.stats.clone(),
    })
}

/// Replays a fixed list of controls, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    controls: VecDeque<Control>,
}

impl ScriptedInput {
    pub fn new(controls: impl IntoIterator<Item = Control>) -> Self {
        Self {
            controls: controls.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _round: &RoundController) -> Control {
        self.controls.pop_front().unwrap_or(Control::Quit)
    }
}

/// Greedy steering toward the food along the torus, refusing moves that
/// would end the round on the next tick when a safe one exists
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    fn is_safe(round: &RoundController, direction: Direction) -> bool {
        let next = round.grid.advance(round.snake.head_cell(), direction);
        !round.obstacles.contains(next) && !round.snake.would_collide(next)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, round: &RoundController) -> Control {
        let head = round.snake.head_cell();
        let current = round.snake.pending_direction().unwrap_or(round.snake.direction());
        let food = round.food.position();

        let best = Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(round.snake.direction()))
            .filter(|&d| Self::is_safe(round, d))
            .min_by_key(|&d| {
                let next = round.grid.advance(head, d);
                let delta = round.grid.torus_delta(next, food);
                // Prefer going straight on ties
                (delta.x.abs() + delta.y.abs(), d != current)
            });

        match best {
            Some(d) if d != current => Control::Steer(d),
            _ => Control::Idle,
        }
    }
}

/// Logs frames; resets at info, everything else at debug
#[derive(Debug, Default)]
pub struct LogSink {
    frames: u64,
}

impl LogSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, report: &TickReport) {
        self.frames += 1;
        let frame = &report.frame;
        if frame.was_reset {
            log::info!("Frame {}: {:?}, board cleared", self.frames, report.event);
        } else {
            log::debug!(
                "Frame {}: {:?} len={} food={:?} obstacles={}",
                self.frames,
                report.event,
                frame.snake.len(),
                frame.food,
                frame.obstacles.len()
            );
        }
    }
}

/// Forwards frames, then sleeps until the next tick is due
#[derive(Debug)]
pub struct Paced<S> {
    inner: S,
    period: Duration,
    next_due: Option<Instant>,
}

impl<S: RenderSink> Paced<S> {
    pub fn new(inner: S, ticks_per_second: u32) -> Self {
        Self {
            inner,
            period: Duration::from_secs(1) / ticks_per_second.max(1),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RenderSink> RenderSink for Paced<S> {
    fn present(&mut self, report: &TickReport) {
        self.inner.present(report);

        let now = Instant::now();
        let due = self.next_due.unwrap_or(now) + self.period;
        if due > now {
            thread::sleep(due - now);
            self.next_due = Some(due);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks
            self.next_due = Some(now);
        }
    }
}

/// Keeps every report, for replays and tests
impl RenderSink for Vec<TickReport> {
    fn present(&mut self, report: &TickReport) {
        self.push(report.clone());
    }
}
