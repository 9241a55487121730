/// The per-frame game loop core.
///
/// `GameState` owns every piece of mutable state.  The driver feeds it one
/// `Input` snapshot and the frame's elapsed milliseconds per tick; all
/// randomness comes through the injected RNG so callers control determinism
/// (tests use a seeded RNG).  Nothing here blocks or touches the terminal.
use rand::Rng;

use crate::audio::SoundEvent;
use crate::clock::GameClock;
use crate::collision;
use crate::config::{GameConfig, LASER_STYLES};
use crate::entities::{EntityId, GameStatus, Laser, Paddle, Rect, Target};
use crate::highscore::{HighScoreRecord, HighScoreStore, ScoreStats};
use crate::store::EntityStore;

pub const DEFAULT_LASER_STYLE: u8 = 1;

// ── Input / output per frame ─────────────────────────────────────────────────

/// Keyboard state for one frame.  Held keys are levels, the rest are edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub reset: bool,
    /// Laser style 1..=5; anything else is ignored.
    pub style: Option<u8>,
    pub toggle_music: bool,
    pub toggle_high_scores: bool,
    pub clear_scores: bool,
}

/// How a finished game ranked.  `previous_best` is read before the score is
/// inserted into the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub previous_best: u32,
    /// Beat the best score that stood when the game started ending.
    pub new_record: bool,
    /// Made it into the high-score table.
    pub ranked: bool,
}

impl GameOverSummary {
    /// Points above the previous best; negative when no record was set.
    pub fn margin(&self) -> i64 {
        i64::from(self.score) - i64::from(self.previous_best)
    }
}

/// Everything that happened during one `update`, for audio and logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameEvents {
    pub sounds: Vec<SoundEvent>,
    /// New music setting when it was toggled this frame.
    pub music: Option<bool>,
    pub hits: u32,
    pub game_over: Option<GameOverSummary>,
    pub reset: bool,
}

/// Borrowed snapshot handed to the renderer.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    pub width: i32,
    pub height: i32,
    pub paddle: Rect,
    pub lasers: &'a [Laser],
    pub targets: &'a [Target],
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub last_game: Option<&'a GameOverSummary>,
    pub laser_style: u8,
    pub music_enabled: bool,
    pub show_high_scores: bool,
    pub high_scores: &'a [HighScoreRecord],
    pub stats: ScoreStats,
}

// ── Master game state ────────────────────────────────────────────────────────

pub struct GameState {
    config: GameConfig,
    paddle: Paddle,
    store: EntityStore,
    clock: GameClock,
    high_scores: HighScoreStore,
    score: u32,
    status: GameStatus,
    player_name: String,
    laser_style: u8,
    music_enabled: bool,
    show_high_scores: bool,
    last_game: Option<GameOverSummary>,
}

impl GameState {
    /// A fresh game: playing, no entities, score 0, paddle centred.
    pub fn new(config: GameConfig, high_scores: HighScoreStore, player_name: impl Into<String>) -> Self {
        let paddle = initial_paddle(&config);
        GameState {
            config,
            paddle,
            store: EntityStore::new(),
            clock: GameClock::new(),
            high_scores,
            score: 0,
            status: GameStatus::Playing,
            player_name: player_name.into(),
            laser_style: DEFAULT_LASER_STYLE,
            music_enabled: true,
            show_high_scores: false,
            last_game: None,
        }
    }

    pub fn with_music(mut self, enabled: bool) -> Self {
        self.music_enabled = enabled;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Direct access for scripted scenarios.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn high_scores(&self) -> &HighScoreStore {
        &self.high_scores
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn laser_style(&self) -> u8 {
        self.laser_style
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn show_high_scores(&self) -> bool {
        self.show_high_scores
    }

    pub fn last_game(&self) -> Option<&GameOverSummary> {
        self.last_game.as_ref()
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            width: self.config.screen_width,
            height: self.config.screen_height,
            paddle: self.paddle.rect,
            lasers: self.store.lasers(),
            targets: self.store.targets(),
            score: self.score,
            high_score: self.high_scores.top_score().max(self.score),
            status: self.status,
            last_game: self.last_game.as_ref(),
            laser_style: self.laser_style,
            music_enabled: self.music_enabled,
            show_high_scores: self.show_high_scores,
            high_scores: self.high_scores.records(),
            stats: self.high_scores.statistics(),
        }
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advance the game by one frame of `dt_ms` milliseconds.
    ///
    /// While playing, the order is: paddle, shot, lasers, spawn, then for
    /// each target in turn its move, the bottom-edge check and its collision
    /// test.  While the game is over only the reset input does anything.
    pub fn update(&mut self, input: &Input, dt_ms: u64, rng: &mut impl Rng) -> FrameEvents {
        let mut events = FrameEvents::default();
        self.clock.tick(dt_ms);
        self.apply_options(input, &mut events);

        match self.status {
            GameStatus::Playing => self.step(input, dt_ms, rng, &mut events),
            GameStatus::GameOver => {
                if input.reset {
                    self.reset();
                    events.reset = true;
                }
            }
        }
        events
    }

    /// Inputs that work in any state.
    fn apply_options(&mut self, input: &Input, events: &mut FrameEvents) {
        if let Some(style) = input.style.filter(|s| LASER_STYLES.contains(s)) {
            self.laser_style = style;
        }
        if input.toggle_music {
            self.music_enabled = !self.music_enabled;
            events.music = Some(self.music_enabled);
        }
        if input.toggle_high_scores {
            self.show_high_scores = !self.show_high_scores;
        }
        if input.clear_scores && self.show_high_scores {
            self.high_scores.clear();
        }
    }

    fn step(&mut self, input: &Input, dt_ms: u64, rng: &mut impl Rng, events: &mut FrameEvents) {
        self.move_paddle(input);

        if input.shoot && self.clock.try_shoot(self.config.shoot_delay_ms) {
            self.store.spawn_laser(&self.paddle, &self.config);
            events.sounds.push(SoundEvent::Shoot);
        }

        self.store.advance_lasers(&self.config);
        self.store.prune_offscreen();

        if self.clock.spawn_due(dt_ms, self.config.spawn_interval_ms) {
            let id = self.store.spawn_random_target(&self.config, rng);
            tracing::debug!(id, "target spawned");
        }

        let mut breached = false;
        let ids: Vec<EntityId> = self.store.targets().iter().map(|t| t.id).collect();
        for id in ids {
            let Some(y) = self.store.advance_target(id, &self.config) else {
                continue;
            };
            if y > self.config.screen_height {
                breached = true;
            }
            if collision::resolve_target(&mut self.store, id, &mut self.score).is_some() {
                events.hits += 1;
                events.sounds.push(SoundEvent::Hit);
            }
        }

        if breached {
            self.end_game(events);
        }
    }

    fn move_paddle(&mut self, input: &Input) {
        let mut x = self.paddle.rect.x;
        if input.left {
            x -= self.config.paddle_speed;
        }
        if input.right {
            x += self.config.paddle_speed;
        }
        self.paddle.rect.x = x.clamp(0, self.config.paddle_max_x());
    }

    fn end_game(&mut self, events: &mut FrameEvents) {
        self.status = GameStatus::GameOver;

        let previous_best = self.high_scores.top_score();
        let new_record = self.score > 0 && self.high_scores.is_new_record(self.score);
        let ranked = self
            .high_scores
            .add(self.score, &self.player_name, self.laser_style);

        let summary = GameOverSummary {
            score: self.score,
            previous_best,
            new_record,
            ranked,
        };
        tracing::info!(
            score = summary.score,
            previous_best,
            new_record,
            ranked,
            "game over"
        );

        events.sounds.push(SoundEvent::GameOver);
        events.game_over = Some(summary.clone());
        self.last_game = Some(summary);
    }

    /// Start a new game.  Style, music and the high-score table carry over.
    pub fn reset(&mut self) {
        self.score = 0;
        self.store.clear();
        self.paddle = initial_paddle(&self.config);
        self.clock.reset();
        self.status = GameStatus::Playing;
        self.last_game = None;
        tracing::info!("new game");
    }
}

fn initial_paddle(config: &GameConfig) -> Paddle {
    Paddle {
        rect: Rect::new(
            config.paddle_start_x(),
            config.paddle_y(),
            config.paddle_width,
            config.paddle_height,
        ),
    }
}
