//! Session state machine
//!
//! `GameManager` is the only writer of scores, timer and bonus state. Each
//! operation collects its notifications locally and publishes them as one
//! batch once its mutation is finished, so no listener sees a half-updated
//! session.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::events::{EventBus, GameEvent, GameState, PlayerId, ScoreKind};
use crate::session::{
    BackboardBonusWindow, BonusTable, GameMode, HighScoreStore, MemoryHighScoreStore,
    PlayerRecord, SessionState,
};
use crate::settings::GameSettings;
use crate::spawning::SpawnCoordinator;

#[derive(Resource)]
pub struct GameManager {
    settings: GameSettings,
    session: SessionState,
    bonus: BackboardBonusWindow,
    bonus_table: BonusTable,
    spawns: SpawnCoordinator,
    rng: StdRng,
    store: Box<dyn HighScoreStore + Send + Sync>,
    /// One-second countdown. `None` whenever no round is running.
    countdown: Option<Timer>,
}

impl GameManager {
    /// Seeded from `settings.session.seed`, or from entropy when unset
    pub fn new(settings: GameSettings, store: Box<dyn HighScoreStore + Send + Sync>) -> Self {
        let rng = match settings.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, rng, store)
    }

    pub fn with_seed(
        settings: GameSettings,
        seed: u64,
        store: Box<dyn HighScoreStore + Send + Sync>,
    ) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed), store)
    }

    /// Seeded manager backed by an in-memory high score
    pub fn in_memory(settings: GameSettings, seed: u64) -> Self {
        Self::with_seed(settings, seed, Box::new(MemoryHighScoreStore::default()))
    }

    fn with_rng(
        settings: GameSettings,
        rng: StdRng,
        store: Box<dyn HighScoreStore + Send + Sync>,
    ) -> Self {
        let high_score = store.load();
        Self {
            session: SessionState::new(
                settings.session.mode,
                settings.session.duration,
                high_score,
            ),
            bonus: BackboardBonusWindow::default(),
            bonus_table: BonusTable(settings.bonus.table.clone()),
            spawns: SpawnCoordinator::new(settings.spawn_positions()),
            rng,
            store,
            countdown: None,
            settings,
        }
    }

    // === Accessors ===

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn game_state(&self) -> GameState {
        self.session.game_state
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    pub fn timer(&self) -> u32 {
        self.session.timer
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn bonus(&self) -> &BackboardBonusWindow {
        &self.bonus
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.session.player(player)
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.session.score(player)
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    // === Transitions ===

    /// Reset the round and enter `Gameplay`. Replaces any running countdown.
    pub fn start_game(&mut self, bus: &mut EventBus) {
        let mut events = Vec::new();
        let mode = self.session.mode;
        let duration = self.settings.session.duration;
        let threshold = self.settings.streak.threshold;

        let previous = std::mem::take(&mut self.session.players);
        for &player in mode.active_players() {
            if previous.get(&player).is_some_and(|r| r.streak.is_powered()) {
                events.push(GameEvent::PowerUpExpired { player });
            }
            self.session.players.insert(player, PlayerRecord::default());
            events.push(GameEvent::ScoreChanged { player, score: 0 });
            events.push(GameEvent::StreakProgress {
                player,
                current: 0,
                max: threshold,
            });
        }

        for &player in mode.active_players() {
            let other = self.session.other_spawn(player);
            let index = self.spawns.choose(None, other, &mut self.rng);
            if let Some(record) = self.session.players.get_mut(&player) {
                record.spawn_index = index;
            }
        }

        if self.bonus.deactivate() {
            events.push(GameEvent::BonusExpired);
        }
        self.session.duration = duration;
        self.session.timer = duration;
        events.push(GameEvent::TimerChanged { seconds: duration });
        self.bonus.next_spawn_at = duration as f32 - self.draw_interval();

        self.countdown = Some(Timer::from_seconds(1.0, TimerMode::Repeating));
        self.set_game_state(GameState::Gameplay, &mut events);

        // First placement goes through the regular out-of-play path
        for &player in mode.active_players() {
            self.reset_ball(player, &mut events);
        }

        info!(
            "Game started: {:?}, {}s, next bonus at {:.1}s",
            mode, duration, self.bonus.next_spawn_at
        );
        bus.emit_all(events);
    }

    /// Reward -> Gameplay
    pub fn play_again(&mut self, bus: &mut EventBus) {
        if self.session.game_state != GameState::Reward {
            debug!("play_again ignored in {:?}", self.session.game_state);
            return;
        }
        self.start_game(bus);
    }

    pub fn return_to_menu(&mut self, bus: &mut EventBus) {
        if self.session.game_state == GameState::MainMenu {
            return;
        }
        self.countdown = None;
        let mut events = Vec::new();
        self.set_game_state(GameState::MainMenu, &mut events);
        bus.emit_all(events);
    }

    pub fn pause(&mut self, bus: &mut EventBus) {
        if self.session.game_state != GameState::Gameplay {
            return;
        }
        let mut events = Vec::new();
        self.set_game_state(GameState::Pause, &mut events);
        bus.emit_all(events);
    }

    pub fn resume(&mut self, bus: &mut EventBus) {
        if self.session.game_state != GameState::Pause {
            return;
        }
        let mut events = Vec::new();
        self.set_game_state(GameState::Gameplay, &mut events);
        bus.emit_all(events);
    }

    /// End the round early (or on timeout) and enter `Reward`
    pub fn end_game(&mut self, bus: &mut EventBus) {
        if !matches!(
            self.session.game_state,
            GameState::Gameplay | GameState::Pause
        ) {
            return;
        }
        let mut events = Vec::new();
        self.finish(&mut events);
        bus.emit_all(events);
    }

    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        self.countdown = None;
        self.set_game_state(GameState::Reward, events);

        let human = self.session.score(PlayerId::Human);
        let ai = match self.session.mode {
            GameMode::VersusAi => Some(self.session.score(PlayerId::Ai)),
            GameMode::SinglePlayer => None,
        };
        info!("Match over: human {} ai {:?}", human, ai);
        events.push(GameEvent::MatchEnd { human, ai });
    }

    fn set_game_state(&mut self, state: GameState, events: &mut Vec<GameEvent>) {
        debug!("{:?} -> {:?}", self.session.game_state, state);
        self.session.game_state = state;
        events.push(GameEvent::GameStateChanged { state });
    }

    // === Countdown ===

    /// Advance the round clock. Runs one `tick_second` per elapsed second,
    /// and nothing outside `Gameplay`.
    pub fn advance(&mut self, delta: Duration, bus: &mut EventBus) {
        if self.session.game_state != GameState::Gameplay {
            return;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        countdown.tick(delta);
        let seconds = countdown.times_finished_this_tick();

        for _ in 0..seconds {
            if self.countdown.is_none() {
                break;
            }
            self.tick_second(bus);
        }
    }

    /// One second of the round, with the bonus draw taken from the owned RNG
    pub fn tick_second(&mut self, bus: &mut EventBus) {
        self.run_tick(None, bus);
    }

    /// One second of the round with a forced bonus draw (0-100)
    pub fn tick_second_with_draw(&mut self, draw: f32, bus: &mut EventBus) {
        self.run_tick(Some(draw), bus);
    }

    fn run_tick(&mut self, forced_draw: Option<f32>, bus: &mut EventBus) {
        if self.session.game_state != GameState::Gameplay || self.session.timer == 0 {
            return;
        }
        let mut events = Vec::new();

        self.session.timer -= 1;
        let timer = self.session.timer;
        events.push(GameEvent::TimerChanged { seconds: timer });

        if self.bonus.tick() {
            events.push(GameEvent::BonusExpired);
        }
        for (player, record) in self.session.players.iter_mut() {
            if record.streak.tick() {
                events.push(GameEvent::PowerUpExpired { player: *player });
            }
        }

        if self.bonus.is_due(timer) {
            let draw = forced_draw.unwrap_or_else(|| self.bonus_draw());
            match self.bonus_table.select(draw) {
                Some(entry) => {
                    let duration = self.settings.bonus.duration;
                    self.bonus.activate(entry, duration);
                    events.push(GameEvent::BonusActivated {
                        points: entry.points,
                        duration,
                    });
                }
                None => debug!("Bonus draw {:.1} selected nothing", draw),
            }
            self.bonus.next_spawn_at = timer as f32 - self.draw_interval();
        }

        if timer == 0 {
            self.finish(&mut events);
        }
        bus.emit_all(events);
    }

    /// Uniform in [0, 100)
    fn bonus_draw(&mut self) -> f32 {
        self.rng.gen_range(0.0..100.0)
    }

    fn draw_interval(&mut self) -> f32 {
        let min = self.settings.bonus.min_interval;
        let max = self.settings.bonus.max_interval;
        if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    // === Scoring ===

    pub fn set_perfect_score(&mut self, player: PlayerId, bus: &mut EventBus) {
        let base = self.settings.scoring.perfect_points;
        self.score_basket(player, ScoreKind::Perfect, base, bus);
    }

    pub fn set_standard_score(&mut self, player: PlayerId, bus: &mut EventBus) {
        let base = self.settings.scoring.standard_points;
        self.score_basket(player, ScoreKind::Standard, base, bus);
    }

    /// Pays the lit bonus value. No-op while no bonus is active.
    pub fn set_backboard_score(&mut self, player: PlayerId, bus: &mut EventBus) {
        if !self.bonus.is_active() {
            debug!("Backboard score for {} with no bonus lit", player);
            return;
        }
        let base = self.bonus.points;
        self.score_basket(player, ScoreKind::Backboard, base, bus);
    }

    pub fn award(&mut self, player: PlayerId, kind: ScoreKind, bus: &mut EventBus) {
        match kind {
            ScoreKind::Perfect => self.set_perfect_score(player, bus),
            ScoreKind::Standard => self.set_standard_score(player, bus),
            ScoreKind::Backboard => self.set_backboard_score(player, bus),
        }
    }

    fn score_basket(&mut self, player: PlayerId, kind: ScoreKind, base: u32, bus: &mut EventBus) {
        if self.session.game_state != GameState::Gameplay {
            return;
        }
        let threshold = self.settings.streak.threshold;
        let power_up_duration = self.settings.streak.power_up_duration;
        let multiplier = self.settings.streak.multiplier;
        let Some(record) = self.session.players.get_mut(&player) else {
            return;
        };

        let points = if record.streak.is_powered() {
            base * multiplier
        } else {
            base
        };
        record.score += points;
        let score = record.score;
        let mut events = vec![
            GameEvent::Basket {
                player,
                kind,
                points,
            },
            GameEvent::ScoreChanged { player, score },
        ];

        if !record.scored_this_attempt {
            record.scored_this_attempt = true;
            if let Some(change) = record.streak.record_basket(threshold, power_up_duration) {
                events.push(GameEvent::StreakProgress {
                    player,
                    current: change.current,
                    max: threshold,
                });
                if change.activated {
                    info!("{} power-up for {}s", player, power_up_duration);
                    events.push(GameEvent::PowerUpActivated {
                        player,
                        duration: power_up_duration,
                    });
                }
            }
        }

        if score > self.session.high_score {
            self.session.high_score = score;
            events.push(GameEvent::HighScoreChanged { score });
            if let Err(e) = self.store.save(score) {
                warn!("High score not saved: {}", e);
            }
        }

        bus.emit_all(events);
    }

    // === Resets ===

    /// The player's ball is dead: re-roll its spawn if it scored, otherwise
    /// count a miss, then publish the reset that re-arms its shot.
    pub fn on_ball_out_of_play(&mut self, player: PlayerId, bus: &mut EventBus) {
        if self.session.game_state != GameState::Gameplay {
            return;
        }
        let mut events = Vec::new();
        self.reset_ball(player, &mut events);
        bus.emit_all(events);
    }

    fn reset_ball(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let other = self.session.other_spawn(player);
        let threshold = self.settings.streak.threshold;
        let Some(record) = self.session.players.get_mut(&player) else {
            return;
        };

        if record.scored_this_attempt {
            record.scored_this_attempt = false;
            record.spawn_index = self.spawns.choose(record.spawn_index, other, &mut self.rng);
        } else if record.streak.record_miss() {
            events.push(GameEvent::StreakProgress {
                player,
                current: 0,
                max: threshold,
            });
        }
        if record.spawn_index.is_none() {
            record.spawn_index = self.spawns.choose(None, other, &mut self.rng);
        }

        let placed = record
            .spawn_index
            .and_then(|index| self.spawns.position(index).map(|p| (index, p)));
        match placed {
            Some((spawn_index, position)) => events.push(GameEvent::PositionReset {
                player,
                spawn_index,
                position: position.into(),
            }),
            None => warn!("No spawn point available for {}", player),
        }
    }
}

/// Run condition for the ball world: flight, contacts and scoring only move
/// during `Gameplay`, so a paused ball resumes exactly where it stopped.
pub fn round_in_play(manager: Res<GameManager>) -> bool {
    manager.game_state() == GameState::Gameplay
}

/// Drive the round clock from frame time
pub fn advance_session_clock(
    time: Res<Time>,
    mut manager: ResMut<GameManager>,
    mut bus: ResMut<EventBus>,
) {
    manager.advance(time.delta(), &mut bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BonusEntry;

    fn settings(mode: GameMode) -> GameSettings {
        let mut settings = GameSettings::default();
        settings.session.mode = mode;
        settings.session.duration = 60;
        settings
    }

    fn events(bus: &mut EventBus) -> Vec<GameEvent> {
        bus.drain().into_iter().map(|e| e.event).collect()
    }

    fn started(mode: GameMode) -> (GameManager, EventBus) {
        let mut manager = GameManager::in_memory(settings(mode), 42);
        let mut bus = EventBus::new();
        manager.start_game(&mut bus);
        bus.drain();
        (manager, bus)
    }

    /// Score once then reset, the way a made shot plays out
    fn make_basket(manager: &mut GameManager, bus: &mut EventBus) {
        manager.set_perfect_score(PlayerId::Human, bus);
        manager.on_ball_out_of_play(PlayerId::Human, bus);
    }

    #[test]
    fn test_start_game_publishes_reset_snapshot() {
        let mut manager = GameManager::in_memory(settings(GameMode::SinglePlayer), 1);
        let mut bus = EventBus::new();
        manager.start_game(&mut bus);

        let published = events(&mut bus);
        assert_eq!(
            published[0],
            GameEvent::ScoreChanged {
                player: PlayerId::Human,
                score: 0
            }
        );
        assert!(published.contains(&GameEvent::TimerChanged { seconds: 60 }));
        assert!(published.contains(&GameEvent::GameStateChanged {
            state: GameState::Gameplay
        }));
        assert!(matches!(
            published.last(),
            Some(GameEvent::PositionReset {
                player: PlayerId::Human,
                ..
            })
        ));
        assert_eq!(manager.game_state(), GameState::Gameplay);
        assert!(manager.is_counting_down());
        assert!(manager.bonus().next_spawn_at <= 52.0 && manager.bonus().next_spawn_at >= 45.0);
    }

    #[test]
    fn test_versus_spawns_never_coincide() {
        for seed in 0..50 {
            let mut manager = GameManager::in_memory(settings(GameMode::VersusAi), seed);
            let mut bus = EventBus::new();
            manager.start_game(&mut bus);
            for _ in 0..10 {
                manager.set_perfect_score(PlayerId::Human, &mut bus);
                manager.on_ball_out_of_play(PlayerId::Human, &mut bus);
                manager.set_standard_score(PlayerId::Ai, &mut bus);
                manager.on_ball_out_of_play(PlayerId::Ai, &mut bus);

                let human = manager.player(PlayerId::Human).and_then(|r| r.spawn_index);
                let ai = manager.player(PlayerId::Ai).and_then(|r| r.spawn_index);
                assert!(human.is_some());
                assert_ne!(human, ai, "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_end_to_end_streak_and_power_up() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);

        manager.advance(Duration::from_secs(2), &mut bus);
        assert_eq!(manager.timer(), 58);
        bus.drain();

        manager.set_perfect_score(PlayerId::Human, &mut bus);
        let published = events(&mut bus);
        assert!(published.contains(&GameEvent::ScoreChanged {
            player: PlayerId::Human,
            score: 3
        }));
        assert_eq!(manager.score(PlayerId::Human), 3);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(1));
        manager.on_ball_out_of_play(PlayerId::Human, &mut bus);

        for _ in 0..3 {
            make_basket(&mut manager, &mut bus);
        }
        bus.drain();

        // Fifth basket fires the power-up
        manager.set_perfect_score(PlayerId::Human, &mut bus);
        let published = events(&mut bus);
        assert!(published.contains(&GameEvent::PowerUpActivated {
            player: PlayerId::Human,
            duration: 10
        }));
        let record = manager.player(PlayerId::Human).cloned().unwrap();
        assert_eq!(record.streak.streak, 0);
        assert!(record.streak.is_powered());
        assert_eq!(record.score, 15);
        manager.on_ball_out_of_play(PlayerId::Human, &mut bus);
        bus.drain();

        // Sixth is doubled and does not re-trigger
        manager.set_perfect_score(PlayerId::Human, &mut bus);
        let published = events(&mut bus);
        assert!(published.contains(&GameEvent::Basket {
            player: PlayerId::Human,
            kind: ScoreKind::Perfect,
            points: 6
        }));
        assert!(
            !published
                .iter()
                .any(|e| matches!(e, GameEvent::PowerUpActivated { .. }))
        );
        assert_eq!(manager.score(PlayerId::Human), 21);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(0));
    }

    #[test]
    fn test_second_basket_same_attempt_does_not_extend_streak() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        manager.set_perfect_score(PlayerId::Human, &mut bus);
        manager.set_standard_score(PlayerId::Human, &mut bus);
        assert_eq!(manager.score(PlayerId::Human), 5);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(1));
    }

    #[test]
    fn test_miss_resets_streak_unless_powered() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        make_basket(&mut manager, &mut bus);
        make_basket(&mut manager, &mut bus);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(2));

        manager.on_ball_out_of_play(PlayerId::Human, &mut bus);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(0));

        for _ in 0..5 {
            make_basket(&mut manager, &mut bus);
        }
        make_basket(&mut manager, &mut bus);
        assert!(manager.player(PlayerId::Human).unwrap().streak.is_powered());
        // Baskets during the window leave the counter alone
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(0));

        manager.session.players.get_mut(&PlayerId::Human).unwrap().streak.streak = 2;
        manager.on_ball_out_of_play(PlayerId::Human, &mut bus);
        assert_eq!(manager.player(PlayerId::Human).map(|r| r.streak.streak), Some(2));
    }

    #[test]
    fn test_power_up_expires_on_clock() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        for _ in 0..5 {
            make_basket(&mut manager, &mut bus);
        }
        bus.drain();
        manager.advance(Duration::from_secs(10), &mut bus);
        assert!(!manager.player(PlayerId::Human).unwrap().streak.is_powered());
        assert!(events(&mut bus).contains(&GameEvent::PowerUpExpired {
            player: PlayerId::Human
        }));
    }

    fn bonus_manager() -> (GameManager, EventBus) {
        let mut settings = settings(GameMode::SinglePlayer);
        settings.bonus.min_interval = 1.0;
        settings.bonus.max_interval = 1.0;
        settings.bonus.table = vec![
            BonusEntry {
                points: 5,
                probability: 30.0,
            },
            BonusEntry {
                points: 10,
                probability: 20.0,
            },
        ];
        let mut manager = GameManager::in_memory(settings, 9);
        let mut bus = EventBus::new();
        manager.start_game(&mut bus);
        bus.drain();
        (manager, bus)
    }

    #[test]
    fn test_forced_bonus_draws() {
        let (mut manager, mut bus) = bonus_manager();
        manager.tick_second_with_draw(25.0, &mut bus);
        assert_eq!(manager.bonus().points, 5);
        assert!(events(&mut bus).contains(&GameEvent::BonusActivated {
            points: 5,
            duration: 8
        }));
        assert_eq!(manager.bonus().next_spawn_at, 58.0);

        let (mut manager, mut bus) = bonus_manager();
        manager.tick_second_with_draw(60.0, &mut bus);
        assert!(!manager.bonus().is_active());
        assert_eq!(manager.bonus().next_spawn_at, 58.0);
    }

    #[test]
    fn test_bonus_draw_excludes_hundred() {
        let (mut manager, _) = bonus_manager();
        for _ in 0..10_000 {
            let draw = manager.bonus_draw();
            assert!((0.0..100.0).contains(&draw), "draw {}", draw);
        }
    }

    #[test]
    fn test_backboard_score_uses_bonus_value() {
        let (mut manager, mut bus) = bonus_manager();
        manager.set_backboard_score(PlayerId::Human, &mut bus);
        assert_eq!(manager.score(PlayerId::Human), 0, "no bonus lit");

        manager.tick_second_with_draw(45.0, &mut bus);
        manager.award(PlayerId::Human, ScoreKind::Backboard, &mut bus);
        assert_eq!(manager.score(PlayerId::Human), 10);

        // Expires after its duration
        for _ in 0..8 {
            manager.tick_second_with_draw(100.0, &mut bus);
        }
        assert!(!manager.bonus().is_active());
    }

    #[test]
    fn test_timeout_enters_reward() {
        let (mut manager, mut bus) = started(GameMode::VersusAi);
        manager.set_standard_score(PlayerId::Ai, &mut bus);
        bus.drain();

        manager.advance(Duration::from_secs(61), &mut bus);
        assert_eq!(manager.timer(), 0);
        assert_eq!(manager.game_state(), GameState::Reward);
        assert!(!manager.is_counting_down());

        let published = events(&mut bus);
        let state_at = published
            .iter()
            .position(|e| *e == GameEvent::GameStateChanged { state: GameState::Reward })
            .unwrap();
        assert_eq!(
            published[state_at + 1],
            GameEvent::MatchEnd {
                human: 0,
                ai: Some(2)
            }
        );

        // Scoring after the round is ignored
        manager.set_perfect_score(PlayerId::Human, &mut bus);
        assert_eq!(manager.score(PlayerId::Human), 0);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        manager.pause(&mut bus);
        manager.advance(Duration::from_secs(5), &mut bus);
        assert_eq!(manager.timer(), 60);

        manager.resume(&mut bus);
        manager.advance(Duration::from_secs(1), &mut bus);
        assert_eq!(manager.timer(), 59);
    }

    #[test]
    fn test_early_end_cancels_countdown() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        manager.advance(Duration::from_millis(1500), &mut bus);
        manager.end_game(&mut bus);
        assert!(!manager.is_counting_down());

        manager.play_again(&mut bus);
        assert_eq!(manager.timer(), 60);
        // Fresh timer: the old half second does not carry over
        manager.advance(Duration::from_millis(600), &mut bus);
        assert_eq!(manager.timer(), 60);
        manager.advance(Duration::from_millis(400), &mut bus);
        assert_eq!(manager.timer(), 59);
    }

    #[test]
    fn test_high_score_tracks_any_player() {
        let (mut manager, mut bus) = started(GameMode::VersusAi);
        manager.set_standard_score(PlayerId::Ai, &mut bus);
        assert_eq!(manager.high_score(), 2);
        assert!(events(&mut bus).contains(&GameEvent::HighScoreChanged { score: 2 }));

        manager.set_standard_score(PlayerId::Human, &mut bus);
        assert!(
            !events(&mut bus)
                .iter()
                .any(|e| matches!(e, GameEvent::HighScoreChanged { .. }))
        );
    }

    #[test]
    fn test_inactive_player_is_ignored() {
        let (mut manager, mut bus) = started(GameMode::SinglePlayer);
        manager.set_perfect_score(PlayerId::Ai, &mut bus);
        manager.on_ball_out_of_play(PlayerId::Ai, &mut bus);
        assert!(events(&mut bus).is_empty());
    }

    #[test]
    fn test_menu_transitions() {
        let mut manager = GameManager::in_memory(settings(GameMode::SinglePlayer), 3);
        let mut bus = EventBus::new();
        manager.play_again(&mut bus);
        assert_eq!(manager.game_state(), GameState::MainMenu);

        manager.start_game(&mut bus);
        manager.return_to_menu(&mut bus);
        assert_eq!(manager.game_state(), GameState::MainMenu);
        assert!(!manager.is_counting_down());
    }
}
