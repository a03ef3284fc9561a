//! Headless App Builder
//!
//! Builds a windowless Bevy app with the full gameplay core wired up. Used by
//! the `hoopstreak` binary, the match runner, and app-level tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::ai::{ScriptedShooter, drive_scripted_shooters};
use crate::ball::{
    Ball, BallBody, BallContactState, ContactQueue, ContactTracker, integrate_ball_bodies,
    resolve_ball_contacts,
};
use crate::events::{
    EventBus, PlayerId, emit_session_start, log_bus_events, update_event_bus_time,
};
use crate::input::{GestureQueue, GestureTrackers};
use crate::session::{
    GameManager, HighScoreStore, MemoryHighScoreStore, advance_session_clock, round_in_play,
};
use crate::settings::GameSettings;
use crate::shooting::{ShotPipeline, arm_pipelines_on_reset, process_gestures};
use crate::world::{Court, detect_court_contacts};

/// Builder for headless gameplay apps
pub struct HeadlessAppBuilder {
    settings: GameSettings,
    seed: Option<u64>,
    fps: f32,
    minimal_threads: bool,
    logging: bool,
    event_history: bool,
    autostart: bool,
    /// Human ball driven by a script instead of real input
    human_shooter: Option<ScriptedShooter>,
    ai_shooter: ScriptedShooter,
    store: Option<Box<dyn HighScoreStore + Send + Sync>>,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    pub fn new() -> Self {
        Self {
            settings: GameSettings::default(),
            seed: None,
            fps: 60.0,
            minimal_threads: false,
            logging: false,
            event_history: false,
            autostart: false,
            human_shooter: None,
            ai_shooter: ScriptedShooter::default(),
            store: None,
        }
    }

    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed the session RNG (overrides `settings.session.seed`)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the simulated frame rate (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Install bevy's `LogPlugin` (binaries only; tests leave the subscriber alone)
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Keep every drained event on the bus for later inspection
    pub fn with_event_history(mut self) -> Self {
        self.event_history = true;
        self
    }

    /// Start the round during `Startup`
    pub fn with_autostart(mut self) -> Self {
        self.autostart = true;
        self
    }

    /// Let a script play the human side
    pub fn with_autoplay(mut self, shooter: ScriptedShooter) -> Self {
        self.human_shooter = Some(shooter);
        self
    }

    pub fn with_ai_shooter(mut self, shooter: ScriptedShooter) -> Self {
        self.ai_shooter = shooter;
        self
    }

    /// Defaults to an in-memory store
    pub fn with_high_score_store(mut self, store: Box<dyn HighScoreStore + Send + Sync>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the app
    ///
    /// The returned app has:
    /// - MinimalPlugins with ScheduleRunnerPlugin, time advanced by a fixed step per update
    /// - Settings, session, event bus, gesture and contact queues, court
    /// - One ball entity per active player
    /// - The gameplay systems, chained in `Update`, with the bus logger in `Last`.
    ///   Ball flight and contacts only run during `Gameplay`.
    pub fn build(self) -> App {
        let mut app = App::new();
        let frame = Duration::from_secs_f32(1.0 / self.fps.max(1.0));

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }
        if self.logging {
            app.add_plugins(LogPlugin::default());
        }
        // Deterministic stepping: every update advances exactly one frame
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));

        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryHighScoreStore::default()));
        let manager = match self.seed {
            Some(seed) => GameManager::with_seed(self.settings.clone(), seed, store),
            None => GameManager::new(self.settings.clone(), store),
        };

        app.insert_resource(Court::from_settings(&self.settings.court));
        app.insert_resource(if self.event_history {
            EventBus::with_history()
        } else {
            EventBus::new()
        });
        app.init_resource::<GestureQueue>();
        app.init_resource::<GestureTrackers>();
        app.init_resource::<ContactQueue>();

        let mode = manager.mode();
        let spawn = self.settings.spawn_positions().first().copied().unwrap_or(Vec3::ZERO);
        for &player in mode.active_players() {
            let mut ball = app.world_mut().spawn((
                Ball,
                Transform::from_translation(spawn),
                BallBody::default(),
                BallContactState::default(),
                ContactTracker {
                    previous: spawn,
                    ..default()
                },
                ShotPipeline::new(player),
            ));
            let shooter = match player {
                PlayerId::Human => self.human_shooter.clone(),
                PlayerId::Ai => Some(self.ai_shooter.clone()),
            };
            if let Some(shooter) = shooter {
                ball.insert(shooter);
            }
        }

        app.insert_resource(self.settings);
        app.insert_resource(manager);

        if self.autostart {
            app.add_systems(Startup, (emit_session_start, start_match).chain());
        } else {
            app.add_systems(Startup, emit_session_start);
        }
        app.add_systems(First, update_event_bus_time);
        app.add_systems(
            Update,
            (
                process_gestures,
                drive_scripted_shooters,
                (
                    integrate_ball_bodies,
                    detect_court_contacts,
                    resolve_ball_contacts,
                )
                    .chain()
                    .run_if(round_in_play),
                arm_pipelines_on_reset,
                advance_session_clock,
            )
                .chain(),
        );
        app.add_systems(Last, log_bus_events);

        app
    }
}

/// Startup system: begin the first round
pub fn start_match(mut manager: ResMut<GameManager>, mut bus: ResMut<EventBus>) {
    manager.start_game(&mut bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{GameEvent, GameState, ScoreKind};
    use crate::session::GameMode;
    use crate::shooting::ShotPhase;

    fn count_balls(app: &mut App) -> usize {
        app.world_mut()
            .query::<&ShotPipeline>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_builder_creates_app() {
        let mut app = HeadlessAppBuilder::new().with_seed(1).build();
        assert!(app.world().contains_resource::<GameManager>());
        assert!(app.world().contains_resource::<EventBus>());
        assert!(app.world().contains_resource::<Court>());
        assert_eq!(count_balls(&mut app), 1);
    }

    #[test]
    fn test_versus_spawns_two_balls() {
        let mut settings = GameSettings::default();
        settings.session.mode = GameMode::VersusAi;
        let mut app = HeadlessAppBuilder::new()
            .with_settings(settings)
            .with_minimal_threads()
            .build();
        assert_eq!(count_balls(&mut app), 2);
    }

    #[test]
    fn test_autostart_arms_the_ball() {
        let mut app = HeadlessAppBuilder::new()
            .with_seed(3)
            .with_autostart()
            .with_event_history()
            .build();
        app.update();

        let manager = app.world().resource::<GameManager>();
        assert_eq!(manager.game_state(), GameState::Gameplay);
        let armed = app
            .world_mut()
            .query::<&ShotPipeline>()
            .iter(app.world())
            .all(|p| p.can_shoot());
        assert!(armed);

        let bus = app.world().resource::<EventBus>();
        assert!(bus.processed().iter().any(|e| matches!(e.event, GameEvent::SessionStart { .. })));
        assert!(
            bus.processed()
                .iter()
                .any(|e| matches!(e.event, GameEvent::PerfectShotHints { .. }))
        );
    }

    #[test]
    fn test_sharpshooter_scores_perfect_baskets() {
        let mut app = HeadlessAppBuilder::new()
            .with_seed(5)
            .with_autostart()
            .with_event_history()
            .with_autoplay(ScriptedShooter::sharpshooter())
            .build();

        // Ten seconds of play
        for _ in 0..600 {
            app.update();
        }

        let manager = app.world().resource::<GameManager>();
        assert!(manager.score(PlayerId::Human) >= 6, "score {}", manager.score(PlayerId::Human));
        // The first update carries no elapsed time
        assert!((50..=51).contains(&manager.timer()), "timer {}", manager.timer());

        let bus = app.world().resource::<EventBus>();
        let baskets: Vec<_> = bus
            .processed()
            .iter()
            .filter_map(|e| match e.event {
                GameEvent::Basket { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert!(baskets.iter().all(|k| *k == ScoreKind::Perfect), "{:?}", baskets);
    }

    fn human_ball(app: &mut App) -> (ShotPhase, Vec3) {
        let mut query = app.world_mut().query::<(&ShotPipeline, &Transform)>();
        query
            .iter(app.world())
            .find(|(pipeline, _)| pipeline.owner == PlayerId::Human)
            .map(|(pipeline, transform)| (pipeline.phase, transform.translation))
            .unwrap()
    }

    fn with_session(app: &mut App, f: impl FnOnce(&mut GameManager, &mut EventBus)) {
        app.world_mut()
            .resource_scope(|world, mut manager: Mut<GameManager>| {
                let mut bus = world.resource_mut::<EventBus>();
                f(&mut manager, &mut bus);
            });
    }

    fn launches(app: &App) -> usize {
        app.world()
            .resource::<EventBus>()
            .processed()
            .iter()
            .filter(|e| matches!(e.event, GameEvent::BallLaunched { .. }))
            .count()
    }

    #[test]
    fn test_pause_mid_flight_freezes_ball_and_resumes_shooting() {
        let mut app = HeadlessAppBuilder::new()
            .with_seed(5)
            .with_autostart()
            .with_event_history()
            .with_autoplay(ScriptedShooter::sharpshooter())
            .build();

        let mut frames = 0;
        while human_ball(&mut app).0 != ShotPhase::InFlight {
            app.update();
            frames += 1;
            assert!(frames < 600, "no shot within ten seconds");
        }
        // A few frames into the arc
        for _ in 0..5 {
            app.update();
        }
        let (_, frozen_at) = human_ball(&mut app);

        with_session(&mut app, |manager, bus| manager.pause(bus));
        for _ in 0..300 {
            app.update();
        }
        let (phase, position) = human_ball(&mut app);
        assert_eq!(phase, ShotPhase::InFlight);
        assert_eq!(position, frozen_at, "ball moved while paused");
        assert_eq!(launches(&app), 1);

        with_session(&mut app, |manager, bus| manager.resume(bus));
        for _ in 0..600 {
            app.update();
        }
        assert!(launches(&app) >= 2, "launches {}", launches(&app));
        assert!(app.world().resource::<GameManager>().score(PlayerId::Human) > 0);
    }

    #[test]
    fn test_reset_published_after_update_still_arms() {
        let mut app = HeadlessAppBuilder::new().with_seed(8).build();
        // Started from a late schedule, after the arming system has run
        app.add_systems(PostUpdate, start_match.run_if(run_once));

        app.update();
        assert_eq!(human_ball(&mut app).0, ShotPhase::Idle);
        assert_eq!(
            app.world().resource::<GameManager>().game_state(),
            GameState::Gameplay
        );

        app.update();
        let (phase, position) = human_ball(&mut app);
        assert_eq!(phase, ShotPhase::Armed);
        let spawns = GameSettings::default().spawn_positions();
        assert!(spawns.contains(&position), "{:?} not a spawn point", position);
    }
}
