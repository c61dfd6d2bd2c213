use bevy::prelude::*;

use crate::agent::Collector;
use crate::inventory::Inventory;
use crate::registry::AppState;
use crate::sets::GameSet;
use crate::ui::StatusText;

/// Run-wide counters shared by pickups, teleports, levels and the HUD.
#[derive(Resource, Debug, Default, Clone)]
pub struct SessionState {
    pub elapsed: f32,
    pub attempts: u32,
    pub total_coin_value: u32,
    pub total_coins: u32,
    pub dragon_balls: u32,
    pub current_level: Option<String>,
    pub game_over: bool,
}

impl SessionState {
    pub fn score(&self) -> u32 {
        (self.elapsed as u32) / 60 + self.total_coins + self.total_coin_value
    }

    /// Records that `level` finished loading.
    ///
    /// Returns true when entering a different level than the tracked one, which
    /// resets the run counters. Reloading the tracked level keeps them and
    /// counts an attempt.
    pub fn enter_level(&mut self, level: &str) -> bool {
        if self.current_level.as_deref() == Some(level) {
            self.attempts += 1;
            return false;
        }

        self.current_level = Some(level.to_owned());
        self.attempts = 0;
        self.total_coin_value = 0;
        self.total_coins = 0;
        self.dragon_balls = 0;
        self.elapsed = 0.0;
        self.game_over = false;
        true
    }
}

/// Emitted once a level layout is in the world.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct LevelLoaded(pub String);

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionState>()
            .add_message::<LevelLoaded>()
            .add_systems(
                Update,
                (tick_session_clock, on_level_loaded)
                    .in_set(GameSet::Session)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

pub fn tick_session_clock(time: Res<Time>, mut session: ResMut<SessionState>) {
    if !session.game_over {
        session.elapsed += time.delta_secs();
    }
}

pub fn on_level_loaded(
    mut loaded: MessageReader<LevelLoaded>,
    mut session: ResMut<SessionState>,
    mut collectors: Query<&mut Inventory, With<Collector>>,
    mut status: MessageWriter<StatusText>,
) {
    for LevelLoaded(level) in loaded.read() {
        if !session.enter_level(level) {
            info!("Reloaded level {level}, attempt {}", session.attempts);
            continue;
        }

        info!("Entered level {level}, session reset");
        if collectors.is_empty() {
            status.write(StatusText::warning("No main character found!"));
            continue;
        }
        for mut inventory in &mut collectors {
            inventory.clear();
        }
        status.write(StatusText::info("Inventory cleared"));
    }
}
