//! Top-level `GameState` machine and the screens around a match.
//!
//! ## States
//!
//! | State      | Description                                         |
//! |------------|-----------------------------------------------------|
//! | `Title`    | Initial state; waits for Start or A on any pad      |
//! | `Select`   | [`SelectScene`] runs; hands off to a match or back  |
//! | `Playing`  | Match loop active (see [`crate::match_loop`])       |
//! | `GameOver` | Result held until a pad confirms                    |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                | Schedule                   | Purpose                          |
//! |-----------------------|----------------------------|----------------------------------|
//! | `enter_select`        | `OnEnter(Select)`          | Build the scene, sliding in on return |
//! | `title_system`        | `Update / in Title`        | Advance to `Select`              |
//! | `select_scene_system` | `Update / in Select`       | Step the scene, map its signal   |
//! | `game_over_system`    | `Update / in GameOver`     | Return to `Select`               |

use crate::config::ArenaConfig;
use crate::input::{PadInputs, MAX_PADS};
use crate::projectile::OwnerSlot;
use crate::scene::{SceneSignal, SceneTarget, SelectScene};
use crate::services::{InputSource, PadButton};
use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Title,
    Select,
    Playing,
    GameOver,
}

/// How the last match ended.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Slot still standing; `None` for a draw.
    pub winner: Option<OwnerSlot>,
}

/// Set when the next `Select` entry should slide in.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ReturningFromMatch(pub bool);

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<PadInputs>()
            .init_resource::<MatchOutcome>()
            .init_resource::<ReturningFromMatch>()
            .add_systems(OnEnter(GameState::Select), enter_select)
            .add_systems(OnEnter(GameState::GameOver), announce_outcome)
            .add_systems(Update, title_system.run_if(in_state(GameState::Title)))
            .add_systems(
                Update,
                select_scene_system.run_if(in_state(GameState::Select)),
            )
            .add_systems(
                Update,
                game_over_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

fn any_pad_confirms(inputs: &dyn InputSource) -> bool {
    (0..MAX_PADS).any(|pad| {
        inputs.is_triggered(pad, PadButton::Start) || inputs.is_triggered(pad, PadButton::A)
    })
}

pub fn enter_select(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    mut returning: ResMut<ReturningFromMatch>,
) {
    commands.insert_resource(SelectScene::new(returning.0, &config));
    returning.0 = false;
}

pub fn title_system(inputs: Res<PadInputs>, mut next_state: ResMut<NextState<GameState>>) {
    if any_pad_confirms(&*inputs) {
        info!("[menu] title → select");
        next_state.set(GameState::Select);
    }
}

pub fn select_scene_system(
    scene: Option<ResMut<SelectScene>>,
    inputs: Res<PadInputs>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    let Some(SceneSignal::SwitchTo(target)) = scene.update(&*inputs) else {
        return;
    };
    let next = match target {
        SceneTarget::Match => GameState::Playing,
        SceneTarget::Title => GameState::Title,
    };
    info!("[menu] select → {next:?}");
    next_state.set(next);
}

fn announce_outcome(outcome: Res<MatchOutcome>, mut returning: ResMut<ReturningFromMatch>) {
    returning.0 = true;
    match outcome.winner {
        Some(slot) => info!("[menu] match over, slot {slot} wins"),
        None => info!("[menu] match over, draw"),
    }
}

pub fn game_over_system(inputs: Res<PadInputs>, mut next_state: ResMut<NextState<GameState>>) {
    if any_pad_confirms(&*inputs) {
        next_state.set(GameState::Select);
    }
}
