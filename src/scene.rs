//! The mode-select screen and its slide transitions.
//!
//! ## States
//!
//! | State | Update | Leaves when |
//! |-------|--------|-------------|
//! | `SlidingIn` | slide panel moves off screen | panel fully off → `Normal` |
//! | `Normal` | reads confirm / back | confirm or back → `SlidingOut` |
//! | `SlidingOut` | slide panel moves back over the screen | panel covers screen → [`SceneSignal`] |
//!
//! The panel's x offset runs from `-screen_width` (parked off the left edge)
//! through `0` (covering the screen) to `screen_width` (gone off the right).
//! Sliding in starts covered and uncovers; sliding out starts parked left and
//! covers again, so the next scene opens behind a full panel.

use crate::config::ArenaConfig;
use crate::services::{InputSource, PadButton};
use bevy::prelude::*;

/// Radians per frame the sky dome turns behind the menu.
const SKY_SPIN: f32 = 0.0005;

/// Where the select screen hands off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneTarget {
    Match,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    SlidingIn,
    Normal,
    SlidingOut { target: SceneTarget },
}

/// Returned by [`SelectScene::update`] once a transition has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSignal {
    SwitchTo(SceneTarget),
}

/// One item for the external renderer, back to front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectDraw {
    SkyDome { rotation: f32 },
    ModeMenu,
    Slide { offset_x: f32 },
}

#[derive(Resource, Debug, Clone)]
pub struct SelectScene {
    state: SelectState,
    slide_x: f32,
    screen_width: f32,
    slide_speed: f32,
    frame: u32,
    /// Pad whose buttons drive the menu.
    pad: usize,
}

impl SelectScene {
    pub fn new(slide_in: bool, config: &ArenaConfig) -> Self {
        let (state, slide_x) = if slide_in {
            (SelectState::SlidingIn, 0.0)
        } else {
            (SelectState::Normal, config.screen_width)
        };
        Self {
            state,
            slide_x,
            screen_width: config.screen_width,
            slide_speed: config.slide_speed,
            frame: 0,
            pad: 0,
        }
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn slide_x(&self) -> f32 {
        self.slide_x
    }

    pub fn update(&mut self, input: &dyn InputSource) -> Option<SceneSignal> {
        self.frame = self.frame.wrapping_add(1);
        match self.state {
            SelectState::SlidingIn => {
                self.slide_in_update();
                None
            }
            SelectState::Normal => {
                self.normal_update(input);
                None
            }
            SelectState::SlidingOut { target } => self.slide_out_update(target),
        }
    }

    pub fn draw(&self) -> Vec<SelectDraw> {
        let sky = SelectDraw::SkyDome {
            rotation: self.frame as f32 * SKY_SPIN,
        };
        match self.state {
            SelectState::Normal => vec![sky, SelectDraw::ModeMenu],
            SelectState::SlidingIn | SelectState::SlidingOut { .. } => vec![
                sky,
                SelectDraw::ModeMenu,
                SelectDraw::Slide {
                    offset_x: self.slide_x,
                },
            ],
        }
    }

    fn slide_in_update(&mut self) {
        self.slide_x += self.slide_speed;
        if self.slide_x >= self.screen_width {
            self.slide_x = self.screen_width;
            self.state = SelectState::Normal;
        }
    }

    fn normal_update(&mut self, input: &dyn InputSource) {
        let target = if input.is_triggered(self.pad, PadButton::A)
            || input.is_triggered(self.pad, PadButton::Start)
        {
            SceneTarget::Match
        } else if input.is_triggered(self.pad, PadButton::B) {
            SceneTarget::Title
        } else {
            return;
        };
        self.slide_x = -self.screen_width;
        self.state = SelectState::SlidingOut { target };
    }

    fn slide_out_update(&mut self, target: SceneTarget) -> Option<SceneSignal> {
        self.slide_x += self.slide_speed;
        if self.slide_x < 0.0 {
            return None;
        }
        self.slide_x = 0.0;
        Some(SceneSignal::SwitchTo(target))
    }
}
