//! Grapple Arena gameplay core.
//!
//! Characters, projectiles and the arena are plain Rust types driven through
//! the collaborator traits in [`services`]; [`match_loop::MatchPlugin`] and
//! [`menu::MenuPlugin`] wire them into a Bevy app.

pub mod arena;
pub mod character;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod input;
pub mod match_loop;
pub mod menu;
pub mod pickup;
pub mod projectile;
pub mod scene;
pub mod services;
