pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod highscore;
pub mod logging;
pub mod spawner;
pub mod store;
