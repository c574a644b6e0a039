//! Demo application wiring two named `Engine` beans into a `Vehicle` and
//! publishing a `StartEvent` whenever the vehicle is started over HTTP.

pub mod client;
pub mod config;
pub mod controllers;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;
