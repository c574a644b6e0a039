pub mod event_controller;
pub mod hello_controller;
pub mod vehicle_controller;
