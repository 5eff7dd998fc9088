pub mod assistant_controller;
