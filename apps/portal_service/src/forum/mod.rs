pub mod forum_board;
pub mod forum_controller;
