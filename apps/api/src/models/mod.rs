pub mod daily;
pub mod vote;
