pub mod audit;
pub mod group;
pub mod notification;
pub mod task;
pub mod user;
