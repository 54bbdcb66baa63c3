pub mod apply;
pub mod campaign;
pub mod config;
pub mod dispatch;
pub mod history;
pub mod propose;
pub mod schema;
pub mod shared;
