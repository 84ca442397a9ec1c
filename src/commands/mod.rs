pub mod detect;
pub mod list;
pub mod split;
