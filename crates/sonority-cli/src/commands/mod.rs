pub mod config;
pub mod lookup;
pub mod recommend;

pub use lookup::run_lookup;
pub use recommend::{default_seeds, run_recommend};
