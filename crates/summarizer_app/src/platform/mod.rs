mod app;
mod effects;
mod render;

pub use app::{Session, SessionOutcome};
pub use effects::EffectRunner;
