pub mod agent;
pub mod config;
pub mod environment;
pub mod error;
pub mod map;
pub mod params;
pub mod planning;
pub mod pose;

pub use agent::{AgentMode, Percept, VacuumAgent};
pub use config::{AgentConfig, Config, WorldConfig};
pub use environment::VacuumWorld;
