pub mod attendances;
pub mod initialize;
pub mod log;
pub mod members;
pub mod migrate;
pub mod pool;
pub mod settings;
pub mod stats;
pub mod trainers;
pub mod trainings;
