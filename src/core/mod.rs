pub mod attendance;
pub mod backup;
pub mod import;
pub mod logo;
pub mod members;
pub mod stats;
pub mod trainers;
pub mod trainings;
