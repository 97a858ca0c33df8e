pub mod attendance;
pub mod member;
pub mod setting;
pub mod trainer;
pub mod training;

pub use attendance::Attendance;
pub use member::Member;
pub use setting::Setting;
pub use trainer::Trainer;
pub use training::Training;
