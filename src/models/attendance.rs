use serde::Serialize;

/// Join record: this member was present at this session.
/// Unique per (training_id, member_id); presence is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attendance {
    pub training_id: i64,
    pub member_id: i64,
}
