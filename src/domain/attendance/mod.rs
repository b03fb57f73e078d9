//! Attendance aggregate

pub mod model;
pub mod repository;

pub use model::{
    Attendance, AttendanceInfo, NewAttendance, VolunteerAttendanceMetrics, WorkshopAttendanceRow,
};
pub use repository::AttendanceRepository;
