pub mod attendance;

pub mod classes;

pub mod contact;

pub mod grades;

pub mod students;

pub mod system;

pub use attendance::configure_attendance_routes;
pub use classes::configure_class_routes;
pub use contact::configure_contact_routes;
pub use grades::configure_grades_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
