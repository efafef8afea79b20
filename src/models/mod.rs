pub mod seat;
pub mod booking;

pub use seat::{Occupancy, Seat};
pub use booking::{Booking, BookingRow, Confirmation};
