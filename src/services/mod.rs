pub mod allocation;
pub mod seat_map;
pub mod ledger;
pub mod coordinator;

pub use allocation::{allocate, Allocation, Strategy, MAX_SEATS_PER_BOOKING};
pub use coordinator::{BookingCoordinator, ResetReport};
pub use ledger::Ledger;
pub use seat_map::SeatMap;
