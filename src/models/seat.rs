use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Всего мест в вагоне.
pub const TOTAL_SEATS: i32 = 80;
/// Мест в полном ряду. Последний ряд короче.
pub const SEATS_PER_ROW: i32 = 7;
/// Номер короткого ряда с местами 78..=80.
pub const LAST_ROW: i32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub seat_number: i32,
    pub row_number: i32,
    pub is_booked: bool,
    pub booking_id: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
}

impl Seat {
    /// Свободное место; ряд вычисляется по схеме вагона.
    pub fn free(seat_number: i32) -> Self {
        Self {
            seat_number,
            row_number: row_of(seat_number),
            is_booked: false,
            booking_id: None,
            booked_at: None,
        }
    }
}

/// Ряд места: в рядах 1..=11 по семь мест, всё после 77 - ряд 12.
pub fn row_of(seat_number: i32) -> i32 {
    let full_rows_end = SEATS_PER_ROW * (LAST_ROW - 1);
    if seat_number > full_rows_end {
        LAST_ROW
    } else {
        (seat_number + SEATS_PER_ROW - 1) / SEATS_PER_ROW
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub total: i64,
    pub booked: i64,
    pub free: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_coach_layout() {
        assert_eq!(row_of(1), 1);
        assert_eq!(row_of(7), 1);
        assert_eq!(row_of(8), 2);
        assert_eq!(row_of(77), 11);
        assert_eq!(row_of(78), 12);
        assert_eq!(row_of(80), 12);
    }

    #[test]
    fn last_row_has_three_seats() {
        let count = (1..=TOTAL_SEATS).filter(|n| row_of(*n) == LAST_ROW).count();
        assert_eq!(count, 3);
    }
}
