//! allocation.rs
//!
//! Алгоритм выбора мест для групповой брони. Чистая функция: получает список
//! свободных мест и количество запрошенных, ничего не пишет в хранилище.
//!
//! Стратегии проверяются строго по порядку, побеждает первая, набравшая
//! нужное количество мест:
//! 1.  **ConsecutiveInRow**: подряд идущие места в одном ряду.
//! 2.  **SameRow**: любые места одного ряда, если в нём хватает свободных.
//! 3.  **CrossRow**: самые младшие по номеру свободные места вагона.
//!
//! Ряды обходятся по возрастанию номера, места внутри ряда - по возрастанию номера места.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::BookingError;
use crate::models::Seat;

/// Hard ceiling for a single booking, independent of row width.
pub const MAX_SEATS_PER_BOOKING: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    ConsecutiveInRow,
    SameRow,
    CrossRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Chosen seats in selection order.
    pub seat_numbers: Vec<i32>,
    pub strategy: Strategy,
}

/// Проверяет, что запрошенное количество мест лежит в диапазоне 1..=7.
pub fn validate_request(requested: i64) -> Result<usize, BookingError> {
    match usize::try_from(requested) {
        Ok(n) if (1..=MAX_SEATS_PER_BOOKING).contains(&n) => Ok(n),
        _ => Err(BookingError::InvalidRequest { requested }),
    }
}

/// Выбирает `requested` мест среди `seats`. Занятые места во входе игнорируются.
pub fn allocate(seats: &[Seat], requested: usize) -> Result<Allocation, BookingError> {
    let requested = validate_request(i64::try_from(requested).unwrap_or(i64::MAX))?;

    let free: Vec<&Seat> = seats.iter().filter(|s| !s.is_booked).collect();
    if free.len() < requested {
        return Err(BookingError::InsufficientCapacity {
            requested,
            available: free.len(),
        });
    }

    let rows = group_by_row(&free);

    // 1) подряд в одном ряду
    for row_seats in rows.values() {
        if row_seats.len() < requested {
            continue;
        }
        if let Some(run) = find_consecutive(row_seats, requested) {
            return Ok(Allocation {
                seat_numbers: run.to_vec(),
                strategy: Strategy::ConsecutiveInRow,
            });
        }
    }

    // 2) в одном ряду, но не подряд
    if let Some(row_seats) = rows.values().find(|r| r.len() >= requested) {
        return Ok(Allocation {
            seat_numbers: row_seats[..requested].to_vec(),
            strategy: Strategy::SameRow,
        });
    }

    // 3) через ряды: самые младшие номера
    let mut nearest: Vec<i32> = free.iter().map(|s| s.seat_number).collect();
    nearest.sort_unstable();
    nearest.truncate(requested);

    Ok(Allocation {
        seat_numbers: nearest,
        strategy: Strategy::CrossRow,
    })
}

fn group_by_row(free: &[&Seat]) -> BTreeMap<i32, Vec<i32>> {
    let mut rows: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for seat in free {
        rows.entry(seat.row_number).or_default().push(seat.seat_number);
    }
    for row_seats in rows.values_mut() {
        row_seats.sort_unstable();
    }
    rows
}

/// First window of `count` seats whose numbers step by exactly one.
fn find_consecutive(row_seats: &[i32], count: usize) -> Option<&[i32]> {
    row_seats
        .windows(count)
        .find(|run| run.windows(2).all(|pair| pair[1] == pair[0] + 1))
}
