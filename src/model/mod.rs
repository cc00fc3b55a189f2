//! Types that represent the normalized data model, such as `Reservation` and `Expense`.
mod expense;
mod platform;
mod reservation;
mod result_set;
mod validation;

pub use expense::Expense;
pub use platform::Platform;
pub use reservation::{NewReservation, Reservation};
pub use result_set::{ResultSet, RowFailure};
pub use validation::{ValidationError, MAX_YEAR, MIN_YEAR};
