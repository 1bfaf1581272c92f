pub mod client;
pub mod error;
pub mod model;

pub use client::EventsApi;
pub use error::{BookingError, BookingErrorKind, EventsError};
pub use model::{Booking, Event, NewBooking};
