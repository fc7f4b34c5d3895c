//! Handlers for the HTTP extension elements and their parents.

mod ace;
mod parents;
mod reservation;

pub use ace::{parse_url_ace, AceAttribute};
pub use parents::{ComponentParent, ServiceInstallParent};
pub use reservation::{parse_url_reservation, ReservationAttribute, UrlReservationHandler};
