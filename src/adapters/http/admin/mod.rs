//! Admin publish endpoint.
//!
//! An administrator POSTs `{"zone": "...", "message": "..."}` and every
//! current member of the zone receives `message` as a text frame. There is
//! no authentication on this endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::PublishRequest;
pub use handlers::publish_message;
pub use routes::admin_router;
