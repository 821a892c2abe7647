mod debounce;
mod events;
mod route;


pub use debounce::Debouncer;
pub use events::{MapAction, MapEvent, Rerun};
pub use route::{Dispatch, EventRouter};
