mod dispatcher;

pub use dispatcher::{Dispatcher, EventService};
