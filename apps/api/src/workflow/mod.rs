// Session workflow: state machine, in-memory session store, stage runners.

pub mod handlers;
pub mod session;
pub mod stages;
pub mod store;
