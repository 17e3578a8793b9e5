mod me;

pub use me::{me, update_me};
