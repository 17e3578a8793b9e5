mod reset;
mod signin;
mod signup;
mod verify_email;

pub use reset::{request_reset_password, reset_password};
pub use signin::signin;
pub use signup::signup;
pub use verify_email::verify_email;
