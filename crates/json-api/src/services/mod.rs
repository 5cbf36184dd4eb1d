//! Services offered by stores

mod errors;
mod handlers;

pub(crate) use handlers::*;
