//! Integration tests against an in-process miIO device.

pub mod mock;

#[cfg(test)]
mod client {
    mod integration;
}

#[cfg(test)]
mod airfresh {
    mod integration;
}

#[cfg(test)]
mod hub {
    mod integration;
}

#[cfg(test)]
mod discovery {
    mod integration;
}
