pub mod cli;
pub mod host;
pub mod model;
pub mod profile;

pub use profile::Profile;
