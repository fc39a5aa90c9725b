pub mod controls;
pub mod headline;
pub mod hearts;
pub mod plugin;
pub mod result;
pub mod routing;
pub mod setup;
pub mod surface;
pub mod utils;
