// my-zt - Terminal dashboard for ZeroTier networks
// Library exports

pub mod config;
pub mod tui;
pub mod zerotier;
