//! Execute handlers for the bridge vault adapter.
//!
//! This module contains all execute message handlers, organized by category:
//! - `vault` - Deposits into and withdrawals from custody (router and holder)
//! - `ledger` - Router mint/burn of issued balance
//! - `config` - Quota and mode configuration
//! - `admin` - Role management and emergency retrieval

mod admin;
mod config;
mod ledger;
mod vault;

pub use admin::*;
pub use config::*;
pub use ledger::*;
pub use vault::*;
