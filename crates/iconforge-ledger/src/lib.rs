//! Authoritative resource ledger and currency account for Iconforge.
//!
//! Every owned resource unit lives in a [`ResourceLedger`]. Quantities are
//! never negative and zero-quantity entries never linger: the ledger is a
//! pruned multiset keyed by [`ResourceId`](iconforge_types::ResourceId).
//! Coins live separately in a [`CurrencyAccount`], which also remembers the
//! timestamp passive income was last accrued from.
//!
//! # Modules
//!
//! - [`ledger`] -- The [`ResourceLedger`] with single and batch mutation.
//! - [`currency`] -- The [`CurrencyAccount`] balance and accrual timestamp.
//!
//! # Usage
//!
//! ```
//! use iconforge_ledger::ResourceLedger;
//! use iconforge_types::{ResourceId, ResourceStack};
//!
//! let mut ledger = ResourceLedger::new();
//! let wheat = ResourceId::new("seed_wheat");
//! ledger.add(&wheat, 3).ok();
//!
//! assert!(ledger.has(&wheat, 3));
//! assert!(ledger.remove(&wheat, 2));
//! assert!(!ledger.remove(&wheat, 2));
//! assert_eq!(ledger.snapshot(), vec![ResourceStack::new("seed_wheat", 1)]);
//! ```

pub mod currency;
pub mod ledger;

// Re-export primary types at crate root.
pub use currency::CurrencyAccount;
pub use ledger::ResourceLedger;
