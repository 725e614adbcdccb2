pub mod data_loader;
pub mod diagnostics;
pub mod features;
pub mod form;
pub mod form_context;
pub mod ledger;
pub mod report;
pub mod teams;
pub mod util;

pub use data_loader::{load_ledger, read_ledger};
pub use features::{build_features, FeatureRow, FeatureTable};
pub use form::{rolling_margin, streak, TeamForm};
pub use form_context::FormContext;
pub use ledger::{Ledger, MatchRecord, Perspective};
