pub use filter::{filter_by_identifier, select_values_by_identifier, IdentifierSet};
pub use functions::{entropy, frequencies, EntropyError};
pub use gain::{information_gain, Baseline, GainError, GainOptions, SplitGain};
pub use split::{split_at_boundary, SplitError};
pub use table::{Table, TableError};

pub mod gain;

mod filter;
mod functions;
mod split;
mod table;
