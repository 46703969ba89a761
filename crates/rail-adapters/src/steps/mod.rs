//! Steps de ejemplo agrupados por tema.

pub mod basic;
pub mod delta;
pub mod middleware;
pub mod numeric;

pub use basic::{is_unexpected, noop, passthrough, require_exactly};
pub use delta::PreviousDelta;
pub use middleware::{dump_errors, logger, LOGGED};
pub use numeric::{add_int, add_one_if_int, add_two_if_int, flag_odd_or_even, parse_int, require_flagged, IS_EVEN, IS_ODD, PROCESSED};
