//! CNF encoding and the external SAT oracle boundary

pub mod encoder;
pub mod oracle;

pub use encoder::{BinomialEncoding, Clause, ExactCountEncoding};
pub use oracle::{CadicalOracle, Oracle, Verdict};
