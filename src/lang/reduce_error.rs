use thiserror::Error;

/// Failure while reducing raw grammar fragments into AST nodes.
///
/// Only token text the reducer cannot map is an error; every other
/// builder is total over well-formed fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error("unexpected keyword '{0}'")]
    UnknownKeyword(String),

    #[error("no such operator '{0}'")]
    UnknownOperator(String),
}
