
// is there a better place for this?
#[cfg(test)]
macro_rules! assert_approx {
    ($real:expr, $expected:expr, $delta:expr) => {
	if $real < $expected - $delta || $real > $expected + $delta {
	    panic!( "Violate {:.6} == {:.6} (+-{:.6})", $real, $expected, $delta );
	}
    }
}

pub mod config;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod io;
pub mod model;

pub use config::ClassifierConfig;
pub use data::{Label, Document, Corpus, Count, TokenId, PerClass};
pub use error::{ClassifierError, Result};
pub use evaluator::{Evaluator, Evaluation, HoldoutEvaluator};
pub use model::{Model, NaiveBayes};

/// Objects that can be recorded in the log
pub trait Loggable {
    fn log( &self, message: &str, level: tracing::Level );
}

/// Emits a message at a level chosen at runtime
pub fn log_at( level: tracing::Level, message: &str ) {
    use tracing::Level;
    match level {
	Level::ERROR => tracing::error!( "{message}" ),
	Level::WARN => tracing::warn!( "{message}" ),
	Level::INFO => tracing::info!( "{message}" ),
	Level::DEBUG => tracing::debug!( "{message}" ),
	_ => tracing::trace!( "{message}" ),
    }
}
