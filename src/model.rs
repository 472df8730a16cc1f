use crate::*;

mod counts;
mod likelihood;
mod naive_bayes;

/// Probability of a token a class has never seen in training
pub const FLOOR: f64 = 1e-5;

pub trait Model {
    /// contains sufficient stats gathered from the training set
    type Counts;

    /// Scans the training documents to obtain the model's stats
    fn count <'a, I> ( &self, data: I ) -> Self::Counts where I: Iterator<Item = &'a Document>;

    /// Fits the model parameters to the counts
    fn fit( &mut self, counts: Self::Counts ) -> Result<()>;

    /// Log of prior times likelihood of the tokens, per class
    fn log_scores( &self, tokens: &[String] ) -> PerClass<f64>;

    /// Picks the class with the higher score
    fn predict( &self, tokens: &[String] ) -> Label {
	decide( &self.log_scores( tokens ), tokens.len() )
    }
}

/// Decision rule on log scores. Ties go to spam.
///
/// Each score sums `terms` log likelihoods and one log prior, all of them <= 0.
/// Equal products can end up a few ulps apart after summing their logs, so
/// finite scores closer than the accumulated rounding error count as a tie.
pub fn decide( scores: &PerClass<f64>, terms: usize ) -> Label {
    let (spam, ham) = (scores.spam, scores.ham);
    if !( spam.is_finite() && ham.is_finite() ) {
	// a class without documents sits at negative infinity
	return if spam >= ham { Label::Spam } else { Label::Ham };
    }
    let tolerance = ( terms + 1 ) as f64 * 4.0 * f64::EPSILON * spam.abs().max( ham.abs() );
    if spam >= ham - tolerance { Label::Spam } else { Label::Ham }
}


pub use counts::{Vocabulary, FrequencyTable, TrainingCounts, count_frequencies};
pub use likelihood::{EmptyClassPolicy, LikelihoodTable, estimate_likelihoods};
pub use naive_bayes::{NaiveBayes, NaiveBayesFormatter};
