mod serialize; // pretty printing of the model

use tracing::{debug, info};

use crate::config::ClassifierConfig;

use super::*;

pub use serialize::NaiveBayesFormatter;

#[derive( Debug, Clone )]
/// Multinomial naive Bayes over token counts with a fixed floor for unseen tokens.
///
/// Scores are sums of natural logs, so long messages do not underflow. The
/// decision is the one the product of prior and likelihoods would give.
pub struct NaiveBayes {
    floor: f64,
    policy: EmptyClassPolicy,
    vocabulary: Vocabulary,
    priors: PerClass<f64>,
    /// ln of the priors, negative infinity for a class without documents
    log_priors: PerClass<f64>,
    likelihoods: PerClass<LikelihoodTable>,
    /// training token occurrences per class
    frequencies: PerClass<FrequencyTable>,
}

impl Model for NaiveBayes {
    type Counts = TrainingCounts;

    fn count <'a, I> ( &self, data: I ) -> Self::Counts where I: Iterator<Item = &'a Document> {
	count_frequencies( data )
    }

    fn fit( &mut self, counts: Self::Counts ) -> Result<()> {
	// estimate first so a rejected fit leaves the model untouched
	let likelihoods = estimate_likelihoods( &counts, self.floor, self.policy )?;

	self.priors = counts.priors();
	self.log_priors = self.priors.map( |p| p.ln() );
	self.likelihoods = likelihoods;
	self.frequencies = counts.frequencies;
	self.vocabulary = counts.vocabulary;

	debug!( "Priors after fit {:?}", self.priors );
	Ok( () )
    }

    fn log_scores( &self, tokens: &[String] ) -> PerClass<f64> {
	let mut scores = self.log_priors.clone();
	for token in tokens {
	    // a token outside the vocabulary misses both tables
	    let id = self.vocabulary.get_id( token );
	    scores.spam += self.likelihoods.spam.get_log_probability( id );
	    scores.ham += self.likelihoods.ham.get_log_probability( id );
	}
	scores
    }
}

impl NaiveBayes {

    pub fn new( floor: f64, policy: EmptyClassPolicy ) -> NaiveBayes {
	NaiveBayes{
	    floor,
	    policy,
	    vocabulary: Vocabulary::new(),
	    priors: PerClass::new( 0.0, 0.0 ),
	    log_priors: PerClass::new( f64::NEG_INFINITY, f64::NEG_INFINITY ),
	    likelihoods: PerClass::new( LikelihoodTable::empty( floor ), LikelihoodTable::empty( floor )),
	    frequencies: PerClass::default(),
	}
    }

    pub fn from_config( config: &ClassifierConfig ) -> NaiveBayes {
	NaiveBayes::new( config.floor, config.empty_class_policy )
    }

    /// Counts and fits in one go
    pub fn train( config: &ClassifierConfig, training: &[Document] ) -> Result<NaiveBayes> {
	let mut model = NaiveBayes::from_config( config );
	let counts = model.count( training.iter() );
	model.fit( counts )?;
	info!( "Trained on {} documents with {} distinct tokens", training.len(), model.vocabulary.len() );
	Ok( model )
    }

    /// Prior times the plain product of likelihoods. Underflows to 0 for long messages.
    pub fn product_scores( &self, tokens: &[String] ) -> PerClass<f64> {
	let mut scores = self.priors.clone();
	for token in tokens {
	    scores.spam *= self.get_probability( Label::Spam, token );
	    scores.ham *= self.get_probability( Label::Ham, token );
	}
	scores
    }

    /// Likelihood of a token under a class, the floor if the class never saw it
    pub fn get_probability( &self, label: Label, token: &str ) -> f64 {
	match self.vocabulary.get_id( token ) {
	    Some( id ) => self.likelihoods[ label ].get_probability( id ),
	    None => self.floor,
	}
    }

    /// Occurrences of a token in the training documents of a class, None if the class never saw it
    pub fn get_count( &self, label: Label, token: &str ) -> Option<Count> {
	self.vocabulary.get_id( token ).and_then( |id| self.frequencies[ label ].get_count( id ))
    }

    pub fn get_frequencies( &self, label: Label ) -> &FrequencyTable {
	&self.frequencies[ label ]
    }

    pub fn get_priors( &self ) -> &PerClass<f64> {
	&self.priors
    }

    pub fn get_vocabulary( &self ) -> &Vocabulary {
	&self.vocabulary
    }

    pub fn get_likelihoods( &self, label: Label ) -> &LikelihoodTable {
	&self.likelihoods[ label ]
    }

    pub fn get_floor( &self ) -> f64 {
	self.floor
    }
}

impl Loggable for NaiveBayes {
    fn log( &self, message: &str, level: tracing::Level ) {
	let summary = format!(
	    "{message}: {} tokens, priors spam {:.4} ham {:.4}, occurrences spam {} ham {}",
	    self.vocabulary.len(), self.priors.spam, self.priors.ham, self.frequencies.spam.get_total(), self.frequencies.ham.get_total()
	);
	log_at( level, &summary );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens( words: &[&str] ) -> Vec<String> {
	words.iter().map( |w| w.to_string() ).collect()
    }

    fn fitted( training: &[Document] ) -> NaiveBayes {
	NaiveBayes::train( &ClassifierConfig::default(), training ).unwrap()
    }

    /// The product rule without any rounding band
    fn product_decision( scores: &PerClass<f64> ) -> Label {
	if scores.spam >= scores.ham { Label::Spam } else { Label::Ham }
    }

    #[test]
    /// Two training messages, one test message
    fn test_small_scenario() {
	let training = vec!(
	    Document::from_words( Label::Spam, &[ "free", "money" ] ),
	    Document::from_words( Label::Ham, &[ "hello", "friend" ] ),
	);
	let model = fitted( &training );

	assert_approx!( model.get_probability( Label::Spam, "free" ), 0.5, 1e-12 );
	assert_approx!( model.get_probability( Label::Spam, "money" ), 0.5, 1e-12 );
	assert_eq!( model.get_probability( Label::Ham, "free" ), FLOOR );
	assert_approx!( model.get_probability( Label::Ham, "hello" ), 0.5, 1e-12 );
	assert_eq!( model.get_count( Label::Spam, "free" ), Some( 1 ));
	assert_eq!( model.get_count( Label::Ham, "free" ), None );
	assert_eq!( model.get_frequencies( Label::Ham ).get_total(), 2 );
	assert_eq!( model.predict( &tokens( &[ "free" ] )), Label::Spam );
	assert_eq!( model.predict( &tokens( &[ "hello", "friend" ] )), Label::Ham );
    }

    #[test]
    /// Equal scores resolve to spam
    fn test_tie_goes_to_spam() {
	let training = vec!(
	    Document::from_words( Label::Spam, &[ "a" ] ),
	    Document::from_words( Label::Ham, &[ "b" ] ),
	);
	let model = fitted( &training );
	// symmetric message
	let scores = model.log_scores( &tokens( &[ "a", "b" ] ));
	assert_eq!( scores.spam, scores.ham );
	assert_eq!( model.predict( &tokens( &[ "a", "b" ] )), Label::Spam );
	// no tokens at all leaves the equal priors
	assert_eq!( model.predict( &[] ), Label::Spam );
    }

    #[test]
    /// Equal products built from different factors still resolve to spam
    fn test_uneven_tie_goes_to_spam() {
	let training = vec!(
	    Document::from_words( Label::Spam, &[ "x", "y", "y", "y", "y", "s" ] ),
	    Document::from_words( Label::Ham, &[ "x", "x", "y", "y", "h", "h" ] ),
	);
	let model = fitted( &training );
	let message = tokens( &[ "x", "y" ] );

	// 1/6 * 4/6 against 2/6 * 2/6
	let product = model.product_scores( &message );
	assert_eq!( product.spam, product.ham );
	assert_eq!( model.predict( &message ), Label::Spam );
    }

    #[test]
    /// Messages made only of unseen tokens are decided by the priors
    fn test_unseen_tokens_use_priors() {
	let mut training: Vec<Document> = Vec::new();
	for _ in 0 .. 3 {
	    training.push( Document::from_words( Label::Spam, &[ "win" ] ));
	}
	for _ in 0 .. 2 {
	    training.push( Document::from_words( Label::Ham, &[ "lunch" ] ));
	}
	let model = fitted( &training );
	assert_approx!( model.get_priors().spam, 0.6, 1e-12 );

	let unseen = tokens( &[ "zebra" ] );
	let scores = model.product_scores( &unseen );
	assert_approx!( scores.spam, 0.6 * FLOOR, 1e-15 );
	assert_approx!( scores.ham, 0.4 * FLOOR, 1e-15 );
	assert_eq!( model.predict( &unseen ), Label::Spam );

	// the other way around
	let mut training: Vec<Document> = Vec::new();
	training.push( Document::from_words( Label::Spam, &[ "win" ] ));
	training.push( Document::from_words( Label::Ham, &[ "lunch" ] ));
	training.push( Document::from_words( Label::Ham, &[ "dinner" ] ));
	let model = fitted( &training );
	assert_eq!( model.predict( &tokens( &[ "zebra", "giraffe" ] )), Label::Ham );
    }

    #[test]
    /// Log scores decide like the product as long as the product does not underflow
    fn test_log_matches_product() {
	let training = vec!(
	    Document::from_words( Label::Spam, &[ "free", "cash", "prize", "free", "now" ] ),
	    Document::from_words( Label::Spam, &[ "claim", "prize", "now" ] ),
	    Document::from_words( Label::Ham, &[ "see", "you", "at", "lunch" ] ),
	    Document::from_words( Label::Ham, &[ "call", "me", "now" ] ),
	    Document::from_words( Label::Ham, &[ "lunch", "is", "free" ] ),
	);
	let model = fitted( &training );

	let messages = vec!(
	    tokens( &[ "free", "lunch" ] ),
	    tokens( &[ "claim", "your", "prize" ] ),
	    tokens( &[ "call", "me" ] ),
	    tokens( &[ "now" ] ),
	    tokens( &[ "unknown", "words", "only" ] ),
	);
	for message in &messages {
	    let product = model.product_scores( message );
	    assert!( product.spam > 0.0 || product.ham > 0.0 );
	    let logs = model.log_scores( message );
	    assert_approx!( logs.spam, product.spam.ln(), 1e-9 );
	    assert_approx!( logs.ham, product.ham.ln(), 1e-9 );
	    assert_eq!( model.predict( message ), product_decision( &product ));
	}
    }

    #[test]
    /// The product underflows for long messages, the log scores do not
    fn test_long_message() {
	let training = vec!(
	    Document::from_words( Label::Spam, &[ "free", "prize" ] ),
	    Document::from_words( Label::Ham, &[ "lunch", "later", "lunch", "today" ] ),
	);
	let model = fitted( &training );

	let mut message = vec!( "lunch".to_string(); 1100 );
	message.push( "free".to_string() );
	let product = model.product_scores( &message );
	assert_eq!( product.spam, 0.0 );
	assert_eq!( product.ham, 0.0 );
	// the product would call this spam by the tie rule
	assert_eq!( product_decision( &product ), Label::Spam );
	assert_eq!( model.predict( &message ), Label::Ham );
    }

    #[test]
    fn test_missing_class() {
	let training = vec!( Document::from_words( Label::Ham, &[ "hello" ] ));
	let model = fitted( &training );
	assert_eq!( model.get_priors().spam, 0.0 );
	// a class without documents can not win
	assert_eq!( model.predict( &tokens( &[ "hello" ] )), Label::Ham );

	let mut config = ClassifierConfig::default();
	config.empty_class_policy = EmptyClassPolicy::Reject;
	let rejected = NaiveBayes::train( &config, &training );
	assert!( matches!( rejected, Err( ClassifierError::EmptyTrainingClass( Label::Spam ))));
    }

    #[test]
    fn test_untrained_model() {
	let model = NaiveBayes::new( FLOOR, EmptyClassPolicy::Floor );
	assert_eq!( model.get_floor(), FLOOR );
	assert!( model.get_likelihoods( Label::Spam ).is_empty() );
	// both scores are negative infinity, the tie rule applies
	assert_eq!( model.predict( &tokens( &[ "anything" ] )), Label::Spam );

	let model = fitted( &[] );
	assert!( model.get_vocabulary().is_empty() );
	assert_eq!( model.predict( &tokens( &[ "anything" ] )), Label::Spam );
    }
}
