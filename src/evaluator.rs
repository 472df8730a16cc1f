use rayon::prelude::*;
use serde::Serialize;

use crate::*;
use crate::data::Splitter;

use tracing::*;

/// Trains a model on one part of the data and scores it on another.
pub trait Evaluator {
    fn evaluate<M>( &mut self, training: &[Document], test: &[Document], model: &mut M ) -> Result<Evaluation> where
	M: Model + Loggable + Sync;
}

/// Single train/test holdout
pub struct HoldoutEvaluator {
    parallel: bool,
}

/// Counts of predictions by true and predicted label
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq, Serialize )]
pub struct ConfusionMatrix {
    /// spam predicted as spam
    pub true_spam: usize,
    /// ham predicted as spam
    pub false_spam: usize,
    /// ham predicted as ham
    pub true_ham: usize,
    /// spam predicted as ham
    pub false_ham: usize,
}

#[derive( Debug, Clone, PartialEq, Serialize )]
pub struct Evaluation {
    /// percentage of correct predictions, full precision
    pub accuracy: f64,
    pub matches: usize,
    pub test_documents: usize,
    pub training_documents: usize,
    pub confusion: ConfusionMatrix,
}

impl Evaluator for HoldoutEvaluator {
    fn evaluate<M>( &mut self, training: &[Document], test: &[Document], model: &mut M ) -> Result<Evaluation> where
	M: Model + Loggable + Sync,
    {
	{
	    let _span = info_span!( "training", documents = training.len() ).entered();
	    let counts = model.count( training.iter() );
	    model.fit( counts )?;
	    model.log( "fitted model", Level::INFO );
	}

	let _span = info_span!( "evaluation", documents = test.len() ).entered();
	let predictions = classify( model, test, self.parallel );
	let evaluation = Evaluation::from_predictions( &predictions, test, training.len() )?;
	evaluation.log( "evaluated", Level::INFO );
	Ok( evaluation )
    }
}

impl HoldoutEvaluator {
    pub fn new( parallel: bool ) -> HoldoutEvaluator {
	HoldoutEvaluator{ parallel }
    }
}

/// Splits the corpus as configured, trains a fresh model and evaluates it.
pub fn evaluate_corpus( config: &ClassifierConfig, corpus: Corpus ) -> Result<(NaiveBayes, Evaluation)> {
    config.validate()?;
    let splitter = Splitter::new( config.test_ratio, config.seed )?;
    let (training, test) = splitter.split( corpus );
    info!( "Split into {} training and {} test documents at ratio {}", training.len(), test.len(), splitter.get_test_ratio() );

    let mut model = NaiveBayes::from_config( config );
    let mut evaluator = HoldoutEvaluator::new( config.parallel );
    let evaluation = evaluator.evaluate( &training, &test, &mut model )?;
    Ok( (model, evaluation) )
}

/// Predicts every document. The output is in document order either way.
pub fn classify<M: Model + Sync>( model: &M, documents: &[Document], parallel: bool ) -> Vec<Label> {
    if parallel {
	documents.par_iter()
	    .map( |document| model.predict( document.get_tokens() ))
	    .collect()
    } else {
	documents.iter()
	    .map( |document| model.predict( document.get_tokens() ))
	    .collect()
    }
}

/// Percentage of predictions that equal the label of the document at the same position.
pub fn accuracy( predictions: &[Label], test: &[Document] ) -> Result<f64> {
    check_lengths( predictions, test )?;
    let matches = count_matches( predictions, test );
    Ok( 100.0 * matches as f64 / test.len() as f64 )
}

fn check_lengths( predictions: &[Label], test: &[Document] ) -> Result<()> {
    if test.is_empty() {
	return Err( ClassifierError::EmptyTestSet );
    }
    if predictions.len() != test.len() {
	return Err( ClassifierError::PredictionMismatch{ predictions: predictions.len(), documents: test.len() } );
    }
    Ok( () )
}

fn count_matches( predictions: &[Label], test: &[Document] ) -> usize {
    predictions.iter().zip( test )
	.filter( |(predicted, document)| **predicted == document.get_label() )
	.count()
}

impl ConfusionMatrix {
    pub fn new( predictions: &[Label], test: &[Document] ) -> ConfusionMatrix {
	let mut matrix = ConfusionMatrix::default();
	for (predicted, document) in predictions.iter().zip( test ) {
	    match (document.get_label(), predicted) {
		(Label::Spam, Label::Spam) => matrix.true_spam += 1,
		(Label::Ham, Label::Spam) => matrix.false_spam += 1,
		(Label::Ham, Label::Ham) => matrix.true_ham += 1,
		(Label::Spam, Label::Ham) => matrix.false_ham += 1,
	    }
	}
	matrix
    }
}

impl Evaluation {
    pub fn from_predictions( predictions: &[Label], test: &[Document], training_documents: usize ) -> Result<Evaluation> {
	let accuracy = accuracy( predictions, test )?;
	Ok( Evaluation{
	    accuracy,
	    matches: count_matches( predictions, test ),
	    test_documents: test.len(),
	    training_documents,
	    confusion: ConfusionMatrix::new( predictions, test ),
	})
    }
}

impl Loggable for Evaluation {
    fn log( &self, message: &str, level: Level ) {
	let c = &self.confusion;
	let summary = format!(
	    "{message}: {}/{} correct ({:.4}%), spam {} right {} missed, ham {} right {} flagged",
	    self.matches, self.test_documents, self.accuracy, c.true_spam, c.false_ham, c.true_ham, c.false_spam
	);
	log_at( level, &summary );
    }
}
