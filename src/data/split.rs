use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::{Corpus, ClassifierError, Result};

/// Partitions a corpus into a training and a test set.
///
/// The corpus is shuffled with a generator seeded from `seed`, so the same
/// corpus, ratio and seed always produce the same partition.
#[derive( Debug, Clone, Copy )]
pub struct Splitter {
    test_ratio: f64,
    seed: u64,
}

impl Splitter {
    pub fn new( test_ratio: f64, seed: u64 ) -> Result<Splitter> {
	// also rejects NaN
	if !( 0.0 ..= 1.0 ).contains( &test_ratio ) {
	    return Err( ClassifierError::InvalidRatio( test_ratio ));
	}
	Ok( Splitter{ test_ratio, seed } )
    }

    pub fn get_test_ratio( &self ) -> f64 {
	self.test_ratio
    }

    /// Number of documents that go to the test set, rounded up
    pub fn test_size( &self, corpus_size: usize ) -> usize {
	let size = ( self.test_ratio * corpus_size as f64 ).ceil() as usize;
	size.min( corpus_size )
    }

    /// Returns (training set, test set). Together they hold every document of the corpus exactly once.
    pub fn split( &self, mut corpus: Corpus ) -> (Corpus, Corpus) {
	let mut rng = StdRng::seed_from_u64( self.seed );
	corpus.shuffle( &mut rng );

	let test_size = self.test_size( corpus.len() );
	let training = corpus.split_off( test_size );
	let test = corpus;
	debug!( "Split {} documents into {} training and {} test", training.len() + test.len(), training.len(), test.len() );
	(training, test)
    }
}
