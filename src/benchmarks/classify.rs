use tracing::{info, warn};
use tracing_subscriber;

use rand::prelude::*;
use rand::rngs::StdRng;
use statrs::distribution::DiscreteUniform;

use std::time::*;

use spambayes::*;
use spambayes::evaluator::classify;

fn main() -> std::result::Result<(), String> {
    prepare_logging();

    let vocabulary_size = 20000;
    let training = generate_corpus( 20000, vocabulary_size, 1 )?;
    let test = generate_corpus( 5000, vocabulary_size, 2 )?;

    let model = benchmark_training( &training )?;
    benchmark_classification( &model, &test );

    Ok( () )
}

fn benchmark_training( training: &[Document] ) -> std::result::Result<NaiveBayes, String> {
    let start = Instant::now();
    let model = NaiveBayes::train( &ClassifierConfig::default(), training ).map_err( |e| e.to_string() )?;
    info!( "Training on {} documents took {}ms", training.len(), start.elapsed().as_millis() );
    Ok( model )
}

fn benchmark_classification( model: &NaiveBayes, test: &[Document] ) {
    info!( "Start benchmark: sequential classification" );
    let start = Instant::now();
    let sequential = classify( model, test, false );
    info!( "Result: {} documents took {}ms", test.len(), start.elapsed().as_millis() );

    info!( "Start benchmark: parallel classification" );
    let start = Instant::now();
    let parallel = classify( model, test, true );
    info!( "Result: {} documents took {}ms", test.len(), start.elapsed().as_millis() );

    if sequential != parallel {
	warn!( "Parallel predictions differ from sequential ones" );
    }

    // documents where the plain product can not tell the classes apart anymore
    let underflows = test.iter()
	.map( |document| model.product_scores( document.get_tokens() ))
	.filter( |scores| scores.spam == 0.0 && scores.ham == 0.0 )
	.count();
    info!( "{underflows} of {} documents underflow without logs", test.len() );

    match evaluator::accuracy( &sequential, test ) {
	Ok( accuracy ) => info!( "{}", io::format_accuracy( accuracy )),
	Err( err ) => warn!( "{err}" ),
    }
}

/// Spam draws words from the lower part of the vocabulary, ham from the upper part. The middle is shared.
fn generate_corpus( size: usize, vocabulary_size: i64, seed: u64 ) -> std::result::Result<Corpus, String> {
    let mut gen = StdRng::seed_from_u64( seed );
    let length_distribution = DiscreteUniform::new( 1, 300 ).map_err( |e| e.to_string() )?;
    let overlap = vocabulary_size / 5;
    let spam_words = DiscreteUniform::new( 0, ( vocabulary_size + overlap ) / 2 ).map_err( |e| e.to_string() )?;
    let ham_words = DiscreteUniform::new( ( vocabulary_size - overlap ) / 2, vocabulary_size - 1 ).map_err( |e| e.to_string() )?;

    let mut corpus = Corpus::with_capacity( size );
    for _ in 0 .. size {
	let (label, words) = if gen.gen_bool( 0.15 ) { (Label::Spam, &spam_words) } else { (Label::Ham, &ham_words) };
	let length = length_distribution.sample( &mut gen ) as usize;
	let tokens: Vec<String> = ( 0 .. length )
	    .map( |_| format!( "w{}", words.sample( &mut gen ) as i64 ))
	    .collect();
	corpus.push( Document::new( label, tokens ));
    }
    Ok( corpus )
}

fn prepare_logging() {
    let tracer = tracing_subscriber::fmt::fmt()
        .with_max_level( tracing_subscriber::filter::LevelFilter::INFO )
        .finish();
    tracing::subscriber::set_global_default( tracer ).unwrap();
}
