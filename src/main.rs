use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use spambayes::*;
use spambayes::io::{CorpusReader, PrettyFormatter, format_accuracy, write_report};
use spambayes::model::{EmptyClassPolicy, NaiveBayesFormatter};

/// Trains a naive Bayes spam filter on part of a labeled corpus and reports its accuracy on the rest.
#[derive( Parser, Debug )]
#[command( name = "classifier" )]
struct Args {
    /// CSV corpus with a header row
    #[arg( default_value = "./spam.csv" )]
    corpus: PathBuf,

    /// JSON file with settings, flags below take precedence
    #[arg( long )]
    config: Option<PathBuf>,

    /// Fraction of the corpus held out for testing
    #[arg( long )]
    test_ratio: Option<f64>,

    /// Seed of the shuffle before splitting
    #[arg( long )]
    seed: Option<u64>,

    /// Probability of tokens a class has never seen
    #[arg( long )]
    floor: Option<f64>,

    /// What to do when a class has no training documents
    #[arg( long, value_enum )]
    empty_class_policy: Option<EmptyClassPolicy>,

    /// Header of the label column
    #[arg( long )]
    label_column: Option<String>,

    /// Header of the text column
    #[arg( long )]
    text_column: Option<String>,

    /// Classify the test set on all cores
    #[arg( long )]
    parallel: bool,

    /// Print this many of the most likely tokens per class
    #[arg( long )]
    show_tokens: Option<usize>,

    /// Write the evaluation to this file as JSON
    #[arg( long )]
    report: Option<String>,

    /// Log debug output
    #[arg( short, long )]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    prepare_logging( args.verbose );

    let config = build_config( &args )?;
    info!( "Configuration {config:?}" );

    let corpus = CorpusReader::from_config( &config ).read_path( &args.corpus )?;
    let (model, evaluation) = evaluator::evaluate_corpus( &config, corpus )?;

    if let Some( top_tokens ) = args.show_tokens {
	println!( "{}", NaiveBayesFormatter::new( top_tokens ).format_pretty( &model ));
    }
    if let Some( path ) = &args.report {
	write_report( &evaluation, path )?;
	info!( "Wrote report to {path}" );
    }

    println!( "{}", format_accuracy( evaluation.accuracy ));
    Ok( () )
}

fn build_config( args: &Args ) -> Result<ClassifierConfig> {
    let mut config = match &args.config {
	Some( path ) => ClassifierConfig::from_json_file( path )?,
	None => ClassifierConfig::default(),
    };
    if let Some( ratio ) = args.test_ratio { config.test_ratio = ratio; }
    if let Some( seed ) = args.seed { config.seed = seed; }
    if let Some( floor ) = args.floor { config.floor = floor; }
    if let Some( policy ) = args.empty_class_policy { config.empty_class_policy = policy; }
    if let Some( column ) = &args.label_column { config.label_column = column.clone(); }
    if let Some( column ) = &args.text_column { config.text_column = column.clone(); }
    config.parallel |= args.parallel;
    config.validate()?;
    Ok( config )
}

fn prepare_logging( verbose: bool ) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let tracer = tracing_subscriber::fmt::fmt()
        .with_max_level( level )
        .with_writer( std::io::stderr )
        .finish();
    if tracing::subscriber::set_global_default( tracer ).is_err() {
	eprintln!( "logging was already initialized" );
    }
}
