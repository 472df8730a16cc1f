use crate::*;
use crate::io::PrettyFormatter;

/// Lists the priors and the most likely tokens of each class.
pub struct NaiveBayesFormatter {
    top_tokens: usize,
}

impl PrettyFormatter<NaiveBayes> for NaiveBayesFormatter {

    fn format_pretty( &self, model: &NaiveBayes ) -> String {
	let mut output = String::new();
	output.push( '\n' ); // so output begins on a new line

	for label in Label::ALL {
	    output = join_lines( output, format_class( label, model.get_priors()[ label ] ));
	    let table = model.get_likelihoods( label );
	    let frequencies = model.get_frequencies( label );
	    // only tokens the class saw, the others all share the floor
	    let mut ranked: Vec<(TokenId, &str, f64)> = model.get_vocabulary().iter()
		.filter( |(id, _)| frequencies.get_count( *id ).is_some() )
		.map( |(id, token)| (id, token, table.get_probability( id )) )
		.collect();
	    ranked.sort_by( |left, right| right.2.total_cmp( &left.2 ).then( left.0.cmp( &right.0 )));

	    output = ranked.iter()
		.take( self.top_tokens )
		.map( |(_, token, probability)| format_token( token, *probability ))
		.fold( output, join_lines );
	}
	output
    }
}

fn format_class( label: Label, prior: f64 ) -> String {
    format!( "{label}  prior {prior:.4}" )
}

fn format_token( token: &str, probability: f64 ) -> String {
    format!( "  {token:<20} {probability:.5}" )
}

fn join_lines( mut accumulator: String, addition: String ) -> String {
    accumulator.push_str( addition.as_str() );
    accumulator.push( '\n' );
    accumulator
}

impl NaiveBayesFormatter {
    pub fn new( top_tokens: usize ) -> NaiveBayesFormatter {
	NaiveBayesFormatter{ top_tokens }
    }
}
