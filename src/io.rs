use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use csv::{ByteRecord, ReaderBuilder};
use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::data::{Tokenizer, PunctuationTokenizer};
use crate::{ClassifierConfig, ClassifierError, Corpus, Document, Label, Result};

/// Converts a structure into a string
pub trait PrettyFormatter<T> {
    fn format_pretty( &self, object: &T ) -> String;
}

/// Reads a labeled corpus from CSV with a header row.
///
/// Label and text columns are picked by header name, all other columns are
/// ignored. Cells are decoded as Latin-1, so any byte sequence is accepted.
/// Repeated (label, text) rows are kept only once.
pub struct CorpusReader<T: Tokenizer> {
    label_column: String,
    text_column: String,
    tokenizer: T,
}

/// What happened to the rows of a corpus file
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq )]
pub struct ReadSummary {
    pub rows: usize,
    pub kept: usize,
    pub duplicates: usize,
    pub unknown_labels: usize,
    pub short_rows: usize,
}

impl CorpusReader<PunctuationTokenizer> {
    pub fn new( label_column: &str, text_column: &str ) -> CorpusReader<PunctuationTokenizer> {
	CorpusReader::with_tokenizer( label_column, text_column, PunctuationTokenizer )
    }

    pub fn from_config( config: &ClassifierConfig ) -> CorpusReader<PunctuationTokenizer> {
	CorpusReader::new( &config.label_column, &config.text_column )
    }
}

impl <T: Tokenizer> CorpusReader<T> {
    pub fn with_tokenizer( label_column: &str, text_column: &str, tokenizer: T ) -> CorpusReader<T> {
	CorpusReader{
	    label_column: label_column.to_string(),
	    text_column: text_column.to_string(),
	    tokenizer,
	}
    }

    pub fn read_path<P: AsRef<Path>>( &self, path: P ) -> Result<Corpus> {
	let file = File::open( path )?;
	self.read( BufReader::new( file ))
    }

    pub fn read<R: Read>( &self, reader: R ) -> Result<Corpus> {
	let (corpus, summary) = self.read_with_summary( reader )?;
	info!( "Read {} documents from {} rows ({} duplicates, {} unknown labels, {} short rows dropped)",
	       summary.kept, summary.rows, summary.duplicates, summary.unknown_labels, summary.short_rows );
	Ok( corpus )
    }

    pub fn read_with_summary<R: Read>( &self, reader: R ) -> Result<(Corpus, ReadSummary)> {
	let mut csv_reader = ReaderBuilder::new()
	    .has_headers( true )
	    .flexible( true )
	    .from_reader( reader );
	let headers = csv_reader.byte_headers()?.clone();
	let label_index = find_column( &headers, &self.label_column )?;
	let text_index = find_column( &headers, &self.text_column )?;

	let mut summary = ReadSummary::default();
	let mut seen: FxHashSet<(Label, String)> = FxHashSet::default();
	let mut corpus = Corpus::new();
	for record in csv_reader.byte_records() {
	    let record = record?;
	    summary.rows += 1;
	    let (label_cell, text_cell) = match ( record.get( label_index ), record.get( text_index )) {
		(Some( label ), Some( text )) => (decode_latin1( label ), decode_latin1( text )),
		_ => {
		    warn!( "Row {} has only {} fields", summary.rows, record.len() );
		    summary.short_rows += 1;
		    continue;
		}
	    };
	    let label = match Label::parse( &label_cell ) {
		Some( label ) => label,
		None => {
		    warn!( "Row {} has unknown label {label_cell:?}", summary.rows );
		    summary.unknown_labels += 1;
		    continue;
		}
	    };
	    if !seen.insert( (label, text_cell.clone()) ) {
		summary.duplicates += 1;
		continue;
	    }
	    let tokens = self.tokenizer.tokenize( &text_cell );
	    corpus.push( Document::new( label, tokens ));
	}
	summary.kept = corpus.len();
	Ok( (corpus, summary) )
    }
}

fn find_column( headers: &ByteRecord, name: &str ) -> Result<usize> {
    headers.iter()
	.position( |cell| decode_latin1( cell ).trim() == name )
	.ok_or_else( || ClassifierError::MissingColumn( name.to_string() ))
}

/// Every byte is the code point of the same value
pub fn decode_latin1( bytes: &[u8] ) -> String {
    bytes.iter().map( |b| *b as char ).collect()
}

/// Writes a serializeable report to a file as JSON
pub fn write_report<S: serde::Serialize>( report: &S, path: &str ) -> Result<()> {
    let file = File::create( Path::new( path ))?;
    let mut writer = BufWriter::new( file );
    serde_json::to_writer_pretty( &mut writer, report )?;
    writeln!( writer )?;
    writer.flush()?;
    Ok( () )
}

/// Accuracy for display, rounded to two decimals
pub fn format_accuracy( accuracy: f64 ) -> String {
    format!( "Accuracy: {accuracy:.2}%" )
}

#[cfg(test)]
mod test {
    use super::*;

    fn words( document: &Document ) -> Vec<&str> {
	document.get_tokens().iter().map( |t| t.as_str() ).collect()
    }

    #[test]
    fn test_read_sms_layout() {
	// trailing unnamed columns as in the public SMS corpus, 0xA3 is the pound sign in Latin-1
	let mut data: Vec<u8> = b"v1,v2,,,\nham,\"Ok lar... Joking wif u oni...\",,,\nspam,\"WINNER!! claim \xA3900, now\",,,\n".to_vec();
	data.extend_from_slice( b"ham,\"Ok lar... Joking wif u oni...\",,,\n" );
	data.extend_from_slice( b"unknown,whatever,,,\n" );
	data.extend_from_slice( b"ham\n" );

	let reader = CorpusReader::new( "v1", "v2" );
	let (corpus, summary) = reader.read_with_summary( data.as_slice() ).unwrap();

	assert_eq!( corpus.len(), 2 );
	assert_eq!( corpus[ 0 ].get_label(), Label::Ham );
	assert_eq!( words( &corpus[ 0 ] ), vec!( "ok", "lar", "joking", "wif", "u", "oni" ));
	assert_eq!( corpus[ 1 ].get_label(), Label::Spam );
	assert_eq!( words( &corpus[ 1 ] ), vec!( "winner", "claim", "£900", "now" ));

	assert_eq!( summary, ReadSummary{ rows: 5, kept: 2, duplicates: 1, unknown_labels: 1, short_rows: 1 } );
    }

    #[test]
    fn test_same_text_different_label() {
	let data = "label,text\nspam,hello there\nham,hello there\n";
	let corpus = CorpusReader::new( "label", "text" ).read( data.as_bytes() ).unwrap();
	assert_eq!( corpus.len(), 2 );
    }

    #[test]
    fn test_missing_column() {
	let data = "v1,v2\nham,hi\n";
	let result = CorpusReader::new( "label", "v2" ).read( data.as_bytes() );
	assert!( matches!( result, Err( ClassifierError::MissingColumn( ref name )) if name == "label" ));
    }

    #[test]
    fn test_format_accuracy() {
	assert_eq!( format_accuracy( 100.0 ), "Accuracy: 100.00%" );
	assert_eq!( format_accuracy( 200.0 / 3.0 ), "Accuracy: 66.67%" );
    }
}
