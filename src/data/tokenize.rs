
/// Turns raw message text into a sequence of tokens.
pub trait Tokenizer {
    fn tokenize( &self, text: &str ) -> Vec<String>;
}

/// Strips ASCII punctuation, lowercases and splits on whitespace.
#[derive( Debug, Clone, Copy, Default )]
pub struct PunctuationTokenizer;

impl Tokenizer for PunctuationTokenizer {
    fn tokenize( &self, text: &str ) -> Vec<String> {
	// punctuation is removed, not replaced, so "don't" becomes "dont"
	let stripped: String = text.chars()
	    .filter( |c| !c.is_ascii_punctuation() )
	    .collect();
	stripped.to_lowercase()
	    .split_whitespace()
	    .map( String::from )
	    .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tokenize() {
	let tokens = PunctuationTokenizer.tokenize( "WINNER!! Claim your £900 prize, now: don't-wait." );
	assert_eq!( tokens, vec!( "winner", "claim", "your", "£900", "prize", "now", "dontwait" ));
    }

    #[test]
    fn test_tokenize_blank() {
	assert!( PunctuationTokenizer.tokenize( "" ).is_empty() );
	assert!( PunctuationTokenizer.tokenize( " ... ?! \n" ).is_empty() );
    }

    #[test]
    fn test_tokenize_keeps_repeats() {
	let tokens = PunctuationTokenizer.tokenize( "Free free FREE" );
	assert_eq!( tokens, vec!( "free", "free", "free" ));
    }
}
