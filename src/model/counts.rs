use rustc_hash::FxHashMap;

use crate::{Count, Document, Label, PerClass, TokenId};

/// Distinct tokens of the training set. Ids are handed out in order of first occurrence.
#[derive( Debug, Clone, Default, PartialEq )]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: FxHashMap<String, TokenId>,
}

/// Occurrences of each token across all training documents of one class.
#[derive( Debug, Clone, Default, PartialEq )]
pub struct FrequencyTable {
    counts: FxHashMap<TokenId, Count>,
    /// sum over all counts
    total: Count,
}

/// Everything a single pass over the training set yields
#[derive( Debug, Clone, Default, PartialEq )]
pub struct TrainingCounts {
    pub vocabulary: Vocabulary,
    pub frequencies: PerClass<FrequencyTable>,
    /// number of training documents per class
    pub documents: PerClass<Count>,
}

/// Builds the vocabulary and per-class token counts in one pass.
/// Every occurrence counts, so a token repeated in a document is counted repeatedly.
pub fn count_frequencies <'a, I> ( documents: I ) -> TrainingCounts where I: IntoIterator<Item = &'a Document> {
    let mut counts = TrainingCounts::default();
    for document in documents {
	let label = document.get_label();
	counts.documents[ label ] += 1;
	for token in document.get_tokens() {
	    let id = counts.vocabulary.insert( token );
	    counts.frequencies[ label ].increment( id );
	}
    }
    counts
}

impl Vocabulary {
    pub fn new() -> Vocabulary {
	Vocabulary::default()
    }

    /// Returns the id of the token, adding it if new
    pub fn insert( &mut self, token: &str ) -> TokenId {
	if let Some( id ) = self.ids.get( token ) {
	    return *id;
	}
	let id = self.tokens.len();
	self.tokens.push( token.to_string() );
	self.ids.insert( token.to_string(), id );
	id
    }

    pub fn get_id( &self, token: &str ) -> Option<TokenId> {
	self.ids.get( token ).copied()
    }

    pub fn get_token( &self, id: TokenId ) -> Option<&str> {
	self.tokens.get( id ).map( |t| t.as_str() )
    }

    pub fn contains( &self, token: &str ) -> bool {
	self.ids.contains_key( token )
    }

    pub fn len( &self ) -> usize {
	self.tokens.len()
    }

    pub fn is_empty( &self ) -> bool {
	self.tokens.is_empty()
    }

    /// Iterates (id, token) in id order
    pub fn iter( &self ) -> impl Iterator<Item = (TokenId, &str)> + '_ {
	self.tokens.iter().enumerate().map( |(id, t)| (id, t.as_str()) )
    }
}

impl FrequencyTable {
    pub fn increment( &mut self, id: TokenId ) {
	*self.counts.entry( id ).or_insert( 0 ) += 1;
	self.total += 1;
    }

    /// None if the class never saw the token
    pub fn get_count( &self, id: TokenId ) -> Option<Count> {
	self.counts.get( &id ).copied()
    }

    pub fn get_total( &self ) -> Count {
	self.total
    }

    /// Number of distinct tokens
    pub fn len( &self ) -> usize {
	self.counts.len()
    }

    pub fn is_empty( &self ) -> bool {
	self.counts.is_empty()
    }

    pub fn iter( &self ) -> impl Iterator<Item = (TokenId, Count)> + '_ {
	self.counts.iter().map( |(id, count)| (*id, *count) )
    }
}

impl TrainingCounts {
    pub fn get_number_documents( &self ) -> Count {
	self.documents.spam + self.documents.ham
    }

    /// Fraction of training documents per class. A missing class gets 0.
    pub fn priors( &self ) -> PerClass<f64> {
	let n = self.get_number_documents();
	self.documents.map( |count| {
	    if n == 0 { 0.0 } else { *count as f64 / n as f64 }
	})
    }

    /// Count of the token in the class, by token text
    pub fn get_count( &self, label: Label, token: &str ) -> Option<Count> {
	self.vocabulary.get_id( token ).and_then( |id| self.frequencies[ label ].get_count( id ))
    }
}
