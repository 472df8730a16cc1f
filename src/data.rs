use std::fmt;
use std::ops::{Index, IndexMut};

use serde::Serialize;

pub mod split;
pub mod tokenize;

pub use split::Splitter;
pub use tokenize::{Tokenizer, PunctuationTokenizer};

pub type Count = u64;
/// Dense id of a token in the vocabulary
pub type TokenId = usize;

/// The two classes a message can belong to.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize )]
#[serde( rename_all = "lowercase" )]
pub enum Label {
    Spam,
    Ham,
}

/// A labeled message after tokenization. Read-only once built.
#[derive( Debug, Clone, PartialEq )]
pub struct Document {
    label: Label,
    tokens: Vec<String>,
}

pub type Corpus = Vec<Document>;

/// One value per class, addressable by label.
#[derive( Debug, Clone, Default, PartialEq, Serialize )]
pub struct PerClass<T> {
    pub spam: T,
    pub ham: T,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Spam, Label::Ham];

    /// Recognizes the exact corpus spellings `spam` and `ham`.
    pub fn parse( cell: &str ) -> Option<Label> {
	match cell.trim() {
	    "spam" => Some( Label::Spam ),
	    "ham" => Some( Label::Ham ),
	    _ => None,
	}
    }

    pub fn as_str( &self ) -> &'static str {
	match self {
	    Label::Spam => "spam",
	    Label::Ham => "ham",
	}
    }
}

impl fmt::Display for Label {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
	f.write_str( self.as_str() )
    }
}

impl Document {
    pub fn new( label: Label, tokens: Vec<String> ) -> Document {
	Document{ label, tokens }
    }

    /// Shorthand for tests and synthetic corpora
    pub fn from_words( label: Label, words: &[&str] ) -> Document {
	Document::new( label, words.iter().map( |w| w.to_string() ).collect() )
    }

    pub fn get_label( &self ) -> Label {
	self.label
    }

    pub fn get_tokens( &self ) -> &[String] {
	&self.tokens
    }
}

impl <T> PerClass<T> {
    pub fn new( spam: T, ham: T ) -> PerClass<T> {
	PerClass{ spam, ham }
    }

    pub fn map <U, F> ( &self, mut f: F ) -> PerClass<U> where F: FnMut( &T ) -> U {
	PerClass{
	    spam: f( &self.spam ),
	    ham: f( &self.ham ),
	}
    }
}

impl <T> Index<Label> for PerClass<T> {
    type Output = T;

    fn index( &self, label: Label ) -> &T {
	match label {
	    Label::Spam => &self.spam,
	    Label::Ham => &self.ham,
	}
    }
}

impl <T> IndexMut<Label> for PerClass<T> {
    fn index_mut( &mut self, label: Label ) -> &mut T {
	match label {
	    Label::Spam => &mut self.spam,
	    Label::Ham => &mut self.ham,
	}
    }
}
