use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ClassifierError, Label, PerClass, Result, TokenId};

use super::TrainingCounts;

/// How to estimate a class without training documents.
///
/// A class whose documents are all empty always falls back to the floor.
#[derive( Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum )]
#[serde( rename_all = "lowercase" )]
pub enum EmptyClassPolicy {
    /// every token of the class gets the floor probability
    #[default]
    Floor,
    /// refuse to fit
    Reject,
}

/// Probability of every vocabulary token under one class.
///
/// Tokens the class saw get their relative frequency, all others the floor.
/// The floor is not taken out of the observed mass, so the table is not a
/// normalized distribution once floors are mixed in.
#[derive( Debug, Clone, PartialEq )]
pub struct LikelihoodTable {
    probabilities: Vec<f64>,
    log_probabilities: Vec<f64>,
    floor: f64,
}

/// Converts the per-class counts into likelihood tables covering the whole vocabulary.
pub fn estimate_likelihoods( counts: &TrainingCounts, floor: f64, policy: EmptyClassPolicy ) -> Result<PerClass<LikelihoodTable>> {
    if !( floor > 0.0 && floor <= 1.0 ) {
	return Err( ClassifierError::InvalidFloor( floor ));
    }

    let estimate = | label: Label | -> Result<LikelihoodTable> {
	let frequencies = &counts.frequencies[ label ];
	let total = frequencies.get_total();
	if counts.documents[ label ] == 0 {
	    match policy {
		EmptyClassPolicy::Reject => return Err( ClassifierError::EmptyTrainingClass( label )),
		EmptyClassPolicy::Floor => warn!( "Class {label} has no training documents, every token gets the floor {floor:e}" ),
	    }
	} else if total == 0 {
	    warn!( "Class {label} has only empty documents, every token gets the floor {floor:e}" );
	}

	// a class without tokens has no counts, so every lookup misses and no division happens
	let probabilities: Vec<f64> = ( 0 .. counts.vocabulary.len() )
	    .map( |id| match frequencies.get_count( id ) {
		Some( count ) => count as f64 / total as f64,
		None => floor,
	    })
	    .collect();
	debug!( "Estimated {} likelihoods for {label} from {total} tokens", probabilities.len() );
	Ok( LikelihoodTable::new( probabilities, floor ))
    };

    let spam = estimate( Label::Spam )?;
    let ham = estimate( Label::Ham )?;
    Ok( PerClass::new( spam, ham ))
}

impl LikelihoodTable {
    /// Table of a model that has not been fitted, every lookup gives the floor
    pub fn empty( floor: f64 ) -> LikelihoodTable {
	LikelihoodTable::new( Vec::new(), floor )
    }

    fn new( probabilities: Vec<f64>, floor: f64 ) -> LikelihoodTable {
	let log_probabilities = probabilities.iter().map( |p| p.ln() ).collect();
	LikelihoodTable{ probabilities, log_probabilities, floor }
    }

    /// Probability of a vocabulary token. Ids outside the table get the floor.
    pub fn get_probability( &self, id: TokenId ) -> f64 {
	self.probabilities.get( id ).copied().unwrap_or( self.floor )
    }

    /// Natural log of the probability of a token, the floor for tokens outside the vocabulary
    pub fn get_log_probability( &self, id: Option<TokenId> ) -> f64 {
	id.and_then( |id| self.log_probabilities.get( id ).copied() )
	    .unwrap_or_else( || self.floor.ln() )
    }

    pub fn get_floor( &self ) -> f64 {
	self.floor
    }

    pub fn len( &self ) -> usize {
	self.probabilities.len()
    }

    pub fn is_empty( &self ) -> bool {
	self.probabilities.is_empty()
    }

    pub fn iter( &self ) -> impl Iterator<Item = (TokenId, f64)> + '_ {
	self.probabilities.iter().copied().enumerate()
    }
}
