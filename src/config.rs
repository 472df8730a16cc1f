//! Run configuration shared by the library and the binaries.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{EmptyClassPolicy, FLOOR};
use crate::{ClassifierError, Result};

/// Settings of one train/evaluate run. Every field has a default, so a JSON
/// file only needs to name the settings it changes.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( default )]
pub struct ClassifierConfig {
    /// Probability used for tokens a class has never seen
    pub floor: f64,
    /// What to do when a class has no training documents
    pub empty_class_policy: EmptyClassPolicy,
    /// Fraction of the corpus held out for testing
    pub test_ratio: f64,
    /// Seed of the shuffle before splitting
    pub seed: u64,
    /// Header of the label column
    pub label_column: String,
    /// Header of the raw text column
    pub text_column: String,
    /// Classify test documents with rayon
    pub parallel: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
	ClassifierConfig{
	    floor: FLOOR,
	    empty_class_policy: EmptyClassPolicy::Floor,
	    test_ratio: 0.3,
	    seed: 42,
	    label_column: "v1".to_string(),
	    text_column: "v2".to_string(),
	    parallel: false,
	}
    }
}

impl ClassifierConfig {
    pub fn from_json_file<P: AsRef<Path>>( path: P ) -> Result<ClassifierConfig> {
	let reader = BufReader::new( File::open( path )? );
	let config: ClassifierConfig = serde_json::from_reader( reader )?;
	config.validate()?;
	Ok( config )
    }

    /// Checks the numeric settings
    pub fn validate( &self ) -> Result<()> {
	if !( self.floor > 0.0 && self.floor <= 1.0 ) {
	    return Err( ClassifierError::InvalidFloor( self.floor ));
	}
	if !( 0.0 ..= 1.0 ).contains( &self.test_ratio ) {
	    return Err( ClassifierError::InvalidRatio( self.test_ratio ));
	}
	Ok( () )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_json() {
	let config: ClassifierConfig = serde_json::from_str( r#"{ "seed": 7, "empty_class_policy": "reject" }"# ).unwrap();
	assert_eq!( config.seed, 7 );
	assert_eq!( config.empty_class_policy, EmptyClassPolicy::Reject );
	assert_eq!( config.floor, 1e-5 );
	assert_eq!( config.label_column, "v1" );
	assert!( config.validate().is_ok() );
    }

    #[test]
    fn test_validate() {
	let mut config = ClassifierConfig::default();
	config.floor = 0.0;
	assert!( matches!( config.validate(), Err( ClassifierError::InvalidFloor( _ ))));

	let mut config = ClassifierConfig::default();
	config.test_ratio = 2.0;
	assert!( matches!( config.validate(), Err( ClassifierError::InvalidRatio( _ ))));
    }
}
