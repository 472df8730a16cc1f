use thiserror::Error;

use crate::Label;

/// Failures surfaced by training, evaluation and corpus handling.
#[derive( Error, Debug )]
pub enum ClassifierError {
    /// A class has no training documents and the policy forbids falling back to the floor
    #[error( "class '{0}' has no training documents" )]
    EmptyTrainingClass( Label ),

    #[error( "accuracy requested for an empty test set" )]
    EmptyTestSet,

    #[error( "got {predictions} predictions for {documents} test documents" )]
    PredictionMismatch { predictions: usize, documents: usize },

    #[error( "test ratio {0} is outside [0, 1]" )]
    InvalidRatio( f64 ),

    #[error( "floor probability {0} is outside (0, 1]" )]
    InvalidFloor( f64 ),

    #[error( "column '{0}' is missing from the corpus header" )]
    MissingColumn( String ),

    #[error( "I/O error: {0}" )]
    Io( #[from] std::io::Error ),

    #[error( "CSV error: {0}" )]
    Csv( #[from] csv::Error ),

    #[error( "JSON error: {0}" )]
    Json( #[from] serde_json::Error ),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
