use thiserror::Error;

/// Failure while loading embedded data or user configuration.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reaction '{reaction}' has no stages")]
    NoStages { reaction: String },

    #[error("reaction '{reaction}' stage {stage} has no atoms")]
    EmptyStage { reaction: String, stage: usize },

    #[error("reaction '{reaction}' stage {stage} uses unknown element '{symbol}'")]
    UnknownElement {
        reaction: String,
        stage: usize,
        symbol: String,
    },

    #[error("reaction '{reaction}' stage {stage} repeats atom id '{atom}'")]
    DuplicateAtom {
        reaction: String,
        stage: usize,
        atom: String,
    },

    #[error("reaction '{reaction}' stage {stage} bonds unknown atom '{atom}'")]
    DanglingBond {
        reaction: String,
        stage: usize,
        atom: String,
    },

    #[error("duplicate element symbol '{0}' in periodic table data")]
    DuplicateSymbol(String),

    #[error("embedded data has no {0}")]
    MissingDefault(&'static str),
}

/// A name from the UI layer that does not map to any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = DataError::DanglingBond {
            reaction: "water-formation".into(),
            stage: 2,
            atom: "h9".into(),
        };
        assert_eq!(
            err.to_string(),
            "reaction 'water-formation' stage 2 bonds unknown atom 'h9'"
        );

        let err = ParseNameError::new("sandbox element", "Xx");
        assert_eq!(err.to_string(), "unknown sandbox element 'Xx'");
    }

    #[test]
    fn json_errors_convert() {
        let raw = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataError = raw.into();
        assert!(matches!(err, DataError::Json(_)));
    }
}
