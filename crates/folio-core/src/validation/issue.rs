use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "file-type")]
    FileType,
    #[serde(rename = "missing-headers")]
    MissingHeaders,
    #[serde(rename = "malformed-row")]
    MalformedRow,
    #[serde(rename = "out-of-range-weight")]
    OutOfRangeWeight,
    #[serde(rename = "duplicate-ticker")]
    DuplicateTicker,
    #[serde(rename = "empty-portfolio")]
    EmptyPortfolio,
    #[serde(rename = "weights-not-100")]
    WeightsNot100,
    #[serde(rename = "unknown-symbols")]
    UnknownSymbols,
    #[serde(rename = "large-portfolio")]
    LargePortfolio,
}

impl IssueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileType => "file-type",
            Self::MissingHeaders => "missing-headers",
            Self::MalformedRow => "malformed-row",
            Self::OutOfRangeWeight => "out-of-range-weight",
            Self::DuplicateTicker => "duplicate-ticker",
            Self::EmptyPortfolio => "empty-portfolio",
            Self::WeightsNot100 => "weights-not-100",
            Self::UnknownSymbols => "unknown-symbols",
            Self::LargePortfolio => "large-portfolio",
        }
    }

    /// Raised while reading the input or its rows, before any
    /// whole-portfolio check.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::FileType | Self::MissingHeaders | Self::MalformedRow | Self::OutOfRangeWeight
        )
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single error or warning. Errors and warnings share this shape; the list
/// an issue is placed in decides its severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}
