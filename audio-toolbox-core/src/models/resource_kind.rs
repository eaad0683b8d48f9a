use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ErrorDomain;

/// The four categories of native AudioToolbox resource this layer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// `AudioConverterRef`
    Converter,
    /// `AudioFileID`
    File,
    /// `ExtAudioFileRef`
    ExtendedFile,
    /// `AUGraph`
    ProcessingGraph,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        Self::Converter,
        Self::File,
        Self::ExtendedFile,
        Self::ProcessingGraph,
    ];

    /// Name of the native primitive that releases a handle of this kind.
    pub fn dispose_operation(&self) -> &'static str {
        match self {
            Self::Converter => "AudioConverterDispose",
            Self::File => "AudioFileClose",
            Self::ExtendedFile => "ExtAudioFileDispose",
            Self::ProcessingGraph => "DisposeAUGraph",
        }
    }

    /// Domain used to interpret status codes returned for this kind.
    pub fn error_domain(&self) -> ErrorDomain {
        match self {
            Self::Converter => ErrorDomain::AudioConverter,
            Self::File => ErrorDomain::AudioFile,
            Self::ExtendedFile => ErrorDomain::ExtAudioFile,
            Self::ProcessingGraph => ErrorDomain::AuGraph,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Converter => "converter",
            Self::File => "file",
            Self::ExtendedFile => "extended file",
            Self::ProcessingGraph => "processing graph",
        };
        f.write_str(name)
    }
}
