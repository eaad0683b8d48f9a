use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resource_kind::ResourceKind;
use super::status::OsStatus;

/// Native status codes, grouped by the header that declares them.
pub mod codes {
    use crate::models::status::OsStatus;

    // CoreAudioBaseTypes.h
    pub const UNIMPLEMENTED: OsStatus = OsStatus(-4);
    pub const FILE_NOT_FOUND: OsStatus = OsStatus(-43);
    pub const FILE_PERMISSION: OsStatus = OsStatus(-54);
    pub const TOO_MANY_FILES_OPEN: OsStatus = OsStatus(-42);
    pub const BAD_FILE_PATH: OsStatus = OsStatus::from_fourcc(b"!pth");
    pub const PARAM: OsStatus = OsStatus(-50);
    pub const MEM_FULL: OsStatus = OsStatus(-108);

    // AudioConverter.h
    pub const CONVERTER_FORMAT_NOT_SUPPORTED: OsStatus = OsStatus::from_fourcc(b"fmt?");
    pub const CONVERTER_OPERATION_NOT_SUPPORTED: OsStatus = OsStatus(0x6F70_3F3F);
    pub const CONVERTER_PROPERTY_NOT_SUPPORTED: OsStatus = OsStatus::from_fourcc(b"prop");
    pub const CONVERTER_INVALID_INPUT_SIZE: OsStatus = OsStatus::from_fourcc(b"insz");
    pub const CONVERTER_INVALID_OUTPUT_SIZE: OsStatus = OsStatus::from_fourcc(b"otsz");
    pub const CONVERTER_UNSPECIFIED: OsStatus = OsStatus::from_fourcc(b"what");
    pub const CONVERTER_BAD_PROPERTY_SIZE: OsStatus = OsStatus::from_fourcc(b"!siz");
    pub const CONVERTER_REQUIRES_PACKET_DESCRIPTIONS: OsStatus = OsStatus::from_fourcc(b"!pkd");
    pub const CONVERTER_INPUT_SAMPLE_RATE_OUT_OF_RANGE: OsStatus = OsStatus::from_fourcc(b"!isr");
    pub const CONVERTER_OUTPUT_SAMPLE_RATE_OUT_OF_RANGE: OsStatus = OsStatus::from_fourcc(b"!osr");

    // AudioFile.h
    pub const FILE_UNSPECIFIED: OsStatus = OsStatus::from_fourcc(b"wht?");
    pub const FILE_UNSUPPORTED_FILE_TYPE: OsStatus = OsStatus::from_fourcc(b"typ?");
    pub const FILE_UNSUPPORTED_DATA_FORMAT: OsStatus = OsStatus::from_fourcc(b"fmt?");
    pub const FILE_UNSUPPORTED_PROPERTY: OsStatus = OsStatus::from_fourcc(b"pty?");
    pub const FILE_BAD_PROPERTY_SIZE: OsStatus = OsStatus::from_fourcc(b"!siz");
    pub const FILE_PERMISSIONS: OsStatus = OsStatus::from_fourcc(b"prm?");
    pub const FILE_NOT_OPTIMIZED: OsStatus = OsStatus::from_fourcc(b"optm");
    pub const FILE_INVALID_CHUNK: OsStatus = OsStatus::from_fourcc(b"chk?");
    pub const FILE_DOES_NOT_ALLOW_64BIT_DATA_SIZE: OsStatus = OsStatus::from_fourcc(b"off?");
    pub const FILE_INVALID_PACKET_OFFSET: OsStatus = OsStatus::from_fourcc(b"pck?");
    pub const FILE_INVALID_PACKET_DEPENDENCY: OsStatus = OsStatus::from_fourcc(b"dep?");
    pub const FILE_INVALID_FILE: OsStatus = OsStatus::from_fourcc(b"dta?");
    pub const FILE_OPERATION_NOT_SUPPORTED: OsStatus = OsStatus(0x6F70_3F3F);
    pub const FILE_NOT_OPEN: OsStatus = OsStatus(-38);
    pub const FILE_END_OF_FILE: OsStatus = OsStatus(-39);
    pub const FILE_POSITION: OsStatus = OsStatus(-40);

    // AUGraph.h
    pub const GRAPH_NODE_NOT_FOUND: OsStatus = OsStatus(-10860);
    pub const GRAPH_INVALID_CONNECTION: OsStatus = OsStatus(-10861);
    pub const GRAPH_OUTPUT_NODE: OsStatus = OsStatus(-10862);
    pub const GRAPH_CANNOT_DO_IN_CURRENT_CONTEXT: OsStatus = OsStatus(-10863);
    pub const GRAPH_INVALID_AUDIO_UNIT: OsStatus = OsStatus(-10864);

    // ExtendedAudioFile.h
    pub const EXT_FILE_INVALID_PROPERTY: OsStatus = OsStatus(-66561);
    pub const EXT_FILE_INVALID_PROPERTY_SIZE: OsStatus = OsStatus(-66562);
    pub const EXT_FILE_NON_PCM_CLIENT_FORMAT: OsStatus = OsStatus(-66563);
    pub const EXT_FILE_INVALID_CHANNEL_MAP: OsStatus = OsStatus(-66564);
    pub const EXT_FILE_INVALID_OPERATION_ORDER: OsStatus = OsStatus(-66565);
    pub const EXT_FILE_INVALID_DATA_FORMAT: OsStatus = OsStatus(-66566);
    pub const EXT_FILE_MAX_PACKET_SIZE_UNKNOWN: OsStatus = OsStatus(-66567);
    pub const EXT_FILE_INVALID_SEEK: OsStatus = OsStatus(-66568);
    pub const EXT_FILE_ASYNC_WRITE_TOO_LARGE: OsStatus = OsStatus(-66569);
    pub const EXT_FILE_ASYNC_WRITE_BUFFER_OVERFLOW: OsStatus = OsStatus(-66570);
}

/// The native API family a status code came from.
///
/// The same numeric code can mean different things in different families,
/// so messages are always looked up per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorDomain {
    AudioConverter,
    AudioFile,
    ExtAudioFile,
    AuGraph,
}

impl ErrorDomain {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AudioConverter => "AudioConverter",
            Self::AudioFile => "AudioFile",
            Self::ExtAudioFile => "ExtAudioFile",
            Self::AuGraph => "AUGraph",
        }
    }

    /// Human-readable description of `status` within this domain.
    pub fn message(&self, status: OsStatus) -> &'static str {
        use codes::*;

        if status.is_ok() {
            return "The function call completed successfully";
        }
        match status {
            UNIMPLEMENTED => return "Unimplemented core routine",
            FILE_NOT_FOUND => return "File not found",
            FILE_PERMISSION => {
                return "File cannot be opened due to either file, directory, or sandbox permissions"
            }
            TOO_MANY_FILES_OPEN => {
                return "File cannot be opened because too many files are already open"
            }
            BAD_FILE_PATH => return "File cannot be opened because the specified path is malformed",
            PARAM => return "Error in user parameter list",
            MEM_FULL => return "Not enough room in heap zone",
            _ => {}
        }

        match self {
            Self::AudioConverter => match status {
                CONVERTER_FORMAT_NOT_SUPPORTED => "The format is not supported",
                CONVERTER_OPERATION_NOT_SUPPORTED => "The operation is not supported",
                CONVERTER_PROPERTY_NOT_SUPPORTED => "The property is not supported",
                CONVERTER_INVALID_INPUT_SIZE => "The input size is invalid",
                CONVERTER_INVALID_OUTPUT_SIZE => "The output size is invalid",
                CONVERTER_UNSPECIFIED => "An unspecified error has occurred",
                CONVERTER_BAD_PROPERTY_SIZE => "The size of the property data was not correct",
                CONVERTER_REQUIRES_PACKET_DESCRIPTIONS => "Packet descriptions are required",
                CONVERTER_INPUT_SAMPLE_RATE_OUT_OF_RANGE => "The input sample rate is out of range",
                CONVERTER_OUTPUT_SAMPLE_RATE_OUT_OF_RANGE => "The output sample rate is out of range",
                _ => "Unknown AudioConverter error",
            },
            Self::AudioFile => match status {
                FILE_UNSPECIFIED => "An unspecified error has occurred",
                FILE_UNSUPPORTED_FILE_TYPE => "The file type is not supported",
                FILE_UNSUPPORTED_DATA_FORMAT => "The data format is not supported by this file type",
                FILE_UNSUPPORTED_PROPERTY => "The property is not supported",
                FILE_BAD_PROPERTY_SIZE => "The size of the property data was not correct",
                FILE_PERMISSIONS => "The operation violated the file permissions",
                FILE_NOT_OPTIMIZED => {
                    "There are chunks following the audio data chunk that prevent extending the audio data chunk"
                }
                FILE_INVALID_CHUNK => {
                    "The chunk does not exist in the file or is not supported by the file"
                }
                FILE_DOES_NOT_ALLOW_64BIT_DATA_SIZE => {
                    "The file offset was too large for the file type"
                }
                FILE_INVALID_PACKET_OFFSET => {
                    "A packet offset was past the end of the file, or not at the end of the file when writing a VBR format"
                }
                FILE_INVALID_PACKET_DEPENDENCY => {
                    "The packet dependency info necessary for the audio format has not been provided or is invalid"
                }
                FILE_INVALID_FILE => {
                    "The file is malformed, or otherwise not a valid instance of an audio file of its type"
                }
                FILE_OPERATION_NOT_SUPPORTED => "The operation cannot be performed",
                FILE_NOT_OPEN => "The file is closed",
                FILE_END_OF_FILE => "End of file",
                FILE_POSITION => "Invalid file position",
                _ => "Unknown AudioFile error",
            },
            Self::ExtAudioFile => match status {
                EXT_FILE_INVALID_PROPERTY => "The property is invalid",
                EXT_FILE_INVALID_PROPERTY_SIZE => "The size of the property data was not correct",
                EXT_FILE_NON_PCM_CLIENT_FORMAT => "The client format is not linear PCM",
                EXT_FILE_INVALID_CHANNEL_MAP => "Number of channels doesn't match format",
                EXT_FILE_INVALID_OPERATION_ORDER => "Operations were performed in an invalid order",
                EXT_FILE_INVALID_DATA_FORMAT => "The data format is invalid",
                EXT_FILE_MAX_PACKET_SIZE_UNKNOWN => "The maximum packet size is unknown",
                EXT_FILE_INVALID_SEEK => "Writing, or offset out of bounds",
                EXT_FILE_ASYNC_WRITE_TOO_LARGE => "The asynchronous write is too large",
                EXT_FILE_ASYNC_WRITE_BUFFER_OVERFLOW => {
                    "An async write could not be completed in time"
                }
                _ => "Unknown ExtAudioFile error",
            },
            Self::AuGraph => match status {
                GRAPH_NODE_NOT_FOUND => "The specified node cannot be found",
                GRAPH_INVALID_CONNECTION => {
                    "The attempted connection between two nodes cannot be made"
                }
                GRAPH_OUTPUT_NODE => "AUGraphs can only contain one OutputUnit",
                GRAPH_CANNOT_DO_IN_CURRENT_CONTEXT => "The required lock is held by another thread",
                GRAPH_INVALID_AUDIO_UNIT => "The audio unit is invalid",
                _ => "Unknown AUGraph error",
            },
        }
    }
}

impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn describe(domain: &ErrorDomain, status: &OsStatus) -> &'static str {
    domain.message(*status)
}

/// Errors surfaced by the handle layer.
///
/// Disposal during `Drop` never produces one of these; it is logged instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolboxError {
    #[error("{operation} failed: {} ({domain} error {status})", describe(.domain, .status))]
    Status {
        domain: ErrorDomain,
        status: OsStatus,
        operation: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no live {0} handle")]
    NullHandle(ResourceKind),
}

impl ToolboxError {
    /// The native status code, if this error came from a native call.
    pub fn status(&self) -> Option<OsStatus> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
