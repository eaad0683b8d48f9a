use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::{fourcc, fourcc_string};

pub const FORMAT_LINEAR_PCM: u32 = fourcc(b"lpcm");

pub const FORMAT_FLAG_IS_FLOAT: u32 = 1 << 0;
pub const FORMAT_FLAG_IS_BIG_ENDIAN: u32 = 1 << 1;
pub const FORMAT_FLAG_IS_SIGNED_INTEGER: u32 = 1 << 2;
pub const FORMAT_FLAG_IS_PACKED: u32 = 1 << 3;
pub const FORMAT_FLAG_IS_NON_INTERLEAVED: u32 = 1 << 5;

/// Audio data format passed to the native create primitives.
///
/// Layout-compatible with `AudioStreamBasicDescription`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct StreamDescription {
    pub sample_rate: f64,
    pub format_id: u32,
    pub format_flags: u32,
    pub bytes_per_packet: u32,
    pub frames_per_packet: u32,
    pub bytes_per_frame: u32,
    pub channels_per_frame: u32,
    pub bits_per_channel: u32,
    #[serde(skip)]
    pub reserved: u32,
}

impl StreamDescription {
    /// Interleaved, packed, native-endian 32-bit float PCM.
    pub fn pcm_f32(sample_rate: f64, channels: u32) -> Self {
        Self::packed_pcm(sample_rate, channels, 32, FORMAT_FLAG_IS_FLOAT)
    }

    /// Interleaved, packed, native-endian signed 16-bit PCM.
    pub fn pcm_i16(sample_rate: f64, channels: u32) -> Self {
        Self::packed_pcm(sample_rate, channels, 16, FORMAT_FLAG_IS_SIGNED_INTEGER)
    }

    fn packed_pcm(sample_rate: f64, channels: u32, bits: u32, sample_flag: u32) -> Self {
        let mut flags = sample_flag | FORMAT_FLAG_IS_PACKED;
        if cfg!(target_endian = "big") {
            flags |= FORMAT_FLAG_IS_BIG_ENDIAN;
        }
        let bytes_per_frame = (bits / 8).saturating_mul(channels);
        Self {
            sample_rate,
            format_id: FORMAT_LINEAR_PCM,
            format_flags: flags,
            bytes_per_packet: bytes_per_frame,
            frames_per_packet: 1,
            bytes_per_frame,
            channels_per_frame: channels,
            bits_per_channel: bits,
            reserved: 0,
        }
    }

    pub fn is_linear_pcm(&self) -> bool {
        self.format_id == FORMAT_LINEAR_PCM
    }

    pub fn is_interleaved(&self) -> bool {
        self.format_flags & FORMAT_FLAG_IS_NON_INTERLEAVED == 0
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.sample_rate.is_finite() || self.sample_rate < 0.0 {
            return Err(format!("invalid sample rate: {}", self.sample_rate));
        }
        if self.channels_per_frame == 0 {
            return Err("channel count must be non-zero".into());
        }
        if !self.is_linear_pcm() {
            // Encoded formats may leave most fields zero for the codec to fill in.
            return Ok(());
        }
        if self.sample_rate == 0.0 {
            return Err("sample rate must be positive for linear PCM".into());
        }
        if self.bits_per_channel == 0 {
            return Err("bits per channel must be non-zero for linear PCM".into());
        }
        if self.format_flags & FORMAT_FLAG_IS_PACKED != 0 {
            let channels = if self.is_interleaved() {
                self.channels_per_frame
            } else {
                1
            };
            let expected = (self.bits_per_channel / 8).checked_mul(channels).ok_or_else(|| {
                format!(
                    "frame size of {} bits x {} channels overflows",
                    self.bits_per_channel, channels
                )
            })?;
            if self.bytes_per_frame != expected {
                return Err(format!(
                    "bytes per frame {} inconsistent with {} bits x {} channels",
                    self.bytes_per_frame, self.bits_per_channel, channels
                ));
            }
        }
        Ok(())
    }
}

impl Default for StreamDescription {
    fn default() -> Self {
        Self::pcm_f32(48000.0, 2)
    }
}

impl fmt::Display for StreamDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ch, {} Hz, {}, {} bits",
            self.channels_per_frame,
            self.sample_rate,
            fourcc_string(self.format_id),
            self.bits_per_channel
        )
    }
}

/// Container type for newly created files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Wave,
    Aiff,
    Caf,
    M4a,
}

impl FileType {
    pub fn type_id(&self) -> u32 {
        match self {
            Self::Wave => fourcc(b"WAVE"),
            Self::Aiff => fourcc(b"AIFF"),
            Self::Caf => fourcc(b"caff"),
            Self::M4a => fourcc(b"m4af"),
        }
    }
}

/// Access mode for opening an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePermissions {
    Read,
    Write,
    ReadWrite,
}

impl FilePermissions {
    pub fn bits(&self) -> i8 {
        match self {
            Self::Read => 0x01,
            Self::Write => 0x02,
            Self::ReadWrite => 0x03,
        }
    }
}

/// Parameters for creating a new audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCreateOptions {
    pub file_type: FileType,
    pub format: StreamDescription,
    /// Overwrite an existing file at the destination (default: true).
    pub erase_existing: bool,
}

impl FileCreateOptions {
    pub const FLAG_ERASE_FILE: u32 = 1;

    pub fn new(file_type: FileType, format: StreamDescription) -> Self {
        Self {
            file_type,
            format,
            erase_existing: true,
        }
    }

    pub fn flags(&self) -> u32 {
        if self.erase_existing {
            Self::FLAG_ERASE_FILE
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.format.validate()
    }
}

impl Default for FileCreateOptions {
    fn default() -> Self {
        Self::new(FileType::Caf, StreamDescription::default())
    }
}
