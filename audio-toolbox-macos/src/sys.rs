//! Raw AudioToolbox and CoreFoundation declarations.
//!
//! Only the create and dispose primitives the wrappers need are declared.

#![allow(non_snake_case)]

use std::ffi::c_void;

use audio_toolbox_core::StreamDescription;

pub type OSStatus = i32;
pub type Boolean = u8;
pub type CFIndex = isize;

pub type AudioConverterRef = *mut c_void;
pub type AudioFileID = *mut c_void;
pub type ExtAudioFileRef = *mut c_void;
pub type AUGraph = *mut c_void;

pub type CFAllocatorRef = *const c_void;
pub type CFURLRef = *const c_void;

#[link(name = "AudioToolbox", kind = "framework")]
extern "C" {
    pub fn AudioConverterNew(
        inSourceFormat: *const StreamDescription,
        inDestinationFormat: *const StreamDescription,
        outAudioConverter: *mut AudioConverterRef,
    ) -> OSStatus;

    pub fn AudioConverterDispose(inAudioConverter: AudioConverterRef) -> OSStatus;

    pub fn AudioFileOpenURL(
        inFileRef: CFURLRef,
        inPermissions: i8,
        inFileTypeHint: u32,
        outAudioFile: *mut AudioFileID,
    ) -> OSStatus;

    pub fn AudioFileCreateWithURL(
        inFileRef: CFURLRef,
        inFileType: u32,
        inFormat: *const StreamDescription,
        inFlags: u32,
        outAudioFile: *mut AudioFileID,
    ) -> OSStatus;

    pub fn AudioFileClose(inAudioFile: AudioFileID) -> OSStatus;

    pub fn ExtAudioFileOpenURL(inURL: CFURLRef, outExtAudioFile: *mut ExtAudioFileRef) -> OSStatus;

    pub fn ExtAudioFileWrapAudioFileID(
        inFileID: AudioFileID,
        inForWriting: Boolean,
        outExtAudioFile: *mut ExtAudioFileRef,
    ) -> OSStatus;

    pub fn ExtAudioFileCreateWithURL(
        inURL: CFURLRef,
        inFileType: u32,
        inStreamDesc: *const StreamDescription,
        inChannelLayout: *const c_void,
        inFlags: u32,
        outExtAudioFile: *mut ExtAudioFileRef,
    ) -> OSStatus;

    pub fn ExtAudioFileDispose(inExtAudioFile: ExtAudioFileRef) -> OSStatus;

    pub fn NewAUGraph(outGraph: *mut AUGraph) -> OSStatus;

    pub fn DisposeAUGraph(inGraph: AUGraph) -> OSStatus;
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub fn CFURLCreateFromFileSystemRepresentation(
        allocator: CFAllocatorRef,
        buffer: *const u8,
        bufLen: CFIndex,
        isDirectory: Boolean,
    ) -> CFURLRef;

    pub fn CFRelease(cf: *const c_void);
}
