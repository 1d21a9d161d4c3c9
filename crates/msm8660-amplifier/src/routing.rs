//! Input-device to hardware-path routing
//!
//! The A2220 only does useful work on voice-call capture paths; everything
//! else parks it in suspend.

/// Host call mode, as reported by the audio framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    Normal,
    Ringtone,
    InCall,
    InCommunication,
}

/// Capture-path devices the audio framework can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    VoipHandsetMic,
    SpeakerDmic,
    SpeakerDmicAec,
    SpeakerDmicNs,
    SpeakerDmicAecNs,
    VoipSpeakerMic,
    VoipHeadsetMic,
    Other,
}

/// A2220 hardware routing codes, in the kernel header's enum order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AmpPath {
    Suspend = 0,
    IncallReceiverNsOn = 1,
    IncallReceiverNsOff = 2,
    IncallHeadset = 3,
    IncallSpeaker = 4,
}

impl AmpPath {
    /// Numeric code carried by the SET_CONFIG ioctl.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Compute the hardware path for an input device enable/disable request.
///
/// The handset mic path carries no enable gate: the driver keeps receiver
/// noise suppression configured for the whole call.
pub(crate) fn route_input(mode: AudioMode, device: InputDevice, enable: bool) -> AmpPath {
    if mode != AudioMode::InCall && mode != AudioMode::InCommunication {
        return AmpPath::Suspend;
    }

    match device {
        InputDevice::VoipHandsetMic => AmpPath::IncallReceiverNsOn,
        InputDevice::SpeakerDmic
        | InputDevice::SpeakerDmicAec
        | InputDevice::SpeakerDmicNs
        | InputDevice::SpeakerDmicAecNs
        | InputDevice::VoipSpeakerMic
            if enable =>
        {
            AmpPath::IncallSpeaker
        }
        InputDevice::VoipHeadsetMic if enable => AmpPath::IncallHeadset,
        _ => AmpPath::Suspend,
    }
}
