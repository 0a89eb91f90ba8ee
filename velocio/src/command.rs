//! Named instructions and their fixed frames.
//!
//! Every frame starts with the four header bytes `56 ff ff 00`, followed by
//! the total frame length and the instruction body.
//!
//! # Frame Bodies
//!
//! ```text
//! control      f1 NN              01 play .. 06 reset
//! debug mode   f0 NN              01 exit, 02 enter
//! stop         f3
//! set output   11 01 00 01 00 00 09 01 00 00 01 00 MM 00 00 SS
//!              MM = output bit mask, SS = 00 off / 01 on
//! read bits    0a 00 NN           01..06 inputs, 07..0c outputs
//! ```

use std::fmt;
use std::str::FromStr;

use crate::FRAME_HEADER;
use crate::core::Frame;
use crate::error::Error;

/// Help section a command is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Run state and output changes.
    Control,
    /// Bit queries.
    Read,
    /// Debug mode and stepping.
    Debug,
}

impl Category {
    /// All categories, in help order.
    pub const ALL: [Category; 3] = [Category::Control, Category::Read, Category::Debug];

    /// Section heading used in help text.
    pub const fn title(&self) -> &'static str {
        match self {
            Category::Control => "Control Instructions",
            Category::Read => "Read Instructions",
            Category::Debug => "Debug Instructions",
        }
    }
}

/// One of the six digital outputs, or all of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Output {
    /// Output 1.
    One,
    /// Output 2.
    Two,
    /// Output 3.
    Three,
    /// Output 4.
    Four,
    /// Output 5.
    Five,
    /// Output 6.
    Six,
    /// Outputs 1 through 6.
    All,
}

impl Output {
    /// Bit mask selecting this output in a set-output frame.
    pub const fn mask(&self) -> u8 {
        match self {
            Output::One => 0x01,
            Output::Two => 0x02,
            Output::Three => 0x04,
            Output::Four => 0x08,
            Output::Five => 0x10,
            Output::Six => 0x20,
            Output::All => 0x3f,
        }
    }

    fn number(&self) -> u8 {
        match self {
            Output::One => 1,
            Output::Two => 2,
            Output::Three => 3,
            Output::Four => 4,
            Output::Five => 5,
            Output::Six => 6,
            Output::All => 0,
        }
    }
}

/// A named instruction understood by the PLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start the routine at the current position.
    Play,
    /// Pause the routine at the current position.
    Pause,
    /// Reset the routine to the beginning.
    Reset,
    /// Stop the routine.
    Stop,
    /// Step into the next call.
    StepInto,
    /// Step out of the current subroutine.
    StepOut,
    /// Step over the next call.
    StepOver,
    /// Put the device into debug mode.
    EnterDebug,
    /// Return the device to normal operation.
    ExitDebug,
    /// Drive an output on or off.
    SetOutput {
        /// Which output to change.
        output: Output,
        /// Target state.
        on: bool,
    },
    /// Query the input bits.
    ReadInputBits,
    /// Query the output bits.
    ReadOutputBits,
}

impl Command {
    /// Every command, in help order.
    pub const ALL: [Command; 25] = [
        Command::Play,
        Command::Pause,
        Command::Reset,
        Command::Stop,
        Command::SetOutput { output: Output::One, on: false },
        Command::SetOutput { output: Output::Two, on: false },
        Command::SetOutput { output: Output::Three, on: false },
        Command::SetOutput { output: Output::Four, on: false },
        Command::SetOutput { output: Output::Five, on: false },
        Command::SetOutput { output: Output::Six, on: false },
        Command::SetOutput { output: Output::All, on: false },
        Command::SetOutput { output: Output::One, on: true },
        Command::SetOutput { output: Output::Two, on: true },
        Command::SetOutput { output: Output::Three, on: true },
        Command::SetOutput { output: Output::Four, on: true },
        Command::SetOutput { output: Output::Five, on: true },
        Command::SetOutput { output: Output::Six, on: true },
        Command::SetOutput { output: Output::All, on: true },
        Command::ReadInputBits,
        Command::ReadOutputBits,
        Command::EnterDebug,
        Command::ExitDebug,
        Command::StepInto,
        Command::StepOut,
        Command::StepOver,
    ];

    /// The name typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::Stop => "stop",
            Command::StepInto => "step_into",
            Command::StepOut => "step_out",
            Command::StepOver => "step_over",
            Command::EnterDebug => "enter_debug",
            Command::ExitDebug => "exit_debug",
            Command::SetOutput { output, on } => match (*output, *on) {
                (Output::One, false) => "set_output_1_off",
                (Output::Two, false) => "set_output_2_off",
                (Output::Three, false) => "set_output_3_off",
                (Output::Four, false) => "set_output_4_off",
                (Output::Five, false) => "set_output_5_off",
                (Output::Six, false) => "set_output_6_off",
                (Output::All, false) => "set_output_all_off",
                (Output::One, true) => "set_output_1_on",
                (Output::Two, true) => "set_output_2_on",
                (Output::Three, true) => "set_output_3_on",
                (Output::Four, true) => "set_output_4_on",
                (Output::Five, true) => "set_output_5_on",
                (Output::Six, true) => "set_output_6_on",
                (Output::All, true) => "set_output_all_on",
            },
            Command::ReadInputBits => "read_input_bits",
            Command::ReadOutputBits => "read_output_bits",
        }
    }

    /// Help section the command belongs to.
    pub const fn category(&self) -> Category {
        match self {
            Command::Play
            | Command::Pause
            | Command::Reset
            | Command::Stop
            | Command::SetOutput { .. } => Category::Control,
            Command::ReadInputBits | Command::ReadOutputBits => Category::Read,
            Command::StepInto
            | Command::StepOut
            | Command::StepOver
            | Command::EnterDebug
            | Command::ExitDebug => Category::Debug,
        }
    }

    /// One-line help description.
    pub fn description(&self) -> String {
        match self {
            Command::Play => "start the routine at current position".into(),
            Command::Pause => "pause the routine at current position".into(),
            Command::Reset => "reset the routine to the beginning".into(),
            Command::Stop => "stop the routine".into(),
            Command::StepInto | Command::StepOut | Command::StepOver => {
                "standard procedure".into()
            }
            Command::EnterDebug => "put the device into debug mode for testing".into(),
            Command::ExitDebug => "exit the device debug mode for normal operation".into(),
            Command::SetOutput { output, on } => {
                let state = if *on { "on" } else { "off" };
                match output {
                    Output::All => format!("set all output to {}", state),
                    other => format!("set output {} to {}", other.number(), state),
                }
            }
            Command::ReadInputBits => "query the input bits and print the response".into(),
            Command::ReadOutputBits => "query the output bits and print the response".into(),
        }
    }

    /// The frames sent for this command, in order.
    pub fn frames(&self) -> Vec<Frame> {
        match self {
            Command::Play => vec![frame(&[0xf1, 0x01])],
            Command::Pause => vec![frame(&[0xf1, 0x02])],
            Command::StepInto => vec![frame(&[0xf1, 0x03])],
            Command::StepOut => vec![frame(&[0xf1, 0x04])],
            Command::StepOver => vec![frame(&[0xf1, 0x05])],
            Command::Reset => vec![frame(&[0xf1, 0x06])],
            Command::ExitDebug => vec![frame(&[0xf0, 0x01])],
            Command::EnterDebug => vec![frame(&[0xf0, 0x02])],
            Command::Stop => vec![frame(&[0xf3])],
            Command::SetOutput { output, on } => vec![frame(&[
                0x11,
                0x01,
                0x00,
                0x01,
                0x00,
                0x00,
                0x09,
                0x01,
                0x00,
                0x00,
                0x01,
                0x00,
                output.mask(),
                0x00,
                0x00,
                u8::from(*on),
            ])],
            Command::ReadInputBits => (0x01..=0x06).map(read_bits).collect(),
            Command::ReadOutputBits => (0x07..=0x0c).map(read_bits).collect(),
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let command = match name {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "reset" => Command::Reset,
            "stop" => Command::Stop,
            "step_into" => Command::StepInto,
            "step_out" => Command::StepOut,
            "step_over" => Command::StepOver,
            "enter_debug" => Command::EnterDebug,
            "exit_debug" => Command::ExitDebug,
            "set_output_1_off" => set_output(Output::One, false),
            "set_output_2_off" => set_output(Output::Two, false),
            "set_output_3_off" => set_output(Output::Three, false),
            "set_output_4_off" => set_output(Output::Four, false),
            "set_output_5_off" => set_output(Output::Five, false),
            "set_output_6_off" => set_output(Output::Six, false),
            "set_output_all_off" => set_output(Output::All, false),
            "set_output_1_on" => set_output(Output::One, true),
            "set_output_2_on" => set_output(Output::Two, true),
            "set_output_3_on" => set_output(Output::Three, true),
            "set_output_4_on" => set_output(Output::Four, true),
            "set_output_5_on" => set_output(Output::Five, true),
            "set_output_6_on" => set_output(Output::Six, true),
            "set_output_all_on" => set_output(Output::All, true),
            "read_input_bits" => Command::ReadInputBits,
            "read_output_bits" => Command::ReadOutputBits,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const fn set_output(output: Output, on: bool) -> Command {
    Command::SetOutput { output, on }
}

fn read_bits(register: u8) -> Frame {
    frame(&[0x0a, 0x00, register])
}

/// Prefixes `body` with the header and the total frame length.
fn frame(body: &[u8]) -> Frame {
    let total = FRAME_HEADER.len() + 1 + body.len();
    let mut bytes = Vec::with_capacity(total);
    bytes.extend_from_slice(&FRAME_HEADER);
    bytes.push(total as u8);
    bytes.extend_from_slice(body);
    Frame::new(bytes)
}
