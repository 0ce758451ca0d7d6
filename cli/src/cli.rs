use clap::{Parser, Subcommand, ValueEnum};
use duet_types::{InputType, OutputSource, OutputType, SoftwareReturnSource, SpeakerOutputType};
use simplelog::LevelFilter;

#[derive(Parser, Debug)]
#[command(about, version, author)]
pub struct Cli {
    /// How long to wait for each USB transfer before giving up, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// How much to log to the terminal
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// Show every input, output and mixer channel
    Status {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configure one of the analog inputs
    Input {
        /// The input, as numbered on the breakout cable
        #[arg(value_parser = clap::value_parser!(u16).range(1..=2))]
        input: u16,

        #[command(subcommand)]
        command: InputCommands,
    },

    /// Configure the speaker or headphone output
    Output {
        #[arg(value_enum)]
        output: OutputType,

        #[command(subcommand)]
        command: OutputCommands,
    },

    /// Configure a mixer channel (1 and 2 are the inputs, 3 the software return, 4 the master)
    Mixer {
        #[arg(value_parser = clap::value_parser!(u16).range(1..=4))]
        channel: u16,

        #[command(subcommand)]
        command: MixerCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum InputCommands {
    /// Change the input type, this ungroups the inputs
    Type {
        #[arg(value_enum)]
        input_type: InputType,
    },

    /// Set the gain (0-75 for microphones, 0-65 for instruments)
    Gain { level: u8 },

    /// Toggle 48V phantom power (microphones only)
    PhantomPower,

    /// Toggle phase inversion
    Phase,

    /// Toggle the soft limiter
    SoftLimit,

    /// Toggle grouping of both inputs
    Group,
}

#[derive(Subcommand, Debug)]
pub enum OutputCommands {
    /// Set the output volume (-64 to 0)
    Volume {
        #[arg(allow_negative_numbers = true)]
        level: i8,
    },

    /// Choose what plays through this output
    Source {
        #[arg(value_enum)]
        source: OutputSource,
    },

    /// Set the speaker line level, applied to both speaker channels
    LineLevel {
        #[arg(value_enum)]
        line_level: SpeakerOutputType,
    },

    /// Toggle mute
    Mute,

    /// Toggle dim
    Dim,

    /// Toggle summing to mono
    Mono,
}

#[derive(Subcommand, Debug)]
pub enum MixerCommands {
    /// Set the channel level (-48 to 6)
    Level {
        #[arg(allow_negative_numbers = true)]
        level: i8,
    },

    /// Set the pan of an input channel (-64 to 64)
    Pan {
        #[arg(allow_negative_numbers = true)]
        pan: i8,
    },

    /// Choose the playback pair fed into the software return
    Source {
        #[arg(value_enum)]
        source: SoftwareReturnSource,
    },

    /// Toggle mute
    Mute,

    /// Toggle solo
    Solo,
}
