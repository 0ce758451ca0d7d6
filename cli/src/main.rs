mod cli;
mod status;

use crate::cli::{Cli, InputCommands, MixerCommands, OutputCommands, SubCommands};
use crate::status::{describe_channel, describe_input, describe_output, print_state};
use anyhow::{Context, Result};
use clap::Parser;
use duet_usb::duet::Duet;
use log::debug;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::time::Duration;

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();

    TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Unable to start the logger")?;

    let timeout = Duration::from_millis(cli.timeout_ms);
    let mut duet = Duet::open_with_timeout(timeout).context("Unable to connect to the Apogee Duet")?;
    debug!("Running {:?}", cli.command);

    match cli.command {
        SubCommands::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(duet.state())?);
            } else {
                let usb = duet.transport();
                let product = usb
                    .usb_device_product_name()
                    .unwrap_or_else(|_| String::from("Apogee Duet"));
                println!(
                    "{} on bus {} address {}",
                    product,
                    usb.usb_bus_number(),
                    usb.usb_address()
                );
                print_state(duet.state());
            }
        }
        SubCommands::Input { input, command } => {
            let index = usize::from(input - 1);
            match command {
                InputCommands::Type { input_type } => duet.set_input_type(index, input_type)?,
                InputCommands::Gain { level } => duet.set_input_level(index, level)?,
                InputCommands::PhantomPower => duet.toggle_phantom_power(index)?,
                InputCommands::Phase => duet.toggle_phase(index)?,
                InputCommands::SoftLimit => duet.toggle_soft_limit(index)?,
                InputCommands::Group => duet.toggle_input_group(index)?,
            }
            duet.inputs()
                .iter()
                .for_each(|input| println!("{}", describe_input(input)));
        }
        SubCommands::Output { output, command } => {
            let index = output as usize;
            match command {
                OutputCommands::Volume { level } => duet.set_output_level(index, level)?,
                OutputCommands::Source { source } => duet.set_output_source(index, source)?,
                OutputCommands::LineLevel { line_level } => {
                    duet.set_speaker_output_type(index, line_level)?
                }
                OutputCommands::Mute => duet.toggle_output_mute(index)?,
                OutputCommands::Dim => duet.toggle_dim(index)?,
                OutputCommands::Mono => duet.toggle_mono(index)?,
            }
            println!("{}", describe_output(&duet.outputs()[index]));
        }
        SubCommands::Mixer { channel, command } => {
            let index = usize::from(channel - 1);
            match command {
                MixerCommands::Level { level } => duet.set_channel_level(index, level)?,
                MixerCommands::Pan { pan } => duet.set_pan(index, pan)?,
                MixerCommands::Source { source } => {
                    duet.set_software_return_source(index, source)?
                }
                MixerCommands::Mute => duet.toggle_channel_mute(index)?,
                MixerCommands::Solo => duet.toggle_channel_solo(index)?,
            }
            println!("{}", describe_channel(&duet.mixer_channels()[index]));
        }
    }

    Ok(())
}
