use duet_usb::channels::MixerChannel;
use duet_usb::duet::DuetState;
use duet_usb::input::Input;
use duet_usb::output::Output;
use duet_usb::types::State;

fn toggle(name: &str, state: State) -> String {
    match state {
        State::Enabled => format!("[{}]", name),
        State::Disabled => format!(" {} ", name),
    }
}

pub fn describe_input(input: &Input) -> String {
    let mut line = format!("Input {}: {:<10}", input.number(), input.input_type().to_string());
    match (input.level(), input.level_range()) {
        (Some(level), Some(range)) => {
            line.push_str(&format!(" gain {:>2} ({}-{})", level, range.start(), range.end()))
        }
        _ => line.push_str(&format!(" {:<15}", "")),
    }
    if let Some(phantom) = input.phantom_power() {
        line.push_str(&toggle("48V", phantom));
    }
    line.push_str(&toggle("Phase", input.phase()));
    line.push_str(&toggle("Soft Limit", input.soft_limit()));
    line.push_str(&toggle("Group", input.group()));
    line
}

pub fn describe_output(output: &Output) -> String {
    let mut line = format!(
        "{:<10} {:>3} dB from {:<5}",
        output.output_type().to_string(),
        output.level(),
        output.source().to_string()
    );
    if let Some(line_level) = output.speaker_output_type() {
        line.push_str(&format!(" line level {}", line_level));
    }
    line.push_str(&toggle("Mute", output.mute()));
    line.push_str(&toggle("Dim", output.dim()));
    line.push_str(&toggle("Mono", output.mono()));
    line
}

pub fn describe_channel(channel: &MixerChannel) -> String {
    let mut line = format!(
        "Mixer {} {:<15} {:>3} dB",
        channel.index() + 1,
        channel.channel_type().to_string(),
        channel.level()
    );
    if let Some(pan) = channel.pan() {
        line.push_str(&format!(" pan {:>3}", pan));
    }
    if let Some(source) = channel.source() {
        line.push_str(&format!(" from {}", source));
    }
    if let Some(mute) = channel.mute() {
        line.push_str(&toggle("Mute", mute));
    }
    if let Some(solo) = channel.solo() {
        line.push_str(&toggle("Solo", solo));
    }
    line
}

pub fn print_state(state: &DuetState) {
    state
        .inputs
        .iter()
        .for_each(|input| println!("{}", describe_input(input)));
    state
        .outputs
        .iter()
        .for_each(|output| println!("{}", describe_output(output)));
    state
        .mixer
        .iter()
        .for_each(|channel| println!("{}", describe_channel(channel)));
}
