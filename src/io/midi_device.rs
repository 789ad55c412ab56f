use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{channel, Receiver};
use tracing::{debug, info};

use crate::error::InputError;
use crate::io::midi::MidiEvent;

const CLIENT_NAME: &str = "saavy-keys";

/// Which MIDI input port to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelector {
    /// Position in the port list.
    Index(usize),
    /// First port whose name contains this text.
    Name(String),
}

impl Default for PortSelector {
    fn default() -> Self {
        // Port 0 is usually the system "through" port
        PortSelector::Index(1)
    }
}

impl FromStr for PortSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => PortSelector::Index(index),
            Err(_) => PortSelector::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for PortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelector::Index(i) => write!(f, "#{i}"),
            PortSelector::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Names of the available MIDI input ports, in index order.
pub fn list_ports() -> Result<Vec<String>, InputError> {
    let midi_in = MidiInput::new(CLIENT_NAME).map_err(|e| InputError::Device(e.to_string()))?;
    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|port| midi_in.port_name(port).ok())
        .collect())
}

/// An open MIDI input. Dropping it closes the port, which disconnects the
/// paired event receiver.
pub struct MidiInputDevice {
    name: String,
    _connection: MidiInputConnection<()>,
}

impl MidiInputDevice {
    /// Open the selected port. Parsed events arrive on the returned
    /// receiver; messages that do not parse are dropped.
    pub fn connect(selector: &PortSelector) -> Result<(Self, Receiver<MidiEvent>), InputError> {
        let mut midi_in =
            MidiInput::new(CLIENT_NAME).map_err(|e| InputError::Device(e.to_string()))?;
        midi_in.ignore(Ignore::All);

        let port = select_port(&midi_in, selector)?;
        let name = midi_in
            .port_name(&port)
            .map_err(|e| InputError::Device(e.to_string()))?;

        let (sender, receiver) = channel();
        let connection = midi_in
            .connect(
                &port,
                "saavy-keys-input",
                move |_stamp, message, _| match MidiEvent::from_bytes(message) {
                    Some(event) => {
                        let _ = sender.send(event);
                    }
                    None => debug!(?message, "ignoring MIDI message"),
                },
                (),
            )
            .map_err(|e| InputError::Device(e.to_string()))?;

        info!(port = %name, "opened MIDI input");
        Ok((
            Self {
                name,
                _connection: connection,
            },
            receiver,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn select_port(midi_in: &MidiInput, selector: &PortSelector) -> Result<MidiInputPort, InputError> {
    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err(InputError::Device("no MIDI input ports found".into()));
    }

    let port = match selector {
        PortSelector::Index(index) => ports.get(*index),
        PortSelector::Name(name) => ports.iter().find(|port| {
            midi_in
                .port_name(port)
                .is_ok_and(|port_name| port_name.contains(name.as_str()))
        }),
    };
    port.cloned()
        .ok_or_else(|| InputError::Device(format!("MIDI input port {selector} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_selector_parsing() {
        assert_eq!("2".parse(), Ok(PortSelector::Index(2)));
        assert_eq!(" 0 ".parse(), Ok(PortSelector::Index(0)));
        assert_eq!(
            "Launchkey".parse(),
            Ok(PortSelector::Name("Launchkey".to_string()))
        );
    }

    #[test]
    fn test_port_selector_display() {
        assert_eq!(PortSelector::Index(1).to_string(), "#1");
        assert_eq!(PortSelector::Name("KeyStep".into()).to_string(), "'KeyStep'");
        assert_eq!(PortSelector::default(), PortSelector::Index(1));
    }
}
